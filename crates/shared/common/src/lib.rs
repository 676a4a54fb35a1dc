//! Common utilities shared across the identity crates.
//!
//! This crate provides:
//! - The application error type and its HTTP mapping
//! - Environment-backed configuration helpers

pub mod config;
pub mod error;

pub use error::{AppError, AppResult, OptionExt};
