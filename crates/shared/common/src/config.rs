//! Environment-backed configuration helpers.
//!
//! Each service owns a typed config struct; these helpers keep the
//! `from_env` constructors short and make a malformed value an error
//! instead of a silent fallback.

use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// First non-empty value among `keys`, in order.
pub fn env_var(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

/// First non-empty value among `keys`, or `default`.
pub fn env_or(keys: &[&str], default: &str) -> String {
    env_var(keys).unwrap_or_else(|| default.to_string())
}

/// Parse the first non-empty value among `keys`, or return `default`.
///
/// # Errors
/// Returns a config error when a value is present but does not parse.
pub fn env_parse<T: FromStr>(keys: &[&str], default: T) -> AppResult<T> {
    match env_var(keys) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::config(format!("{} has an invalid value: {}", keys[0], raw))
        }),
        None => Ok(default),
    }
}

/// The first non-empty value among `keys`.
///
/// # Errors
/// Returns a config error naming the primary key when none is set.
pub fn env_required(keys: &[&str]) -> AppResult<String> {
    env_var(keys).ok_or_else(|| AppError::config(format!("{} must be set", keys[0])))
}
