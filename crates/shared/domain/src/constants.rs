//! Domain-level constants.
//!
//! These constants define business rules and protocol values.

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length requirement (after trimming)
pub const MIN_NAME_LENGTH: usize = 1;

// =============================================================================
// Session tokens
// =============================================================================

/// Default session token lifetime in seconds
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// Longest accepted session token lifetime in seconds (one year)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 3600;

/// Minimum token signing secret length in bytes
pub const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Signature algorithm announced in the token header
pub const TOKEN_ALGORITHM: &str = "HS256";

/// Token type announced in the token header
pub const TOKEN_TYPE: &str = "JWT";

// =============================================================================
// Messages
// =============================================================================

/// Conflict message when an email is already taken
pub const EMAIL_TAKEN_MESSAGE: &str = "email already registered";
