//! Error types for the passfile-store crate.
//!
//! All store subsystems surface errors through [`StoreError`], which is the
//! single error type returned by every public API in this crate. A user
//! lookup miss is deliberately NOT an error: `verify` returns `false` and
//! `delete` is a no-op in that case.

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    // -- Record errors ------------------------------------------------------
    /// A stored line has no `:` separator. Fatal for the whole load:
    /// silently dropping the line would lock out whoever it belonged to.
    #[error("malformed record at line {line}: missing ':' separator")]
    MalformedRecord { line: usize },

    /// An identity token could not be decoded back into a username.
    #[error("invalid identity token {token:?}: {reason}")]
    InvalidIdentityToken { token: String, reason: String },

    /// A stored hash token is not in the expected `salt:hash` layout.
    #[error("invalid hash token: {reason}")]
    InvalidHashToken { reason: String },

    // -- Crypto errors ------------------------------------------------------
    /// Salt generation failed (RNG unavailable).
    #[error("hashing failed: {reason}")]
    HashingFailed { reason: String },

    // -- Underlying errors --------------------------------------------------
    /// I/O error from the filesystem (read, rewrite, metadata query).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
