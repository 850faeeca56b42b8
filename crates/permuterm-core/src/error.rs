//! Error types for `permuterm`.
//!
//! The key algorithms themselves are infallible: invariant violations inside
//! them panic. This enum covers the byte and host boundary, where input comes
//! from outside the crate and can be wrong.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for `permuterm` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at the `permuterm` boundary.
///
/// Error codes follow the pattern `PERM-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Key bytes do not form a valid key (PERM-001).
    #[error("[PERM-001] Malformed key: {0}")]
    MalformedKey(String),

    /// Text contains the reserved sentinel byte (PERM-002).
    #[error("[PERM-002] Text contains the reserved sentinel byte at offset {position}")]
    ReservedSentinel {
        /// Byte offset of the first sentinel.
        position: usize,
    },

    /// Document ID does not fit the posting lists (PERM-003).
    #[error("[PERM-003] Document ID {0} exceeds u32::MAX")]
    DocIdOutOfRange(u64),

    /// Configuration error (PERM-004).
    #[error("[PERM-004] Configuration error: {0}")]
    Config(String),

    /// IO error (PERM-005).
    #[error("[PERM-005] IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the error code (e.g., "PERM-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedKey(_) => "PERM-001",
            Self::ReservedSentinel { .. } => "PERM-002",
            Self::DocIdOutOfRange(_) => "PERM-003",
            Self::Config(_) => "PERM-004",
            Self::Io(_) => "PERM-005",
        }
    }

    /// Returns true if this error is recoverable.
    ///
    /// A malformed stored key means the index content is corrupted.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MalformedKey(_))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
