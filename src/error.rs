//! Error types and handling infrastructure for navflow.
//!
//! The coordinator engine deliberately has a very small error surface: almost
//! every operation is a structural mutation that either applies or is a
//! guarded no-op, and lookups return `Option` instead of failing. The
//! variants below cover the genuinely fallible edges: decoding an opaque
//! host path blob and constructing the UI runtime.

use thiserror::Error;

/// The main error type for navflow operations.
#[derive(Error, Debug)]
pub enum NavError {
    /// The host-supplied path blob did not parse as the canonical encoding.
    ///
    /// This is recoverable by design: identity matching falls back to
    /// substring containment on the raw blob.
    #[error("Invalid host path encoding: {message}")]
    InvalidPathEncoding { message: String },

    /// Building the single-threaded UI runtime failed.
    #[error("UI runtime construction failed")]
    Runtime {
        #[source]
        source: std::io::Error,
    },
}

/// Standard Result type for navflow operations.
pub type Result<T> = std::result::Result<T, NavError>;

impl NavError {
    /// Create an InvalidPathEncoding error with a descriptive message
    pub fn path_encoding(message: impl Into<String>) -> Self {
        Self::InvalidPathEncoding {
            message: message.into(),
        }
    }

    /// Create a Runtime error from the underlying io::Error
    pub fn runtime(source: std::io::Error) -> Self {
        Self::Runtime { source }
    }
}
