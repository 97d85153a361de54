//! Common error types used throughout playshell.

/// Common error type for playshell.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An external tool (the playback engine) could not be run.
    #[error("{tool}: {message}")]
    Tool { tool: String, message: String },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A settings store could not be read or written.
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid input or configuration.
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl Error {
    /// Create a new Tool error.
    pub fn tool<T: Into<String>, M: Into<String>>(tool: T, message: M) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a new Store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        Self::Store(msg.into())
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
