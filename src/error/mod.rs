//! Error handling module for QuiClip

use thiserror::Error;

/// Main error type for QuiClip operations
#[derive(Error, Debug)]
pub enum QuiClipError {
    /// Invalid request (empty list, inverted time range, ...)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// External media binary missing from PATH
    #[error("{tool} was not found. Install it and make sure it is on PATH")]
    ToolUnavailable { tool: String },

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    Probe { message: String },

    /// ffmpeg subprocess exited non-zero; stderr is carried verbatim
    #[error("{context}: {stderr}")]
    MediaTool { context: String, stderr: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuiClipError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        QuiClipError::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for QuiClip operations
pub type QuiClipResult<T> = std::result::Result<T, QuiClipError>;
