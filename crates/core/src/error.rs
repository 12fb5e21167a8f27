//! Error types for the bugshake-core library.
//!
//! Failures inside the report flow are logged and absorbed rather than
//! surfaced to the host; these variants cover the seams a host may call
//! directly, such as draft assembly and prompt presentation.

use thiserror::Error;

/// Errors that can occur while preparing or presenting a bug report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// No recipient addresses were configured for the report.
    #[error("No recipients configured for bug reports")]
    MissingRecipients,

    /// Screen capture operation failed.
    #[error("Screen capture failed: {0}")]
    ScreenCapture(String),

    /// The captured screenshot could not be encoded for attachment.
    #[error("Image encoding failed: {0}")]
    ImageEncoding(String),

    /// UI-related errors (window creation, event loop).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Creates a screen capture error with the given message.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::ScreenCapture(msg.into())
    }

    /// Creates an image encoding error with the given message.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::ImageEncoding(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }
}

/// A convenient alias for Result with [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;
