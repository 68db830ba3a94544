//! Error types.
//!
//! UI operations never fail: they no-op and log. Errors only surface when
//! loading configuration, computing section layout, and when validating the
//! contact form.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),
}

/// First failing contact form rule.
///
/// `Display` is the message shown inline to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid name.")]
    Name,

    #[error("Please enter a valid email address.")]
    Email,

    #[error("Please enter a subject.")]
    Subject,

    #[error("Please enter a message (at least 10 characters).")]
    Message,
}
