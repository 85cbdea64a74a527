#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: &'static str },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Raised by a [`crate::DescriptorResolver`] when the analysis it depends on
/// was cancelled. Never recovered from: callers propagate it as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("analysis was cancelled")]
pub struct Cancelled;
