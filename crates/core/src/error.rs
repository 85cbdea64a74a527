use lightscope_api::{ApiError, Cancelled};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LightscopeError>;
