//! Utilities: error envelope, logging, money helpers

pub mod error;
pub mod logger;
pub mod money;

pub use error::{AppError, AppResponse, ok, ok_with_message};

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
