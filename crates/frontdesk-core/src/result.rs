//! Convenience result type alias for Frontdesk.

use crate::error::AppError;

/// A specialized `Result` type for Frontdesk operations.
pub type AppResult<T> = Result<T, AppError>;
