//! Convenience result type alias for Hydrate.

use crate::error::AppError;

/// A specialized `Result` type for Hydrate operations.
pub type AppResult<T> = Result<T, AppError>;
