//! # Error Traits
//!
//! Conversion traits for error handling.

use crate::{AppError, Result};

/// Trait for adding context to fallible operations.
pub trait Context<T> {
    fn with_context<C: ToString>(self, context: C) -> Result<T>;
}

/// Extension methods for Result types.
pub trait ResultExt<T> {
    fn with_context<C: ToString>(self, context: C) -> Result<T>;
    fn context<C: ToString>(self, context: C) -> Result<T>
    where
        Self: Sized;
    fn log_error(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<C: ToString>(self, context: C) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            err.context(context)
        })
    }

    fn context<C: ToString>(self, context: C) -> Result<T>
    where
        Self: Sized,
    {
        self.with_context(context)
    }

    fn log_error(self) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            tracing::error!(error = %err, "Error occurred");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context() {
        let result: Result<i32> = Err(AppError::not_found("Company"));
        let result = result.context("Approving company");

        let err = result.unwrap_err();
        assert_eq!(err.message(), "Approving company: Company");
    }

    #[test]
    fn test_with_context_preserves_status() {
        let result: Result<i32> = Err(AppError::forbidden("wrong company"));
        let err = result.with_context("Updating order").unwrap_err();
        assert_eq!(err.status(), http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_log_error_passes_through() {
        let result: Result<i32> = Err(AppError::bad_request("nope"));
        assert!(result.log_error().is_err());

        let ok: Result<i32> = Ok(7);
        assert_eq!(ok.log_error().unwrap(), 7);
    }
}
