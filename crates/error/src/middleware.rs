//! # Error Handling Middleware
//!
//! Converts [`AppError`] values into JSON HTTP responses.
//!
//! ## Usage
//!
//! ```rust
//! use error::{middleware::ErrorHandler, AppError};
//!
//! let handler = ErrorHandler::new(false);
//! let error = AppError::not_found("Product not found");
//! let response = handler.to_response(&error);
//! ```

use axum::{body::Body, http::StatusCode, response::Response};

use crate::{response::ErrorBody, AppError};

/// Error handler that converts errors to HTTP responses.
#[derive(Clone)]
pub struct ErrorHandler {
    /// Whether to include server-error details in responses.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Convert an error to a response.
    ///
    /// Client errors (4xx) always carry their real message; server errors
    /// (5xx) are masked unless `include_details` is set.
    pub fn to_response(&self, err: &AppError) -> Response {
        let status = err.status();
        let message = if err.expose_message() || self.include_details {
            err.message()
        }
        else {
            tracing::error!(code = err.code(), error = %err, "Request failed");
            "Internal server error".to_string()
        };

        let body = ErrorBody::new(err.code(), message);
        let payload = serde_json::to_string(&body)
            .unwrap_or_else(|_| r#"{"success":false,"code":"INTERNAL_ERROR","message":"Internal server error"}"#.to_string());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(payload))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Body::empty());
                *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> Response {
        let handler = ErrorHandler::new(false);
        handler.to_response(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_handler_not_found() {
        let handler = ErrorHandler::new(false);
        let err = AppError::not_found("Order not found");
        let response = handler.to_response(&err);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_error_handler_masks_server_errors() {
        let handler = ErrorHandler::new(false);
        let err = AppError::database("connection refused to 10.0.0.5");
        let response = handler.to_response(&err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_handler_with_details() {
        let handler = ErrorHandler::new(true);
        let err = AppError::internal("detailed message");
        let response = handler.to_response(&err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_into_response_body_shape() {
        use axum::response::IntoResponse;

        let err = AppError::bad_request("Insufficient stock for Woven Basket");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "Insufficient stock for Woven Basket");
    }
}
