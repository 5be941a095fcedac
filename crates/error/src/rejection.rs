//! # Rejection Handlers
//!
//! Converts Axum extractor rejections into the standard API error format.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::response::ErrorBody;

/// Handle JSON deserialization errors.
///
/// Catches errors like "missing field `name`" and returns them in the
/// standard `{success, code, message}` format.
pub fn handle_json_rejection(rejection: JsonRejection) -> Response {
    let raw = rejection.to_string();

    // Rewrite serde's "missing field `x` at line 1 column 2" into something
    // a storefront can show directly
    let message = match extract_missing_field(&raw) {
        Some(field) => format!("Missing required field: {}", field),
        None => raw,
    };

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody::new("BAD_REQUEST", message)),
    )
        .into_response()
}

/// Handle query string deserialization errors.
pub fn handle_query_rejection(rejection: QueryRejection) -> Response {
    let message = format!("Invalid query string: {}", rejection);

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody::new("BAD_REQUEST", message)),
    )
        .into_response()
}

/// Pull the field name out of a serde "missing field" message.
fn extract_missing_field(message: &str) -> Option<&str> {
    let start = message.find("missing field `")? + "missing field `".len();
    let rest = &message[start ..];
    let end = rest.find('`')?;
    Some(&rest[.. end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_missing_field() {
        assert_eq!(
            extract_missing_field("Failed to deserialize: missing field `name` at line 1 column 2"),
            Some("name")
        );
    }

    #[test]
    fn test_extract_missing_field_absent() {
        assert_eq!(extract_missing_field("expected value at line 1"), None);
        assert_eq!(extract_missing_field("missing field `unterminated"), None);
    }
}
