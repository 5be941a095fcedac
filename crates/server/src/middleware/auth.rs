//! # Authentication Middleware
//!
//! JWT authentication middleware for protecting API endpoints.

use std::str::FromStr;

use auth::jwt::{extract_bearer_token, validate_token, JwtError};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use entity::sea_orm_active_enums::UserRole;
use serde_json::json;

use crate::AppState;

/// User information extracted from a validated JWT token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID
    pub id:         String,
    /// User email
    pub email:      String,
    /// Account role
    pub role:       UserRole,
    /// Company the account is scoped to, if any
    pub company_id: Option<String>,
}

/// Authentication middleware
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the JWT token structurally (signature, issuer, audience,
///    expiry) — a credential stays valid until this verification fails
/// 3. Adds the resolved [`AuthenticatedUser`] to request extensions
/// 4. Rejects requests with invalid or missing tokens
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let auth_header = match request.headers().get(header::AUTHORIZATION) {
        Some(value) => {
            match value.to_str() {
                Ok(h) => h,
                Err(_) => {
                    return create_auth_error_response("Invalid authorization header encoding");
                },
            }
        },
        None => {
            return create_auth_error_response("Missing authorization header");
        },
    };

    let token = match extract_bearer_token(auth_header) {
        Some(token) => token,
        None => {
            return create_auth_error_response("Invalid authorization header format");
        },
    };

    let claims = match validate_token(&state.jwt_config, &token) {
        Ok(claims) => claims,
        Err(JwtError::Expired) => {
            return create_auth_error_response("Token has expired");
        },
        Err(JwtError::InvalidSignature) => {
            return create_auth_error_response("Invalid token signature");
        },
        Err(_) => {
            return create_auth_error_response("Invalid token");
        },
    };

    let role = match UserRole::from_str(&claims.role) {
        Ok(role) => role,
        Err(_) => {
            return create_auth_error_response("Invalid token");
        },
    };

    let user = AuthenticatedUser {
        id: claims.sub,
        email: claims.email,
        role,
        company_id: claims.company,
    };

    request.extensions_mut().insert(user);

    next.run(request).await
}

/// Create a standardized authentication error response
fn create_auth_error_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({
            "success": false,
            "code": "UNAUTHORIZED",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use auth::jwt::extract_bearer_token;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token("Bearer abc123"),
            Some("abc123".to_string())
        );
        assert!(extract_bearer_token("Basic abc123").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("").is_none());
    }
}
