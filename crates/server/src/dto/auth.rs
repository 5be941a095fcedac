//! # Authentication Data Transfer Objects
//!
//! Request and response types for registration and login.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a new account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name:     String,
    /// Email address, stored lowercase
    #[validate(email(message = "Please enter a valid email"))]
    pub email:    String,
    /// Password, at least 6 characters
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Requested role: `user` or `seller`
    #[validate(length(min = 1, message = "Role is required"))]
    pub role:     String,
}

/// Request to log in
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Please enter a valid email"))]
    pub email:    String,
    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account summary returned from auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// User's unique identifier
    pub id:         String,
    /// Display name
    pub name:       String,
    /// Email address
    pub email:      String,
    /// Account role
    pub role:       String,
    /// Approval status
    pub status:     String,
    /// Company the account is scoped to, if any
    pub company_id: Option<String>,
}

/// Response for successful registration or login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSuccessResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Bearer token for subsequent requests
    pub token:   String,
    /// The authenticated account
    pub user:    AccountSummary,
}

/// Generic success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            name:     "Amina".to_string(),
            email:    "amina@example.com".to_string(),
            password: "secret1".to_string(),
            role:     "seller".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_short_password() {
        let req = RegisterRequest {
            name:     "Amina".to_string(),
            email:    "amina@example.com".to_string(),
            password: "abc".to_string(),
            role:     "user".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_collects_all_errors() {
        let req = RegisterRequest {
            name:     String::new(),
            email:    "not-an-email".to_string(),
            password: "abc".to_string(),
            role:     String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 4);
    }

    #[test]
    fn test_login_request_requires_email() {
        let req = LoginRequest {
            email:    "nope".to_string(),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
