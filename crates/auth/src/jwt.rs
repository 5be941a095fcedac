//! JWT token management for API authentication.

use std::{
    collections::HashSet,
    time::{Duration, SystemTime},
};

use cuid2::CuidConstructor;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::Principal;

/// JWT signing configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Base64-encoded HMAC secret
    pub secret:             String,
    /// Access-token lifetime in seconds
    pub expiration_seconds: u64,
    /// Token issuer
    pub issuer:             String,
    /// Token audience
    pub audience:           String,
}

/// Errors produced while creating or validating tokens.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// User email
    pub email: String,

    /// Account role (user, seller, company_moderator, admin)
    pub role: String,

    /// Company the account is scoped to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Token issuer
    pub iss: String,

    /// Token audience
    pub aud: String,

    /// Expiration time (Unix timestamp)
    pub exp: u64,

    /// Issued at (Unix timestamp)
    pub iat: u64,

    /// Unique token ID
    pub jti: String,
}

/// Creates a new JWT access token for an authenticated principal.
///
/// # Errors
///
/// Returns an error if the secret is not valid base64 or encoding fails.
pub fn create_access_token(config: &JwtConfig, principal: &Principal) -> Result<String, JwtError> {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| JwtError::Encoding(format!("Failed to get current time: {}", e)))?;

    let issued_at = now.as_secs();
    let expires_at = (now + Duration::from_secs(config.expiration_seconds)).as_secs();

    let claims = Claims {
        sub:     principal.id.clone(),
        email:   principal.email.clone(),
        role:    principal.role.to_string(),
        company: principal.company_id.clone(),
        iss:     config.issuer.clone(),
        aud:     config.audience.clone(),
        exp:     expires_at,
        iat:     issued_at,
        jti:     CuidConstructor::new().with_length(32).create_id(),
    };

    let key = EncodingKey::from_base64_secret(&config.secret)
        .map_err(|e| JwtError::Encoding(format!("Invalid JWT secret: {}", e)))?;

    jsonwebtoken::encode(&Header::default(), &claims, &key)
        .map_err(|e| JwtError::Encoding(format!("Failed to encode token: {}", e)))
}

/// Validates a JWT token and returns its claims.
///
/// Issuer, audience and expiry are all pinned. A credential stays valid
/// until this structural verification fails; there is no revocation list.
///
/// # Errors
///
/// Returns a [`JwtError`] describing the validation failure.
pub fn validate_token(config: &JwtConfig, token: &str) -> Result<Claims, JwtError> {
    let decoding_key = DecodingKey::from_base64_secret(&config.secret)
        .map_err(|e| JwtError::Invalid(format!("Invalid JWT secret: {}", e)))?;

    let mut validation = Validation::default();
    validation.iss = Some(HashSet::from([config.issuer.clone()]));
    validation.aud = Some(HashSet::from([config.audience.clone()]));
    validation.validate_exp = true;

    let data = jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            _ => JwtError::Invalid(e.to_string()),
        }
    })?;

    Ok(data.claims)
}

/// Extracts the Bearer token from an Authorization header value.
///
/// Returns `None` for non-Bearer schemes or empty tokens.
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    let token = auth_header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use base64::prelude::*;
    use entity::sea_orm_active_enums::UserRole;

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret:             BASE64_STANDARD.encode("test-secret-key-that-is-at-least-32-bytes-long"),
            expiration_seconds: 3600,
            issuer:             "mamasouk-test".to_string(),
            audience:           "mamasouk-api".to_string(),
        }
    }

    fn seller_principal() -> Principal {
        Principal {
            id:         "usr_seller1".to_string(),
            email:      "artisan@example.com".to_string(),
            role:       UserRole::Seller,
            company_id: Some("com_coop".to_string()),
        }
    }

    #[test]
    fn test_create_and_validate_token() {
        let config = test_config();
        let token = create_access_token(&config, &seller_principal()).expect("Failed to create token");
        assert!(!token.is_empty());

        let claims = validate_token(&config, &token).expect("Failed to validate token");
        assert_eq!(claims.sub, "usr_seller1");
        assert_eq!(claims.email, "artisan@example.com");
        assert_eq!(claims.role, "seller");
        assert_eq!(claims.company, Some("com_coop".to_string()));
        assert_eq!(claims.iss, "mamasouk-test");
        assert_eq!(claims.aud, "mamasouk-api");
    }

    #[test]
    fn test_claims_without_company() {
        let config = test_config();
        let principal = Principal {
            id:         "usr_buyer".to_string(),
            email:      "buyer@example.com".to_string(),
            role:       UserRole::User,
            company_id: None,
        };
        let token = create_access_token(&config, &principal).unwrap();
        let claims = validate_token(&config, &token).unwrap();
        assert_eq!(claims.role, "user");
        assert!(claims.company.is_none());
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let config = test_config();
        let token = create_access_token(&config, &seller_principal()).unwrap();

        let other = JwtConfig {
            audience: "another-api".to_string(),
            ..test_config()
        };
        assert!(validate_token(&other, &token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = test_config();
        let token = create_access_token(&config, &seller_principal()).unwrap();
        let tampered = format!("{}xx", token);
        assert!(validate_token(&config, &tampered).is_err());
    }

    #[test]
    fn test_signed_with_other_secret_rejected() {
        let config = test_config();
        let other = JwtConfig {
            secret: BASE64_STANDARD.encode("another-secret-key-that-is-32-bytes-xx"),
            ..test_config()
        };
        let token = create_access_token(&other, &seller_principal()).unwrap();
        assert!(validate_token(&config, &token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token("Bearer abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_bearer_token("Bearer   abc123   "),
            Some("abc123".to_string())
        );
        assert!(extract_bearer_token("Basic abc123").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("Bearer ").is_none());
        assert!(extract_bearer_token("").is_none());
    }
}
