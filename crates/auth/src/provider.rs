//! Injected identity-provider seam.
//!
//! The login endpoint never sees a credential table directly; it talks to an
//! [`IdentityProvider`], swappable between the database-backed implementation
//! and an in-memory stub for tests.

use async_trait::async_trait;
use entity::{
    sea_orm_active_enums::UserRole,
    users::{Column as UserColumn, Entity as UsersEntity},
};
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter};
use secrecy::SecretString;
use thiserror::Error;

use crate::password::verify_password;

/// The resolved identity of an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User ID
    pub id:         String,
    /// User email
    pub email:      String,
    /// Account role
    pub role:       UserRole,
    /// Company the account is scoped to, if any
    pub company_id: Option<String>,
}

/// Errors produced by credential validation.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Unknown email or wrong password; callers must not distinguish the two.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Identity backend error: {0}")]
    Backend(String),
}

/// Validates credentials and resolves the acting [`Principal`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate an email/password pair.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when the pair does not match an account,
    /// `Backend` when the underlying store fails.
    async fn authenticate(&self, email: &str, password: &SecretString) -> Result<Principal, IdentityError>;
}

/// Production provider backed by the users table.
#[derive(Clone)]
pub struct DbIdentityProvider {
    db: DbConn,
}

impl DbIdentityProvider {
    /// Create a provider over a database connection.
    #[must_use]
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
        }
    }
}

#[async_trait]
impl IdentityProvider for DbIdentityProvider {
    async fn authenticate(&self, email: &str, password: &SecretString) -> Result<Principal, IdentityError> {
        let user = UsersEntity::find()
            .filter(UserColumn::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| IdentityError::Backend(e.to_string()))?
            .ok_or(IdentityError::InvalidCredentials)?;

        verify_password(password, &user.password_hash).map_err(|_| IdentityError::InvalidCredentials)?;

        Ok(Principal {
            id:         user.id,
            email:      user.email,
            role:       user.role,
            company_id: user.company_id,
        })
    }
}

/// In-memory provider for tests: a fixed table of accounts.
#[derive(Default)]
pub struct StubIdentityProvider {
    accounts: Vec<(String, String, Principal)>,
}

impl StubIdentityProvider {
    /// Create an empty stub.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Register an account the stub will accept.
    #[must_use]
    pub fn with_account(mut self, email: &str, password: &str, principal: Principal) -> Self {
        self.accounts
            .push((email.to_lowercase(), password.to_string(), principal));
        self
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn authenticate(&self, email: &str, password: &SecretString) -> Result<Principal, IdentityError> {
        use secrecy::ExposeSecret;

        let email = email.to_lowercase();
        self.accounts
            .iter()
            .find(|(stored_email, stored_password, _)| {
                *stored_email == email && stored_password == password.expose_secret()
            })
            .map(|(_, _, principal)| principal.clone())
            .ok_or(IdentityError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_principal() -> Principal {
        Principal {
            id:         "usr_admin".to_string(),
            email:      "admin@mamasouk.example".to_string(),
            role:       UserRole::Admin,
            company_id: None,
        }
    }

    #[tokio::test]
    async fn test_stub_accepts_known_account() {
        let provider =
            StubIdentityProvider::new().with_account("admin@mamasouk.example", "letmein", admin_principal());

        let principal = provider
            .authenticate("admin@mamasouk.example", &SecretString::from("letmein".to_string()))
            .await
            .unwrap();
        assert_eq!(principal.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_stub_normalizes_email_case() {
        let provider =
            StubIdentityProvider::new().with_account("Admin@MamaSouk.example", "letmein", admin_principal());

        let result = provider
            .authenticate("admin@mamasouk.example", &SecretString::from("letmein".to_string()))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_stub_rejects_wrong_password() {
        let provider =
            StubIdentityProvider::new().with_account("admin@mamasouk.example", "letmein", admin_principal());

        let result = provider
            .authenticate("admin@mamasouk.example", &SecretString::from("wrong".to_string()))
            .await;
        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_stub_rejects_unknown_email() {
        let provider = StubIdentityProvider::new();
        let result = provider
            .authenticate("ghost@example.com", &SecretString::from("anything".to_string()))
            .await;
        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }
}
