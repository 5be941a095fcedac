//! # Role Gates
//!
//! Role checks applied inside handlers after the auth middleware has
//! resolved the acting user. The role model is a fixed enum on the account
//! row, so gates are plain functions rather than a permission matrix.

use entity::sea_orm_active_enums::UserRole;
use error::{AppError, Result};

use crate::middleware::auth::AuthenticatedUser;

/// Fail with `Forbidden` unless the user holds one of the permitted roles.
pub fn require_any(user: &AuthenticatedUser, roles: &[UserRole]) -> Result<()> {
    if roles.contains(&user.role) {
        Ok(())
    }
    else {
        let names: Vec<String> = roles.iter().map(ToString::to_string).collect();
        Err(AppError::forbidden(format!(
            "Not authorized. Required roles: {}",
            names.join(", ")
        )))
    }
}

/// Whether the user is a platform administrator.
pub fn is_admin(user: &AuthenticatedUser) -> bool { user.role == UserRole::Admin }

/// Whether the user moderates the given company.
pub fn moderates_company(user: &AuthenticatedUser, company_id: &str) -> bool {
    user.role == UserRole::CompanyModerator && user.company_id.as_deref() == Some(company_id)
}

/// Fail with `Forbidden` unless the user is an admin or the company's own
/// moderator.
pub fn require_company_scope(user: &AuthenticatedUser, company_id: &str, action: &str) -> Result<()> {
    if is_admin(user) || moderates_company(user, company_id) {
        Ok(())
    }
    else {
        Err(AppError::forbidden(format!(
            "Not authorized to {} for this company",
            action
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: UserRole, company_id: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser {
            id:         "usr_test".to_string(),
            email:      "test@example.com".to_string(),
            role,
            company_id: company_id.map(str::to_string),
        }
    }

    #[test]
    fn test_require_any() {
        let seller = user_with(UserRole::Seller, None);
        assert!(require_any(&seller, &[UserRole::Seller, UserRole::Admin]).is_ok());
        assert!(require_any(&seller, &[UserRole::Admin]).is_err());
    }

    #[test]
    fn test_require_any_error_lists_roles() {
        let customer = user_with(UserRole::User, None);
        let err = require_any(&customer, &[UserRole::Admin, UserRole::CompanyModerator]).unwrap_err();
        assert!(err.message().contains("admin"));
        assert!(err.message().contains("company_moderator"));
    }

    #[test]
    fn test_moderates_company() {
        let moderator = user_with(UserRole::CompanyModerator, Some("com_a"));
        assert!(moderates_company(&moderator, "com_a"));
        assert!(!moderates_company(&moderator, "com_b"));

        let admin = user_with(UserRole::Admin, None);
        assert!(!moderates_company(&admin, "com_a"));
    }

    #[test]
    fn test_require_company_scope() {
        let admin = user_with(UserRole::Admin, None);
        let moderator = user_with(UserRole::CompanyModerator, Some("com_a"));
        let seller = user_with(UserRole::Seller, Some("com_a"));

        assert!(require_company_scope(&admin, "com_a", "view stats").is_ok());
        assert!(require_company_scope(&moderator, "com_a", "view stats").is_ok());
        assert!(require_company_scope(&moderator, "com_b", "view stats").is_err());
        assert!(require_company_scope(&seller, "com_a", "view stats").is_err());
    }
}
