//! # Account Handlers
//!
//! Registration, login and profile endpoints. Login goes through the
//! injected identity provider rather than any hardcoded credential table.

use auth::{create_access_token, hash_password, secrecy::SecretString, IdentityError, IdentityProvider as _, Principal};
use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::{
    sea_orm_active_enums::{ApprovalStatus, UserRole},
    users::{Column as UserColumn, Entity as UsersEntity},
};
use error::{AppError, Result};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        auth::{AccountSummary, AuthSuccessResponse, LoginRequest, RegisterRequest},
        users::{user_model_to_detail, ProfileResponse},
    },
    middleware::auth::AuthenticatedUser,
    AppState,
};

/// Register a new account
///
/// Only `user` and `seller` roles can self-register; moderators are
/// provisioned through company approval and admins are seeded out of band.
pub async fn register_handler(
    state: &AppState,
    req: RegisterRequest,
) -> Result<(StatusCode, Json<AuthSuccessResponse>)> {
    req.validate()?;

    let role = match req.role.as_str() {
        "user" => UserRole::User,
        "seller" => UserRole::Seller,
        _ => {
            return Err(AppError::bad_request("Invalid role specified"));
        },
    };

    let email = req.email.to_lowercase();

    let existing = UsersEntity::find()
        .filter(UserColumn::Email.eq(&email))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::conflict("An account with this email already exists"));
    }

    let password = SecretString::from(req.password);
    let password_hash = hash_password(&password, None)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let now = Utc::now();
    let user = entity::users::ActiveModel {
        id: Set(entity::new_id("usr")),
        name: Set(req.name),
        email: Set(email),
        password_hash: Set(auth::secrecy::ExposeSecret::expose_secret(&password_hash).to_string()),
        role: Set(role),
        status: Set(ApprovalStatus::Pending),
        profile: Set(None),
        company_id: Set(None),
        is_company_moderator: Set(false),
        earnings_total: Set(Decimal::ZERO),
        earnings_pending: Set(Decimal::ZERO),
        earnings_paid: Set(Decimal::ZERO),
        stats_total_products: Set(0),
        stats_total_sales: Set(Decimal::ZERO),
        stats_total_orders: Set(0),
        stats_average_rating: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = user
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create account: {}", e)))?;

    let principal = Principal {
        id:         created.id.clone(),
        email:      created.email.clone(),
        role:       created.role.clone(),
        company_id: created.company_id.clone(),
    };
    let token = create_access_token(&state.jwt_config, &principal)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {}", e)))?;

    info!(user_id = %created.id, role = %created.role, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthSuccessResponse {
            success: true,
            token,
            user: account_summary(&created),
        }),
    ))
}

/// Log in with email and password
///
/// Credential validation is delegated to the injected identity provider.
pub async fn login_handler(state: &AppState, req: LoginRequest) -> Result<Json<AuthSuccessResponse>> {
    req.validate()?;

    let password = SecretString::from(req.password);
    let principal = state
        .identity
        .authenticate(&req.email, &password)
        .await
        .map_err(|e| {
            match e {
                IdentityError::InvalidCredentials => AppError::unauthorized("Invalid email or password"),
                IdentityError::Backend(message) => AppError::internal(message),
            }
        })?;

    let user = UsersEntity::find_by_id(&principal.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::internal("Authenticated account not found"))?;

    let token = create_access_token(&state.jwt_config, &principal)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {}", e)))?;

    info!(user_id = %principal.id, "Login succeeded");

    Ok(Json(AuthSuccessResponse {
        success: true,
        token,
        user: account_summary(&user),
    }))
}

/// Get the authenticated user's profile
pub async fn get_profile_handler(state: &AppState, user: AuthenticatedUser) -> Result<Json<ProfileResponse>> {
    let db_user = UsersEntity::find_by_id(&user.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(ProfileResponse {
        success: true,
        user:    user_model_to_detail(&db_user),
    }))
}

/// Build the auth-endpoint account summary from an entity model.
fn account_summary(user: &entity::users::Model) -> AccountSummary {
    AccountSummary {
        id:         user.id.clone(),
        name:       user.name.clone(),
        email:      user.email.clone(),
        role:       user.role.to_string(),
        status:     user.status.to_string(),
        company_id: user.company_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_summary_shape() {
        let user = entity::users::Model {
            id:                   "usr_1".to_string(),
            name:                 "Khadija".to_string(),
            email:                "khadija@example.com".to_string(),
            password_hash:        "hash".to_string(),
            role:                 UserRole::User,
            status:               ApprovalStatus::Pending,
            profile:              None,
            company_id:           None,
            is_company_moderator: false,
            earnings_total:       Decimal::ZERO,
            earnings_pending:     Decimal::ZERO,
            earnings_paid:        Decimal::ZERO,
            stats_total_products: 0,
            stats_total_sales:    Decimal::ZERO,
            stats_total_orders:   0,
            stats_average_rating: Decimal::ZERO,
            created_at:           Utc::now(),
            updated_at:           Utc::now(),
        };

        let summary = account_summary(&user);
        assert_eq!(summary.role, "user");
        assert_eq!(summary.status, "pending");
        assert!(summary.company_id.is_none());
    }
}
