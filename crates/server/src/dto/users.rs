//! # User Data Transfer Objects
//!
//! Response types for user profiles. The password hash never appears in any
//! of these shapes.

use entity::types::UserProfile;
use rust_decimal::Decimal;
use serde::Serialize;

/// Seller earnings breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsSummary {
    /// Lifetime credited amount
    pub total:   Decimal,
    /// Credited but not yet paid out
    pub pending: Decimal,
    /// Paid out after commission
    pub paid:    Decimal,
}

/// Account activity counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub total_products: i32,
    pub total_sales:    Decimal,
    pub total_orders:   i32,
    pub average_rating: Decimal,
}

/// Full user detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetail {
    /// User's unique identifier
    pub id:                   String,
    /// Display name
    pub name:                 String,
    /// Email address
    pub email:                String,
    /// Account role
    pub role:                 String,
    /// Approval status
    pub status:               String,
    /// Profile details
    pub profile:              Option<UserProfile>,
    /// Company the account is scoped to, if any
    pub company_id:           Option<String>,
    /// Whether this account moderates its company
    pub is_company_moderator: bool,
    /// Earnings breakdown
    pub earnings:             EarningsSummary,
    /// Activity counters
    pub stats:                StatsSummary,
    /// Account creation timestamp
    pub created_at:           String,
}

/// Response for the profile endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// The acting user's profile
    pub user:    UserDetail,
}

/// Convert a user entity model into the response shape.
pub fn user_model_to_detail(user: &entity::users::Model) -> UserDetail {
    UserDetail {
        id:                   user.id.clone(),
        name:                 user.name.clone(),
        email:                user.email.clone(),
        role:                 user.role.to_string(),
        status:               user.status.to_string(),
        profile:              user.profile.clone(),
        company_id:           user.company_id.clone(),
        is_company_moderator: user.is_company_moderator,
        earnings:             EarningsSummary {
            total:   user.earnings_total,
            pending: user.earnings_pending,
            paid:    user.earnings_paid,
        },
        stats:                StatsSummary {
            total_products: user.stats_total_products,
            total_sales:    user.stats_total_sales,
            total_orders:   user.stats_total_orders,
            average_rating: user.stats_average_rating,
        },
        created_at:           user.created_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use entity::sea_orm_active_enums::{ApprovalStatus, UserRole};

    use super::*;

    #[test]
    fn test_user_model_to_detail_hides_password_hash() {
        let user = entity::users::Model {
            id:                   "usr_1".to_string(),
            name:                 "Fatima".to_string(),
            email:                "fatima@example.com".to_string(),
            password_hash:        "$argon2id$secret".to_string(),
            role:                 UserRole::Seller,
            status:               ApprovalStatus::Approved,
            profile:              None,
            company_id:           Some("com_1".to_string()),
            is_company_moderator: false,
            earnings_total:       Decimal::new(10000, 2),
            earnings_pending:     Decimal::new(2500, 2),
            earnings_paid:        Decimal::new(7500, 2),
            stats_total_products: 4,
            stats_total_sales:    Decimal::new(10000, 2),
            stats_total_orders:   9,
            stats_average_rating: Decimal::new(450, 2),
            created_at:           Utc::now(),
            updated_at:           Utc::now(),
        };

        let detail = user_model_to_detail(&user);
        assert_eq!(detail.role, "seller");
        assert_eq!(detail.earnings.pending, Decimal::new(2500, 2));

        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }
}
