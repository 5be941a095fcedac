//! Users Entity
//!
//! Customers, artisan sellers, company moderators and admins share one
//! account table distinguished by `role`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    sea_orm_active_enums::{ApprovalStatus, UserRole},
    types::UserProfile,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                   String,
    pub name:                 String,
    #[sea_orm(unique)]
    pub email:                String,
    #[serde(skip_serializing)]
    pub password_hash:        String,
    pub role:                 UserRole,
    pub status:               ApprovalStatus,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub profile:              Option<UserProfile>,
    pub company_id:           Option<String>,
    pub is_company_moderator: bool,
    pub earnings_total:       Decimal,
    pub earnings_pending:     Decimal,
    pub earnings_paid:        Decimal,
    pub stats_total_products: i32,
    pub stats_total_sales:    Decimal,
    pub stats_total_orders:   i32,
    pub stats_average_rating: Decimal,
    pub created_at:           chrono::DateTime<chrono::Utc>,
    pub updated_at:           chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Company,
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef { Relation::Products.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Moderator accounts must always be tied to a company.
    #[must_use]
    pub fn has_valid_moderator_link(&self) -> bool { !self.is_company_moderator || self.company_id.is_some() }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn base_user() -> Model {
        Model {
            id:                   "usr_test".to_string(),
            name:                 "Amina".to_string(),
            email:                "amina@example.com".to_string(),
            password_hash:        "$argon2id$v=19$m=15360,t=3,p=2$x$y".to_string(),
            role:                 UserRole::Seller,
            status:               ApprovalStatus::Approved,
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
        }
    }

    #[test]
    fn test_moderator_link_invariant() {
        let seller = base_user();
        assert!(seller.has_valid_moderator_link());

        let broken = Model {
            role: UserRole::CompanyModerator,
            is_company_moderator: true,
            ..base_user()
        };
        assert!(!broken.has_valid_moderator_link());

        let linked = Model {
            company_id: Some("com_abc".to_string()),
            ..broken
        };
        assert!(linked.has_valid_moderator_link());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(base_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "amina@example.com");
    }
}
