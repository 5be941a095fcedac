//! Orders Entity
//!
//! The only multi-entity write in the system. `seller_id` and `company_id`
//! are denormalized from the line items' shared product owner at creation
//! time; order creation rejects carts spanning more than one seller.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    sea_orm_active_enums::{OrderStatus, PaymentMethod, PaymentStatus},
    types::{Address, Tracking},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                String,
    #[sea_orm(unique)]
    pub order_number:      String,
    pub customer_id:       String,
    pub seller_id:         String,
    pub company_id:        String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub shipping_address:  Option<Address>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub billing_address:   Option<Address>,
    pub payment_method:    PaymentMethod,
    pub payment_status:    PaymentStatus,
    pub payment_amount:    Decimal,
    pub status:            OrderStatus,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub tracking:          Option<Tracking>,
    pub notes:             Option<String>,
    pub total_amount:      Decimal,
    pub shipping_cost:     Decimal,
    pub tax:               Decimal,
    pub discount:          Decimal,
    pub commission_amount: Option<Decimal>,
    pub commission_rate:   Option<Decimal>,
    pub created_at:        chrono::DateTime<chrono::Utc>,
    pub updated_at:        chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SellerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Seller,
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Company,
    #[sea_orm(has_many = "super::order_items::Entity")]
    Items,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef { Relation::Items.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Generate a collision-free order number.
///
/// Derived from cuid2 rather than a document count so that two orders
/// created in the same instant can never collide.
#[must_use]
pub fn generate_order_number() -> String { format!("ORD-{}", cuid2::cuid().to_uppercase()) }

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert!(number.len() > 10);
    }

    #[test]
    fn test_order_numbers_do_not_collide() {
        let numbers: HashSet<String> = (0 .. 200).map(|_| generate_order_number()).collect();
        assert_eq!(numbers.len(), 200);
    }
}
