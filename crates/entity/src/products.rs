//! Products Entity
//!
//! An artisan listing. Only `is_active` rows with an `approved` status are
//! orderable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    sea_orm_active_enums::{ProductCategory, ProductStatus},
    types::{Dimensions, ImageList, ProductAccessibility, StringList},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:             String,
    pub name:           String,
    pub description:    String,
    pub price:          Decimal,
    pub category:       ProductCategory,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub images:         Option<ImageList>,
    pub artisan_id:     String,
    pub company_id:     String,
    pub stock:          i32,
    pub is_active:      bool,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub accessibility:  Option<ProductAccessibility>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub tags:           Option<StringList>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub dimensions:     Option<Dimensions>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub materials:      Option<StringList>,
    pub rating_average: Decimal,
    pub rating_count:   i32,
    pub status:         ProductStatus,
    pub featured:       bool,
    pub created_at:     chrono::DateTime<chrono::Utc>,
    pub updated_at:     chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ArtisanId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Artisan,
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Company,
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Artisan.def() }
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef { Relation::OrderItems.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether this product can currently be placed in an order.
    #[must_use]
    pub fn is_orderable(&self) -> bool { self.is_active && self.status == ProductStatus::Approved }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn base_product(status: ProductStatus, is_active: bool) -> Model {
        Model {
            id:             "prd_test".to_string(),
            name:           "Woven Basket".to_string(),
            description:    "Hand-woven palm basket".to_string(),
            price:          Decimal::new(4599, 2),
            category:       ProductCategory::HomeDecor,
            images:         None,
            artisan_id:     "usr_artisan".to_string(),
            company_id:     "com_coop".to_string(),
            stock:          5,
            is_active,
            accessibility:  None,
            tags:           None,
            dimensions:     None,
            materials:      None,
            rating_average: Decimal::ZERO,
            rating_count:   0,
            status,
            featured:       false,
            created_at:     Utc::now(),
            updated_at:     Utc::now(),
        }
    }

    #[test]
    fn test_orderable_requires_active_and_approved() {
        assert!(base_product(ProductStatus::Approved, true).is_orderable());
        assert!(!base_product(ProductStatus::Approved, false).is_orderable());
        assert!(!base_product(ProductStatus::Pending, true).is_orderable());
        assert!(!base_product(ProductStatus::Suspended, true).is_orderable());
        assert!(!base_product(ProductStatus::Draft, true).is_orderable());
    }
}
