//! Companies Entity
//!
//! Partner organizations. Artisan and product counts in the stats columns
//! are recomputed on demand by the stats endpoint, not kept continuously
//! consistent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    sea_orm_active_enums::{ApprovalStatus, BusinessType, FocusArea},
    types::{Address, ImageRef},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                   String,
    pub name:                 String,
    pub description:          String,
    #[sea_orm(unique)]
    pub email:                String,
    pub phone:                String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub address:              Option<Address>,
    pub website:              Option<String>,
    pub business_type:        BusinessType,
    pub focus_area:           FocusArea,
    pub status:               ApprovalStatus,
    pub moderator_id:         Option<String>,
    pub stats_total_artisans: i32,
    pub stats_total_products: i32,
    pub stats_total_sales:    Decimal,
    pub stats_total_orders:   i32,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub logo:                 Option<ImageRef>,
    pub approved_by:          Option<String>,
    pub approved_at:          Option<chrono::DateTime<chrono::Utc>>,
    pub rejection_reason:     Option<String>,
    pub created_at:           chrono::DateTime<chrono::Utc>,
    pub updated_at:           chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users::Entity")]
    Members,
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Members.def() }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef { Relation::Products.def() }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef { Relation::Orders.def() }
}

impl ActiveModelBehavior for ActiveModel {}
