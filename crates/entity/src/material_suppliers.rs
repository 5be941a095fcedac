//! Material Suppliers Entity
//!
//! Raw-material vendors with their own approval lifecycle. Not referenced
//! by orders or products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    sea_orm_active_enums::ApprovalStatus,
    types::{Address, ImageRef},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_suppliers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                      String,
    pub name:                    String,
    pub description:             String,
    #[sea_orm(unique)]
    pub email:                   String,
    pub phone:                   String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub address:                 Option<Address>,
    pub website:                 Option<String>,
    pub status:                  ApprovalStatus,
    pub rating_average:          Decimal,
    pub rating_count:            i32,
    pub delivery_available:      bool,
    pub delivery_cost:           Decimal,
    pub delivery_estimated_days: i32,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub logo:                    Option<ImageRef>,
    pub approved_by:             Option<String>,
    pub approved_at:             Option<chrono::DateTime<chrono::Utc>>,
    pub rejection_reason:        Option<String>,
    pub created_at:              chrono::DateTime<chrono::Utc>,
    pub updated_at:              chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::materials::Entity")]
    Materials,
}

impl Related<super::materials::Entity> for Entity {
    fn to() -> RelationDef { Relation::Materials.def() }
}

impl ActiveModelBehavior for ActiveModel {}
