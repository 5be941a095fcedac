//! Materials Entity
//!
//! Raw-material offerings, one row per material a supplier lists.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    sea_orm_active_enums::{MaterialCategory, MaterialUnit},
    types::ImageList,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:           String,
    pub supplier_id:  String,
    pub name:         String,
    pub description:  Option<String>,
    pub category:     MaterialCategory,
    pub price:        Decimal,
    pub unit:         MaterialUnit,
    pub stock:        i32,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub images:       Option<ImageList>,
    pub is_available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::material_suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::material_suppliers::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Supplier,
}

impl Related<super::material_suppliers::Entity> for Entity {
    fn to() -> RelationDef { Relation::Supplier.def() }
}

impl ActiveModelBehavior for ActiveModel {}
