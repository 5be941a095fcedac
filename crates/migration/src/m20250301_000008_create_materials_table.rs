use sea_orm_migration::{
    prelude::{extension::postgres::Type, *},
    schema::*,
};

use crate::m20250301_000007_create_material_suppliers_table::MaterialSuppliers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(MaterialCategory::Enum)
                    .values([
                        MaterialCategory::Fabric,
                        MaterialCategory::Yarn,
                        MaterialCategory::Beads,
                        MaterialCategory::Wood,
                        MaterialCategory::Metal,
                        MaterialCategory::Clay,
                        MaterialCategory::Paint,
                        MaterialCategory::Tools,
                        MaterialCategory::Other,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(MaterialUnit::Enum)
                    .values([
                        MaterialUnit::Piece,
                        MaterialUnit::Meter,
                        MaterialUnit::Kilogram,
                        MaterialUnit::Liter,
                        MaterialUnit::Set,
                        MaterialUnit::Dozen,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Materials::Table)
                    .if_not_exists()
                    .col(text(Materials::Id).primary_key())
                    .col(text(Materials::SupplierId))
                    .col(string(Materials::Name))
                    .col(text_null(Materials::Description))
                    .col(enumeration(
                        Materials::Category,
                        MaterialCategory::Enum,
                        [
                            MaterialCategory::Fabric,
                            MaterialCategory::Yarn,
                            MaterialCategory::Beads,
                            MaterialCategory::Wood,
                            MaterialCategory::Metal,
                            MaterialCategory::Clay,
                            MaterialCategory::Paint,
                            MaterialCategory::Tools,
                            MaterialCategory::Other,
                        ],
                    ))
                    .col(decimal_len(Materials::Price, 12, 2))
                    .col(enumeration(
                        Materials::Unit,
                        MaterialUnit::Enum,
                        [
                            MaterialUnit::Piece,
                            MaterialUnit::Meter,
                            MaterialUnit::Kilogram,
                            MaterialUnit::Liter,
                            MaterialUnit::Set,
                            MaterialUnit::Dozen,
                        ],
                    ))
                    .col(integer(Materials::Stock).default(0))
                    .col(json_binary_null(Materials::Images))
                    .col(boolean(Materials::IsAvailable).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_materials_supplier")
                            .from(Materials::Table, Materials::SupplierId)
                            .to(MaterialSuppliers::Table, MaterialSuppliers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_materials_supplier_id")
                    .table(Materials::Table)
                    .col(Materials::SupplierId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_materials_category")
                    .table(Materials::Table)
                    .col(Materials::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Materials::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(MaterialUnit::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(MaterialCategory::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Materials {
    Table,
    Id,
    SupplierId,
    Name,
    Description,
    Category,
    Price,
    Unit,
    Stock,
    Images,
    IsAvailable,
}

#[derive(DeriveIden)]
pub enum MaterialCategory {
    #[sea_orm(iden = "material_category")]
    Enum,
    #[sea_orm(iden = "fabric")]
    Fabric,
    #[sea_orm(iden = "yarn")]
    Yarn,
    #[sea_orm(iden = "beads")]
    Beads,
    #[sea_orm(iden = "wood")]
    Wood,
    #[sea_orm(iden = "metal")]
    Metal,
    #[sea_orm(iden = "clay")]
    Clay,
    #[sea_orm(iden = "paint")]
    Paint,
    #[sea_orm(iden = "tools")]
    Tools,
    #[sea_orm(iden = "other")]
    Other,
}

#[derive(DeriveIden)]
pub enum MaterialUnit {
    #[sea_orm(iden = "material_unit")]
    Enum,
    #[sea_orm(iden = "piece")]
    Piece,
    #[sea_orm(iden = "meter")]
    Meter,
    #[sea_orm(iden = "kilogram")]
    Kilogram,
    #[sea_orm(iden = "liter")]
    Liter,
    #[sea_orm(iden = "set")]
    Set,
    #[sea_orm(iden = "dozen")]
    Dozen,
}
