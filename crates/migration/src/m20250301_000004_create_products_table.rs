use sea_orm_migration::{
    prelude::{extension::postgres::Type, *},
    schema::*,
};

use crate::{
    m20250301_000001_create_users_table::Users,
    m20250301_000002_create_companies_table::Companies,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ProductStatus::Enum)
                    .values([
                        ProductStatus::Draft,
                        ProductStatus::Pending,
                        ProductStatus::Approved,
                        ProductStatus::Rejected,
                        ProductStatus::Suspended,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(ProductCategory::Enum)
                    .values([
                        ProductCategory::Clothing,
                        ProductCategory::Jewelry,
                        ProductCategory::HomeDecor,
                        ProductCategory::Art,
                        ProductCategory::Food,
                        ProductCategory::Other,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(text(Products::Id).primary_key())
                    .col(string(Products::Name))
                    .col(text(Products::Description))
                    .col(decimal_len(Products::Price, 12, 2))
                    .col(enumeration(
                        Products::Category,
                        ProductCategory::Enum,
                        [
                            ProductCategory::Clothing,
                            ProductCategory::Jewelry,
                            ProductCategory::HomeDecor,
                            ProductCategory::Art,
                            ProductCategory::Food,
                            ProductCategory::Other,
                        ],
                    ))
                    .col(json_binary_null(Products::Images))
                    .col(text(Products::ArtisanId))
                    .col(text(Products::CompanyId))
                    .col(integer(Products::Stock).default(1))
                    .col(boolean(Products::IsActive).default(true))
                    .col(json_binary_null(Products::Accessibility))
                    .col(json_binary_null(Products::Tags))
                    .col(json_binary_null(Products::Dimensions))
                    .col(json_binary_null(Products::Materials))
                    .col(decimal_len(Products::RatingAverage, 4, 2).default(0))
                    .col(integer(Products::RatingCount).default(0))
                    .col(enumeration(
                        Products::Status,
                        ProductStatus::Enum,
                        [
                            ProductStatus::Draft,
                            ProductStatus::Pending,
                            ProductStatus::Approved,
                            ProductStatus::Rejected,
                            ProductStatus::Suspended,
                        ],
                    ))
                    .col(boolean(Products::Featured).default(false))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_artisan")
                            .from(Products::Table, Products::ArtisanId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_company")
                            .from(Products::Table, Products::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Catalog filters scan by category and activity
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_category_active")
                    .table(Products::Table)
                    .col(Products::Category)
                    .col(Products::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_artisan_id")
                    .table(Products::Table)
                    .col(Products::ArtisanId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_company_id")
                    .table(Products::Table)
                    .col(Products::CompanyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProductCategory::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProductStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    Category,
    Images,
    ArtisanId,
    CompanyId,
    Stock,
    IsActive,
    Accessibility,
    Tags,
    Dimensions,
    Materials,
    RatingAverage,
    RatingCount,
    Status,
    Featured,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ProductStatus {
    #[sea_orm(iden = "product_status")]
    Enum,
    #[sea_orm(iden = "draft")]
    Draft,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "approved")]
    Approved,
    #[sea_orm(iden = "rejected")]
    Rejected,
    #[sea_orm(iden = "suspended")]
    Suspended,
}

#[derive(DeriveIden)]
pub enum ProductCategory {
    #[sea_orm(iden = "product_category")]
    Enum,
    #[sea_orm(iden = "clothing")]
    Clothing,
    #[sea_orm(iden = "jewelry")]
    Jewelry,
    #[sea_orm(iden = "home-decor")]
    HomeDecor,
    #[sea_orm(iden = "art")]
    Art,
    #[sea_orm(iden = "food")]
    Food,
    #[sea_orm(iden = "other")]
    Other,
}
