use sea_orm_migration::{
    prelude::{extension::postgres::Type, *},
    schema::*,
};

use crate::m20250301_000001_create_users_table::{ApprovalStatus, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(BusinessType::Enum)
                    .values([
                        BusinessType::Ngo,
                        BusinessType::Cooperative,
                        BusinessType::PrivateCompany,
                        BusinessType::GovernmentOrganization,
                        BusinessType::Other,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(FocusArea::Enum)
                    .values([
                        FocusArea::WomenEmpowerment,
                        FocusArea::DisabilitySupport,
                        FocusArea::ArtisanDevelopment,
                        FocusArea::RuralDevelopment,
                        FocusArea::Other,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(text(Companies::Id).primary_key())
                    .col(string(Companies::Name))
                    .col(text(Companies::Description))
                    .col(string(Companies::Email).unique_key())
                    .col(string(Companies::Phone))
                    .col(json_binary_null(Companies::Address))
                    .col(string_null(Companies::Website))
                    .col(enumeration(
                        Companies::BusinessType,
                        BusinessType::Enum,
                        [
                            BusinessType::Ngo,
                            BusinessType::Cooperative,
                            BusinessType::PrivateCompany,
                            BusinessType::GovernmentOrganization,
                            BusinessType::Other,
                        ],
                    ))
                    .col(enumeration(
                        Companies::FocusArea,
                        FocusArea::Enum,
                        [
                            FocusArea::WomenEmpowerment,
                            FocusArea::DisabilitySupport,
                            FocusArea::ArtisanDevelopment,
                            FocusArea::RuralDevelopment,
                            FocusArea::Other,
                        ],
                    ))
                    .col(enumeration(
                        Companies::Status,
                        ApprovalStatus::Enum,
                        [
                            ApprovalStatus::Pending,
                            ApprovalStatus::Approved,
                            ApprovalStatus::Rejected,
                            ApprovalStatus::Suspended,
                        ],
                    ))
                    .col(text_null(Companies::ModeratorId))
                    .col(integer(Companies::StatsTotalArtisans).default(0))
                    .col(integer(Companies::StatsTotalProducts).default(0))
                    .col(decimal_len(Companies::StatsTotalSales, 12, 2).default(0))
                    .col(integer(Companies::StatsTotalOrders).default(0))
                    .col(json_binary_null(Companies::Logo))
                    .col(text_null(Companies::ApprovedBy))
                    .col(timestamp_with_time_zone_null(Companies::ApprovedAt))
                    .col(text_null(Companies::RejectionReason))
                    .col(
                        timestamp_with_time_zone(Companies::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Companies::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companies_moderator")
                            .from(Companies::Table, Companies::ModeratorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_companies_status")
                    .table(Companies::Table)
                    .col(Companies::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(FocusArea::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BusinessType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Companies {
    Table,
    Id,
    Name,
    Description,
    Email,
    Phone,
    Address,
    Website,
    BusinessType,
    FocusArea,
    Status,
    ModeratorId,
    StatsTotalArtisans,
    StatsTotalProducts,
    StatsTotalSales,
    StatsTotalOrders,
    Logo,
    ApprovedBy,
    ApprovedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum BusinessType {
    #[sea_orm(iden = "business_type")]
    Enum,
    #[sea_orm(iden = "ngo")]
    Ngo,
    #[sea_orm(iden = "cooperative")]
    Cooperative,
    #[sea_orm(iden = "private_company")]
    PrivateCompany,
    #[sea_orm(iden = "government_organization")]
    GovernmentOrganization,
    #[sea_orm(iden = "other")]
    Other,
}

#[derive(DeriveIden)]
pub enum FocusArea {
    #[sea_orm(iden = "focus_area")]
    Enum,
    #[sea_orm(iden = "women_empowerment")]
    WomenEmpowerment,
    #[sea_orm(iden = "disability_support")]
    DisabilitySupport,
    #[sea_orm(iden = "artisan_development")]
    ArtisanDevelopment,
    #[sea_orm(iden = "rural_development")]
    RuralDevelopment,
    #[sea_orm(iden = "other")]
    Other,
}
