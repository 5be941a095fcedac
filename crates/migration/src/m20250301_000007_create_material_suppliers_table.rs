use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users_table::{ApprovalStatus, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MaterialSuppliers::Table)
                    .if_not_exists()
                    .col(text(MaterialSuppliers::Id).primary_key())
                    .col(string(MaterialSuppliers::Name))
                    .col(text(MaterialSuppliers::Description))
                    .col(string(MaterialSuppliers::Email).unique_key())
                    .col(string(MaterialSuppliers::Phone))
                    .col(json_binary_null(MaterialSuppliers::Address))
                    .col(string_null(MaterialSuppliers::Website))
                    .col(enumeration(
                        MaterialSuppliers::Status,
                        ApprovalStatus::Enum,
                        [
                            ApprovalStatus::Pending,
                            ApprovalStatus::Approved,
                            ApprovalStatus::Rejected,
                            ApprovalStatus::Suspended,
                        ],
                    ))
                    .col(decimal_len(MaterialSuppliers::RatingAverage, 4, 2).default(0))
                    .col(integer(MaterialSuppliers::RatingCount).default(0))
                    .col(boolean(MaterialSuppliers::DeliveryAvailable).default(true))
                    .col(decimal_len(MaterialSuppliers::DeliveryCost, 12, 2).default(0))
                    .col(integer(MaterialSuppliers::DeliveryEstimatedDays).default(7))
                    .col(json_binary_null(MaterialSuppliers::Logo))
                    .col(text_null(MaterialSuppliers::ApprovedBy))
                    .col(timestamp_with_time_zone_null(MaterialSuppliers::ApprovedAt))
                    .col(text_null(MaterialSuppliers::RejectionReason))
                    .col(
                        timestamp_with_time_zone(MaterialSuppliers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MaterialSuppliers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_material_suppliers_approved_by")
                            .from(MaterialSuppliers::Table, MaterialSuppliers::ApprovedBy)
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
                    .name("idx_material_suppliers_status")
                    .table(MaterialSuppliers::Table)
                    .col(MaterialSuppliers::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaterialSuppliers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum MaterialSuppliers {
    Table,
    Id,
    Name,
    Description,
    Email,
    Phone,
    Address,
    Website,
    Status,
    RatingAverage,
    RatingCount,
    DeliveryAvailable,
    DeliveryCost,
    DeliveryEstimatedDays,
    Logo,
    ApprovedBy,
    ApprovedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}
