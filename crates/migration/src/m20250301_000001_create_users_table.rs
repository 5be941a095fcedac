use sea_orm_migration::{
    prelude::{extension::postgres::Type, *},
    schema::*,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(UserRole::Enum)
                    .values([
                        UserRole::User,
                        UserRole::Seller,
                        UserRole::CompanyModerator,
                        UserRole::Admin,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(ApprovalStatus::Enum)
                    .values([
                        ApprovalStatus::Pending,
                        ApprovalStatus::Approved,
                        ApprovalStatus::Rejected,
                        ApprovalStatus::Suspended,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(text(Users::Id).primary_key())
                    .col(string(Users::Name))
                    .col(string(Users::Email).unique_key())
                    .col(text(Users::PasswordHash))
                    .col(enumeration(
                        Users::Role,
                        UserRole::Enum,
                        [
                            UserRole::User,
                            UserRole::Seller,
                            UserRole::CompanyModerator,
                            UserRole::Admin,
                        ],
                    ))
                    .col(enumeration(
                        Users::Status,
                        ApprovalStatus::Enum,
                        [
                            ApprovalStatus::Pending,
                            ApprovalStatus::Approved,
                            ApprovalStatus::Rejected,
                            ApprovalStatus::Suspended,
                        ],
                    ))
                    .col(json_binary_null(Users::Profile))
                    .col(text_null(Users::CompanyId))
                    .col(boolean(Users::IsCompanyModerator).default(false))
                    .col(decimal_len(Users::EarningsTotal, 12, 2).default(0))
                    .col(decimal_len(Users::EarningsPending, 12, 2).default(0))
                    .col(decimal_len(Users::EarningsPaid, 12, 2).default(0))
                    .col(integer(Users::StatsTotalProducts).default(0))
                    .col(decimal_len(Users::StatsTotalSales, 12, 2).default(0))
                    .col(integer(Users::StatsTotalOrders).default(0))
                    .col(decimal_len(Users::StatsAverageRating, 4, 2).default(0))
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Users::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_company_id")
                    .table(Users::Table)
                    .col(Users::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ApprovalStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserRole::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Status,
    Profile,
    CompanyId,
    IsCompanyModerator,
    EarningsTotal,
    EarningsPending,
    EarningsPaid,
    StatsTotalProducts,
    StatsTotalSales,
    StatsTotalOrders,
    StatsAverageRating,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum UserRole {
    #[sea_orm(iden = "user_role")]
    Enum,
    #[sea_orm(iden = "user")]
    User,
    #[sea_orm(iden = "seller")]
    Seller,
    #[sea_orm(iden = "company_moderator")]
    CompanyModerator,
    #[sea_orm(iden = "admin")]
    Admin,
}

#[derive(DeriveIden)]
pub enum ApprovalStatus {
    #[sea_orm(iden = "approval_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "approved")]
    Approved,
    #[sea_orm(iden = "rejected")]
    Rejected,
    #[sea_orm(iden = "suspended")]
    Suspended,
}
