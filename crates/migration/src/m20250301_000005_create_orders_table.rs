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
                    .as_enum(OrderStatus::Enum)
                    .values([
                        OrderStatus::Pending,
                        OrderStatus::Confirmed,
                        OrderStatus::Processing,
                        OrderStatus::Shipped,
                        OrderStatus::Delivered,
                        OrderStatus::Cancelled,
                        OrderStatus::Returned,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentMethod::Enum)
                    .values([
                        PaymentMethod::Stripe,
                        PaymentMethod::Chapa,
                        PaymentMethod::BankTransfer,
                        PaymentMethod::CashOnDelivery,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentStatus::Enum)
                    .values([
                        PaymentStatus::Pending,
                        PaymentStatus::Completed,
                        PaymentStatus::Failed,
                        PaymentStatus::Refunded,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(text(Orders::Id).primary_key())
                    .col(string(Orders::OrderNumber).unique_key())
                    .col(text(Orders::CustomerId))
                    .col(text(Orders::SellerId))
                    .col(text(Orders::CompanyId))
                    .col(json_binary_null(Orders::ShippingAddress))
                    .col(json_binary_null(Orders::BillingAddress))
                    .col(enumeration(
                        Orders::PaymentMethod,
                        PaymentMethod::Enum,
                        [
                            PaymentMethod::Stripe,
                            PaymentMethod::Chapa,
                            PaymentMethod::BankTransfer,
                            PaymentMethod::CashOnDelivery,
                        ],
                    ))
                    .col(enumeration(
                        Orders::PaymentStatus,
                        PaymentStatus::Enum,
                        [
                            PaymentStatus::Pending,
                            PaymentStatus::Completed,
                            PaymentStatus::Failed,
                            PaymentStatus::Refunded,
                        ],
                    ))
                    .col(decimal_len(Orders::PaymentAmount, 12, 2))
                    .col(enumeration(
                        Orders::Status,
                        OrderStatus::Enum,
                        [
                            OrderStatus::Pending,
                            OrderStatus::Confirmed,
                            OrderStatus::Processing,
                            OrderStatus::Shipped,
                            OrderStatus::Delivered,
                            OrderStatus::Cancelled,
                            OrderStatus::Returned,
                        ],
                    ))
                    .col(json_binary_null(Orders::Tracking))
                    .col(text_null(Orders::Notes))
                    .col(decimal_len(Orders::TotalAmount, 12, 2))
                    .col(decimal_len(Orders::ShippingCost, 12, 2).default(0))
                    .col(decimal_len(Orders::Tax, 12, 2).default(0))
                    .col(decimal_len(Orders::Discount, 12, 2).default(0))
                    .col(decimal_len_null(Orders::CommissionAmount, 12, 2))
                    .col(decimal_len_null(Orders::CommissionRate, 5, 2))
                    .col(
                        timestamp_with_time_zone(Orders::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Orders::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_customer")
                            .from(Orders::Table, Orders::CustomerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_seller")
                            .from(Orders::Table, Orders::SellerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_company")
                            .from(Orders::Table, Orders::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // The three role-scoped listings each filter by owner + status
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_customer_status")
                    .table(Orders::Table)
                    .col(Orders::CustomerId)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_seller_status")
                    .table(Orders::Table)
                    .col(Orders::SellerId)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_company_status")
                    .table(Orders::Table)
                    .col(Orders::CompanyId)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PaymentStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PaymentMethod::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(OrderStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Orders {
    Table,
    Id,
    OrderNumber,
    CustomerId,
    SellerId,
    CompanyId,
    ShippingAddress,
    BillingAddress,
    PaymentMethod,
    PaymentStatus,
    PaymentAmount,
    Status,
    Tracking,
    Notes,
    TotalAmount,
    ShippingCost,
    Tax,
    Discount,
    CommissionAmount,
    CommissionRate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum OrderStatus {
    #[sea_orm(iden = "order_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "processing")]
    Processing,
    #[sea_orm(iden = "shipped")]
    Shipped,
    #[sea_orm(iden = "delivered")]
    Delivered,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
    #[sea_orm(iden = "returned")]
    Returned,
}

#[derive(DeriveIden)]
pub enum PaymentMethod {
    #[sea_orm(iden = "payment_method")]
    Enum,
    #[sea_orm(iden = "stripe")]
    Stripe,
    #[sea_orm(iden = "chapa")]
    Chapa,
    #[sea_orm(iden = "bank_transfer")]
    BankTransfer,
    #[sea_orm(iden = "cash_on_delivery")]
    CashOnDelivery,
}

#[derive(DeriveIden)]
pub enum PaymentStatus {
    #[sea_orm(iden = "payment_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "failed")]
    Failed,
    #[sea_orm(iden = "refunded")]
    Refunded,
}
