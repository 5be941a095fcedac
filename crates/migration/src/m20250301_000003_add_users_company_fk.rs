use sea_orm_migration::prelude::*;

use crate::{
    m20250301_000001_create_users_table::Users,
    m20250301_000002_create_companies_table::Companies,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

// Users and companies reference each other, so the users-side FK lands
// after both tables exist.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_users_company")
                    .from(Users::Table, Users::CompanyId)
                    .to(Companies::Table, Companies::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name("fk_users_company")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
