pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_companies_table;
mod m20250301_000003_add_users_company_fk;
mod m20250301_000004_create_products_table;
mod m20250301_000005_create_orders_table;
mod m20250301_000006_create_order_items_table;
mod m20250301_000007_create_material_suppliers_table;
mod m20250301_000008_create_materials_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_companies_table::Migration),
            Box::new(m20250301_000003_add_users_company_fk::Migration),
            Box::new(m20250301_000004_create_products_table::Migration),
            Box::new(m20250301_000005_create_orders_table::Migration),
            Box::new(m20250301_000006_create_order_items_table::Migration),
            Box::new(m20250301_000007_create_material_suppliers_table::Migration),
            Box::new(m20250301_000008_create_materials_table::Migration),
        ]
    }
}

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    sea_orm::Database::connect(database_url).await
}
