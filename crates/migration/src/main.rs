use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        std::env::set_var(
            "DATABASE_URL",
            format!(
                "postgres://{}:{}@{}:{}/{}",
                std::env::var("MAMASOUK_DATABASE_USER").unwrap_or_else(|_| "mamasouk".to_string()),
                std::env::var("MAMASOUK_DATABASE_PASSWORD").unwrap_or_default(),
                std::env::var("MAMASOUK_DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string()),
                std::env::var("MAMASOUK_DATABASE_PORT").unwrap_or_else(|_| "5432".to_string()),
                std::env::var("MAMASOUK_DATABASE_NAME").unwrap_or_else(|_| "mamasouk".to_string()),
            ),
        );
    }
    cli::run_cli(migration::Migrator).await;
}
