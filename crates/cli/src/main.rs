//! # MamaSouk CLI
//!
//! Command-line interface for the MamaSouk marketplace backend.
//!
//! ## Usage
//!
//! ```bash
//! mamasouk serve    # Start the API server (runs migrations automatically)
//! mamasouk migrate  # Run database migrations
//! mamasouk --help   # Show help
//! ```

use clap::{Args, CommandFactory as _, Parser, Subcommand};
use error::Result;
use migration::MigratorTrait;
use server::AppState;

mod config;
mod serve;

/// MamaSouk - accessible marketplace backend
#[derive(Parser, Debug)]
#[command(name = "mamasouk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "MAMASOUK_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration
    Validate,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "MAMASOUK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port to bind to
    #[arg(short, long, env = "MAMASOUK_PORT", default_value = "3000")]
    port: u16,
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Rollback the last migration instead of applying
    #[arg(long)]
    rollback: bool,
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format, None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    logging::info!(target: "app", command = ?cli.command, "MamaSouk CLI starting...");

    match cli.command {
        Commands::Serve(args) => serve(&args).await?,
        Commands::Migrate(args) => migrate(&args).await?,
        Commands::Completions(args) => completions(&args)?,
        Commands::Validate => validate()?,
    }

    Ok(())
}

async fn serve(args: &ServeArgs) -> Result<()> {
    let db_config = config::DatabaseConfig::from_env().map_err(|e| error::AppError::config(e.to_string()))?;
    let jwt_config = config::jwt_config_from_env().map_err(|e| error::AppError::config(e.to_string()))?;

    logging::info!(target: "serve",
        host = %db_config.host,
        port = %db_config.port,
        database = %db_config.database,
        "Connecting to database..."
    );

    let database_url = config::build_database_url(&db_config);
    let db = migration::connect_to_database(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    logging::info!(target: "serve", "Running database migrations...");
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    logging::info!(target: "serve", "Database migrations completed");

    let state = AppState::new(db, jwt_config);
    crate::serve::run(&args.host, args.port, state).await
}

async fn migrate(args: &MigrateArgs) -> Result<()> {
    let db_config = config::DatabaseConfig::from_env().map_err(|e| error::AppError::config(e.to_string()))?;
    let database_url = config::build_database_url(&db_config);

    let db = migration::connect_to_database(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    if args.rollback {
        logging::info!(target: "migrate", "Rolling back the last migration...");
        migration::Migrator::down(&db, None)
            .await
            .map_err(|e| anyhow::anyhow!("Rollback failed: {}", e))?;
        logging::info!(target: "migrate", "Rollback completed");
        return Ok(());
    }

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    logging::info!(target: "migrate", "Migrations completed");

    Ok(())
}

fn completions(args: &CompletionsArgs) -> Result<()> {
    clap_complete::generate(
        args.shell,
        &mut Cli::command(),
        "mamasouk",
        &mut std::io::stdout(),
    );
    Ok(())
}

fn validate() -> Result<()> {
    let db_config = config::DatabaseConfig::from_env().map_err(|e| error::AppError::config(e.to_string()))?;
    logging::info!(target: "validate",
        host = %db_config.host,
        database = %db_config.database,
        "Database configuration parsed"
    );

    match config::jwt_config_from_env() {
        Ok(jwt) => {
            logging::info!(target: "validate", issuer = %jwt.issuer, "JWT configuration parsed");
        },
        Err(e) => {
            logging::warn!(target: "validate", error = %e, "JWT configuration incomplete");
        },
    }

    logging::info!(target: "validate", "Configuration OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["mamasouk", "serve", "--host", "127.0.0.1", "--port", "8080"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.port, 8080);
            },
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_migrate_rollback() {
        let cli = Cli::parse_from(["mamasouk", "migrate", "--rollback"]);
        match cli.command {
            Commands::Migrate(args) => assert!(args.rollback),
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_cli_parse_validate() {
        let cli = Cli::parse_from(["mamasouk", "validate"]);
        assert!(matches!(cli.command, Commands::Validate));
    }

    #[test]
    fn test_cli_default_log_settings() {
        let cli = Cli::parse_from(["mamasouk", "validate"]);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_format, "pretty");
    }

    #[test]
    fn test_cli_command_factory() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "mamasouk");
    }
}
