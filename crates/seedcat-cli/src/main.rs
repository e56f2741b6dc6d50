mod ingest;
mod products;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::products::ProductsCommands;

#[derive(Debug, Parser)]
#[command(name = "seedcat")]
#[command(about = "Seed catalog ingestion and lookup")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the product spreadsheet into the catalog
    Ingest {
        /// Spreadsheet to read (defaults to `SEEDCAT_SOURCE_PATH`)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Read and normalize only; report what would be written
        #[arg(long)]
        dry_run: bool,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Query the stored catalog
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Inspect past ingestion runs
    Runs {
        #[command(subcommand)]
        command: RunsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Subcommand)]
enum RunsCommands {
    /// List the most recent ingestion runs
    List {
        /// Maximum number of runs to show
        #[arg(long, default_value = "10")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = seedcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Ingest { file, dry_run }) => {
            let source = file.unwrap_or_else(|| config.source_path.clone());
            ingest::run_ingest(&config, &source, dry_run).await?;
        }
        Some(Commands::Db { command }) => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    seedcat_db::ping(&pool).await?;
                    println!("database reachable");
                }
                DbCommands::Migrate => {
                    let applied = seedcat_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Some(Commands::Products { command }) => {
            let pool = connect(&config).await?;
            products::run_products(&pool, command).await?;
        }
        Some(Commands::Runs {
            command: RunsCommands::List { limit },
        }) => {
            let pool = connect(&config).await?;
            let runs = seedcat_db::list_ingest_runs(&pool, limit).await?;
            println!("{}", serde_json::to_string_pretty(&runs)?);
        }
        None => println!("seedcat: no command given, see --help"),
    }

    Ok(())
}

/// Opens the pool described by `config`, failing when `DATABASE_URL` is unset.
pub(crate) async fn connect(config: &seedcat_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let database_url = config.require_database_url()?;
    let pool_config = seedcat_db::PoolConfig::from_app_config(config);
    let pool = seedcat_db::connect_pool(database_url, pool_config).await?;
    Ok(pool)
}
