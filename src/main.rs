//! Catalogo CLI - HTTP catalog service for vehicles, brands and accessories

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use catalogo::CatalogStore;
use catalogo::config::{self, CatalogoConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "catalogo")]
#[command(version = "0.1.0")]
#[command(about = "Relational catalog service for vehicles, brands and accessories")]
#[command(long_about = r#"
Catalogo serves four resource collections over HTTP:
  • /marcas         brands (with nested profile)
  • /fichas-marca   brand profiles
  • /carros         vehicles (brand + accessory references)
  • /acessorios     accessories

Every collection supports CRUD plus /search with free-text query,
sorting and pagination.

Example usage:
  catalogo init
  catalogo serve --port 8080
  catalogo stats --database catalogo.db
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Public base address used in search nextPage links
        #[arg(long)]
        base_url: Option<String>,

        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a starter config file
    Init {
        /// Where to write the config
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show row counts for the catalog tables
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Serve { port, database, base_url, config } => {
            let file = config::load_config(config.as_deref())?.unwrap_or_default();

            let port = port.or(file.port).unwrap_or(config::DEFAULT_PORT);
            let database = database
                .or(file.database.map(PathBuf::from))
                .unwrap_or_else(config::default_database_path);
            let base_url = base_url
                .or(file.base_url)
                .unwrap_or_else(|| config::DEFAULT_BASE_URL.to_string());

            config::ensure_db_dir(&database)?;
            tracing::info!("Serving catalog from {:?}", database);
            catalogo::server::start_server(port, database, base_url).await?;
        }

        Commands::Init { path, force } => {
            let path = path.unwrap_or_else(config::default_config_path);
            let starter = CatalogoConfig {
                database: Some(config::default_database_path().display().to_string()),
                port: Some(config::DEFAULT_PORT),
                base_url: Some(config::DEFAULT_BASE_URL.to_string()),
            };
            config::write_config(&path, &starter, force)?;
            println!("✅ Config written to {}", path.display());
        }

        Commands::Stats { database, config } => {
            let file = config::load_config(config.as_deref())?.unwrap_or_default();
            let database = database
                .or(file.database.map(PathBuf::from))
                .unwrap_or_else(config::default_database_path);

            let store = CatalogStore::open(&database)?;
            let stats = store.stats()?;

            println!("📊 Catalogo Statistics ({:?})", database);
            println!("------------------------------------");
            println!("{}", stats);
        }
    }

    Ok(())
}
