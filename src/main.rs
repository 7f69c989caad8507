//! Taboo Store - Main Binary
//!
//! Serves the card catalog over HTTP and offers a few catalog tools

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use taboo_store::{
    config::ServerConfig,
    core::{Language, LanguageFilter},
    deck::CardService,
    loader::CatalogStore,
    server,
};

#[derive(Parser)]
#[command(name = "taboo")]
#[command(about = "Taboo Store - card catalog service for the Taboo word game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// JSON config file (flags and environment variables override it)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Address to listen on (default: 127.0.0.1:8000)
        #[arg(long, env = "TABOO_BIND")]
        bind: Option<SocketAddr>,

        /// Directory containing the catalog files (default: data)
        #[arg(long, env = "TABOO_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// File that problem reports are appended to
        #[arg(long, env = "TABOO_REPORT_LOG")]
        report_log: Option<PathBuf>,

        /// Allowed CORS origin (repeatable; replaces the defaults)
        #[arg(long = "allow-origin", value_name = "ORIGIN")]
        allowed_origins: Vec<String>,
    },

    /// Print a shuffled deck as JSON
    Cards {
        /// Catalog to draw from: en, pt or both
        #[arg(long, short = 'l', default_value = "both")]
        language: LanguageFilter,

        /// Directory containing the catalog files
        #[arg(long, env = "TABOO_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Set random seed for a reproducible order
        #[arg(long)]
        seed: Option<u64>,

        /// Print at most this many cards
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Load and validate every catalog file
    Check {
        /// Directory containing the catalog files
        #[arg(long, env = "TABOO_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            bind,
            data_dir,
            report_log,
            allowed_origins,
        } => {
            let mut settings = match config {
                Some(path) => ServerConfig::from_file(&path)?,
                None => ServerConfig::default(),
            };
            if let Some(bind) = bind {
                settings.bind = bind;
            }
            if let Some(data_dir) = data_dir {
                settings.data_dir = data_dir;
            }
            if let Some(report_log) = report_log {
                settings.report_log = report_log;
            }
            if !allowed_origins.is_empty() {
                settings.allowed_origins = allowed_origins;
            }

            server::serve(settings).await.context("server failed")?
        }
        Commands::Cards {
            language,
            data_dir,
            seed,
            limit,
        } => run_cards(language, data_dir, seed, limit).await?,
        Commands::Check { data_dir } => run_check(data_dir).await?,
    }

    Ok(())
}

async fn run_cards(
    language: LanguageFilter,
    data_dir: PathBuf,
    seed: Option<u64>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let store = CatalogStore::new(data_dir);
    let service = match seed {
        Some(seed) => CardService::with_seed(store, seed),
        None => CardService::new(store),
    };

    let mut deck = service
        .get_cards(language)
        .await
        .with_context(|| format!("failed to load '{language}' cards"))?;
    if let Some(limit) = limit {
        deck.truncate(limit);
    }

    println!("{}", serde_json::to_string_pretty(&deck)?);
    Ok(())
}

async fn run_check(data_dir: PathBuf) -> anyhow::Result<()> {
    let store = CatalogStore::new(data_dir);
    let mut failures = 0;

    for language in Language::ALL {
        match store.load(language).await {
            Ok(cards) => println!(
                "{language}: {} cards ({})",
                cards.len(),
                store.path_for(language).display()
            ),
            Err(e) => {
                println!("{language}: FAILED - {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} catalog(s) failed validation");
    }
    Ok(())
}
