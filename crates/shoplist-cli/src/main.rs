mod commands;
mod watch;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shoplist_settings::{FileStorage, SettingsRepository};

#[derive(Debug, Parser)]
#[command(name = "shoplist")]
#[command(about = "Find nearby stores for your shopping lists")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Query the store catalog.
    Stores {
        #[command(subcommand)]
        command: commands::StoresCommand,
    },
    /// Show or change preferences.
    Settings {
        #[command(subcommand)]
        command: commands::SettingsCommand,
    },
    /// Read `lat,lon` lines from stdin and print nearby stores for each.
    Watch(watch::WatchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shoplist_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, catalog = %config.catalog, "starting");

    let storage = FileStorage::open(&config.data_dir)?;
    let settings = Arc::new(SettingsRepository::new(storage));

    match cli.command {
        Commands::Stores { command } => commands::run_stores(command, &config, settings).await,
        Commands::Settings { command } => commands::run_settings(command, settings.as_ref()),
        Commands::Watch(args) => watch::run(args, &config, settings).await,
    }
}
