mod schema;
mod submit;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use marketdesk_api::StoreApiClient;
use marketdesk_core::{AppConfig, ConfigError};
use marketdesk_submission::{Notice, NoticeLevel};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "marketdesk")]
#[command(about = "Marketplace product submission tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a category's field schema and models as JSON
    Schema {
        /// Backend category id
        category_id: i64,
    },
    /// Validate and submit a product described in a YAML file
    Submit {
        /// Path to the submission file
        path: PathBuf,
        /// Print the payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

const NO_COMMAND_HINT: &str = "marketdesk: run with --help to list commands";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse(), marketdesk_core::load_app_config).await
}

/// Dispatches `cli`. Configuration is only loaded once a command needs the
/// backend.
async fn run<F>(cli: Cli, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    let Some(command) = cli.command else {
        println!("{NO_COMMAND_HINT}");
        return Ok(());
    };

    let config = load_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = StoreApiClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build store API client: {e}"))?;
    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "client ready");

    match command {
        Commands::Schema { category_id } => schema::run_schema(&client, category_id).await,
        Commands::Submit { path, dry_run } => submit::run_submit(&client, &path, dry_run).await,
    }
}

/// Prints every notice published so far to stderr.
pub(crate) fn drain_notices(notices: &mut broadcast::Receiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        let label = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{label}] {}", notice.message);
    }
}

#[cfg(test)]
mod tests;
