use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use myadmin_rs::{Config, HttpTransport, MyAdminApiClient};
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "myadmin")]
#[command(about = "MyAdmin API command line client", long_about = None)]
struct Cli {
    /// Path to the config file; the GEOTAB_* environment is used if it is missing
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate and print the session result
    Authenticate,
    /// Authenticate, then call a method and print its result
    Call {
        /// Remote method name, e.g. GetCountries
        method: String,
        /// Method parameters as a JSON object
        #[arg(short, long)]
        params: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    tokio::runtime::Runtime::new()?.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;
    let transport = match config.myadmin.timeout_secs {
        Some(secs) => HttpTransport::with_timeout(Duration::from_secs(secs))?,
        None => HttpTransport::new(),
    };
    let mut client = MyAdminApiClient::with_transport(config.client_options(), transport)?;

    info!("Using MyAdmin endpoint {}", client.server_url());

    match cli.command {
        Commands::Authenticate => print_json(&client.authenticate().await?),
        Commands::Call { method, params } => {
            client.ensure_authenticated().await?;
            let params = params
                .map(|raw| serde_json::from_str::<Value>(&raw))
                .transpose()
                .context("--params must be valid JSON")?;
            let result = client.call(&method, params).await?;
            print_json(&result)
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::from_path(path)
    } else {
        warn!("{} not found, reading configuration from environment", path.display());
        Config::from_env()
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
