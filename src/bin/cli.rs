//! DataMall ingestion CLI
//!
//! Fetches LTA DataMall bus reference data, loads it into SQLite, and builds
//! the stop→services report. The DataMall account key is read from the
//! `DATAMALL_ACCOUNT_KEY` environment variable for commands that hit the API.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use datamall_ingest::{
    config::Config,
    error::{AppError, Result},
    pipeline,
    services::DataMallClient,
    storage::Store,
};

/// Environment variable carrying the DataMall account key.
const ACCOUNT_KEY_VAR: &str = "DATAMALL_ACCOUNT_KEY";

/// datamall - LTA DataMall bus data ingestion
#[derive(Parser, Debug)]
#[command(
    name = "datamall",
    version,
    about = "Fetches LTA DataMall bus reference data into SQLite"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "datamall.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all bus stops into a final artifact file
    FetchStops {
        /// Output path (default: paths.stops_file from config)
        output: Option<PathBuf>,
    },

    /// Fetch all bus routes into a final artifact file
    FetchRoutes {
        /// Output path (default: paths.routes_file from config)
        output: Option<PathBuf>,
    },

    /// Load both artifact files into the SQLite store
    Load,

    /// Write the stop-services report as a JSON array to stdout
    Report,

    /// Run the full pipeline: fetch stops, fetch routes, load, report
    Pipeline,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Read the account key, failing with a diagnostic if it is not set.
fn account_key() -> Result<String> {
    std::env::var(ACCOUNT_KEY_VAR).map_err(|_| {
        AppError::config(format!("{ACCOUNT_KEY_VAR} environment variable not set"))
    })
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    match cli.command {
        Command::FetchStops { output } => {
            let key = account_key()?;
            let output = output.unwrap_or_else(|| PathBuf::from(&config.paths.stops_file));
            let client = DataMallClient::new(&config.api, &config.api.stops_endpoint, key)?;
            pipeline::run_fetch(&client, &output, "bus stops").await?;
            log::info!("Artifact written to {}", output.display());
        }

        Command::FetchRoutes { output } => {
            let key = account_key()?;
            let output = output.unwrap_or_else(|| PathBuf::from(&config.paths.routes_file));
            let client = DataMallClient::new(&config.api, &config.api.routes_endpoint, key)?;
            pipeline::run_fetch(&client, &output, "bus routes").await?;
            log::info!("Artifact written to {}", output.display());
        }

        Command::Load => {
            let mut store = Store::open(&config.paths.database)?;
            let (stops, routes) = pipeline::run_load(
                &mut store,
                &config.paths.stops_file,
                &config.paths.routes_file,
            )
            .await?;
            log::info!("Load complete: {stops} stops, {routes} route rows");
        }

        Command::Report => {
            let store = Store::open(&config.paths.database)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            pipeline::run_report(&store, &mut out)?;
            writeln!(out)?;
        }

        Command::Pipeline => {
            let key = account_key()?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            pipeline::run_pipeline(&config, &key, &mut out).await?;
            writeln!(out)?;
        }
    }

    Ok(())
}
