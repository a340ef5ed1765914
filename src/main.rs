use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nifty_dashboard::data::load_datasets;
use nifty_dashboard::models::{Config, Selection};
use nifty_dashboard::ui;
use nifty_dashboard::views::evaluate_all;

#[derive(Parser, Debug)]
#[command(author, version, about = "Nifty 50 stock dashboard for the terminal", long_about = None)]
struct Args {
    /// Directory holding the five Nifty50_*.csv files (overrides NIFTY_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Company to select on startup
    #[arg(short, long)]
    company: Option<String>,

    /// Print the dashboard payloads for --company as JSON and exit
    #[arg(short, long)]
    export: bool,

    /// Log filter, e.g. "info" or "nifty_dashboard=debug"
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(args: &Args) -> Result<()> {
    // Keep the terminal clean while the TUI owns it
    let default = if args.export { "info" } else { "error" };
    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = match Config::from_env_with_dir(args.data_dir.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("❌ Configuration Error: {}", e);
            std::process::exit(1);
        }
    };

    info!("📂 Loading datasets from {}", config.data_dir.display());
    let datasets = match load_datasets(&config) {
        Ok(datasets) => Arc::new(datasets),
        Err(e) => {
            error!("Failed to load datasets: {}", e);
            eprintln!("❌ Data Error: {}", e);
            eprintln!("Make sure the Nifty50 CSV files are in the data directory.");
            std::process::exit(1);
        }
    };

    if args.export {
        let selection = args
            .company
            .as_deref()
            .map(Selection::company)
            .unwrap_or_default();
        let snapshot = evaluate_all(&selection, &datasets);
        println!("{}", snapshot.to_json_pretty()?);
        return Ok(());
    }

    match ui::run_app(datasets, args.company) {
        Ok(_) => {
            println!("Thanks for using the Nifty 50 Dashboard!");
            Ok(())
        }
        Err(e) => {
            error!("TUI error: {}", e);
            eprintln!("❌ TUI Error: {}", e);
            std::process::exit(1);
        }
    }
}
