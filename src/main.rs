use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use stock_eod_pipeline::{
    config::{DEFAULT_CONFIG_PATH, DEFAULT_DB_SECTION},
    logging::init_tracing,
    services::run_from_file,
};

/// Loads the latest end-of-day quote into the warehouse and emails the operator.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// INI file with the [api], database, [SMTP] and [Email] sections
    #[arg(long, env = "PIPELINE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Name of the database section
    #[arg(long, env = "PIPELINE_DB_SECTION", default_value = DEFAULT_DB_SECTION)]
    db_section: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    init_tracing().context("Failed to initialise logging")?;

    let args = Args::parse();
    let report = run_from_file(&args.config, &args.db_section).await;

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
