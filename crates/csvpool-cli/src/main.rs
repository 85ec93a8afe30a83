//! csvpool - Kaggle CSV dataset collector entry point

use clap::Parser;
use csvpool_cli::api::KaggleClient;
use csvpool_cli::{pipeline, Cli, Collector, CollectorConfig};
use csvpool_common::logging::{init_logging, LogConfig, LogLevel};
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load .env if present; Kaggle credentials usually live there
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match CollectorConfig::from_env() {
        Ok(config) => cli.apply_to(config),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        },
    };

    // Initialize logging based on verbose flag and environment
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_dir(config.log_dir())
        .log_file_prefix("csvpool".to_string())
        .build();

    // Environment variables override the flag-derived config field by field
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    if let Err(e) = pipeline::bootstrap_dirs(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // The collector should still run if logging cannot be set up
    let _ = init_logging(&log_config);

    let client = match KaggleClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Cannot create Kaggle client");
            eprintln!("Error: {}", e);
            process::exit(2);
        },
    };

    let collector = Collector::new(config, client);
    match collector.run().await {
        Ok(summary) => {
            info!(
                pool = summary.pool_size,
                accepted = summary.files_accepted,
                "csvpool finished"
            );
            println!(
                "Done. {} file(s) accepted this run, {} in the pool, {} dataset(s) skipped.",
                summary.files_accepted, summary.pool_size, summary.datasets_skipped
            );
        },
        Err(e) => {
            error!(error = %e, "Collection run failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        },
    }
}
