//! csvpool CLI library
//!
//! Command-line collector that builds a deduplicated pool of real-world CSV
//! files from Kaggle:
//!
//! - **Search**: walk keyword search pages against the Kaggle API
//! - **Filter**: size precheck, shape bounds, content dedup, name diversity
//! - **Pool**: move accepted files under content-derived names and record
//!   every acceptance in an append-only CSV ledger
//!
//! Runs are resumable: the ledger is reloaded at startup and previously
//! pooled content is never accepted again.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;

// Re-export commonly used types
pub use config::CollectorConfig;
pub use error::{CliError, Result};
pub use pipeline::{Collector, RunSummary};

use clap::Parser;
use std::path::PathBuf;

/// csvpool - Kaggle CSV dataset collector
#[derive(Parser, Debug)]
#[command(name = "csvpool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base output directory (pool, index, scratch space, logs)
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Search keyword; repeat for several (replaces the built-in list)
    #[arg(short, long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,

    /// Search pages to visit per keyword
    #[arg(long, value_name = "N")]
    pub pages: Option<u32>,

    /// Stop once the pool holds this many files
    #[arg(long, value_name = "N")]
    pub target_max: Option<usize>,

    /// Maximum files accepted per dataset
    #[arg(long, value_name = "N")]
    pub max_per_dataset: Option<usize>,

    /// Minimum data rows for a CSV to be admitted
    #[arg(long, value_name = "N")]
    pub min_rows: Option<u64>,

    /// Maximum data rows for a CSV to be admitted
    #[arg(long, value_name = "N")]
    pub max_rows: Option<u64>,

    /// Minimum columns for a CSV to be admitted
    #[arg(long, value_name = "N")]
    pub min_columns: Option<u64>,

    /// Dataset size ceiling in MB
    #[arg(long, value_name = "MB")]
    pub max_dataset_mb: Option<u64>,

    /// Skip datasets whose size Kaggle does not report
    #[arg(long)]
    pub skip_unknown_size: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply CLI flags on top of an environment-derived config.
    ///
    /// Flags win over environment variables, which win over defaults.
    pub fn apply_to(&self, mut config: CollectorConfig) -> CollectorConfig {
        if let Some(dir) = &self.base_dir {
            config.base_dir = dir.clone();
        }
        if !self.keywords.is_empty() {
            config.keywords = self.keywords.clone();
        }
        if let Some(pages) = self.pages {
            config.pages_per_keyword = pages;
        }
        if let Some(target) = self.target_max {
            config.target_max = target;
        }
        if let Some(cap) = self.max_per_dataset {
            config.max_per_dataset = cap;
        }
        if let Some(min) = self.min_rows {
            config.min_rows = min;
        }
        if let Some(max) = self.max_rows {
            config.max_rows = max;
        }
        if let Some(cols) = self.min_columns {
            config.min_columns = cols;
        }
        if let Some(mb) = self.max_dataset_mb {
            config.max_dataset_mb = mb;
        }
        if self.skip_unknown_size {
            config.allow_unknown_size = false;
        }
        config
    }
}
