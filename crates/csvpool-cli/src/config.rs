//! Configuration for the collector
//!
//! Defaults mirror the collection policy: shape bounds, per-dataset cap,
//! size ceiling, keyword list. Environment variables with the `CSVPOOL_`
//! prefix override defaults; CLI flags override both.

use crate::error::{CliError, Result};
use csvpool_engine::admission::AdmissionLimits;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Collection Policy Constants
// ============================================================================

/// Default output directory for the pool, index, and scratch space
pub const DEFAULT_BASE_DIR: &str = "./csv_pool";

/// Global maximum number of pooled CSV files
pub const DEFAULT_TARGET_MAX: usize = 8000;

/// Default per-dataset acceptance cap
pub const DEFAULT_MAX_PER_DATASET: usize = 5;

/// Maximum CSV entries scanned per dataset archive
pub const DEFAULT_MAX_SCAN_ENTRIES: usize = 200;

/// Pre-check dataset size limit in MB
pub const DEFAULT_MAX_DATASET_MB: u64 = 2048;

/// Search pages visited per keyword
pub const DEFAULT_PAGES_PER_KEYWORD: u32 = 50;

/// Default search keywords, broad tabular-data territory
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "csv", "tabular", "dataset",
    "business", "finance", "sales", "marketing",
    "education", "university", "students",
    "sports", "football", "basketball",
    "movies", "film", "imdb",
    "health", "medical",
    "government", "census",
    "technology", "startup",
    "traffic", "transportation",
    "climate", "energy",
    "retail", "consumer",
    "real estate", "housing",
];

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Base output directory; pool/, raw_datasets/, index.csv, logs/ live here
    pub base_dir: PathBuf,

    /// Minimum data rows for admission
    pub min_rows: u64,

    /// Maximum data rows for admission
    pub max_rows: u64,

    /// Minimum columns for admission
    pub min_columns: u64,

    /// Maximum files accepted per dataset
    pub max_per_dataset: usize,

    /// Maximum CSV entries scanned per dataset archive
    pub max_scan_entries: usize,

    /// Dataset size ceiling in MB
    pub max_dataset_mb: u64,

    /// Whether to download datasets whose size is unknown
    pub allow_unknown_size: bool,

    /// Search keywords
    pub keywords: Vec<String>,

    /// Pages visited per keyword
    pub pages_per_keyword: u32,

    /// Stop once the pool holds this many files
    pub target_max: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        let limits = AdmissionLimits::default();
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            min_rows: limits.min_rows,
            max_rows: limits.max_rows,
            min_columns: limits.min_columns,
            max_per_dataset: DEFAULT_MAX_PER_DATASET,
            max_scan_entries: DEFAULT_MAX_SCAN_ENTRIES,
            max_dataset_mb: DEFAULT_MAX_DATASET_MB,
            allow_unknown_size: true,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            pages_per_keyword: DEFAULT_PAGES_PER_KEYWORD,
            target_max: DEFAULT_TARGET_MAX,
        }
    }
}

impl CollectorConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// Recognized variables (all optional):
    /// - `CSVPOOL_BASE_DIR`
    /// - `CSVPOOL_MIN_ROWS`, `CSVPOOL_MAX_ROWS`, `CSVPOOL_MIN_COLUMNS`
    /// - `CSVPOOL_MAX_PER_DATASET`, `CSVPOOL_MAX_SCAN_ENTRIES`
    /// - `CSVPOOL_MAX_DATASET_MB`, `CSVPOOL_ALLOW_UNKNOWN_SIZE`
    /// - `CSVPOOL_KEYWORDS` (comma-separated), `CSVPOOL_PAGES_PER_KEYWORD`
    /// - `CSVPOOL_TARGET_MAX`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("CSVPOOL_BASE_DIR") {
            config.base_dir = PathBuf::from(dir);
        }
        if let Some(v) = env_parse("CSVPOOL_MIN_ROWS")? {
            config.min_rows = v;
        }
        if let Some(v) = env_parse("CSVPOOL_MAX_ROWS")? {
            config.max_rows = v;
        }
        if let Some(v) = env_parse("CSVPOOL_MIN_COLUMNS")? {
            config.min_columns = v;
        }
        if let Some(v) = env_parse("CSVPOOL_MAX_PER_DATASET")? {
            config.max_per_dataset = v;
        }
        if let Some(v) = env_parse("CSVPOOL_MAX_SCAN_ENTRIES")? {
            config.max_scan_entries = v;
        }
        if let Some(v) = env_parse("CSVPOOL_MAX_DATASET_MB")? {
            config.max_dataset_mb = v;
        }
        if let Some(v) = env_parse("CSVPOOL_ALLOW_UNKNOWN_SIZE")? {
            config.allow_unknown_size = v;
        }
        if let Ok(keywords) = std::env::var("CSVPOOL_KEYWORDS") {
            config.keywords = keywords
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
        }
        if let Some(v) = env_parse("CSVPOOL_PAGES_PER_KEYWORD")? {
            config.pages_per_keyword = v;
        }
        if let Some(v) = env_parse("CSVPOOL_TARGET_MAX")? {
            config.target_max = v;
        }

        Ok(config)
    }

    /// Admission limits derived from the shape bounds
    pub fn limits(&self) -> AdmissionLimits {
        AdmissionLimits {
            min_rows: self.min_rows,
            max_rows: self.max_rows,
            min_columns: self.min_columns,
        }
    }

    /// Size ceiling in bytes
    pub fn max_dataset_bytes(&self) -> u64 {
        self.max_dataset_mb * 1024 * 1024
    }

    /// Scratch directory for per-dataset temporary files
    pub fn raw_dir(&self) -> PathBuf {
        self.base_dir.join("raw_datasets")
    }

    /// Directory of accepted files
    pub fn pool_dir(&self) -> PathBuf {
        self.base_dir.join("pool")
    }

    /// Path of the pool index ledger
    pub fn index_path(&self) -> PathBuf {
        self.base_dir.join("index.csv")
    }

    /// Directory for log files
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CliError::config(format!("{} has an invalid value: '{}'", name, value))),
        Err(_) => Ok(None),
    }
}
