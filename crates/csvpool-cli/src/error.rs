//! Error types for the csvpool CLI
//!
//! Fatal setup problems get actionable messages; everything that can happen
//! mid-run (unavailable datasets, oversized archives, bad files) is a
//! skippable condition the pipeline logs and steps over.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Kaggle API credentials are not configured
    #[error("Missing Kaggle credentials. Set KAGGLE_USERNAME and KAGGLE_KEY in the environment or a .env file.")]
    MissingCredentials,

    /// Dataset cannot be fetched (auth, not-found, access terms)
    #[error("Dataset unavailable: {0}. It may be private, deleted, or gated behind terms of use.")]
    Unavailable(String),

    /// Declared or actual dataset size exceeds the configured ceiling
    #[error("Dataset size {size_mb} MB exceeds the {limit_mb} MB ceiling.")]
    SizeExceeded { size_mb: u64, limit_mb: u64 },

    /// Dataset size is unknown and the configuration forbids unknown sizes
    #[error("Dataset size is unknown and CSVPOOL_ALLOW_UNKNOWN_SIZE is disabled.")]
    SizeUnknown,

    /// Kaggle API communication failed after retries
    #[error("API error: {0}. Check your network connection and the Kaggle status page.")]
    Api(String),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your internet connection.")]
    Http(#[from] reqwest::Error),

    /// Archive could not be read
    #[error("Archive error: {0}. The downloaded file may be truncated or not a zip.")]
    Zip(#[from] zip::result::ZipError),

    /// File system operation failed
    #[error("File operation failed: {0}. Check permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Engine operation failed
    #[error(transparent)]
    Engine(#[from] csvpool_engine::EngineError),

    /// Shared utility failed
    #[error(transparent)]
    Common(#[from] csvpool_common::PoolError),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or flags.")]
    Config(String),
}

impl CliError {
    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create an unavailable-dataset error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error abandons one dataset rather than the whole run
    pub fn is_skippable(&self) -> bool {
        !matches!(self, Self::MissingCredentials | Self::Config(_))
    }
}
