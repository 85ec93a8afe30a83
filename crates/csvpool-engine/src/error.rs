//! Error types for the csvpool engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index ledger error: {0}")]
    Index(#[from] csv::Error),

    #[error("Failed to measure '{path}': {source}")]
    Measure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
