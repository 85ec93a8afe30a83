//! Error types shared across the csvpool workspace

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Main error type for shared utilities
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
