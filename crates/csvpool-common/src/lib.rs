//! csvpool Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling, logging, and content fingerprinting for the
//! csvpool workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used by both the collection
//! engine and the CLI:
//!
//! - **Error Handling**: Custom error and result types
//! - **Fingerprints**: Streaming content hashing for deduplication
//! - **Logging**: Centralized tracing setup
//!
//! # Example
//!
//! ```no_run
//! use csvpool_common::{Result, PoolError};
//! use csvpool_common::fingerprint::fingerprint_file;
//!
//! fn identify(path: &str) -> Result<()> {
//!     let digest = fingerprint_file(path)?;
//!     tracing::info!(%digest, "file fingerprinted");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fingerprint;
pub mod logging;

// Re-export commonly used types
pub use error::{PoolError, Result};
