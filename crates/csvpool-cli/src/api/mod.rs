//! Kaggle API integration
//!
//! Thin HTTP layer over the Kaggle public API v1: keyword search with
//! pagination, and dataset archive download. All calls carry bounded retry
//! with backoff; authentication/not-found failures surface as a distinct
//! unavailable condition so the pipeline can skip rather than halt.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{KaggleClient, KaggleCredentials};
pub use types::DatasetListing;
