//! Kaggle API response types

use serde::{Deserialize, Serialize};

/// One dataset in a keyword search page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetListing {
    /// Source identifier in `owner/slug` form
    #[serde(rename = "ref")]
    pub dataset_ref: String,

    /// Human-readable dataset title
    #[serde(default)]
    pub title: Option<String>,

    /// Declared total size in bytes; absent when Kaggle does not report one
    #[serde(default)]
    pub total_bytes: Option<u64>,
}
