//! Core types shared across engine components

use crate::index::IndexRow;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identifies a remote dataset surfaced by keyword search.
///
/// Ephemeral: one is created per search result and discarded once the
/// dataset has been processed (or skipped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetReference {
    /// Source identifier in `owner/slug` form
    pub source: String,

    /// Keyword that surfaced this dataset
    pub keyword: String,

    /// Declared total size in bytes, when the repository reports one
    pub total_bytes: Option<u64>,
}

impl DatasetReference {
    pub fn new(source: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            keyword: keyword.into(),
            total_bytes: None,
        }
    }
}

impl std::fmt::Display for DatasetReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// One extracted file before acceptance.
///
/// Created during extraction, consumed by admission, and either promoted to
/// an [`AcceptedFile`] by the selector or deleted with the dataset's
/// temporary directory.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Location of the extracted bytes inside the dataset's temp directory
    pub path: PathBuf,

    /// Entry name as recorded in the archive (lossy rendering of raw bytes)
    pub original_name: String,

    /// Entry name after encoding repair
    pub repaired_name: String,

    /// Whether encoding repair had to degrade the name
    pub degraded: bool,

    /// Normalized table-name signature
    pub name_signature: String,

    /// Data rows (excluding the header row)
    pub rows: u64,

    /// Columns in the header row
    pub cols: u64,

    /// Size of the extracted file in bytes
    pub size_bytes: u64,

    /// Content fingerprint (lowercase hex digest)
    pub fingerprint: String,
}

/// A candidate that passed admission and was chosen by the selector.
///
/// Immutable once written; `filename` is the final on-disk name inside the
/// pool directory.
#[derive(Debug, Clone)]
pub struct AcceptedFile {
    /// Final filename inside the pool directory
    pub filename: String,

    /// Ledger row recorded for this file
    pub row: IndexRow,
}

/// Per-dataset acceptance counter, capped at a configured maximum.
///
/// Resets for every dataset; the global fingerprint set is what persists.
#[derive(Debug, Clone, Copy)]
pub struct SelectionBudget {
    max: usize,
    used: usize,
}

impl SelectionBudget {
    /// Create a budget allowing up to `max` acceptances
    pub fn new(max: usize) -> Self {
        Self { max, used: 0 }
    }

    /// Slots still available
    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.used)
    }

    /// Whether the budget is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max
    }

    /// Consume one slot; returns false when no slot was available
    pub fn consume(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.used += 1;
        true
    }

    /// Slots consumed so far
    pub fn used(&self) -> usize {
        self.used
    }
}
