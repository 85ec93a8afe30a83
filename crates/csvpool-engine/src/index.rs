//! Pool index ledger (index.csv)
//!
//! The index is the authoritative, append-only record of every accepted
//! file. It doubles as the deduplication oracle: on startup the ledger is
//! replayed to rebuild the in-memory fingerprint set, which makes an
//! interrupted run resumable without re-admitting pooled content. Rows are
//! only ever appended, never rewritten.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One row of the pool index, describing a single accepted file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRow {
    /// Final filename inside the pool directory
    pub filename: String,

    /// Data rows (excluding the header row)
    pub rows: u64,

    /// Columns in the header row
    pub cols: u64,

    /// File size in KB, rounded to two decimals
    pub size_kb: f64,

    /// Content fingerprint (lowercase hex MD5)
    pub md5: String,

    /// Dataset source identifier (`owner/slug`)
    pub source: String,

    /// Keyword that surfaced the dataset
    pub keyword: String,

    /// Normalized table-name signature
    pub name_sig: String,

    /// Entry name as recorded in the archive
    pub orig_zip_name: String,

    /// Entry name after encoding repair
    pub fixed_zip_name: String,
}

/// The global set of pooled content fingerprints.
///
/// Owned state threaded explicitly through admission and commit rather than
/// held as an ambient global, so the engine stays testable without file I/O.
#[derive(Debug, Clone, Default)]
pub struct FingerprintSet {
    digests: HashSet<String>,
}

impl FingerprintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fingerprint is already pooled
    pub fn contains(&self, digest: &str) -> bool {
        self.digests.contains(digest)
    }

    /// Insert a fingerprint; returns false when it was already present
    pub fn insert(&mut self, digest: impl Into<String>) -> bool {
        self.digests.insert(digest.into())
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

impl FromIterator<String> for FingerprintSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            digests: iter.into_iter().collect(),
        }
    }
}

/// The append-only ledger of accepted files
pub struct PoolIndex {
    path: PathBuf,
    rows: Vec<IndexRow>,
    writer: csv::Writer<std::fs::File>,
}

impl PoolIndex {
    /// Open the ledger, replaying any existing rows.
    ///
    /// A malformed row is skipped with a warning; an unreadable file is a
    /// fatal startup error. The underlying file stays open in append mode
    /// so reporting reads and writes can interleave.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut rows = Vec::new();
        let existing = path
            .metadata()
            .map(|meta| meta.len() > 0)
            .unwrap_or(false);

        if existing {
            let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(&path)?;
            for (offset, record) in reader.deserialize::<IndexRow>().enumerate() {
                match record {
                    Ok(row) => rows.push(row),
                    Err(error) => {
                        // +2: one for the header row, one for 1-based lines
                        warn!(line = offset + 2, %error, "Skipping malformed index row");
                    },
                }
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(!existing)
            .from_writer(file);

        Ok(Self { path, rows, writer })
    }

    /// Append one accepted file to the ledger.
    ///
    /// Flushed immediately so a crash never loses a committed row.
    pub fn append(&mut self, row: IndexRow) -> Result<()> {
        self.writer.serialize(&row)?;
        self.writer.flush()?;
        self.rows.push(row);
        Ok(())
    }

    /// Rebuild the fingerprint set from the loaded rows
    pub fn fingerprint_set(&self) -> FingerprintSet {
        self.rows.iter().map(|row| row.md5.clone()).collect()
    }

    /// Rows currently in the ledger (loaded + appended this run)
    pub fn rows(&self) -> &[IndexRow] {
        &self.rows
    }

    /// Number of accepted files recorded
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
