//! Zip archive extraction
//!
//! Pulls CSV entries out of a downloaded dataset archive into the dataset's
//! temporary directory. Entry names are returned as raw bytes because
//! cross-platform producers store them in arbitrary encodings; repair
//! happens later in the engine. Extracted files get synthetic on-disk names
//! so a hostile or garbled entry name can never escape the temp directory.

use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// One CSV entry extracted from a dataset archive
#[derive(Debug, Clone)]
pub struct ExtractedEntry {
    /// Entry name bytes exactly as stored in the archive
    pub raw_name: Vec<u8>,

    /// Where the extracted bytes were written
    pub path: PathBuf,

    /// Uncompressed size in bytes
    pub size_bytes: u64,
}

/// Extract up to `max_entries` CSV entries from `archive_path` into `dest_dir`.
///
/// Directories and non-CSV entries are skipped. The scan bound caps work on
/// pathological archives with thousands of entries.
pub fn extract_csv_entries(
    archive_path: &Path,
    dest_dir: &Path,
    max_entries: usize,
) -> Result<Vec<ExtractedEntry>> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut entries = Vec::new();

    for index in 0..archive.len() {
        if entries.len() >= max_entries {
            debug!(max_entries, "Entry scan bound reached");
            break;
        }

        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let raw_name = entry.name_raw().to_vec();
        if !has_csv_extension(&raw_name) {
            continue;
        }

        // Synthetic name; the real (repaired) name only ever lands in the index
        let out_path = dest_dir.join(format!("entry_{:04}.csv", index));
        let mut writer = BufWriter::new(File::create(&out_path)?);
        io::copy(&mut entry, &mut writer)?;

        entries.push(ExtractedEntry {
            size_bytes: entry.size(),
            path: out_path,
            raw_name,
        });
    }

    Ok(entries)
}

/// Case-insensitive `.csv` check on the raw name bytes
fn has_csv_extension(raw_name: &[u8]) -> bool {
    let lossy = String::from_utf8_lossy(raw_name);
    lossy.to_lowercase().ends_with(".csv")
}
