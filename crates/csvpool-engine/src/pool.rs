//! Committing selected candidates into the pool
//!
//! Commitment is where eligibility becomes permanence: the fingerprint is
//! check-and-inserted, the bytes move into the pool directory under the
//! final name, and the ledger row is appended. The fingerprint check runs
//! again here (not only at admission) because two byte-identical candidates
//! inside one archive can both be eligible simultaneously; the second one
//! loses its slot the moment the first commits.

use crate::error::Result;
use crate::index::{FingerprintSet, IndexRow, PoolIndex};
use crate::sanitize;
use crate::types::{AcceptedFile, CandidateFile, DatasetReference, SelectionBudget};
use std::path::Path;
use tracing::{debug, warn};

/// Commit the selected candidates of one dataset.
///
/// `picks` are indices into `candidates` in pick order, as produced by
/// [`crate::select::select_diverse`]. Files that fail to move are logged
/// and skipped; a ledger append failure is fatal and propagates.
pub fn commit_selected(
    candidates: &[CandidateFile],
    picks: &[usize],
    dataset: &DatasetReference,
    pool_dir: &Path,
    index: &mut PoolIndex,
    pooled: &mut FingerprintSet,
    budget: &mut SelectionBudget,
) -> Result<Vec<AcceptedFile>> {
    let mut accepted = Vec::new();

    for &idx in picks {
        if budget.is_exhausted() {
            break;
        }

        let candidate = &candidates[idx];

        if pooled.contains(&candidate.fingerprint) {
            debug!(
                fingerprint = %candidate.fingerprint,
                name = %candidate.repaired_name,
                "Identical content already committed, dropping"
            );
            continue;
        }

        let filename = sanitize::output_name(&candidate.name_signature, &candidate.fingerprint);
        let destination = pool_dir.join(&filename);

        if let Err(error) = move_file(&candidate.path, &destination) {
            warn!(
                %error,
                source = %candidate.path.display(),
                "Failed to move file into pool, skipping"
            );
            continue;
        }

        let row = IndexRow {
            filename: filename.clone(),
            rows: candidate.rows,
            cols: candidate.cols,
            size_kb: round_kb(candidate.size_bytes),
            md5: candidate.fingerprint.clone(),
            source: dataset.source.clone(),
            keyword: dataset.keyword.clone(),
            name_sig: candidate.name_signature.clone(),
            orig_zip_name: candidate.original_name.clone(),
            fixed_zip_name: candidate.repaired_name.clone(),
        };

        index.append(row.clone())?;
        pooled.insert(candidate.fingerprint.clone());
        budget.consume();

        accepted.push(AcceptedFile { filename, row });
    }

    Ok(accepted)
}

/// Size in KB, rounded to two decimals (the ledger's unit)
fn round_kb(size_bytes: u64) -> f64 {
    (size_bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

/// Move a file, falling back to copy+remove across filesystems
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)
        },
    }
}
