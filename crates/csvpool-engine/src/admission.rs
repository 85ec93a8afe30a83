//! Per-file admission checks
//!
//! Admission decides whether one extracted file is eligible for selection:
//! row count within bounds, enough columns, and content not already pooled.
//! A rejection is an outcome, not a failure; the run continues with the
//! dataset's remaining files. Admission never inserts into the fingerprint
//! set — that happens only when the selector commits a file, because a
//! shape-admissible file can still lose its selection slot.

use crate::error::{EngineError, Result};
use crate::index::FingerprintSet;
use crate::types::CandidateFile;
use std::path::Path;
use thiserror::Error;

/// Shape bounds a file must satisfy to enter the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionLimits {
    /// Minimum data rows (header excluded)
    pub min_rows: u64,

    /// Maximum data rows
    pub max_rows: u64,

    /// Minimum columns in the header row
    pub min_columns: u64,
}

impl Default for AdmissionLimits {
    fn default() -> Self {
        Self {
            min_rows: 300,
            max_rows: 50_000,
            min_columns: 4,
        }
    }
}

/// Why a candidate was turned away.
///
/// Each variant is logged as a distinct reason; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("too few rows ({rows} < {min})")]
    TooFewRows { rows: u64, min: u64 },

    #[error("too many rows ({rows} > {max})")]
    TooManyRows { rows: u64, max: u64 },

    #[error("too few columns ({cols} < {min})")]
    TooFewColumns { cols: u64, min: u64 },

    #[error("duplicate content ({fingerprint})")]
    Duplicate { fingerprint: String },
}

/// Measure the shape of a CSV file: (data rows, header columns).
///
/// The reader is byte-oriented and flexible, so mixed encodings and ragged
/// records don't abort measurement; records the parser cannot recover are
/// simply not counted, mirroring a lossy read of the file.
pub fn measure_csv(path: impl AsRef<Path>) -> Result<(u64, u64)> {
    let path = path.as_ref();
    let measure_err = |source: csv::Error| EngineError::Measure {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(measure_err)?;

    let cols = reader.byte_headers().map_err(measure_err)?.len() as u64;

    let mut rows = 0u64;
    for record in reader.byte_records() {
        if record.is_ok() {
            rows += 1;
        }
    }

    Ok((rows, cols))
}

/// Check a candidate against shape bounds and the global fingerprint set.
///
/// Checks short-circuit in order: row bounds, column bound, duplication.
pub fn admit(
    candidate: &CandidateFile,
    limits: &AdmissionLimits,
    pooled: &FingerprintSet,
) -> std::result::Result<(), Rejection> {
    if candidate.rows < limits.min_rows {
        return Err(Rejection::TooFewRows {
            rows: candidate.rows,
            min: limits.min_rows,
        });
    }

    if candidate.rows > limits.max_rows {
        return Err(Rejection::TooManyRows {
            rows: candidate.rows,
            max: limits.max_rows,
        });
    }

    if candidate.cols < limits.min_columns {
        return Err(Rejection::TooFewColumns {
            cols: candidate.cols,
            min: limits.min_columns,
        });
    }

    if pooled.contains(&candidate.fingerprint) {
        return Err(Rejection::Duplicate {
            fingerprint: candidate.fingerprint.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn candidate(rows: u64, cols: u64, fingerprint: &str) -> CandidateFile {
        CandidateFile {
            path: PathBuf::from("/tmp/candidate.csv"),
            original_name: "candidate.csv".to_string(),
            repaired_name: "candidate.csv".to_string(),
            degraded: false,
            name_signature: "candidate".to_string(),
            rows,
            cols,
            size_bytes: 1024,
            fingerprint: fingerprint.to_string(),
        }
    }

    #[test]
    fn test_admit_within_bounds() {
        let limits = AdmissionLimits::default();
        let pooled = FingerprintSet::new();
        assert!(admit(&candidate(300, 4, "aa"), &limits, &pooled).is_ok());
        assert!(admit(&candidate(50_000, 12, "bb"), &limits, &pooled).is_ok());
    }

    #[test]
    fn test_reject_row_bounds() {
        let limits = AdmissionLimits::default();
        let pooled = FingerprintSet::new();
        assert_eq!(
            admit(&candidate(299, 4, "aa"), &limits, &pooled),
            Err(Rejection::TooFewRows { rows: 299, min: 300 })
        );
        assert_eq!(
            admit(&candidate(50_001, 4, "aa"), &limits, &pooled),
            Err(Rejection::TooManyRows { rows: 50_001, max: 50_000 })
        );
    }

    #[test]
    fn test_reject_column_bound() {
        let limits = AdmissionLimits::default();
        let pooled = FingerprintSet::new();
        assert_eq!(
            admit(&candidate(500, 3, "aa"), &limits, &pooled),
            Err(Rejection::TooFewColumns { cols: 3, min: 4 })
        );
    }

    #[test]
    fn test_reject_duplicate_content() {
        let limits = AdmissionLimits::default();
        let mut pooled = FingerprintSet::new();
        pooled.insert("aa");
        assert_eq!(
            admit(&candidate(500, 5, "aa"), &limits, &pooled),
            Err(Rejection::Duplicate { fingerprint: "aa".to_string() })
        );
    }

    #[test]
    fn test_shape_check_precedes_dedup() {
        // Short-circuit order: a file failing shape reports shape, not dedup
        let limits = AdmissionLimits::default();
        let mut pooled = FingerprintSet::new();
        pooled.insert("aa");
        assert_eq!(
            admit(&candidate(10, 2, "aa"), &limits, &pooled),
            Err(Rejection::TooFewRows { rows: 10, min: 300 })
        );
    }

    #[test]
    fn test_measure_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.csv");
        std::fs::write(&path, "a,b,c,d\n1,2,3,4\n5,6,7,8\n").unwrap();

        let (rows, cols) = measure_csv(&path).unwrap();
        assert_eq!(rows, 2);
        assert_eq!(cols, 4);
    }

    #[test]
    fn test_measure_csv_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        std::fs::write(&path, "a,b,c,d\n1,2\n1,2,3,4,5\n").unwrap();

        let (rows, cols) = measure_csv(&path).unwrap();
        assert_eq!(rows, 2);
        assert_eq!(cols, 4);
    }

    #[test]
    fn test_measure_csv_missing_file() {
        assert!(measure_csv("/nonexistent/no.csv").is_err());
    }
}
