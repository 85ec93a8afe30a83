//! The sequential collection pipeline
//!
//! One worker processes one dataset at a time: search page by page, size
//! precheck, download into a per-dataset temporary directory, extract,
//! admit, select, commit, and discard the temporaries no matter what
//! happened. Dataset-level failures are logged and skipped; only startup
//! problems (unwritable output directory, unreadable ledger, missing
//! credentials) abort the run.

use crate::api::KaggleClient;
use crate::config::CollectorConfig;
use crate::error::{CliError, Result};
use crate::extract;
use csvpool_common::fingerprint::fingerprint_file;
use csvpool_engine::admission::{admit, measure_csv};
use csvpool_engine::index::{FingerprintSet, PoolIndex};
use csvpool_engine::naming::name_signature;
use csvpool_engine::pool::commit_selected;
use csvpool_engine::sanitize::repair_entry_name;
use csvpool_engine::select::select_diverse;
use csvpool_engine::types::{CandidateFile, DatasetReference, SelectionBudget};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Totals reported at the end of a run
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    /// Dataset references seen across all keyword pages
    pub datasets_seen: usize,

    /// Datasets skipped (size, unavailable, extraction failure, retries)
    pub datasets_skipped: usize,

    /// Files committed to the pool this run
    pub files_accepted: usize,

    /// Total files in the pool after the run
    pub pool_size: usize,
}

/// The collector: configuration plus API client
pub struct Collector {
    config: CollectorConfig,
    client: KaggleClient,
}

impl Collector {
    pub fn new(config: CollectorConfig, client: KaggleClient) -> Self {
        Self { config, client }
    }

    /// Run the collection loop until keywords are exhausted or the global
    /// target is reached.
    pub async fn run(&self) -> Result<RunSummary> {
        // Fatal setup: directories and the ledger must be writable
        std::fs::create_dir_all(self.config.raw_dir())?;
        std::fs::create_dir_all(self.config.pool_dir())?;
        let mut index = PoolIndex::open(self.config.index_path())?;
        let mut pooled = index.fingerprint_set();

        info!(
            pooled = index.len(),
            target = self.config.target_max,
            "Pool ledger loaded"
        );

        let mut summary = RunSummary::default();
        let mut processed: HashSet<String> = HashSet::new();

        'run: for keyword in &self.config.keywords {
            for page in 1..=self.config.pages_per_keyword {
                let listings = match self.client.list_datasets(keyword, page).await {
                    Ok(listings) => listings,
                    Err(error) => {
                        warn!(%keyword, page, %error, "Search page failed, moving on");
                        continue;
                    },
                };

                if listings.is_empty() {
                    debug!(%keyword, page, "No more results for keyword");
                    break;
                }

                for listing in listings {
                    if index.len() >= self.config.target_max {
                        info!(target = self.config.target_max, "Pool target reached");
                        break 'run;
                    }

                    if !processed.insert(listing.dataset_ref.clone()) {
                        continue;
                    }
                    summary.datasets_seen += 1;

                    let mut dataset = DatasetReference::new(&listing.dataset_ref, keyword);
                    dataset.total_bytes = listing.total_bytes;

                    match self.process_dataset(&dataset, &mut index, &mut pooled).await {
                        Ok(accepted) => {
                            summary.files_accepted += accepted;
                            if accepted > 0 {
                                info!(dataset = %dataset, accepted, "Dataset pooled");
                            }
                        },
                        Err(error) if error.is_skippable() => {
                            summary.datasets_skipped += 1;
                            warn!(dataset = %dataset, %error, "Skipping dataset");
                        },
                        Err(error) => return Err(error),
                    }
                }
            }
        }

        summary.pool_size = index.len();
        info!(
            seen = summary.datasets_seen,
            skipped = summary.datasets_skipped,
            accepted = summary.files_accepted,
            pool = summary.pool_size,
            "Run complete"
        );

        Ok(summary)
    }

    /// Process one dataset end to end; returns the number of files pooled.
    ///
    /// The temporary directory is dropped (and deleted) on every exit path.
    async fn process_dataset(
        &self,
        dataset: &DatasetReference,
        index: &mut PoolIndex,
        pooled: &mut FingerprintSet,
    ) -> Result<usize> {
        self.precheck_size(dataset)?;

        let temp = tempfile::Builder::new()
            .prefix("dataset-")
            .tempdir_in(self.config.raw_dir())?;

        // The client re-verifies the ceiling against the received bytes
        let archive_path = temp.path().join("dataset.zip");
        let downloaded = self
            .client
            .download_dataset(&dataset.source, &archive_path, self.config.max_dataset_bytes())
            .await?;
        debug!(dataset = %dataset, bytes = downloaded, "Archive downloaded");

        let entries =
            extract::extract_csv_entries(&archive_path, temp.path(), self.config.max_scan_entries)?;
        debug!(dataset = %dataset, entries = entries.len(), "Archive extracted");

        let eligible = self.admit_candidates(dataset, &entries, pooled);

        let picks = select_diverse(&eligible, self.config.max_per_dataset);
        let mut budget = SelectionBudget::new(self.config.max_per_dataset);
        let accepted = commit_selected(
            &eligible,
            &picks,
            dataset,
            &self.config.pool_dir(),
            index,
            pooled,
            &mut budget,
        )?;

        Ok(accepted.len())
    }

    /// Build admission-eligible candidates from extracted entries.
    ///
    /// Per-file failures (unreadable, unparsable) only exclude that file.
    fn admit_candidates(
        &self,
        dataset: &DatasetReference,
        entries: &[extract::ExtractedEntry],
        pooled: &FingerprintSet,
    ) -> Vec<CandidateFile> {
        let limits = self.config.limits();
        let mut eligible = Vec::new();

        for entry in entries {
            let repaired = repair_entry_name(&entry.raw_name);
            if repaired.degraded {
                debug!(name = %repaired.fixed, "Entry name degraded during repair");
            }

            let (rows, cols) = match measure_csv(&entry.path) {
                Ok(shape) => shape,
                Err(error) => {
                    warn!(dataset = %dataset, name = %repaired.fixed, %error, "Unreadable file");
                    continue;
                },
            };

            let fingerprint = match fingerprint_file(&entry.path) {
                Ok(digest) => digest,
                Err(error) => {
                    warn!(dataset = %dataset, name = %repaired.fixed, %error, "Unreadable file");
                    continue;
                },
            };

            let candidate = CandidateFile {
                path: entry.path.clone(),
                name_signature: name_signature(&repaired.fixed),
                original_name: repaired.original,
                repaired_name: repaired.fixed,
                degraded: repaired.degraded,
                rows,
                cols,
                size_bytes: entry.size_bytes,
                fingerprint,
            };

            match admit(&candidate, &limits, pooled) {
                Ok(()) => eligible.push(candidate),
                Err(rejection) => {
                    debug!(
                        dataset = %dataset,
                        name = %candidate.repaired_name,
                        reason = %rejection,
                        "Candidate rejected"
                    );
                },
            }
        }

        eligible
    }

    /// Declared-size precheck before any bytes are downloaded
    fn precheck_size(&self, dataset: &DatasetReference) -> Result<()> {
        match dataset.total_bytes {
            Some(bytes) if bytes > self.config.max_dataset_bytes() => Err(CliError::SizeExceeded {
                size_mb: bytes / (1024 * 1024),
                limit_mb: self.config.max_dataset_mb,
            }),
            Some(_) => Ok(()),
            None if self.config.allow_unknown_size => Ok(()),
            None => Err(CliError::SizeUnknown),
        }
    }
}

/// Ensure the base directory layout exists and is writable.
///
/// Called before the run so an unwritable target fails fast with a setup
/// error instead of mid-collection.
pub fn bootstrap_dirs(config: &CollectorConfig) -> Result<()> {
    for dir in [config.base_dir.clone(), config.raw_dir(), config.pool_dir(), config.log_dir()] {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(())
}
