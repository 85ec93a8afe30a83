//! csvpool Engine Library
//!
//! The admission, deduplication, and selection engine behind the csvpool
//! collector. Given candidate CSV files extracted from a dataset archive,
//! the engine decides which files enter the pool, under what names, and
//! enforces global content uniqueness across resumable runs.
//!
//! # Components
//!
//! - **naming**: normalized table-name signatures derived from filenames
//! - **sanitize**: archive entry name repair and filesystem-safe output names
//! - **admission**: per-file shape and deduplication eligibility checks
//! - **select**: diversity-first selection of at most K files per dataset
//! - **index**: the append-only `index.csv` ledger and fingerprint set
//! - **pool**: atomic commit of selected candidates into the pool
//!
//! # Example
//!
//! ```no_run
//! use csvpool_engine::index::PoolIndex;
//!
//! # fn main() -> csvpool_engine::Result<()> {
//! let mut index = PoolIndex::open("index.csv")?;
//! let fingerprints = index.fingerprint_set();
//! tracing::info!(pooled = index.len(), "ledger loaded");
//! # Ok(())
//! # }
//! ```

pub mod admission;
pub mod error;
pub mod index;
pub mod naming;
pub mod pool;
pub mod sanitize;
pub mod select;
pub mod types;

// Re-export commonly used types
pub use error::{EngineError, Result};
pub use types::{AcceptedFile, CandidateFile, DatasetReference, SelectionBudget};
