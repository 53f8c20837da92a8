//! Data Loader
//!
//! Reads the two workshop tables from disk:
//!
//! - **KPI summary** (`kpis_summary.csv`): one row per machine with
//!   `machine, Cost_total_eur, Downtime_total_h, Scrap_total`
//! - **Event history** (`maintenance_events.csv`): one row per failure with
//!   `machine, failure_date, downtime_h, cost_eur, scrap_units`
//!
//! Any malformed row is fatal: the loader returns [`LoadError`] naming the
//! file and line instead of skipping it. The loaded tables are wrapped in an
//! immutable [`Dataset`] that callers share behind an `Arc`.

mod csv;
mod loader;

pub use loader::{load_events, load_kpis, Dataset};

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load one of the input tables.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is empty (no header row)", path.display())]
    Empty { path: PathBuf },

    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{}:{line}: {message}", path.display())]
    Row {
        path: PathBuf,
        line: usize,
        message: String,
    },
}
