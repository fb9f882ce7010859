#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Traffic data source trait and normalization logic.
//!
//! Each data provider implements the [`TrafficSource`] trait to define how
//! raw data is fetched, parsed, and mapped into the canonical
//! [`TrafficRecord`] format. Fetching is async network glue; normalization
//! is a pure, synchronous transformation so the downstream V/C computation
//! only ever sees validated records.

pub mod arcgis;
pub mod normalize;
pub mod parsing;
pub mod sources;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use vc_map_source_models::{NormalizationReport, SourceType, TrafficRecord};

/// Errors that can occur during data source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data normalization error.
    #[error("Normalization error: {message}")]
    Normalization {
        /// Description of what went wrong.
        message: String,
    },
}

/// Configuration for fetching data from a source.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Only fetch records for this county.
    pub county: Option<String>,
    /// Only fetch records for this count year.
    pub year: Option<i32>,
    /// Maximum number of records to fetch.
    pub limit: Option<u64>,
    /// Directory to store downloaded files.
    pub output_dir: PathBuf,
}

/// The outcome of normalizing one raw payload: the accepted canonical
/// records (input order preserved) plus the batch's data-quality report.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch {
    /// Accepted canonical records.
    pub records: Vec<TrafficRecord>,
    /// Drop and fallback accounting for the batch.
    pub report: NormalizationReport,
}

/// Trait that all traffic data sources must implement.
///
/// Each source knows how to fetch its raw data and normalize it into the
/// canonical [`TrafficRecord`] format.
#[async_trait]
pub trait TrafficSource: Send + Sync {
    /// Returns a unique identifier for this source (e.g., `"fdot_aadt"`).
    fn id(&self) -> &str;

    /// Returns the human-readable name of this source.
    fn name(&self) -> &str;

    /// Returns what kind of data provider this is.
    fn source_type(&self) -> SourceType;

    /// Downloads raw data from the source, returning the path to the
    /// downloaded file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the download fails.
    async fn fetch(&self, options: &FetchOptions) -> Result<PathBuf, SourceError>;

    /// Parses the raw downloaded data and normalizes it into canonical
    /// records, dropping (and counting) invalid ones.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the payload itself cannot be read or
    /// parsed. Per-record problems never fail the batch — they are counted
    /// in the returned [`NormalizationReport`].
    fn normalize(&self, raw_path: &Path) -> Result<NormalizedBatch, SourceError>;
}
