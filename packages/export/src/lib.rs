#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV and `GeoJSON` export of classified traffic segments.
//!
//! Both formats carry every field of the record and its computed result.
//! CSV is the lossless tabular export; `GeoJSON` drives map rendering and
//! additionally carries the service-level color for styling.

pub mod csv;
pub mod geojson;

/// Errors that can occur during export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV writing failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] ::csv::Error),

    /// JSON serialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
