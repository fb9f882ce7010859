//! Per-schema source adapters.
//!
//! Each upstream exposes its own field names and units; each adapter here
//! is authoritative for exactly one schema shape and produces the same
//! canonical [`vc_map_source_models::TrafficRecord`].

pub mod fdot_aadt;
pub mod fdot_sites;
pub mod placer_csv;

pub use fdot_aadt::FdotAadtSource;
pub use fdot_sites::FdotSitesSource;
pub use placer_csv::CsvUploadSource;
