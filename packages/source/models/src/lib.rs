#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data source configuration types and the canonical normalized traffic
//! record format.
//!
//! Every traffic data provider (FDOT GIS layers, uploaded CSV files)
//! produces [`TrafficRecord`] values whose classification conforms to the
//! shared taxonomy in [`vc_map_traffic_models`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use vc_map_traffic_models::FunctionalClass;

/// The type of data provider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// FDOT Annual Average Daily Traffic segments layer (`ArcGIS` REST)
    FdotAadt,
    /// FDOT traffic monitoring sites layer (`ArcGIS` REST)
    FdotSites,
    /// Uploaded CSV file (Placer-style column naming)
    CsvUpload,
}

/// Configuration for a traffic data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// Unique identifier for this source.
    pub id: String,
    /// Human-readable name (e.g., "FDOT AADT (TDA)").
    pub name: String,
    /// What kind of data provider this is.
    pub source_type: SourceType,
    /// Base URL or API endpoint for fetching data, if applicable.
    pub api_url: Option<String>,
    /// County the source is scoped to, if any.
    pub county: Option<String>,
}

/// Geometry of a traffic segment, GeoJSON-style `[lon, lat]` ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum SegmentGeometry {
    /// A single monitoring-site location.
    Point([f64; 2]),
    /// A roadway segment polyline.
    #[serde(rename = "LineString")]
    Line(Vec<[f64; 2]>),
}

impl SegmentGeometry {
    /// Returns the first coordinate of the geometry.
    #[must_use]
    pub fn start_point(&self) -> Option<[f64; 2]> {
        match self {
            Self::Point(point) => Some(*point),
            Self::Line(coords) => coords.first().copied(),
        }
    }

    /// Returns the last coordinate of the geometry.
    #[must_use]
    pub fn end_point(&self) -> Option<[f64; 2]> {
        match self {
            Self::Point(point) => Some(*point),
            Self::Line(coords) => coords.last().copied(),
        }
    }

    /// Returns the middle coordinate of the geometry, used for marker
    /// placement on segment polylines.
    #[must_use]
    pub fn midpoint(&self) -> Option<[f64; 2]> {
        match self {
            Self::Point(point) => Some(*point),
            Self::Line(coords) => coords.get(coords.len() / 2).copied(),
        }
    }
}

/// A traffic volume record normalized to the canonical schema.
///
/// All data sources produce this type after parsing and mapping their
/// source-specific formats. Records that reach this type have already passed
/// validation: the volume is non-negative and the road name is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficRecord {
    /// Stable identifier from the data source (for deduplication).
    pub id: String,
    /// Road or segment name.
    pub road_name: String,
    /// Functional classification (fallback-resolved when the source value
    /// was missing or unrecognized).
    pub functional_class: FunctionalClass,
    /// Current traffic volume (vehicles/day, AADT). Never negative.
    pub current_volume: f64,
    /// Segment geometry. `None` when the source lacks coordinates.
    pub geometry: Option<SegmentGeometry>,
    /// County the segment lies in, when known.
    pub county: Option<String>,
    /// Count year, when known.
    pub year: Option<i32>,
}

/// Data-quality accounting for one normalization batch.
///
/// Per-record rejections are isolated — the batch as a whole proceeds — but
/// every drop and every classification fallback is counted here so the host
/// can surface them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationReport {
    /// Raw records seen in the input.
    pub seen: usize,
    /// Records accepted into the canonical batch.
    pub accepted: usize,
    /// Rejected: road/segment name missing.
    pub missing_road_name: usize,
    /// Rejected: volume field absent.
    pub missing_volume: usize,
    /// Rejected: volume present but not coercible to a number.
    pub unparseable_volume: usize,
    /// Rejected: volume negative.
    pub negative_volume: usize,
    /// Duplicates removed (same natural key, first occurrence kept).
    pub duplicates: usize,
    /// Records whose classification string fell back to `Arterial`.
    pub class_fallbacks: usize,
}

impl NormalizationReport {
    /// Total records dropped from the batch, duplicates included.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.missing_road_name
            + self.missing_volume
            + self.unparseable_volume
            + self.negative_volume
            + self.duplicates
    }
}
