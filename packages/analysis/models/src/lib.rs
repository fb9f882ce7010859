#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! V/C computation input and result types.
//!
//! A [`VcResult`] is a pure function of one canonical traffic record, the
//! matching capacity entry, and one [`GrowthAssumption`] — no hidden state,
//! no cross-record dependency — so results are independently reproducible
//! and order-independent.

use serde::{Deserialize, Serialize};
use vc_map_source_models::TrafficRecord;
use vc_map_traffic_models::ServiceLevel;

/// A uniform growth assumption applied to a whole batch.
///
/// Validated once at the start of a batch computation (see the engine) —
/// a malformed assumption invalidates every projection, unlike per-record
/// data problems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthAssumption {
    /// Annual compound growth rate as a decimal (e.g., `0.02` for 2%).
    pub annual_rate: f64,
    /// Number of years to project forward.
    pub horizon_years: u32,
}

/// Computed V/C ratios and classification for one traffic record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VcResult {
    /// Identifier of the record this result was computed from.
    pub record_id: String,
    /// Daily capacity used as the denominator.
    pub capacity_per_day: u32,
    /// Current-volume V/C ratio.
    pub vc_current: f64,
    /// Projected volume after the growth horizon.
    pub future_volume: f64,
    /// Projected-volume V/C ratio.
    pub vc_future: f64,
    /// Service-level band of the projected ratio (the future ratio drives
    /// the status badge; the current ratio is reported alongside).
    pub service_level: ServiceLevel,
}

/// A traffic record paired with its computed result, ready for rendering
/// and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedSegment {
    /// The originating canonical record.
    pub record: TrafficRecord,
    /// The computed ratios and classification.
    pub result: VcResult,
}

/// Per-band record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelCounts {
    /// Records classified `Good`.
    pub good: usize,
    /// Records classified `Fair`.
    pub fair: usize,
    /// Records classified `Poor`.
    pub poor: usize,
    /// Records classified `Critical`.
    pub critical: usize,
}

impl LevelCounts {
    /// Increments the count for one band.
    pub const fn increment(&mut self, level: ServiceLevel) {
        match level {
            ServiceLevel::Good => self.good += 1,
            ServiceLevel::Fair => self.fair += 1,
            ServiceLevel::Poor => self.poor += 1,
            ServiceLevel::Critical => self.critical += 1,
        }
    }

    /// Returns the count for one band.
    #[must_use]
    pub const fn for_level(&self, level: ServiceLevel) -> usize {
        match level {
            ServiceLevel::Good => self.good,
            ServiceLevel::Fair => self.fair,
            ServiceLevel::Poor => self.poor,
            ServiceLevel::Critical => self.critical,
        }
    }
}

/// Collection-level statistics over a batch of [`VcResult`]s.
///
/// An empty batch summarizes to `count = 0` with every numeric aggregate
/// `0.0` — never NaN, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VcSummary {
    /// Number of results summarized.
    pub count: usize,
    /// Mean current-volume V/C ratio.
    pub mean_vc_current: f64,
    /// Mean projected-volume V/C ratio.
    pub mean_vc_future: f64,
    /// Record counts per service-level band (of the projected ratio).
    pub level_counts: LevelCounts,
    /// Minimum projected V/C ratio.
    pub min_vc_future: f64,
    /// Maximum projected V/C ratio.
    pub max_vc_future: f64,
    /// Median projected V/C ratio. For even-sized batches this is the
    /// lower-middle element of the sorted sequence.
    pub median_vc_future: f64,
}

impl VcSummary {
    /// The all-zero summary of an empty batch.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            count: 0,
            mean_vc_current: 0.0,
            mean_vc_future: 0.0,
            level_counts: LevelCounts {
                good: 0,
                fair: 0,
                poor: 0,
                critical: 0,
            },
            min_vc_future: 0.0,
            max_vc_future: 0.0,
            median_vc_future: 0.0,
        }
    }
}
