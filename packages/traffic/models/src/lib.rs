#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Roadway taxonomy types and capacity definitions.
//!
//! This crate defines the canonical functional classification taxonomy and
//! the level-of-service bands used across the entire vc-map system. All data
//! sources normalize their source-specific classification strings into this
//! shared taxonomy, and all V/C ratios classify into the same four bands.

pub mod capacity;
pub mod county;

pub use capacity::{CapacityEntry, CapacityTable, ResolvedCapacity};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Roadway functional classification.
///
/// Determines the assumed carrying capacity of a segment. This is a closed
/// set; upstream records with a missing or unrecognized classification fall
/// back to [`FunctionalClass::Arterial`] (see
/// [`CapacityTable::get_or_default`]).
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
pub enum FunctionalClass {
    /// Limited access highways
    Freeway,
    /// Major through streets
    Arterial,
    /// Minor through streets
    Collector,
    /// Local access streets
    Local,
}

impl FunctionalClass {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Freeway, Self::Arterial, Self::Collector, Self::Local]
    }

    /// Attempts to match a raw classification string against the four
    /// canonical names, case-insensitively.
    ///
    /// Returns `None` when the string is not one of the canonical names —
    /// callers decide the fallback policy (and should count fallbacks, since
    /// a substituted classification changes the capacity denominator).
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "freeway" => Some(Self::Freeway),
            "arterial" => Some(Self::Arterial),
            "collector" => Some(Self::Collector),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// Level-of-service band derived from a V/C ratio.
///
/// Band boundaries: `Good` below 0.7, `Fair` in `[0.7, 0.9)`, `Poor` in
/// `[0.9, 1.0]` (inclusive at 1.0), `Critical` strictly above 1.0.
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
pub enum ServiceLevel {
    /// Adequate capacity (V/C below 0.7)
    Good,
    /// Approaching capacity (V/C in [0.7, 0.9))
    Fair,
    /// At or near capacity (V/C in [0.9, 1.0])
    Poor,
    /// Over capacity (V/C above 1.0)
    Critical,
}

impl ServiceLevel {
    /// Classifies a V/C ratio into its service-level band.
    ///
    /// Total over `[0, +inf)` with no gaps or overlaps. The 1.0 boundary is
    /// inclusive on the `Poor` side; only ratios strictly greater than 1.0
    /// are `Critical`.
    #[must_use]
    pub fn from_ratio(vc_ratio: f64) -> Self {
        if vc_ratio < 0.7 {
            Self::Good
        } else if vc_ratio < 0.9 {
            Self::Fair
        } else if vc_ratio <= 1.0 {
            Self::Poor
        } else {
            Self::Critical
        }
    }

    /// Returns the display color (hex) used for map and chart styling.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Good => "#28a745",
            Self::Fair => "#ffc107",
            Self::Poor => "#dc3545",
            Self::Critical => "#6f42c1",
        }
    }

    /// Returns a short human-readable description of the band.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Good => "Adequate capacity",
            Self::Fair => "Approaching capacity",
            Self::Poor => "At or near capacity",
            Self::Critical => "Over capacity",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Good, Self::Fair, Self::Poor, Self::Critical]
    }
}
