#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! V/C ratio computation, growth projection, and result aggregation.
//!
//! The computational kernel of the dashboard: synchronous, stateless, and
//! side-effect-free per computation. Each record → result transformation
//! reads only its own input plus the immutable capacity table and growth
//! assumption, so batches are trivially parallelizable and results are
//! independently reproducible.

pub mod aggregate;
pub mod engine;
pub mod growth;

use thiserror::Error;

/// Errors that can occur during V/C analysis.
///
/// These are caller configuration mistakes, not data-quality issues: a
/// malformed growth assumption invalidates every projection, so it aborts
/// the whole batch (per-record data problems were already handled during
/// normalization).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AnalysisError {
    /// Annual growth rate is negative, non-finite, or above the ceiling.
    #[error("growth rate {rate} is outside the allowed range [0, {max}]")]
    GrowthRateOutOfRange {
        /// The rejected rate.
        rate: f64,
        /// The configured ceiling.
        max: f64,
    },

    /// Projection horizon is zero.
    #[error("projection horizon must be a positive number of years")]
    NonPositiveHorizon,
}
