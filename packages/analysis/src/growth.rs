//! Compound annual growth projection.
//!
//! Growth-only: the system does not model decline, so rates below zero are
//! rejected, as are rates above the configured ceiling — rejected, not
//! clamped, since a silently adjusted rate would misrepresent every
//! projection downstream.

use std::collections::HashMap;

use crate::AnalysisError;

/// Default ceiling on the annual growth rate (the host UI caps at 5%).
pub const DEFAULT_MAX_ANNUAL_RATE: f64 = 0.05;

/// Default rate applied when a zone has no specific growth factor.
pub const DEFAULT_ZONE_RATE: f64 = 0.02;

/// Compound growth: `base * (1 + rate)^years`.
///
/// Total over `years >= 0`; zero years returns the base volume unchanged.
#[must_use]
pub fn compound(base_volume: f64, annual_rate: f64, years: u32) -> f64 {
    base_volume * (1.0 + annual_rate).powf(f64::from(years))
}

/// Projects traffic volumes forward under compound annual growth, with
/// optional per-zone (TAZ) rate overrides.
#[derive(Debug, Clone)]
pub struct GrowthProjector {
    max_annual_rate: f64,
    default_zone_rate: f64,
    zone_rates: HashMap<String, f64>,
}

impl GrowthProjector {
    /// Creates a projector with the default rate ceiling and zone fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_annual_rate: DEFAULT_MAX_ANNUAL_RATE,
            default_zone_rate: DEFAULT_ZONE_RATE,
            zone_rates: HashMap::new(),
        }
    }

    /// Creates a projector with a custom rate ceiling.
    #[must_use]
    pub fn with_max_rate(max_annual_rate: f64) -> Self {
        Self {
            max_annual_rate,
            ..Self::new()
        }
    }

    /// Returns the configured rate ceiling.
    #[must_use]
    pub const fn max_annual_rate(&self) -> f64 {
        self.max_annual_rate
    }

    /// Validates an annual rate against the configured range.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::GrowthRateOutOfRange`] when the rate is
    /// negative, non-finite, or above the ceiling.
    pub fn validate_rate(&self, annual_rate: f64) -> Result<(), AnalysisError> {
        if !annual_rate.is_finite() || annual_rate < 0.0 || annual_rate > self.max_annual_rate {
            return Err(AnalysisError::GrowthRateOutOfRange {
                rate: annual_rate,
                max: self.max_annual_rate,
            });
        }
        Ok(())
    }

    /// Loads zone-specific growth factors, validating each against the
    /// configured range.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::GrowthRateOutOfRange`] for the first
    /// out-of-range factor; previously loaded factors are kept.
    pub fn load_zone_rates<I>(&mut self, rates: I) -> Result<(), AnalysisError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        for (zone_id, rate) in rates {
            self.validate_rate(rate)?;
            self.zone_rates.insert(zone_id, rate);
        }
        Ok(())
    }

    /// Returns the loaded rate for a zone, if any.
    #[must_use]
    pub fn zone_rate(&self, zone_id: &str) -> Option<f64> {
        self.zone_rates.get(zone_id).copied()
    }

    /// Projects a base volume forward under a uniform annual rate.
    ///
    /// `years == 0` is well-defined and returns the base volume unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::GrowthRateOutOfRange`] when the rate is
    /// out of range.
    pub fn project(
        &self,
        base_volume: f64,
        annual_rate: f64,
        years: u32,
    ) -> Result<f64, AnalysisError> {
        self.validate_rate(annual_rate)?;
        Ok(compound(base_volume, annual_rate, years))
    }

    /// Projects a base volume forward under a zone-specific rate.
    ///
    /// A missing zone factor must not abort processing of a whole dataset:
    /// unknown zones fall back to the default rate.
    #[must_use]
    pub fn project_for_zone(&self, base_volume: f64, zone_id: &str, years: u32) -> f64 {
        let rate = self.zone_rates.get(zone_id).copied().unwrap_or_else(|| {
            log::debug!(
                "no growth factor for zone {zone_id}, using default {}",
                self.default_zone_rate
            );
            self.default_zone_rate
        });
        compound(base_volume, rate, years)
    }
}

impl Default for GrowthProjector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_years_is_identity() {
        let projector = GrowthProjector::new();
        let projected = projector.project(12345.0, 0.03, 0).unwrap();
        assert!((projected - 12345.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_rate_is_invariant_over_years() {
        let projector = GrowthProjector::new();
        for years in [1, 5, 20, 30] {
            let projected = projector.project(17500.0, 0.0, years).unwrap();
            assert!((projected - 17500.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn projection_is_monotonic_in_years() {
        let projector = GrowthProjector::new();
        let mut previous = projector.project(1000.0, 0.02, 0).unwrap();
        for years in 1..=30 {
            let projected = projector.project(1000.0, 0.02, years).unwrap();
            assert!(projected > previous, "year {years} not strictly greater");
            previous = projected;
        }
    }

    #[test]
    fn twenty_year_compound_growth() {
        let projector = GrowthProjector::new();
        let projected = projector.project(20000.0, 0.02, 20).unwrap();
        assert!((projected - 29718.95).abs() < 0.01);
    }

    #[test]
    fn rejects_out_of_range_rates() {
        let projector = GrowthProjector::new();
        assert!(matches!(
            projector.project(1000.0, -0.01, 10),
            Err(AnalysisError::GrowthRateOutOfRange { .. })
        ));
        assert!(matches!(
            projector.project(1000.0, 0.051, 10),
            Err(AnalysisError::GrowthRateOutOfRange { .. })
        ));
        assert!(matches!(
            projector.project(1000.0, f64::NAN, 10),
            Err(AnalysisError::GrowthRateOutOfRange { .. })
        ));
    }

    #[test]
    fn ceiling_is_inclusive_and_configurable() {
        let projector = GrowthProjector::new();
        assert!(projector.project(1000.0, 0.05, 10).is_ok());

        let relaxed = GrowthProjector::with_max_rate(0.10);
        assert!(relaxed.project(1000.0, 0.08, 10).is_ok());
    }

    #[test]
    fn zone_rates_override_and_fall_back() {
        let mut projector = GrowthProjector::new();
        projector
            .load_zone_rates([("TAZ_001".to_string(), 0.025), ("TAZ_002".to_string(), 0.03)])
            .unwrap();

        let specific = projector.project_for_zone(10000.0, "TAZ_001", 10);
        assert!((specific - compound(10000.0, 0.025, 10)).abs() < 1e-9);

        // Missing zone uses the 2% default instead of failing.
        let fallback = projector.project_for_zone(10000.0, "TAZ_999", 10);
        assert!((fallback - compound(10000.0, 0.02, 10)).abs() < 1e-9);
    }

    #[test]
    fn zone_rate_loading_validates_each_factor() {
        let mut projector = GrowthProjector::new();
        let error = projector.load_zone_rates([("TAZ_001".to_string(), 0.5)]);
        assert!(matches!(
            error,
            Err(AnalysisError::GrowthRateOutOfRange { .. })
        ));
        assert_eq!(projector.zone_rate("TAZ_001"), None);
    }
}
