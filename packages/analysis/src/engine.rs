//! The V/C computation itself: capacity join, current and projected
//! ratios, and service-level classification.
//!
//! All error conditions are pushed earlier in the pipeline — normalization
//! rejects bad records, and the growth assumption is validated once up
//! front — so the per-record computation never fails.

use vc_map_analysis_models::{ClassifiedSegment, GrowthAssumption, VcResult};
use vc_map_source_models::TrafficRecord;
use vc_map_traffic_models::{CapacityTable, ServiceLevel};

use crate::AnalysisError;
use crate::growth::{GrowthProjector, compound};

/// Volume/capacity ratio, guarding the degenerate zero-capacity sentinel.
///
/// The capacity table guarantees positive capacities, but a zero must still
/// yield `0.0` rather than a division blow-up.
fn vc_ratio(volume: f64, capacity_per_day: u32) -> f64 {
    if capacity_per_day == 0 {
        return 0.0;
    }
    volume / f64::from(capacity_per_day)
}

/// Validates the batch-level growth assumption against the projector's
/// configured rate range.
fn validate_assumption(
    projector: &GrowthProjector,
    growth: &GrowthAssumption,
) -> Result<(), AnalysisError> {
    projector.validate_rate(growth.annual_rate)?;
    if growth.horizon_years == 0 {
        return Err(AnalysisError::NonPositiveHorizon);
    }
    Ok(())
}

/// The per-record computation, after the assumption has been validated.
fn compute_unchecked(
    record: &TrafficRecord,
    table: &CapacityTable,
    growth: &GrowthAssumption,
) -> VcResult {
    let capacity = table.get(record.functional_class);
    let vc_current = vc_ratio(record.current_volume, capacity.capacity_per_day);
    let future_volume = compound(
        record.current_volume,
        growth.annual_rate,
        growth.horizon_years,
    );
    let vc_future = vc_ratio(future_volume, capacity.capacity_per_day);

    VcResult {
        record_id: record.id.clone(),
        capacity_per_day: capacity.capacity_per_day,
        vc_current,
        future_volume,
        vc_future,
        // The projected ratio drives the status badge; the current ratio
        // is carried alongside for comparison.
        service_level: ServiceLevel::from_ratio(vc_future),
    }
}

/// Computes the V/C result for one record.
///
/// # Errors
///
/// Returns [`AnalysisError`] when the growth assumption is malformed. A
/// well-formed record never fails.
pub fn compute(
    record: &TrafficRecord,
    table: &CapacityTable,
    projector: &GrowthProjector,
    growth: &GrowthAssumption,
) -> Result<VcResult, AnalysisError> {
    validate_assumption(projector, growth)?;
    Ok(compute_unchecked(record, table, growth))
}

/// Computes V/C results for a whole batch, order-preserving relative to
/// the input and independent per element.
///
/// # Errors
///
/// Returns [`AnalysisError`] when the growth assumption is malformed —
/// validated once up front, aborting the whole batch, since a bad
/// assumption invalidates every projection.
pub fn compute_batch(
    records: &[TrafficRecord],
    table: &CapacityTable,
    projector: &GrowthProjector,
    growth: &GrowthAssumption,
) -> Result<Vec<VcResult>, AnalysisError> {
    validate_assumption(projector, growth)?;
    Ok(records
        .iter()
        .map(|record| compute_unchecked(record, table, growth))
        .collect())
}

/// Computes a batch and pairs each record with its result, ready for
/// rendering and export.
///
/// # Errors
///
/// Returns [`AnalysisError`] when the growth assumption is malformed.
pub fn compute_segments(
    records: Vec<TrafficRecord>,
    table: &CapacityTable,
    projector: &GrowthProjector,
    growth: &GrowthAssumption,
) -> Result<Vec<ClassifiedSegment>, AnalysisError> {
    validate_assumption(projector, growth)?;
    Ok(records
        .into_iter()
        .map(|record| {
            let result = compute_unchecked(&record, table, growth);
            ClassifiedSegment { record, result }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_map_traffic_models::FunctionalClass;

    fn record(id: &str, class: FunctionalClass, volume: f64) -> TrafficRecord {
        TrafficRecord {
            id: id.to_string(),
            road_name: format!("{id} Rd"),
            functional_class: class,
            current_volume: volume,
            geometry: None,
            county: None,
            year: None,
        }
    }

    #[test]
    fn arterial_twenty_year_projection_goes_critical() {
        let table = CapacityTable::standard();
        let projector = GrowthProjector::new();
        let growth = GrowthAssumption {
            annual_rate: 0.02,
            horizon_years: 20,
        };

        let result = compute(
            &record("main-st", FunctionalClass::Arterial, 20000.0),
            &table,
            &projector,
            &growth,
        )
        .unwrap();

        assert_eq!(result.capacity_per_day, 25_000);
        assert!((result.vc_current - 0.8).abs() < 1e-9);
        assert_eq!(ServiceLevel::from_ratio(result.vc_current), ServiceLevel::Fair);
        assert!((result.future_volume - 29718.95).abs() < 0.01);
        assert!((result.vc_future - 1.1888).abs() < 1e-3);
        assert_eq!(result.service_level, ServiceLevel::Critical);
    }

    #[test]
    fn zero_rate_keeps_boundary_fair() {
        let table = CapacityTable::standard();
        let projector = GrowthProjector::new();
        let growth = GrowthAssumption {
            annual_rate: 0.0,
            horizon_years: 25,
        };

        let result = compute(
            &record("us-1", FunctionalClass::Arterial, 17500.0),
            &table,
            &projector,
            &growth,
        )
        .unwrap();

        assert!((result.vc_current - 0.7).abs() < 1e-9);
        assert!((result.vc_future - 0.7).abs() < 1e-9);
        // 0.7 is inclusive on the low side of Fair.
        assert_eq!(result.service_level, ServiceLevel::Fair);
    }

    #[test]
    fn batch_preserves_input_order() {
        let table = CapacityTable::standard();
        let projector = GrowthProjector::new();
        let growth = GrowthAssumption {
            annual_rate: 0.02,
            horizon_years: 10,
        };
        let records = vec![
            record("c", FunctionalClass::Collector, 5000.0),
            record("a", FunctionalClass::Freeway, 40000.0),
            record("b", FunctionalClass::Local, 1000.0),
        ];

        let results = compute_batch(&records, &table, &projector, &growth).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn malformed_assumption_aborts_whole_batch() {
        let table = CapacityTable::standard();
        let projector = GrowthProjector::new();
        let records = vec![record("a", FunctionalClass::Arterial, 1000.0)];

        let bad_rate = GrowthAssumption {
            annual_rate: 0.06,
            horizon_years: 10,
        };
        assert!(compute_batch(&records, &table, &projector, &bad_rate).is_err());

        let zero_horizon = GrowthAssumption {
            annual_rate: 0.02,
            horizon_years: 0,
        };
        assert_eq!(
            compute_batch(&records, &table, &projector, &zero_horizon),
            Err(AnalysisError::NonPositiveHorizon)
        );
    }

    #[test]
    fn zero_capacity_yields_zero_ratio() {
        assert!(vc_ratio(12345.0, 0).abs() < f64::EPSILON);
        assert!((vc_ratio(12500.0, 25_000) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn segments_pair_record_with_result() {
        let table = CapacityTable::standard();
        let projector = GrowthProjector::new();
        let growth = GrowthAssumption {
            annual_rate: 0.02,
            horizon_years: 20,
        };
        let segments = compute_segments(
            vec![record("main-st", FunctionalClass::Arterial, 20000.0)],
            &table,
            &projector,
            &growth,
        )
        .unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].record.id, segments[0].result.record_id);
    }
}
