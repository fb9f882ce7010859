//! Collection-level statistics and filters over computed results.

use vc_map_analysis_models::{ClassifiedSegment, LevelCounts, VcResult, VcSummary};
use vc_map_traffic_models::ServiceLevel;

/// Summarizes a batch of results.
///
/// Empty input returns the all-zero summary, never NaN. The median of an
/// even-sized batch is the lower-middle element of the sorted sequence.
#[must_use]
pub fn summarize(results: &[VcResult]) -> VcSummary {
    if results.is_empty() {
        return VcSummary::empty();
    }

    let count = results.len();
    let mut level_counts = LevelCounts::default();
    let mut sum_current = 0.0;
    let mut sum_future = 0.0;
    let mut sorted_future: Vec<f64> = Vec::with_capacity(count);

    for result in results {
        level_counts.increment(result.service_level);
        sum_current += result.vc_current;
        sum_future += result.vc_future;
        sorted_future.push(result.vc_future);
    }
    sorted_future.sort_by(f64::total_cmp);

    #[allow(clippy::cast_precision_loss)]
    let divisor = count as f64;

    VcSummary {
        count,
        mean_vc_current: sum_current / divisor,
        mean_vc_future: sum_future / divisor,
        level_counts,
        min_vc_future: sorted_future[0],
        max_vc_future: sorted_future[count - 1],
        median_vc_future: sorted_future[(count - 1) / 2],
    }
}

/// Segments classified into the given band.
#[must_use]
pub fn by_service_level(
    segments: &[ClassifiedSegment],
    level: ServiceLevel,
) -> Vec<&ClassifiedSegment> {
    segments
        .iter()
        .filter(|segment| segment.result.service_level == level)
        .collect()
}

/// Segments in the given county (case-insensitive exact match).
#[must_use]
pub fn by_county<'a>(segments: &'a [ClassifiedSegment], county: &str) -> Vec<&'a ClassifiedSegment> {
    segments
        .iter()
        .filter(|segment| {
            segment
                .record
                .county
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(county))
        })
        .collect()
}

/// Segments whose road name contains the query (case-insensitive).
#[must_use]
pub fn by_road_name<'a>(
    segments: &'a [ClassifiedSegment],
    query: &str,
) -> Vec<&'a ClassifiedSegment> {
    let query = query.to_lowercase();
    segments
        .iter()
        .filter(|segment| segment.record.road_name.to_lowercase().contains(&query))
        .collect()
}

/// Segments whose projected ratio exceeds the threshold.
#[must_use]
pub fn over_capacity(segments: &[ClassifiedSegment], threshold: f64) -> Vec<&ClassifiedSegment> {
    segments
        .iter()
        .filter(|segment| segment.result.vc_future > threshold)
        .collect()
}
