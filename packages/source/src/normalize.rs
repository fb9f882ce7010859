//! Batch normalization: rejection accounting, deduplication, and
//! classification fallback resolution.
//!
//! Adapters (`sources/*`) turn one raw feature into either an
//! [`AdaptedRecord`] or a [`RecordRejection`]; this module folds a whole
//! batch of those outcomes into a [`NormalizedBatch`], preserving input
//! order and keeping the first occurrence of any duplicated natural key.

use std::collections::HashSet;

use vc_map_source_models::{NormalizationReport, TrafficRecord};
use vc_map_traffic_models::FunctionalClass;

use crate::NormalizedBatch;

/// Why one raw record was rejected during normalization.
///
/// Rejections are per-record and never abort the batch; each cause is
/// counted separately in the [`NormalizationReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRejection {
    /// Required road/segment name field absent or empty.
    MissingRoadName,
    /// Required volume field absent.
    MissingVolume,
    /// Volume present but not coercible to a number. Not treated as zero —
    /// that would corrupt downstream statistics.
    UnparseableVolume,
    /// Volume negative. Rejected rather than clamped: a negative count is a
    /// data error worth surfacing.
    NegativeVolume,
}

/// One adapter-normalized record plus its batch bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptedRecord {
    /// The canonical record.
    pub record: TrafficRecord,
    /// Natural key used for first-wins deduplication across a batch (the
    /// same segment can arrive from more than one source query).
    pub dedup_key: String,
    /// Whether the raw classification was missing or unrecognized and the
    /// `Arterial` fallback was applied.
    pub class_fell_back: bool,
}

/// Resolves a raw classification string to a [`FunctionalClass`], falling
/// back to `Arterial` when the value is missing or unrecognized.
///
/// Returns the class and whether the fallback fired.
#[must_use]
pub fn resolve_class(raw: Option<&str>) -> (FunctionalClass, bool) {
    raw.and_then(FunctionalClass::from_raw)
        .map_or((FunctionalClass::Arterial, true), |class| (class, false))
}

/// Folds per-record adapter outcomes into a [`NormalizedBatch`].
///
/// Accepted records keep their input order; duplicates (same
/// [`AdaptedRecord::dedup_key`]) keep the first occurrence. Every drop and
/// classification fallback is counted, and a batch with any is logged as a
/// data-quality signal.
pub fn collect_batch<I>(label: &str, outcomes: I) -> NormalizedBatch
where
    I: IntoIterator<Item = Result<AdaptedRecord, RecordRejection>>,
{
    let mut report = NormalizationReport::default();
    let mut seen_keys = HashSet::new();
    let mut records = Vec::new();

    for outcome in outcomes {
        report.seen += 1;
        match outcome {
            Ok(adapted) => {
                if !seen_keys.insert(adapted.dedup_key) {
                    report.duplicates += 1;
                    continue;
                }
                if adapted.class_fell_back {
                    report.class_fallbacks += 1;
                }
                report.accepted += 1;
                records.push(adapted.record);
            }
            Err(RecordRejection::MissingRoadName) => report.missing_road_name += 1,
            Err(RecordRejection::MissingVolume) => report.missing_volume += 1,
            Err(RecordRejection::UnparseableVolume) => report.unparseable_volume += 1,
            Err(RecordRejection::NegativeVolume) => report.negative_volume += 1,
        }
    }

    if report.dropped() > 0 {
        log::warn!(
            "{label}: dropped {} of {} records ({} duplicates)",
            report.dropped(),
            report.seen,
            report.duplicates,
        );
    }
    if report.class_fallbacks > 0 {
        log::warn!(
            "{label}: {} records fell back to Arterial classification",
            report.class_fallbacks,
        );
    }
    log::info!("{label}: normalized {} records", report.accepted);

    NormalizedBatch { records, report }
}
