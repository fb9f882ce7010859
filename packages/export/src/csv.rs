//! CSV export.
//!
//! One row per classified segment, every record and result field included.
//! Geometry is serialized as a `GeoJSON` geometry string in its own column
//! so the export round-trips losslessly.

use std::io::Write;
use std::path::Path;

use vc_map_analysis_models::ClassifiedSegment;

/// Column order of the export.
const HEADERS: &[&str] = &[
    "id",
    "road_name",
    "functional_class",
    "county",
    "year",
    "current_volume",
    "capacity_per_day",
    "vc_current",
    "future_volume",
    "vc_future",
    "service_level",
    "geometry",
];

/// Writes classified segments as CSV.
///
/// # Errors
///
/// Returns [`crate::ExportError`] if serialization or writing fails.
pub fn write_csv<W: Write>(
    writer: W,
    segments: &[ClassifiedSegment],
) -> Result<(), crate::ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for segment in segments {
        let record = &segment.record;
        let result = &segment.result;
        let geometry = record
            .geometry
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?
            .unwrap_or_default();

        csv_writer.write_record(&[
            record.id.clone(),
            record.road_name.clone(),
            record.functional_class.to_string(),
            record.county.clone().unwrap_or_default(),
            record.year.map(|year| year.to_string()).unwrap_or_default(),
            record.current_volume.to_string(),
            result.capacity_per_day.to_string(),
            result.vc_current.to_string(),
            result.future_volume.to_string(),
            result.vc_future.to_string(),
            result.service_level.to_string(),
            geometry,
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes classified segments to a CSV file.
///
/// # Errors
///
/// Returns [`crate::ExportError`] if serialization or file I/O fails.
pub fn export_csv(path: &Path, segments: &[ClassifiedSegment]) -> Result<(), crate::ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(file, segments)?;
    log::info!("exported {} segments to {}", segments.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_map_analysis_models::VcResult;
    use vc_map_source_models::{SegmentGeometry, TrafficRecord};
    use vc_map_traffic_models::{FunctionalClass, ServiceLevel};

    fn segment() -> ClassifiedSegment {
        ClassifiedSegment {
            record: TrafficRecord {
                id: "930123".to_string(),
                road_name: "SR-80 to Okeechobee Blvd".to_string(),
                functional_class: FunctionalClass::Arterial,
                current_volume: 20000.0,
                geometry: Some(SegmentGeometry::Point([-80.05, 26.71])),
                county: Some("Palm Beach".to_string()),
                year: Some(2023),
            },
            result: VcResult {
                record_id: "930123".to_string(),
                capacity_per_day: 25_000,
                vc_current: 0.8,
                future_volume: 29718.95,
                vc_future: 1.188_758,
                service_level: ServiceLevel::Critical,
            },
        }
    }

    #[test]
    fn csv_round_trips_every_field() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[segment()]).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            HEADERS
        );

        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.get(0), Some("930123"));
        assert_eq!(row.get(1), Some("SR-80 to Okeechobee Blvd"));
        assert_eq!(row.get(2), Some("ARTERIAL"));
        assert_eq!(row.get(3), Some("Palm Beach"));
        assert_eq!(row.get(4), Some("2023"));
        assert_eq!(row.get(5), Some("20000"));
        assert_eq!(row.get(6), Some("25000"));
        assert_eq!(row.get(10), Some("CRITICAL"));

        let geometry: SegmentGeometry = serde_json::from_str(row.get(11).unwrap()).unwrap();
        assert_eq!(geometry, SegmentGeometry::Point([-80.05, 26.71]));
    }

    #[test]
    fn optional_fields_export_empty() {
        let mut no_extras = segment();
        no_extras.record.county = None;
        no_extras.record.year = None;
        no_extras.record.geometry = None;

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[no_extras]).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.get(3), Some(""));
        assert_eq!(row.get(4), Some(""));
        assert_eq!(row.get(11), Some(""));
    }
}
