//! `GeoJSON` export for map rendering.
//!
//! Produces a `FeatureCollection` with one feature per segment that has
//! geometry. Properties carry every record and result field plus the
//! service-level color for choropleth styling. Segments without geometry
//! cannot be drawn and are skipped (the CSV export still carries them).

use std::io::Write;
use std::path::Path;

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use vc_map_analysis_models::ClassifiedSegment;
use vc_map_source_models::SegmentGeometry;

fn geometry(segment_geometry: &SegmentGeometry) -> Geometry {
    match segment_geometry {
        SegmentGeometry::Point([lon, lat]) => Geometry::new(Value::Point(vec![*lon, *lat])),
        SegmentGeometry::Line(coords) => Geometry::new(Value::LineString(
            coords.iter().map(|pair| vec![pair[0], pair[1]]).collect(),
        )),
    }
}

fn properties(segment: &ClassifiedSegment) -> JsonObject {
    let record = &segment.record;
    let result = &segment.result;

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), record.id.clone().into());
    properties.insert("roadName".to_string(), record.road_name.clone().into());
    properties.insert(
        "functionalClass".to_string(),
        record.functional_class.to_string().into(),
    );
    properties.insert("county".to_string(), record.county.clone().into());
    properties.insert("year".to_string(), record.year.into());
    properties.insert("currentVolume".to_string(), record.current_volume.into());
    properties.insert("capacityPerDay".to_string(), result.capacity_per_day.into());
    properties.insert("vcCurrent".to_string(), result.vc_current.into());
    properties.insert("futureVolume".to_string(), result.future_volume.into());
    properties.insert("vcFuture".to_string(), result.vc_future.into());
    properties.insert(
        "serviceLevel".to_string(),
        result.service_level.to_string().into(),
    );
    properties.insert("color".to_string(), result.service_level.color().into());
    properties.insert(
        "statusDescription".to_string(),
        result.service_level.description().into(),
    );
    properties
}

/// Builds a `FeatureCollection` from the segments that carry geometry.
#[must_use]
pub fn feature_collection(segments: &[ClassifiedSegment]) -> FeatureCollection {
    let features: Vec<Feature> = segments
        .iter()
        .filter_map(|segment| {
            let geometry = geometry(segment.record.geometry.as_ref()?);
            Some(Feature {
                bbox: None,
                geometry: Some(geometry),
                id: Some(Id::String(segment.record.id.clone())),
                properties: Some(properties(segment)),
                foreign_members: None,
            })
        })
        .collect();

    let skipped = segments.len() - features.len();
    if skipped > 0 {
        log::debug!("{skipped} segments without geometry skipped in GeoJSON export");
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Writes the `GeoJSON` feature collection.
///
/// # Errors
///
/// Returns [`crate::ExportError`] if serialization or writing fails.
pub fn write_geojson<W: Write>(
    mut writer: W,
    segments: &[ClassifiedSegment],
) -> Result<(), crate::ExportError> {
    let collection = GeoJson::from(feature_collection(segments));
    serde_json::to_writer(&mut writer, &collection)?;
    writer.flush()?;
    Ok(())
}

/// Writes the `GeoJSON` feature collection to a file.
///
/// # Errors
///
/// Returns [`crate::ExportError`] if serialization or file I/O fails.
pub fn export_geojson(
    path: &Path,
    segments: &[ClassifiedSegment],
) -> Result<(), crate::ExportError> {
    let file = std::fs::File::create(path)?;
    write_geojson(file, segments)?;
    log::info!("exported {} segments to {}", segments.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_map_analysis_models::VcResult;
    use vc_map_source_models::TrafficRecord;
    use vc_map_traffic_models::{FunctionalClass, ServiceLevel};

    fn segment(id: &str, geometry: Option<SegmentGeometry>) -> ClassifiedSegment {
        ClassifiedSegment {
            record: TrafficRecord {
                id: id.to_string(),
                road_name: "Main St".to_string(),
                functional_class: FunctionalClass::Arterial,
                current_volume: 20000.0,
                geometry,
                county: Some("Palm Beach".to_string()),
                year: Some(2023),
            },
            result: VcResult {
                record_id: id.to_string(),
                capacity_per_day: 25_000,
                vc_current: 0.8,
                future_volume: 29718.95,
                vc_future: 1.188_758,
                service_level: ServiceLevel::Critical,
            },
        }
    }

    #[test]
    fn features_carry_all_properties_and_color() {
        let collection = feature_collection(&[segment(
            "a",
            Some(SegmentGeometry::Line(vec![[-80.1, 26.7], [-80.2, 26.8]])),
        )]);
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        let properties = feature.properties.as_ref().unwrap();
        assert_eq!(properties["roadName"], "Main St");
        assert_eq!(properties["functionalClass"], "ARTERIAL");
        assert_eq!(properties["serviceLevel"], "CRITICAL");
        assert_eq!(properties["color"], "#6f42c1");
        assert_eq!(properties["capacityPerDay"], 25_000);

        match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::LineString(coords)) => assert_eq!(coords.len(), 2),
            other => panic!("expected LineString, got {other:?}"),
        }
    }

    #[test]
    fn segments_without_geometry_are_skipped() {
        let collection = feature_collection(&[
            segment("a", Some(SegmentGeometry::Point([-80.05, 26.71]))),
            segment("b", None),
        ]);
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn written_output_is_valid_geojson() {
        let mut buffer = Vec::new();
        write_geojson(
            &mut buffer,
            &[segment("a", Some(SegmentGeometry::Point([-80.05, 26.71])))],
        )
        .unwrap();

        let parsed: GeoJson = String::from_utf8(buffer).unwrap().parse().unwrap();
        match parsed {
            GeoJson::FeatureCollection(collection) => {
                assert_eq!(collection.features.len(), 1);
            }
            other => panic!("expected FeatureCollection, got {other:?}"),
        }
    }
}
