//! FDOT traffic monitoring sites source.
//!
//! Uses the Traffic Online `MapServer` on the FDOT GIS portal. Sites are
//! point locations; each carries the AADT measured at that count station.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use vc_map_source_models::{SourceType, TrafficRecord};

use crate::arcgis::{ArcGisConfig, fetch_arcgis};
use crate::normalize::{AdaptedRecord, RecordRejection, collect_batch, resolve_class};
use crate::parsing::{coerce_string, parse_esri_geometry, parse_volume};
use crate::{FetchOptions, NormalizedBatch, SourceError, TrafficSource};

/// Query endpoint for the Traffic Online monitoring sites layer.
const SITES_QUERY_URL: &str =
    "https://devgis.fdot.gov/arcgis/rest/services/fto/fto_DEV/MapServer/0/query";

/// Max records per paginated request.
const PAGE_SIZE: u64 = 1_000;

/// FDOT traffic monitoring sites data source.
pub struct FdotSitesSource;

impl FdotSitesSource {
    /// Creates a new FDOT monitoring sites data source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for FdotSitesSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw feature shape from the monitoring sites layer (esriJSON).
#[derive(Debug, Deserialize)]
pub(crate) struct RawSiteFeature {
    #[serde(default)]
    attributes: RawSiteAttributes,
    #[serde(default)]
    geometry: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSiteAttributes {
    #[serde(rename = "SITE_ID", default)]
    site_id: Option<serde_json::Value>,
    #[serde(rename = "SITE_NAME", default)]
    site_name: Option<String>,
    #[serde(rename = "COUNTY_NAME", default)]
    county: Option<String>,
    #[serde(rename = "FUNCTIONAL_CLASS", default)]
    functional_class: Option<serde_json::Value>,
    #[serde(rename = "AADT", default)]
    aadt: Option<serde_json::Value>,
    #[serde(rename = "YEAR", default)]
    year: Option<serde_json::Value>,
}

/// Maps one raw site feature to the canonical record shape, or rejects it.
pub(crate) fn adapt(feature: &RawSiteFeature) -> Result<AdaptedRecord, RecordRejection> {
    let attrs = &feature.attributes;

    let road_name = attrs
        .site_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(RecordRejection::MissingRoadName)?
        .to_string();

    let raw_volume = attrs.aadt.as_ref().ok_or(RecordRejection::MissingVolume)?;
    let current_volume = parse_volume(raw_volume).ok_or(RecordRejection::UnparseableVolume)?;
    if current_volume < 0.0 {
        return Err(RecordRejection::NegativeVolume);
    }

    let id = attrs
        .site_id
        .as_ref()
        .and_then(coerce_string)
        .unwrap_or_else(|| road_name.clone());

    let raw_class = attrs.functional_class.as_ref().and_then(coerce_string);
    let (functional_class, class_fell_back) = resolve_class(raw_class.as_deref());

    Ok(AdaptedRecord {
        dedup_key: id.clone(),
        record: TrafficRecord {
            id,
            road_name,
            functional_class,
            current_volume,
            geometry: feature.geometry.as_ref().and_then(parse_esri_geometry),
            county: attrs
                .county
                .as_deref()
                .map(str::trim)
                .filter(|county| !county.is_empty())
                .map(ToString::to_string),
            year: attrs
                .year
                .as_ref()
                .and_then(serde_json::Value::as_i64)
                .and_then(|year| i32::try_from(year).ok()),
        },
        class_fell_back,
    })
}

#[async_trait]
impl TrafficSource for FdotSitesSource {
    fn id(&self) -> &'static str {
        "fdot_sites"
    }

    fn name(&self) -> &'static str {
        "FDOT Traffic Monitoring Sites"
    }

    fn source_type(&self) -> SourceType {
        SourceType::FdotSites
    }

    async fn fetch(&self, options: &FetchOptions) -> Result<PathBuf, SourceError> {
        let mut where_clauses = Vec::new();
        if let Some(county) = &options.county {
            where_clauses.push(format!("COUNTY_NAME = '{county}'"));
        }
        if let Some(year) = options.year {
            where_clauses.push(format!("YEAR = {year}"));
        }

        fetch_arcgis(
            &ArcGisConfig {
                query_url: SITES_QUERY_URL,
                output_filename: "fdot_sites.json",
                label: "FDOT sites",
                page_size: PAGE_SIZE,
                where_clauses: &where_clauses,
            },
            options,
        )
        .await
    }

    fn normalize(&self, raw_path: &Path) -> Result<NormalizedBatch, SourceError> {
        let data = std::fs::read_to_string(raw_path)?;
        let features: Vec<RawSiteFeature> = serde_json::from_str(&data)?;
        Ok(collect_batch("FDOT sites", features.iter().map(adapt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vc_map_source_models::SegmentGeometry;
    use vc_map_traffic_models::FunctionalClass;

    fn feature(value: serde_json::Value) -> RawSiteFeature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn adapts_point_site() {
        let raw = feature(json!({
            "attributes": {
                "SITE_ID": 860123,
                "SITE_NAME": "I-95 at PGA Blvd",
                "COUNTY_NAME": "Palm Beach",
                "FUNCTIONAL_CLASS": "Freeway",
                "AADT": 150000,
                "YEAR": 2023
            },
            "geometry": {"x": -80.09, "y": 26.84}
        }));
        let adapted = adapt(&raw).unwrap();
        assert_eq!(adapted.record.id, "860123");
        assert_eq!(adapted.record.road_name, "I-95 at PGA Blvd");
        assert_eq!(adapted.record.functional_class, FunctionalClass::Freeway);
        assert_eq!(
            adapted.record.geometry,
            Some(SegmentGeometry::Point([-80.09, 26.84]))
        );
        assert!(!adapted.class_fell_back);
    }

    #[test]
    fn rejects_missing_site_name() {
        let raw = feature(json!({"attributes": {"AADT": 1000}}));
        assert_eq!(adapt(&raw), Err(RecordRejection::MissingRoadName));
    }

    #[test]
    fn missing_class_falls_back_flagged() {
        let raw = feature(json!({
            "attributes": {"SITE_NAME": "US-1 at Atlantic Ave", "AADT": 42000}
        }));
        let adapted = adapt(&raw).unwrap();
        assert!(adapted.class_fell_back);
        assert_eq!(adapted.record.functional_class, FunctionalClass::Arterial);
    }

    #[test]
    fn duplicate_sites_dedup_by_site_id() {
        let first = feature(json!({
            "attributes": {"SITE_ID": "1", "SITE_NAME": "US-1", "AADT": 42000}
        }));
        let second = feature(json!({
            "attributes": {"SITE_ID": "1", "SITE_NAME": "US-1", "AADT": 42000}
        }));
        let batch = collect_batch("test", [&first, &second].into_iter().map(adapt));
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.report.duplicates, 1);
    }
}
