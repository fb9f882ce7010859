//! FDOT Annual Average Daily Traffic (AADT) segments source.
//!
//! Uses the FDOT Transportation Data and Analytics AADT layer on `ArcGIS`
//! Online. Segments are polylines carrying the count year, county, and the
//! begin/end mileposts that identify the segment on its roadway.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use vc_map_source_models::{SourceType, TrafficRecord};

use crate::arcgis::{ArcGisConfig, fetch_arcgis};
use crate::normalize::{AdaptedRecord, RecordRejection, collect_batch, resolve_class};
use crate::parsing::{coerce_string, parse_esri_geometry, parse_volume};
use crate::{FetchOptions, NormalizedBatch, SourceError, TrafficSource};

/// Query endpoint for the FDOT TDA AADT layer.
const AADT_QUERY_URL: &str = "https://services1.arcgis.com/O1JpcwDW8sjYuddV/arcgis/rest/services/Annual_Average_Daily_Traffic_TDA/FeatureServer/0/query";

/// Max records per paginated request.
const PAGE_SIZE: u64 = 2_000;

/// FDOT AADT segments data source.
pub struct FdotAadtSource;

impl FdotAadtSource {
    /// Creates a new FDOT AADT data source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for FdotAadtSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw feature shape from the AADT layer (esriJSON).
#[derive(Debug, Deserialize)]
pub(crate) struct RawAadtFeature {
    #[serde(default)]
    attributes: RawAadtAttributes,
    #[serde(default)]
    geometry: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawAadtAttributes {
    /// Eight-digit roadway identifier.
    #[serde(rename = "ROADWAY", default)]
    roadway: Option<serde_json::Value>,
    /// Count site identifier.
    #[serde(rename = "COSITE", default)]
    cosite: Option<serde_json::Value>,
    /// Segment description at the begin milepost — the authoritative name
    /// field for this layer.
    #[serde(rename = "DESC_FRM", default)]
    desc_from: Option<String>,
    /// Segment description at the end milepost.
    #[serde(rename = "DESC_TO", default)]
    desc_to: Option<String>,
    #[serde(rename = "AADT", default)]
    aadt: Option<serde_json::Value>,
    #[serde(rename = "YEAR_", default)]
    year: Option<serde_json::Value>,
    #[serde(rename = "COUNTY", default)]
    county: Option<String>,
    #[serde(rename = "FUNCLASS", default)]
    funclass: Option<serde_json::Value>,
    #[serde(rename = "BEGIN_POST", default)]
    begin_post: Option<f64>,
    #[serde(rename = "END_POST", default)]
    end_post: Option<f64>,
}

/// Maps one raw AADT feature to the canonical record shape, or rejects it.
pub(crate) fn adapt(feature: &RawAadtFeature) -> Result<AdaptedRecord, RecordRejection> {
    let attrs = &feature.attributes;

    let desc_from = attrs
        .desc_from
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(RecordRejection::MissingRoadName)?;
    let road_name = attrs
        .desc_to
        .as_deref()
        .map(str::trim)
        .filter(|to| !to.is_empty())
        .map_or_else(
            || desc_from.to_string(),
            |to| format!("{desc_from} to {to}"),
        );

    let raw_volume = attrs.aadt.as_ref().ok_or(RecordRejection::MissingVolume)?;
    let current_volume = parse_volume(raw_volume).ok_or(RecordRejection::UnparseableVolume)?;
    if current_volume < 0.0 {
        return Err(RecordRejection::NegativeVolume);
    }

    let roadway = attrs.roadway.as_ref().and_then(coerce_string);
    let id = attrs
        .cosite
        .as_ref()
        .and_then(coerce_string)
        .or_else(|| roadway.clone())
        .unwrap_or_else(|| road_name.clone());

    // A segment is identified by its roadway plus begin/end mileposts; the
    // same segment can arrive from more than one query.
    let dedup_key = match (&roadway, attrs.begin_post, attrs.end_post) {
        (Some(roadway), Some(begin), Some(end)) => format!("{roadway}:{begin:.3}:{end:.3}"),
        _ => id.clone(),
    };

    let raw_class = attrs.funclass.as_ref().and_then(coerce_string);
    let (functional_class, class_fell_back) = resolve_class(raw_class.as_deref());

    Ok(AdaptedRecord {
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
        dedup_key,
        class_fell_back,
    })
}

#[async_trait]
impl TrafficSource for FdotAadtSource {
    fn id(&self) -> &'static str {
        "fdot_aadt"
    }

    fn name(&self) -> &'static str {
        "FDOT Annual Average Daily Traffic (TDA)"
    }

    fn source_type(&self) -> SourceType {
        SourceType::FdotAadt
    }

    async fn fetch(&self, options: &FetchOptions) -> Result<PathBuf, SourceError> {
        let mut where_clauses = Vec::new();
        if let Some(year) = options.year {
            where_clauses.push(format!("YEAR_ = {year}"));
        }
        if let Some(county) = &options.county {
            where_clauses.push(format!("COUNTY LIKE '%{county}%'"));
        }

        fetch_arcgis(
            &ArcGisConfig {
                query_url: AADT_QUERY_URL,
                output_filename: "fdot_aadt.json",
                label: "FDOT AADT",
                page_size: PAGE_SIZE,
                where_clauses: &where_clauses,
            },
            options,
        )
        .await
    }

    fn normalize(&self, raw_path: &Path) -> Result<NormalizedBatch, SourceError> {
        let data = std::fs::read_to_string(raw_path)?;
        let features: Vec<RawAadtFeature> = serde_json::from_str(&data)?;
        Ok(collect_batch("FDOT AADT", features.iter().map(adapt)))
    }
}
