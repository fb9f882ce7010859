//! Uploaded CSV traffic data source.
//!
//! Accepts Placer-style exports (`"Road Name"`, `"Traffic Volume"`, ...)
//! as well as files already using the canonical snake_case column names.
//! Column resolution is file-level: a missing required column fails the
//! whole upload, while bad values in individual rows only drop those rows.

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use vc_map_source_models::{SegmentGeometry, SourceType, TrafficRecord};

use crate::normalize::{AdaptedRecord, RecordRejection, collect_batch, resolve_class};
use crate::parsing::{parse_coordinate, parse_grouped_number};
use crate::{FetchOptions, NormalizedBatch, SourceError, TrafficSource};

/// Uploaded CSV file data source.
pub struct CsvUploadSource {
    input: PathBuf,
}

impl CsvUploadSource {
    /// Creates a CSV source for an already-uploaded file.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Resolved positions of the recognized columns in the header row.
struct Columns {
    road_name: usize,
    volume: usize,
    functional_class: Option<usize>,
    segment_id: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

/// Normalizes a header cell for matching: lowercased, spaces to
/// underscores. Maps both `"Road Name"` and `"road_name"` to the same key.
fn header_key(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn find_column(headers: &csv::StringRecord, key: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header_key(header) == key)
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns, SourceError> {
    let road_name = find_column(headers, "road_name");
    let volume =
        find_column(headers, "current_volume").or_else(|| find_column(headers, "traffic_volume"));

    match (road_name, volume) {
        (Some(road_name), Some(volume)) => Ok(Columns {
            road_name,
            volume,
            functional_class: find_column(headers, "functional_class"),
            segment_id: find_column(headers, "segment_id"),
            latitude: find_column(headers, "latitude"),
            longitude: find_column(headers, "longitude"),
        }),
        _ => {
            let mut missing = Vec::new();
            if road_name.is_none() {
                missing.push("road_name");
            }
            if volume.is_none() {
                missing.push("current_volume");
            }
            Err(SourceError::Normalization {
                message: format!("missing required columns: {}", missing.join(", ")),
            })
        }
    }
}

fn cell<'a>(row: &'a csv::StringRecord, index: Option<usize>) -> Option<&'a str> {
    index
        .and_then(|index| row.get(index))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Maps one CSV row to the canonical record shape, or rejects it.
fn adapt_row(
    columns: &Columns,
    index: usize,
    row: &csv::StringRecord,
) -> Result<AdaptedRecord, RecordRejection> {
    let road_name = cell(row, Some(columns.road_name))
        .ok_or(RecordRejection::MissingRoadName)?
        .to_string();

    let raw_volume = cell(row, Some(columns.volume)).ok_or(RecordRejection::MissingVolume)?;
    let current_volume =
        parse_grouped_number(raw_volume).ok_or(RecordRejection::UnparseableVolume)?;
    if current_volume < 0.0 {
        return Err(RecordRejection::NegativeVolume);
    }

    let (functional_class, class_fell_back) =
        resolve_class(cell(row, columns.functional_class));

    let id = cell(row, columns.segment_id)
        .map_or_else(|| format!("row-{}", index + 1), ToString::to_string);

    let geometry = match (
        cell(row, columns.latitude).and_then(parse_coordinate),
        cell(row, columns.longitude).and_then(parse_coordinate),
    ) {
        (Some(lat), Some(lon)) => Some(SegmentGeometry::Point([lon, lat])),
        _ => None,
    };

    Ok(AdaptedRecord {
        dedup_key: id.clone(),
        record: TrafficRecord {
            id,
            road_name,
            functional_class,
            current_volume,
            geometry,
            county: None,
            year: None,
        },
        class_fell_back,
    })
}

/// Normalizes every row of a CSV reader into canonical records.
///
/// # Errors
///
/// Returns [`SourceError`] when the header row is unreadable or a required
/// column is absent. Row-level problems drop the row, never the batch.
pub fn normalize_csv<R: Read>(reader: R) -> Result<NormalizedBatch, SourceError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns = resolve_columns(csv_reader.headers()?)?;

    let mut outcomes = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        outcomes.push(adapt_row(&columns, index, &row));
    }

    Ok(collect_batch("CSV upload", outcomes))
}

#[async_trait]
impl TrafficSource for CsvUploadSource {
    fn id(&self) -> &'static str {
        "csv_upload"
    }

    fn name(&self) -> &'static str {
        "Uploaded CSV"
    }

    fn source_type(&self) -> SourceType {
        SourceType::CsvUpload
    }

    async fn fetch(&self, _options: &FetchOptions) -> Result<PathBuf, SourceError> {
        // Nothing to download — the file is already local.
        if !self.input.exists() {
            return Err(SourceError::Normalization {
                message: format!("uploaded file not found: {}", self.input.display()),
            });
        }
        Ok(self.input.clone())
    }

    fn normalize(&self, raw_path: &Path) -> Result<NormalizedBatch, SourceError> {
        let file = std::fs::File::open(raw_path)?;
        normalize_csv(file)
    }
}
