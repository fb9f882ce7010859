//! Shared parsing utilities for traffic data sources.
//!
//! Common numeric, coordinate, and geometry coercion functions used across
//! multiple source implementations. Coercion failures return `None` — the
//! caller decides whether that means rejection; nothing here ever
//! substitutes a zero for an unparseable value.

use serde_json::Value;
use vc_map_source_models::SegmentGeometry;

/// Parses a volume field that may arrive as a JSON number or as a string
/// with thousands separators (e.g., `"1,250"`).
#[must_use]
pub fn parse_volume(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_grouped_number(text),
        _ => None,
    }
}

/// Parses a numeric string, tolerating thousands separators and surrounding
/// whitespace. Returns `None` if the remainder is not a number.
#[must_use]
pub fn parse_grouped_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parses a coordinate string, tolerating an explicit sign prefix
/// (e.g., `"+28.1787326"`). Returns `None` if missing or unparseable.
#[must_use]
pub fn parse_coordinate(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Coerces an identifier-like field to a string. `ArcGIS` layers expose the
/// same logical field as text in some vintages and as a number in others.
/// Returns `None` for empty strings and non-scalar values.
#[must_use]
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Extracts a [`SegmentGeometry`] from an esriJSON geometry object.
///
/// Points arrive as `{"x": ..., "y": ...}` and polylines as
/// `{"paths": [[[x, y], ...], ...]}` (multi-path polylines are flattened
/// into a single coordinate sequence). With `outSR=4326`, `x` is longitude
/// and `y` is latitude, so the canonical `[lon, lat]` ordering is preserved
/// directly.
#[must_use]
pub fn parse_esri_geometry(geometry: &Value) -> Option<SegmentGeometry> {
    if let (Some(x), Some(y)) = (
        geometry.get("x").and_then(Value::as_f64),
        geometry.get("y").and_then(Value::as_f64),
    ) {
        return Some(SegmentGeometry::Point([x, y]));
    }

    let paths = geometry.get("paths")?.as_array()?;
    let mut coords = Vec::new();
    for path in paths {
        for pair in path.as_array()? {
            let pair = pair.as_array()?;
            let x = pair.first()?.as_f64()?;
            let y = pair.get(1)?.as_f64()?;
            coords.push([x, y]);
        }
    }

    if coords.is_empty() {
        None
    } else {
        Some(SegmentGeometry::Line(coords))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_plain_and_grouped_numbers() {
        assert_eq!(parse_grouped_number("1250"), Some(1250.0));
        assert_eq!(parse_grouped_number("1,250"), Some(1250.0));
        assert_eq!(parse_grouped_number(" 1,250,000 "), Some(1_250_000.0));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert_eq!(parse_grouped_number("N/A"), None);
        assert_eq!(parse_grouped_number(""), None);
        assert_eq!(parse_grouped_number("12abc"), None);
    }

    #[test]
    fn parses_volume_from_number_or_string() {
        assert_eq!(parse_volume(&json!(20000)), Some(20000.0));
        assert_eq!(parse_volume(&json!("12,500")), Some(12500.0));
        assert_eq!(parse_volume(&json!(null)), None);
        assert_eq!(parse_volume(&json!("garbage")), None);
    }

    #[test]
    fn parses_signed_prefix_coordinates() {
        assert_eq!(parse_coordinate("+28.1787326"), Some(28.178_732_6));
        assert_eq!(parse_coordinate("-80.0534"), Some(-80.0534));
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("north"), None);
    }

    #[test]
    fn coerces_string_and_numeric_identifiers() {
        assert_eq!(coerce_string(&json!("860123")), Some("860123".to_string()));
        assert_eq!(coerce_string(&json!(860_123)), Some("860123".to_string()));
        assert_eq!(coerce_string(&json!("  ")), None);
        assert_eq!(coerce_string(&json!(null)), None);
    }

    #[test]
    fn extracts_esri_point() {
        let geometry = json!({"x": -80.05, "y": 26.71});
        assert_eq!(
            parse_esri_geometry(&geometry),
            Some(SegmentGeometry::Point([-80.05, 26.71]))
        );
    }

    #[test]
    fn flattens_multi_path_polyline() {
        let geometry = json!({
            "paths": [
                [[-80.1, 26.7], [-80.2, 26.8]],
                [[-80.3, 26.9]]
            ]
        });
        assert_eq!(
            parse_esri_geometry(&geometry),
            Some(SegmentGeometry::Line(vec![
                [-80.1, 26.7],
                [-80.2, 26.8],
                [-80.3, 26.9]
            ]))
        );
    }

    #[test]
    fn empty_or_unknown_geometry_is_none() {
        assert_eq!(parse_esri_geometry(&json!({"paths": []})), None);
        assert_eq!(parse_esri_geometry(&json!({"rings": [[[0.0, 0.0]]]})), None);
    }
}
