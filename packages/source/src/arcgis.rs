//! Shared `ArcGIS` REST API fetcher.
//!
//! Handles paginated fetching from `ArcGIS` `FeatureServer` or `MapServer`
//! query endpoints. Used by both FDOT layers (AADT segments and traffic
//! monitoring sites). Features are written out unflattened — each element
//! keeps its `attributes` and `geometry` objects — so the per-schema
//! adapters stay authoritative over field extraction.

use std::path::PathBuf;

use crate::{FetchOptions, SourceError};

/// Configuration for an `ArcGIS` fetch operation.
pub struct ArcGisConfig<'a> {
    /// Query URL of the layer (e.g., `".../FeatureServer/0/query"`).
    pub query_url: &'a str,
    /// Output filename (e.g., `"fdot_aadt.json"`).
    pub output_filename: &'a str,
    /// Label for log messages (e.g., `"FDOT AADT"`).
    pub label: &'a str,
    /// Max records per request (often 1000 or 2000).
    pub page_size: u64,
    /// `where` clause conditions, joined with `AND`. Defaults to `"1=1"`
    /// when empty.
    pub where_clauses: &'a [String],
}

/// Queries the layer for its record count using `returnCountOnly=true`.
/// Returns `None` if the count request fails (non-fatal).
async fn query_arcgis_count(
    client: &reqwest::Client,
    config: &ArcGisConfig<'_>,
    where_clause: &str,
) -> Option<u64> {
    let url = format!(
        "{}?where={where_clause}&returnCountOnly=true&f=json",
        config.query_url
    );
    let response = client.get(&url).send().await.ok()?;
    let body: serde_json::Value = response.json().await.ok()?;
    body.get("count")?.as_u64()
}

/// Fetches all features from an `ArcGIS` REST endpoint with pagination,
/// writes the raw feature array to a JSON file, and returns the output
/// path.
///
/// # Errors
///
/// Returns [`SourceError`] if HTTP requests or file I/O fail.
pub async fn fetch_arcgis(
    config: &ArcGisConfig<'_>,
    options: &FetchOptions,
) -> Result<PathBuf, SourceError> {
    let output_path = options.output_dir.join(config.output_filename);
    std::fs::create_dir_all(&options.output_dir)?;

    let client = reqwest::Client::new();
    let mut all_features: Vec<serde_json::Value> = Vec::new();
    let fetch_limit = options.limit.unwrap_or(u64::MAX);
    let where_clause = if config.where_clauses.is_empty() {
        "1=1".to_string()
    } else {
        config.where_clauses.join(" AND ")
    };

    // ── Pre-fetch count ──────────────────────────────────────────────
    let total_available = query_arcgis_count(&client, config, &where_clause).await;

    if let Some(total) = total_available {
        if fetch_limit >= total {
            log::info!(
                "{}: {total} records available (fetching all)",
                config.label
            );
        } else {
            log::info!(
                "{}: {total} records available (fetching up to {fetch_limit})",
                config.label
            );
        }
    }

    // ── Paginated fetch ──────────────────────────────────────────────
    let will_fetch = total_available.map(|total| fetch_limit.min(total));
    let mut offset: u64 = 0;

    loop {
        let total_fetched = u64::try_from(all_features.len()).unwrap_or(u64::MAX);
        let remaining = fetch_limit.saturating_sub(total_fetched);
        if remaining == 0 {
            break;
        }
        let page_limit = remaining.min(config.page_size);

        let url = format!(
            "{}?where={where_clause}&outFields=*&f=json&outSR=4326&resultRecordCount={page_limit}&resultOffset={offset}",
            config.query_url
        );

        if let Some(target) = will_fetch {
            log::info!("{}: {total_fetched} / {target} fetched", config.label);
        } else {
            log::info!("{}: offset={offset}, limit={page_limit}", config.label);
        }

        let response = client.get(&url).send().await?;
        let body: serde_json::Value = response.json().await?;

        let features = body
            .get("features")
            .and_then(serde_json::Value::as_array)
            .cloned()
            .unwrap_or_default();

        let count = features.len() as u64;
        if count == 0 {
            break;
        }

        all_features.extend(features);
        offset += count;

        // ArcGIS sets `exceededTransferLimit: true` when more records
        // exist beyond this page.  This is the canonical pagination
        // signal — using `count < page_limit` is unreliable because the
        // server silently caps results at its own `maxRecordCount`.
        let exceeded = body
            .get("exceededTransferLimit")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        if !exceeded {
            break;
        }
    }

    log::info!(
        "{}: download complete — {} records",
        config.label,
        all_features.len(),
    );
    let json = serde_json::to_string(&all_features)?;
    std::fs::write(&output_path, json)?;

    Ok(output_path)
}
