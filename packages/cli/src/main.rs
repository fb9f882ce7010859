#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI host for the vc-map toolchain.
//!
//! Wires the library crates into the full pipeline: fetch a county's
//! traffic volumes from an FDOT layer (or read an uploaded CSV), normalize
//! them into canonical records, compute current and projected V/C ratios,
//! print the collection summary, and export CSV/`GeoJSON`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vc_map_analysis::aggregate::summarize;
use vc_map_analysis::engine::compute_segments;
use vc_map_analysis::growth::{DEFAULT_ZONE_RATE, GrowthProjector};
use vc_map_analysis_models::GrowthAssumption;
use vc_map_source::sources::{CsvUploadSource, FdotAadtSource, FdotSitesSource};
use vc_map_source::{FetchOptions, TrafficSource};
use vc_map_source_models::NormalizationReport;
use vc_map_traffic_models::{ServiceLevel, county};

/// Which data source to read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// FDOT Annual Average Daily Traffic segments layer.
    FdotAadt,
    /// FDOT traffic monitoring sites layer.
    FdotSites,
    /// Already-downloaded CSV file.
    Csv,
}

#[derive(Parser)]
#[command(name = "vc_map_cli", about = "V/C ratio calculator for FDOT traffic data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download raw traffic data from an FDOT GIS layer.
    Fetch {
        /// Data source to fetch from.
        #[arg(long, value_enum, default_value = "fdot-aadt")]
        source: SourceKind,
        /// County to fetch (e.g., "Palm Beach").
        #[arg(long)]
        county: Option<String>,
        /// Count year to fetch.
        #[arg(long)]
        year: Option<i32>,
        /// Maximum number of records to fetch.
        #[arg(long)]
        limit: Option<u64>,
        /// Directory to store downloaded files.
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,
    },
    /// Normalize a raw payload and compute V/C ratios.
    Analyze {
        /// Raw payload to analyze (downloaded JSON or uploaded CSV).
        input: PathBuf,
        /// Schema of the input payload.
        #[arg(long, value_enum, default_value = "fdot-aadt")]
        source: SourceKind,
        /// Annual growth rate as a decimal (defaults to the county's rate,
        /// or 2% when no county is given).
        #[arg(long)]
        growth_rate: Option<f64>,
        /// Projection horizon in years.
        #[arg(long, default_value_t = 20)]
        years: u32,
        /// County whose default growth rate to use.
        #[arg(long)]
        county: Option<String>,
        /// Write the classified segments as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the classified segments as GeoJSON to this path.
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
    /// List the supported counties and their default growth rates.
    Counties,
}

fn source_for(kind: SourceKind, input: &std::path::Path) -> Box<dyn TrafficSource> {
    match kind {
        SourceKind::FdotAadt => Box::new(FdotAadtSource::new()),
        SourceKind::FdotSites => Box::new(FdotSitesSource::new()),
        SourceKind::Csv => Box::new(CsvUploadSource::new(input)),
    }
}

fn print_report(report: &NormalizationReport) {
    println!(
        "Normalized {} of {} records ({} dropped, {} duplicates removed)",
        report.accepted,
        report.seen,
        report.dropped(),
        report.duplicates,
    );
    if report.class_fallbacks > 0 {
        println!(
            "  {} records fell back to Arterial classification",
            report.class_fallbacks
        );
    }
}

fn print_summary(summary: &vc_map_analysis_models::VcSummary) {
    println!();
    println!("V/C summary over {} segments", summary.count);
    println!(
        "  mean current {:.3} | mean projected {:.3}",
        summary.mean_vc_current, summary.mean_vc_future
    );
    println!(
        "  projected min {:.3} | median {:.3} | max {:.3}",
        summary.min_vc_future, summary.median_vc_future, summary.max_vc_future
    );
    for level in ServiceLevel::all() {
        println!(
            "  {:<8} {:>6}  ({})",
            level.to_string(),
            summary.level_counts.for_level(*level),
            level.description(),
        );
    }
}

async fn run_fetch(
    kind: SourceKind,
    county: Option<String>,
    year: Option<i32>,
    limit: Option<u64>,
    output_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    if kind == SourceKind::Csv {
        return Err("CSV inputs are already local; use `analyze --source csv` directly".into());
    }
    let options = FetchOptions {
        county,
        year,
        limit,
        output_dir,
    };
    let source = source_for(kind, std::path::Path::new("."));
    let path = source.fetch(&options).await?;
    println!("Downloaded {} data to {}", source.name(), path.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    input: &std::path::Path,
    kind: SourceKind,
    growth_rate: Option<f64>,
    years: u32,
    county_name: Option<&str>,
    csv_path: Option<&std::path::Path>,
    geojson_path: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = source_for(kind, input);
    let batch = source.normalize(input)?;
    print_report(&batch.report);

    let annual_rate = growth_rate.unwrap_or_else(|| {
        county_name
            .and_then(county::find)
            .map_or(DEFAULT_ZONE_RATE, |county| county.default_growth_rate)
    });
    log::info!("projecting {years} years at {:.1}% annual growth", annual_rate * 100.0);

    let table = vc_map_traffic_models::CapacityTable::standard();
    let projector = GrowthProjector::new();
    let growth = GrowthAssumption {
        annual_rate,
        horizon_years: years,
    };

    let segments = compute_segments(batch.records, &table, &projector, &growth)?;
    let results: Vec<_> = segments
        .iter()
        .map(|segment| segment.result.clone())
        .collect();
    print_summary(&summarize(&results));

    if let Some(path) = csv_path {
        vc_map_export::csv::export_csv(path, &segments)?;
        println!("Wrote CSV export to {}", path.display());
    }
    if let Some(path) = geojson_path {
        vc_map_export::geojson::export_geojson(path, &segments)?;
        println!("Wrote GeoJSON export to {}", path.display());
    }

    Ok(())
}

fn run_counties() {
    println!("Supported counties:");
    for county in county::FLORIDA_COUNTIES {
        println!(
            "  {:<12} FDOT district {}  default growth {:.1}%/yr",
            county.key,
            county.fdot_district,
            county.default_growth_rate * 100.0,
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Fetch {
            source,
            county,
            year,
            limit,
            output_dir,
        } => run_fetch(source, county, year, limit, output_dir).await?,
        Command::Analyze {
            input,
            source,
            growth_rate,
            years,
            county,
            csv,
            geojson,
        } => run_analyze(
            &input,
            source,
            growth_rate,
            years,
            county.as_deref(),
            csv.as_deref(),
            geojson.as_deref(),
        )?,
        Command::Counties => run_counties(),
    }

    Ok(())
}
