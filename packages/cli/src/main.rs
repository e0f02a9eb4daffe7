#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line host for the site feasibility engine.
//!
//! ```text
//! site_feasibility_cli score --lng -96.79 --lat 32.77 \
//!     --boundaries cities.geojson --zones fema.geojson --traffic aadt.geojson [--indexed]
//! site_feasibility_cli comply --proposal proposal.json --envelope envelope.json
//! site_feasibility_cli rank --templates catalog.json --envelope params.json --bucket bucket.json
//! site_feasibility_cli summarize --envelope params.json
//! site_feasibility_cli feasibility --conditions site.json [--weights weights.json] [--geospatial score.json]
//! ```
//!
//! Every subcommand prints pretty JSON to stdout. Set `RUST_LOG` to see
//! geometry fallbacks and skipped features on stderr.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use geo::Point;
use serde::{Serialize, de::DeserializeOwned};
use site_feasibility_compliance::check_compliance;
use site_feasibility_compliance::models::{DesignProposal, RegulatoryEnvelope};
use site_feasibility_feasibility::models::{FactorWeights, SiteConditions};
use site_feasibility_feasibility::{score_feasibility, with_geospatial};
use site_feasibility_geospatial::{GeospatialScoreRecord, IndexedReferenceLayers};
use site_feasibility_layers::{LayerError, parse_boundaries, parse_segments, parse_zones};
use site_feasibility_layers_models::ReferenceLayers;
use site_feasibility_templates::models::{DesignTemplate, EnvelopeParameters, ProgramBucket};
use site_feasibility_templates::{rank_templates, summarize_envelope};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Invalid layer {path}: {source}")]
    Layer { path: String, source: LayerError },
    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(
    name = "site_feasibility_cli",
    about = "Score sites, check designs against zoning and rank building templates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a location against jurisdiction, flood and traffic layers
    Score {
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Jurisdiction boundaries (`GeoJSON` `FeatureCollection`)
        #[arg(long)]
        boundaries: PathBuf,
        /// Flood zones (`GeoJSON` `FeatureCollection`)
        #[arg(long)]
        zones: PathBuf,
        /// Traffic count segments (`GeoJSON` `FeatureCollection`)
        #[arg(long)]
        traffic: PathBuf,
        /// Pre-filter layers with a spatial index
        #[arg(long)]
        indexed: bool,
    },
    /// Check a design proposal against a regulatory envelope
    Comply {
        /// Design proposal JSON
        #[arg(long)]
        proposal: PathBuf,
        /// Regulatory envelope JSON
        #[arg(long)]
        envelope: PathBuf,
    },
    /// Rank catalog templates for a site and program
    Rank {
        /// Template catalog JSON array
        #[arg(long)]
        templates: PathBuf,
        /// Envelope parameters JSON
        #[arg(long)]
        envelope: PathBuf,
        /// Program bucket JSON
        #[arg(long)]
        bucket: PathBuf,
    },
    /// Derive site capacity from envelope parameters
    Summarize {
        /// Envelope parameters JSON
        #[arg(long)]
        envelope: PathBuf,
    },
    /// Grade a site from its flood, soil, utility and other conditions
    Feasibility {
        /// Site conditions JSON
        #[arg(long)]
        conditions: PathBuf,
        /// Factor weight overrides JSON
        #[arg(long)]
        weights: Option<PathBuf>,
        /// Output of `score`, used for a missing flood zone or traffic count
        #[arg(long)]
        geospatial: Option<PathBuf>,
    },
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Score {
            lng,
            lat,
            boundaries,
            zones,
            traffic,
            indexed,
        } => {
            let layers = load_layers(&boundaries, &zones, &traffic)?;
            let point = Point::new(lng, lat);
            let record = if indexed {
                IndexedReferenceLayers::new(layers).score_point(point)
            } else {
                site_feasibility_geospatial::score_point(point, &layers)
            };
            print_json(&record)
        }
        Commands::Comply { proposal, envelope } => {
            let proposal: DesignProposal = read_json(&proposal)?;
            let envelope: RegulatoryEnvelope = read_json(&envelope)?;
            print_json(&check_compliance(&proposal, &envelope))
        }
        Commands::Rank {
            templates,
            envelope,
            bucket,
        } => {
            let templates: Vec<DesignTemplate> = read_json(&templates)?;
            let params: EnvelopeParameters = read_json(&envelope)?;
            let bucket: ProgramBucket = read_json(&bucket)?;
            let summary = summarize_envelope(&params);
            print_json(&rank_templates(&templates, &summary, &bucket))
        }
        Commands::Summarize { envelope } => {
            let params: EnvelopeParameters = read_json(&envelope)?;
            print_json(&summarize_envelope(&params))
        }
        Commands::Feasibility {
            conditions,
            weights,
            geospatial,
        } => {
            let mut conditions: SiteConditions = read_json(&conditions)?;
            if let Some(path) = geospatial {
                let record: GeospatialScoreRecord = read_json(&path)?;
                conditions = with_geospatial(conditions, &record);
            }
            let weights: FactorWeights = weights
                .map(|path| read_json(&path))
                .transpose()?
                .unwrap_or_default();
            print_json(&score_feasibility(&conditions, &weights))
        }
    }
}

fn load_layers(boundaries: &Path, zones: &Path, traffic: &Path) -> Result<ReferenceLayers, CliError> {
    let layers = ReferenceLayers::new(
        parse_boundaries(&read_text(boundaries)?, &source_name(boundaries))
            .map_err(|source| layer_error(boundaries, source))?,
        parse_zones(&read_text(zones)?, &source_name(zones))
            .map_err(|source| layer_error(zones, source))?,
        parse_segments(&read_text(traffic)?, &source_name(traffic))
            .map_err(|source| layer_error(traffic, source))?,
    );
    log::info!("Loaded {} reference features", layers.feature_count());
    Ok(layers)
}

fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    serde_json::from_str(&read_text(path)?).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })
}

fn layer_error(path: &Path, source: LayerError) -> CliError {
    CliError::Layer {
        path: path.display().to_string(),
        source,
    }
}

/// File stem used as the layer's source label, e.g. `fema_nfhl`.
fn source_name(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
