#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference-layer feature types.
//!
//! A reference snapshot is three independently loaded collections:
//! jurisdiction boundaries, flood zones and traffic-count segments. The
//! order of each collection is significant: boundary and zone lookups
//! are first-match in collection order.

use geo::{LineString, Polygon};
use serde::{Deserialize, Serialize};
use site_feasibility_spatial_models::geojson_serde;

/// A jurisdiction (county/city) boundary polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryFeature {
    /// Feature identifier from the source layer.
    pub id: String,
    /// Jurisdiction name (e.g. "Harris").
    pub jurisdiction_name: String,
    /// Source layer identifier (e.g. "HCAD").
    pub source: String,
    /// Boundary polygon.
    #[serde(with = "geojson_serde::polygon")]
    pub geometry: Polygon<f64>,
}

/// A flood-hazard zone polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneFeature {
    /// Feature identifier from the source layer.
    pub id: String,
    /// Flood-zone designation as published (e.g. "AE", "X").
    pub zone_code: String,
    /// Source layer identifier (e.g. "FEMA NFHL").
    pub source: String,
    /// Zone polygon.
    #[serde(with = "geojson_serde::polygon")]
    pub geometry: Polygon<f64>,
}

/// A traffic-count road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegmentFeature {
    /// Feature identifier from the source layer.
    pub id: String,
    /// Roadway name, if published.
    pub roadway_name: Option<String>,
    /// Annual average daily traffic.
    pub aadt: u64,
    /// Year the count was observed.
    pub year: Option<i32>,
    /// Source layer identifier (e.g. "TxDOT").
    pub source: String,
    /// Segment polyline. Point count stations are single-vertex lines.
    #[serde(with = "geojson_serde::line_string")]
    pub geometry: LineString<f64>,
}

/// One snapshot of every reference layer the scorer consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLayers {
    /// Jurisdiction boundaries, in first-match order.
    pub boundaries: Vec<BoundaryFeature>,
    /// Flood zones, in first-match order.
    pub zones: Vec<ZoneFeature>,
    /// Traffic segments. Ties on distance go to the earlier segment.
    pub segments: Vec<LineSegmentFeature>,
}

impl ReferenceLayers {
    /// Bundles three layer collections, keeping each one's order.
    #[must_use]
    pub const fn new(
        boundaries: Vec<BoundaryFeature>,
        zones: Vec<ZoneFeature>,
        segments: Vec<LineSegmentFeature>,
    ) -> Self {
        Self {
            boundaries,
            zones,
            segments,
        }
    }

    /// Total number of features across all layers.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.boundaries.len() + self.zones.len() + self.segments.len()
    }
}
