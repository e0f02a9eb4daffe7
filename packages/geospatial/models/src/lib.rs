#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output of the geospatial intelligence scorer.

use geo::Point;
use serde::{Deserialize, Serialize};
use site_feasibility_layers_models::{BoundaryFeature, LineSegmentFeature, ZoneFeature};
use site_feasibility_spatial_models::geojson_serde;

/// Site intelligence for one point against one reference-layer snapshot.
///
/// Field names are snake_case because the record is persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeospatialScoreRecord {
    /// The scored location.
    #[serde(with = "geojson_serde::point")]
    pub location: Point<f64>,
    /// 0.99 when a jurisdiction boundary contains the point, else 0.5.
    pub jurisdiction_confidence: f64,
    /// Flood risk in [0, 1]. No zone match is 0.
    pub flood_risk_index: f64,
    /// Traffic visibility in [0, 1] from the nearest counted road.
    pub traffic_visibility_index: f64,
    /// Weighted composite in [0, 100], one decimal.
    pub overall_geospatial_score: f64,
    /// Human-readable summary of flood and traffic exposure.
    pub scoring_notes: String,
    /// First boundary containing the point.
    pub boundary: Option<BoundaryFeature>,
    /// First flood zone containing the point.
    pub flood_zone: Option<ZoneFeature>,
    /// Nearest traffic segment, when within the visibility radius.
    pub traffic_segment: Option<LineSegmentFeature>,
    /// Distance to `traffic_segment` in whole feet.
    pub traffic_distance_ft: Option<f64>,
}

impl GeospatialScoreRecord {
    /// The matched jurisdiction's name, if any.
    #[must_use]
    pub fn jurisdiction_name(&self) -> Option<&str> {
        self.boundary.as_ref().map(|b| b.jurisdiction_name.as_str())
    }

    /// The matched flood-zone designation, if any.
    #[must_use]
    pub fn flood_zone_code(&self) -> Option<&str> {
        self.flood_zone.as_ref().map(|z| z.zone_code.as_str())
    }
}
