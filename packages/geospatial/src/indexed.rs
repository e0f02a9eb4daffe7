//! Scoring with an R-tree candidate pre-filter.
//!
//! Bounding-box candidates are returned in ascending input order and are
//! then checked with the same exact predicates as the linear scan, so
//! first-match and tie-breaking behavior is unchanged.

use geo::Point;
use site_feasibility_geospatial_models::GeospatialScoreRecord;
use site_feasibility_layers_models::{
    BoundaryFeature, LineSegmentFeature, ReferenceLayers, ZoneFeature,
};
use site_feasibility_spatial::{FEET_PER_DEGREE, FeatureIndex, point_in_polygon};

use crate::{build_record, nearest_of, policy};

/// A reference-layer snapshot with one spatial index per layer.
#[derive(Debug)]
pub struct IndexedReferenceLayers {
    layers: ReferenceLayers,
    boundaries: FeatureIndex,
    zones: FeatureIndex,
    segments: FeatureIndex,
}

impl IndexedReferenceLayers {
    /// Builds the indexes for every layer.
    #[must_use]
    pub fn new(layers: ReferenceLayers) -> Self {
        let boundaries = FeatureIndex::from_polygons(layers.boundaries.iter().map(|b| &b.geometry));
        let zones = FeatureIndex::from_polygons(layers.zones.iter().map(|z| &z.geometry));
        let segments =
            FeatureIndex::from_line_strings(layers.segments.iter().map(|s| &s.geometry));

        log::debug!(
            "Indexed {} boundaries, {} zones, {} segments",
            boundaries.len(),
            zones.len(),
            segments.len()
        );

        Self {
            layers,
            boundaries,
            zones,
            segments,
        }
    }

    /// The underlying snapshot.
    #[must_use]
    pub const fn layers(&self) -> &ReferenceLayers {
        &self.layers
    }

    /// Scores `point`. Identical to [`crate::score_point`] on the same
    /// snapshot.
    #[must_use]
    pub fn score_point(&self, point: Point<f64>) -> GeospatialScoreRecord {
        build_record(
            point,
            self.match_jurisdiction(point),
            self.match_flood_zone(point),
            self.nearest_segment(point),
        )
    }

    /// First boundary, in collection order, containing `point`.
    #[must_use]
    pub fn match_jurisdiction(&self, point: Point<f64>) -> Option<&BoundaryFeature> {
        self.boundaries
            .containing_candidates(point)
            .into_iter()
            .filter_map(|position| self.layers.boundaries.get(position))
            .find(|boundary| point_in_polygon(point, &boundary.geometry))
    }

    /// First flood zone, in collection order, containing `point`.
    #[must_use]
    pub fn match_flood_zone(&self, point: Point<f64>) -> Option<&ZoneFeature> {
        self.zones
            .containing_candidates(point)
            .into_iter()
            .filter_map(|position| self.layers.zones.get(position))
            .find(|zone| point_in_polygon(point, &zone.geometry))
    }

    /// Nearest segment among those that could be inside the visibility
    /// radius. Segments beyond the radius may be missed, which never
    /// changes the score since they would not count anyway.
    #[must_use]
    pub fn nearest_segment(&self, point: Point<f64>) -> Option<(&LineSegmentFeature, f64)> {
        let radius_deg = policy::TRAFFIC_RADIUS_FT / FEET_PER_DEGREE;
        nearest_of(
            point,
            self.segments
                .candidates_within(point, radius_deg)
                .into_iter()
                .filter_map(|position| self.layers.segments.get(position)),
        )
    }
}
