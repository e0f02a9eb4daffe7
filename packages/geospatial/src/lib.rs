#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geospatial intelligence scorer.
//!
//! Scores a site point against a snapshot of reference layers:
//!
//! 1. **Jurisdiction** - the first boundary (in collection order) that
//!    contains the point.
//! 2. **Flood exposure** - the first flood zone that contains the point,
//!    mapped from its designation to a risk index.
//! 3. **Traffic visibility** - the nearest counted road segment, if it is
//!    within [`policy::TRAFFIC_RADIUS_FT`], scaled by its AADT.
//!
//! The three are combined with fixed weights into a 0-100 composite.
//! Scoring is pure: the same point and snapshot always produce the same
//! record.

pub mod indexed;
pub mod policy;

pub use indexed::IndexedReferenceLayers;
pub use site_feasibility_geospatial_models::GeospatialScoreRecord;

use geo::Point;
use site_feasibility_layers_models::{
    BoundaryFeature, LineSegmentFeature, ReferenceLayers, ZoneFeature,
};
use site_feasibility_spatial::{distance_to_line_string, point_in_polygon};

/// Scores `point` against `layers` with linear scans.
///
/// For repeated scoring against large layers, see
/// [`IndexedReferenceLayers`], which returns identical records.
#[must_use]
pub fn score_point(point: Point<f64>, layers: &ReferenceLayers) -> GeospatialScoreRecord {
    build_record(
        point,
        match_jurisdiction(point, &layers.boundaries),
        match_flood_zone(point, &layers.zones),
        nearest_segment(point, &layers.segments),
    )
}

/// First boundary, in collection order, whose polygon contains `point`.
#[must_use]
pub fn match_jurisdiction(point: Point<f64>, boundaries: &[BoundaryFeature]) -> Option<&BoundaryFeature> {
    boundaries
        .iter()
        .find(|boundary| point_in_polygon(point, &boundary.geometry))
}

/// First flood zone, in collection order, whose polygon contains `point`.
#[must_use]
pub fn match_flood_zone(point: Point<f64>, zones: &[ZoneFeature]) -> Option<&ZoneFeature> {
    zones.iter().find(|zone| point_in_polygon(point, &zone.geometry))
}

/// The segment closest to `point` and its distance in feet, regardless of
/// the visibility radius. Ties go to the earlier segment; segments at an
/// infinite distance are never nearest.
#[must_use]
pub fn nearest_segment(
    point: Point<f64>,
    segments: &[LineSegmentFeature],
) -> Option<(&LineSegmentFeature, f64)> {
    nearest_of(point, segments.iter())
}

pub(crate) fn nearest_of<'a>(
    point: Point<f64>,
    segments: impl Iterator<Item = &'a LineSegmentFeature>,
) -> Option<(&'a LineSegmentFeature, f64)> {
    segments
        .map(|segment| (segment, distance_to_line_string(point, &segment.geometry)))
        .filter(|(_, distance)| distance.is_finite())
        .fold(None, |nearest, (segment, distance)| match nearest {
            Some((_, best)) if best <= distance => nearest,
            _ => Some((segment, distance)),
        })
}

/// Maps a flood-zone designation to a risk index.
///
/// Designations are compared trimmed and case-insensitively. Special
/// flood hazard areas are high risk, `X` and the 0.2% annual chance zone
/// are minimal, and anything else that matched is moderate.
#[must_use]
pub fn flood_risk_for_code(code: &str) -> f64 {
    let code = code.trim().to_ascii_uppercase();
    if policy::HIGH_RISK_FLOOD_CODES.contains(&code.as_str()) {
        policy::HIGH_FLOOD_RISK
    } else if code == policy::MINIMAL_RISK_FLOOD_CODE
        || code.starts_with(policy::MINIMAL_RISK_FLOOD_PREFIX)
    {
        policy::MINIMAL_FLOOD_RISK
    } else {
        policy::MODERATE_FLOOD_RISK
    }
}

/// Traffic visibility for a segment's AADT, saturating at 1.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn traffic_visibility_for_aadt(aadt: u64) -> f64 {
    clamp_unit(aadt as f64 / policy::AADT_SATURATION)
}

/// Weighted composite of the three indices, rounded to one decimal.
///
/// Indices are clamped to [0, 1] first, so the result is always within
/// [0, 100].
#[must_use]
pub fn composite_score(
    jurisdiction_confidence: f64,
    flood_risk_index: f64,
    traffic_visibility_index: f64,
) -> f64 {
    let raw = clamp_unit(jurisdiction_confidence) * policy::JURISDICTION_WEIGHT
        + (1.0 - clamp_unit(flood_risk_index)) * policy::FLOOD_WEIGHT
        + clamp_unit(traffic_visibility_index) * policy::TRAFFIC_WEIGHT;
    (raw * 10.0).round() / 10.0
}

/// Summary sentence pair for flood and traffic exposure.
#[must_use]
pub fn scoring_notes(flood_risk_index: f64, traffic_visibility_index: f64) -> String {
    let flood = if flood_risk_index > policy::NOTES_HIGH_THRESHOLD {
        "High flood exposure."
    } else if flood_risk_index > policy::NOTES_MODERATE_THRESHOLD {
        "Moderate flood exposure."
    } else {
        "Minimal flood risk."
    };
    let traffic = if traffic_visibility_index > policy::NOTES_HIGH_THRESHOLD {
        "Excellent traffic visibility."
    } else if traffic_visibility_index > policy::NOTES_MODERATE_THRESHOLD {
        "Moderate traffic visibility."
    } else {
        "Low traffic visibility."
    };
    format!("{flood} {traffic}")
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub(crate) fn build_record(
    point: Point<f64>,
    boundary: Option<&BoundaryFeature>,
    flood_zone: Option<&ZoneFeature>,
    nearest: Option<(&LineSegmentFeature, f64)>,
) -> GeospatialScoreRecord {
    let jurisdiction_confidence = if boundary.is_some() {
        policy::MATCHED_JURISDICTION_CONFIDENCE
    } else {
        policy::UNMATCHED_JURISDICTION_CONFIDENCE
    };

    let flood_risk_index = flood_zone.map_or(policy::NO_ZONE_FLOOD_RISK, |zone| {
        flood_risk_for_code(&zone.zone_code)
    });

    let traffic = nearest.filter(|(_, distance)| *distance < policy::TRAFFIC_RADIUS_FT);
    let traffic_visibility_index =
        traffic.map_or(0.0, |(segment, _)| traffic_visibility_for_aadt(segment.aadt));

    match traffic {
        Some((segment, distance)) => log::debug!(
            "({}, {}): nearest segment {} at {distance:.0} ft, AADT {}",
            point.x(),
            point.y(),
            segment.id,
            segment.aadt
        ),
        None => log::debug!(
            "({}, {}): no traffic segment within {} ft",
            point.x(),
            point.y(),
            policy::TRAFFIC_RADIUS_FT
        ),
    }

    GeospatialScoreRecord {
        location: point,
        jurisdiction_confidence,
        flood_risk_index,
        traffic_visibility_index,
        overall_geospatial_score: composite_score(
            jurisdiction_confidence,
            flood_risk_index,
            traffic_visibility_index,
        ),
        scoring_notes: scoring_notes(flood_risk_index, traffic_visibility_index),
        boundary: boundary.cloned(),
        flood_zone: flood_zone.cloned(),
        traffic_segment: traffic.map(|(segment, _)| segment.clone()),
        traffic_distance_ft: traffic.map(|(_, distance)| distance.round()),
    }
}
