#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spatial query engine for site feasibility scoring.
//!
//! Pure geometric primitives over WGS-84 longitude/latitude geometry:
//! point-in-polygon, point-to-line distance, and polygon area,
//! containment and difference. Nothing here panics or returns an error
//! for bad geometry; area and overlay operations report unusable input
//! through [`Measured`] so callers can classify it as low confidence.
//!
//! [`FeatureIndex`] provides an optional R-tree bounding-box pre-filter
//! over reference layers that preserves input-order first-match
//! semantics.

pub mod index;
pub mod local;
pub mod measure;
pub mod query;

pub use index::FeatureIndex;
pub use local::{offset_feet, rectangle_around};
pub use measure::{
    multi_polygon_area_sq_ft, polygon_area_sq_ft, polygon_contains, polygon_difference,
    polygon_difference_area,
};
pub use query::{distance_to_line_string, point_in_polygon, point_to_segment_distance};
pub use site_feasibility_spatial_models::{GeometryError, Measured};

use geo::{Area, LineString, Polygon, Validation};

/// Approximate feet per degree, used to turn planar degree distances
/// into feet. Consistent but not geodesically exact.
pub const FEET_PER_DEGREE: f64 = 364_567.2;

/// Square feet per square meter.
pub const SQ_FT_PER_SQ_M: f64 = 10.7639;

/// Square feet per acre.
pub const SQ_FT_PER_ACRE: f64 = 43_560.0;

/// Minimum coordinates in a closed ring (3 distinct + closing point).
pub const MIN_RING_POINTS: usize = 4;

/// Rings wider than this many degrees of longitude are assumed to wrap
/// the antimeridian.
pub const MAX_LONGITUDE_SPAN_DEG: f64 = 180.0;

/// Planar areas (in square degrees) at or below this are treated as zero.
const ZERO_AREA_EPSILON_DEG2: f64 = 1e-16;

/// Checks that a polygon is usable for area and containment operations.
///
/// Checks run cheapest-first, so the reported error is the most basic
/// problem found.
///
/// # Errors
///
/// * [`GeometryError::EmptyRing`] if the exterior has no coordinates
/// * [`GeometryError::NonFiniteCoordinate`] if any coordinate is `NaN`/infinite
/// * [`GeometryError::TooFewPoints`] if the exterior has < 3 distinct vertices
/// * [`GeometryError::AntimeridianCrossing`] if the exterior spans > 180° longitude
/// * [`GeometryError::ZeroArea`] if the vertices are collinear
/// * [`GeometryError::InvalidTopology`] if the polygon self-intersects
pub fn validate_polygon(polygon: &Polygon<f64>) -> Result<(), GeometryError> {
    let exterior = polygon.exterior();
    if exterior.0.is_empty() {
        return Err(GeometryError::EmptyRing);
    }

    let all_finite = std::iter::once(exterior)
        .chain(polygon.interiors())
        .flat_map(|ring| ring.0.iter())
        .all(|c| c.x.is_finite() && c.y.is_finite());
    if !all_finite {
        return Err(GeometryError::NonFiniteCoordinate);
    }

    let count = distinct_vertices(exterior);
    if count < 3 {
        return Err(GeometryError::TooFewPoints { count });
    }

    let span = longitude_span(exterior);
    if span > MAX_LONGITUDE_SPAN_DEG {
        return Err(GeometryError::AntimeridianCrossing { span });
    }

    if polygon.unsigned_area() <= ZERO_AREA_EPSILON_DEG2 {
        return Err(GeometryError::ZeroArea);
    }

    if !polygon.is_valid() {
        return Err(GeometryError::InvalidTopology);
    }

    Ok(())
}

/// Checks that a line string can be measured against.
///
/// # Errors
///
/// * [`GeometryError::EmptyRing`] if the line has no coordinates
/// * [`GeometryError::NonFiniteCoordinate`] if any coordinate is `NaN`/infinite
pub fn validate_line_string(line: &LineString<f64>) -> Result<(), GeometryError> {
    if line.0.is_empty() {
        return Err(GeometryError::EmptyRing);
    }
    if line.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate);
    }
    Ok(())
}

/// Counts vertices ignoring consecutive repeats and the closing point.
fn distinct_vertices(ring: &LineString<f64>) -> usize {
    let mut count = 0;
    let mut previous = None;
    for coord in &ring.0 {
        if previous != Some(coord) {
            count += 1;
            previous = Some(coord);
        }
    }
    if count > 1 && ring.0.first() == ring.0.last() {
        count -= 1;
    }
    count
}

fn longitude_span(ring: &LineString<f64>) -> f64 {
    let (min, max) = ring
        .0
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), c| {
            (min.min(c.x), max.max(c.x))
        });
    max - min
}
