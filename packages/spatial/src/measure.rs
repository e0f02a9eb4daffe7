//! Polygon area, containment and overlay in square feet.
//!
//! Areas use the Chamberlain-Duquette spherical approximation over
//! WGS-84 degrees, converted from square meters to square feet.

use geo::{BooleanOps, ChamberlainDuquetteArea, Contains, MultiPolygon, Polygon};
use site_feasibility_spatial_models::{GeometryError, Measured};

use crate::{SQ_FT_PER_SQ_M, validate_polygon};

/// Area of a polygon in square feet.
///
/// Degenerate rings measure `0.0`. Self-intersecting and
/// antimeridian-wrapping rings are still measured, but the result is
/// flagged uncertain.
#[must_use]
pub fn polygon_area_sq_ft(polygon: &Polygon<f64>) -> Measured<f64> {
    match validate_polygon(polygon) {
        Ok(()) => Measured::exact(spherical_sq_ft(polygon)),
        Err(issue) if issue.is_degenerate() => Measured::uncertain(0.0, issue),
        Err(issue) => Measured::uncertain(spherical_sq_ft(polygon), issue),
    }
}

/// Total area of every member of a multi-polygon, in square feet.
///
/// The first member issue (if any) is reported; degenerate members
/// contribute zero.
#[must_use]
pub fn multi_polygon_area_sq_ft(multi_polygon: &MultiPolygon<f64>) -> Measured<f64> {
    let mut total = 0.0;
    let mut first_issue = None;

    for polygon in multi_polygon {
        let area = polygon_area_sq_ft(polygon);
        total += area.value;
        if first_issue.is_none() {
            first_issue = area.issue;
        }
    }

    Measured {
        value: total,
        issue: first_issue,
    }
}

/// Whether `inner` lies entirely within `outer` (boundary contact
/// allowed).
///
/// Returns an uncertain `false` when either polygon fails validation,
/// so callers never treat bad geometry as contained.
#[must_use]
pub fn polygon_contains(outer: &Polygon<f64>, inner: &Polygon<f64>) -> Measured<bool> {
    if let Err(issue) = validate_pair(outer, inner) {
        log::debug!("Containment skipped: {issue}");
        return Measured::uncertain(false, issue);
    }
    Measured::exact(outer.contains(inner))
}

/// The part of `a` that lies outside `b`.
///
/// Returns an uncertain empty geometry when either polygon fails
/// validation.
#[must_use]
pub fn polygon_difference(a: &Polygon<f64>, b: &Polygon<f64>) -> Measured<MultiPolygon<f64>> {
    if let Err(issue) = validate_pair(a, b) {
        log::debug!("Difference skipped: {issue}");
        return Measured::uncertain(MultiPolygon(vec![]), issue);
    }
    Measured::exact(a.difference(b))
}

/// Area in square feet of the part of `a` that lies outside `b`.
#[must_use]
pub fn polygon_difference_area(a: &Polygon<f64>, b: &Polygon<f64>) -> Measured<f64> {
    polygon_difference(a, b).map(|outside| multi_polygon_area_sq_ft(&outside).value)
}

fn validate_pair(a: &Polygon<f64>, b: &Polygon<f64>) -> Result<(), GeometryError> {
    validate_polygon(a)?;
    validate_polygon(b)
}

fn spherical_sq_ft(polygon: &Polygon<f64>) -> f64 {
    let area = polygon.chamberlain_duquette_unsigned_area() * SQ_FT_PER_SQ_M;
    if area.is_finite() { area } else { 0.0 }
}
