//! Local flat-earth helpers for laying out footprints in feet.
//!
//! Uses the same [`FEET_PER_DEGREE`] approximation as the distance
//! queries, scaled by `cos(latitude)` for longitude. Good for parcels and
//! buildings, not for anything spanning more than a few miles.

use geo::{LineString, Point, Polygon};

use crate::FEET_PER_DEGREE;

/// Moves `origin` by the given offsets in feet.
#[must_use]
pub fn offset_feet(origin: Point<f64>, east_ft: f64, north_ft: f64) -> Point<f64> {
    let lat_deg = north_ft / FEET_PER_DEGREE;
    let lng_deg = east_ft / (FEET_PER_DEGREE * origin.y().to_radians().cos());
    Point::new(origin.x() + lng_deg, origin.y() + lat_deg)
}

/// An axis-aligned rectangle of `width_ft` (east-west) by `depth_ft`
/// (north-south) centered on `center`, wound counter-clockwise.
#[must_use]
pub fn rectangle_around(center: Point<f64>, width_ft: f64, depth_ft: f64) -> Polygon<f64> {
    let half_w = width_ft / 2.0;
    let half_d = depth_ft / 2.0;
    let corners = [
        offset_feet(center, -half_w, -half_d),
        offset_feet(center, half_w, -half_d),
        offset_feet(center, half_w, half_d),
        offset_feet(center, -half_w, half_d),
    ];
    Polygon::new(
        LineString::from(corners.iter().map(|p| p.x_y()).collect::<Vec<_>>()),
        vec![],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_offset_moves_latitude_only() {
        let origin = Point::new(-95.0, 30.0);
        let moved = offset_feet(origin, 0.0, FEET_PER_DEGREE);
        assert!((moved.x() - origin.x()).abs() < 1e-12);
        assert!((moved.y() - 31.0).abs() < 1e-12);
    }

    #[test]
    fn east_offset_scales_with_latitude() {
        let at_equator = offset_feet(Point::new(0.0, 0.0), 1_000.0, 0.0);
        let at_sixty = offset_feet(Point::new(0.0, 60.0), 1_000.0, 0.0);
        assert!((at_sixty.x() / at_equator.x() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn rectangle_is_closed_with_four_corners() {
        let rect = rectangle_around(Point::new(-95.0, 30.0), 100.0, 50.0);
        assert_eq!(rect.exterior().0.len(), 5);
        assert_eq!(rect.exterior().0.first(), rect.exterior().0.last());
    }
}
