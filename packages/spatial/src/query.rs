//! Point queries against polygons and lines.

use geo::{Coord, LineString, Point, Polygon};

use crate::{FEET_PER_DEGREE, MIN_RING_POINTS};

/// Even-odd ray-casting test against the polygon's outer ring.
///
/// Holes are ignored. Rings with fewer than [`MIN_RING_POINTS`]
/// coordinates and non-finite query points return `false`. A point
/// exactly on an edge gets whatever the ray cast yields, which is stable
/// for a given point and polygon.
#[must_use]
pub fn point_in_polygon(point: Point<f64>, polygon: &Polygon<f64>) -> bool {
    let ring = &polygon.exterior().0;
    let (x, y) = point.x_y();
    if ring.len() < MIN_RING_POINTS || !x.is_finite() || !y.is_finite() {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[j];
        if (a.y > y) != (b.y > y) && x < (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Planar distance from `point` to the segment `start`-`end`, in the
/// coordinates' native units (degrees).
///
/// The projection parameter is clamped to `[0, 1]` so the closest point
/// never leaves the segment. A zero-length segment degrades to
/// point-to-point distance.
#[must_use]
pub fn point_to_segment_distance(point: Coord<f64>, start: Coord<f64>, end: Coord<f64>) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_squared = dx.mul_add(dx, dy * dy);

    if length_squared == 0.0 {
        return (point.x - start.x).hypot(point.y - start.y);
    }

    let t = ((point.x - start.x).mul_add(dx, (point.y - start.y) * dy) / length_squared).clamp(0.0, 1.0);
    let projected_x = t.mul_add(dx, start.x);
    let projected_y = t.mul_add(dy, start.y);

    (point.x - projected_x).hypot(point.y - projected_y)
}

/// Minimum distance in feet from `point` to any segment of `line`.
///
/// Converts degrees to feet with [`FEET_PER_DEGREE`]. A single-vertex
/// line is measured as a point. Empty lines, non-finite query points,
/// and lines whose every segment is non-finite yield `f64::INFINITY`, so
/// they never win a nearest-feature search.
#[must_use]
pub fn distance_to_line_string(point: Point<f64>, line: &LineString<f64>) -> f64 {
    let target = point.0;
    if !target.x.is_finite() || !target.y.is_finite() {
        return f64::INFINITY;
    }

    let degrees = match line.0.as_slice() {
        [] => return f64::INFINITY,
        [only] => point_to_segment_distance(target, *only, *only),
        coords => coords
            .windows(2)
            .map(|pair| point_to_segment_distance(target, pair[0], pair[1]))
            .fold(f64::INFINITY, f64::min),
    };

    if degrees.is_nan() {
        return f64::INFINITY;
    }
    degrees * FEET_PER_DEGREE
}

#[cfg(test)]
mod tests {
    use geo::coord;

    use super::*;

    fn unit_square() -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        )
    }

    #[test]
    fn inside_points_are_contained() {
        let square = unit_square();
        for (x, y) in [(0.5, 0.5), (0.01, 0.99), (0.99, 0.01), (0.25, 0.75)] {
            assert!(point_in_polygon(Point::new(x, y), &square), "({x}, {y})");
        }
    }

    #[test]
    fn outside_points_are_not_contained() {
        let square = unit_square();
        for (x, y) in [(-0.5, 0.5), (1.5, 0.5), (0.5, -0.01), (0.5, 1.01), (2.0, 2.0)] {
            assert!(!point_in_polygon(Point::new(x, y), &square), "({x}, {y})");
        }
    }

    #[test]
    fn edge_points_are_consistent() {
        let square = unit_square();
        let edge = Point::new(0.0, 0.5);
        let first = point_in_polygon(edge, &square);
        for _ in 0..10 {
            assert_eq!(point_in_polygon(edge, &square), first);
        }
    }

    #[test]
    fn degenerate_polygons_contain_nothing() {
        let sliver = Polygon::new(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]), vec![]);
        let empty = Polygon::new(LineString::new(vec![]), vec![]);
        assert!(!point_in_polygon(Point::new(0.5, 0.5), &sliver));
        assert!(!point_in_polygon(Point::new(0.5, 0.5), &empty));
    }

    #[test]
    fn non_finite_point_is_outside() {
        assert!(!point_in_polygon(Point::new(f64::NAN, 0.5), &unit_square()));
    }

    #[test]
    fn holes_are_ignored() {
        let with_hole = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            vec![LineString::from(vec![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)])],
        );
        assert!(point_in_polygon(Point::new(2.0, 2.0), &with_hole));
    }

    #[test]
    fn segment_distance_projects_onto_interior() {
        let d = point_to_segment_distance(
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 },
        );
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = point_to_segment_distance(
            coord! { x: 5.0, y: 4.0 },
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 },
        );
        assert!((d - 5.0).abs() < 1e-12);

        let d = point_to_segment_distance(
            coord! { x: -3.0, y: 4.0 },
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 },
        );
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_segment_is_point_distance() {
        let d = point_to_segment_distance(
            coord! { x: 3.0, y: 4.0 },
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 0.0, y: 0.0 },
        );
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn on_line_distance_is_zero() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(distance_to_line_string(Point::new(1.0, 0.5), &line).abs() < 1e-9);
        assert!(distance_to_line_string(Point::new(0.0, 0.0), &line).abs() < 1e-9);
    }

    #[test]
    fn line_distance_is_in_feet() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]);
        let d = distance_to_line_string(Point::new(0.5, 0.01), &line);
        assert!((d - 3_645.672).abs() < 1e-6);
    }

    #[test]
    fn line_distance_takes_nearest_segment() {
        let line = LineString::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let d = distance_to_line_string(Point::new(0.5, 0.9), &line);
        assert!((d - 0.1 * FEET_PER_DEGREE).abs() < 1e-6);
    }

    #[test]
    fn single_vertex_line_is_point_distance() {
        let line = LineString::from(vec![(0.0, 0.0)]);
        let d = distance_to_line_string(Point::new(0.0, 0.001), &line);
        assert!((d - 0.001 * FEET_PER_DEGREE).abs() < 1e-6);
    }

    #[test]
    fn unusable_inputs_are_infinitely_far() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]);
        assert!(distance_to_line_string(Point::new(f64::NAN, 0.0), &line).is_infinite());
        assert!(distance_to_line_string(Point::new(0.0, 0.0), &LineString::new(vec![])).is_infinite());
        let broken = LineString::from(vec![(f64::NAN, 0.0), (f64::NAN, 1.0)]);
        assert!(distance_to_line_string(Point::new(0.0, 0.0), &broken).is_infinite());
    }

    #[test]
    fn distances_are_never_negative() {
        let line = LineString::from(vec![(-1.0, -1.0), (1.0, 1.0), (2.0, -3.0)]);
        for (x, y) in [(0.0, 0.0), (5.0, 5.0), (-2.0, 3.0), (1.5, -1.0)] {
            assert!(distance_to_line_string(Point::new(x, y), &line) >= 0.0);
        }
    }
}
