//! R-tree bounding-box pre-filter over reference-layer features.
//!
//! The index never decides a match by itself. It narrows a layer down
//! to the features whose bounding boxes could match and hands back their
//! positions in ascending input order, so first-match scans over the
//! candidates pick exactly the feature a full linear scan would.

use geo::{BoundingRect, LineString, Point, Polygon, Rect};
use rstar::{AABB, RTree, RTreeObject};

/// A feature's bounding box stored in the R-tree with its input position.
#[derive(Debug)]
struct IndexEntry {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Bounding-box index over one reference layer.
///
/// Features without a finite bounding box (empty or non-finite
/// geometry) are kept aside and returned as candidates for every query,
/// so the indexed and linear paths always see the same features.
#[derive(Debug)]
pub struct FeatureIndex {
    tree: RTree<IndexEntry>,
    unindexed: Vec<usize>,
}

impl FeatureIndex {
    /// Builds an index over polygon features, in layer order.
    #[must_use]
    pub fn from_polygons<'a>(polygons: impl IntoIterator<Item = &'a Polygon<f64>>) -> Self {
        Self::build(polygons.into_iter().map(BoundingRect::bounding_rect))
    }

    /// Builds an index over line features, in layer order.
    #[must_use]
    pub fn from_line_strings<'a>(lines: impl IntoIterator<Item = &'a LineString<f64>>) -> Self {
        Self::build(lines.into_iter().map(BoundingRect::bounding_rect))
    }

    fn build(rects: impl Iterator<Item = Option<Rect<f64>>>) -> Self {
        let mut entries = Vec::new();
        let mut unindexed = Vec::new();

        for (position, rect) in rects.enumerate() {
            match rect.and_then(finite_envelope) {
                Some(envelope) => entries.push(IndexEntry { position, envelope }),
                None => unindexed.push(position),
            }
        }

        log::debug!(
            "Built feature index: {} indexed, {} unindexed",
            entries.len(),
            unindexed.len()
        );

        Self {
            tree: RTree::bulk_load(entries),
            unindexed,
        }
    }

    /// Number of features covered by the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size() + self.unindexed.len()
    }

    /// Whether the index covers no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positions of features whose bounding box contains `point`,
    /// ascending.
    #[must_use]
    pub fn containing_candidates(&self, point: Point<f64>) -> Vec<usize> {
        self.candidates(&AABB::from_point([point.x(), point.y()]))
    }

    /// Positions of features whose bounding box comes within
    /// `radius_deg` of `point` on either axis, ascending.
    ///
    /// Any feature within planar distance `radius_deg` is guaranteed to
    /// be among them.
    #[must_use]
    pub fn candidates_within(&self, point: Point<f64>, radius_deg: f64) -> Vec<usize> {
        let (x, y) = point.x_y();
        self.candidates(&AABB::from_corners(
            [x - radius_deg, y - radius_deg],
            [x + radius_deg, y + radius_deg],
        ))
    }

    fn candidates(&self, query: &AABB<[f64; 2]>) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(query)
            .map(|entry| entry.position)
            .chain(self.unindexed.iter().copied())
            .collect();
        positions.sort_unstable();
        positions
    }
}

fn finite_envelope(rect: Rect<f64>) -> Option<AABB<[f64; 2]>> {
    let (min, max) = (rect.min(), rect.max());
    [min.x, min.y, max.x, max.y]
        .iter()
        .all(|v| v.is_finite())
        .then(|| AABB::from_corners([min.x, min.y], [max.x, max.y]))
}
