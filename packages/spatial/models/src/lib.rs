#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometry value types shared by every feasibility component.
//!
//! Parcels, footprints, envelopes and reference-layer features are all
//! expressed as `geo` types in WGS-84 longitude/latitude degrees. This
//! crate adds the error taxonomy for unusable geometry, the [`Measured`]
//! wrapper used to report computable-but-uncertain results, and serde
//! adapters that put geometries on the wire as `GeoJSON`.

pub mod geojson_serde;

pub use geo::{Coord, LineString, MultiPolygon, Point, Polygon, Rect};

use thiserror::Error;

/// Reasons a geometry cannot be trusted for area, containment or
/// distance computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The ring has no coordinates at all.
    #[error("ring is empty")]
    EmptyRing,

    /// The ring has fewer than three distinct vertices.
    #[error("ring has {count} distinct vertices, at least 3 are required")]
    TooFewPoints {
        /// Number of distinct vertices found.
        count: usize,
    },

    /// A coordinate is `NaN` or infinite.
    #[error("geometry contains a non-finite coordinate")]
    NonFiniteCoordinate,

    /// All vertices are collinear (or coincident), so the ring encloses
    /// no area.
    #[error("ring encloses zero area")]
    ZeroArea,

    /// The ring spans more than 180 degrees of longitude, which in
    /// practice means it wraps the antimeridian.
    #[error("ring spans {span:.1} degrees of longitude (antimeridian crossing)")]
    AntimeridianCrossing {
        /// Longitude span in degrees.
        span: f64,
    },

    /// The polygon is self-intersecting or otherwise topologically
    /// invalid.
    #[error("polygon is self-intersecting or topologically invalid")]
    InvalidTopology,

    /// The geometry is well-formed but of a kind the operation does not
    /// accept (e.g. a `Point` where a polygon was expected).
    #[error("unsupported geometry type: {kind}")]
    UnsupportedGeometry {
        /// `GeoJSON` type name that was found.
        kind: String,
    },

    /// The geometry could not be decoded.
    #[error("unparseable geometry: {reason}")]
    Unparseable {
        /// Description of what went wrong.
        reason: String,
    },
}

impl GeometryError {
    /// Whether the geometry is so degenerate that no meaningful value
    /// can be computed from it.
    ///
    /// Non-degenerate errors (antimeridian, invalid topology) still allow
    /// a best-effort computation whose result is reported as uncertain.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::EmptyRing
                | Self::TooFewPoints { .. }
                | Self::NonFiniteCoordinate
                | Self::ZeroArea
                | Self::UnsupportedGeometry { .. }
                | Self::Unparseable { .. }
        )
    }
}

/// A computed value together with any geometry issue that makes it
/// uncertain.
///
/// Spatial primitives never fail: when their input is unusable they
/// return a conservative value with `issue` set, and callers decide how
/// to classify it.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured<T> {
    /// The computed (or conservative fallback) value.
    pub value: T,
    /// Why the value cannot be fully trusted, if it cannot.
    pub issue: Option<GeometryError>,
}

impl<T> Measured<T> {
    /// A value computed from valid geometry.
    #[must_use]
    pub const fn exact(value: T) -> Self {
        Self { value, issue: None }
    }

    /// A best-effort or fallback value with the issue that affected it.
    #[must_use]
    pub const fn uncertain(value: T, issue: GeometryError) -> Self {
        Self {
            value,
            issue: Some(issue),
        }
    }

    /// Whether the value was computed from valid geometry.
    #[must_use]
    pub const fn is_certain(&self) -> bool {
        self.issue.is_none()
    }

    /// Maps the value while carrying the issue along.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Measured<U> {
        Measured {
            value: f(self.value),
            issue: self.issue,
        }
    }

    /// Converts into a `Result`, discarding the value when uncertain.
    ///
    /// # Errors
    ///
    /// Returns the recorded [`GeometryError`] if the value is uncertain.
    pub fn into_result(self) -> Result<T, GeometryError> {
        match self.issue {
            None => Ok(self.value),
            Some(issue) => Err(issue),
        }
    }
}

/// Returns the `GeoJSON` type name of a geometry value, for diagnostics.
#[must_use]
pub const fn geojson_kind(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_classification() {
        assert!(GeometryError::EmptyRing.is_degenerate());
        assert!(GeometryError::TooFewPoints { count: 2 }.is_degenerate());
        assert!(GeometryError::ZeroArea.is_degenerate());
        assert!(!GeometryError::InvalidTopology.is_degenerate());
        assert!(!GeometryError::AntimeridianCrossing { span: 300.0 }.is_degenerate());
    }

    #[test]
    fn measured_map_keeps_issue() {
        let measured = Measured::uncertain(2.0_f64, GeometryError::InvalidTopology).map(|v| v * 2.0);
        assert!((measured.value - 4.0).abs() < f64::EPSILON);
        assert_eq!(measured.issue, Some(GeometryError::InvalidTopology));
        assert!(!measured.is_certain());
    }

    #[test]
    fn into_result_discards_uncertain_value() {
        assert_eq!(Measured::exact(3).into_result(), Ok(3));
        assert_eq!(
            Measured::uncertain(3, GeometryError::ZeroArea).into_result(),
            Err(GeometryError::ZeroArea)
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            GeometryError::TooFewPoints { count: 2 }.to_string(),
            "ring has 2 distinct vertices, at least 3 are required"
        );
        assert_eq!(
            GeometryError::AntimeridianCrossing { span: 359.5 }.to_string(),
            "ring spans 359.5 degrees of longitude (antimeridian crossing)"
        );
    }
}
