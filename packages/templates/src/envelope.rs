//! Envelope summary: site capacity numbers with defaults applied.
//!
//! Never fails. Unusable geometry falls back to recorded acreage or
//! policy defaults with a warning, and the fallback is reflected in
//! [`EnvelopeQuality`].

use site_feasibility_spatial::{SQ_FT_PER_ACRE, multi_polygon_area_sq_ft, polygon_area_sq_ft};
use site_feasibility_spatial_models::{GeometryError, geojson_kind};
use site_feasibility_templates_models::{EnvelopeParameters, EnvelopeQuality, EnvelopeSummary};

use crate::policy;

/// Area of a `GeoJSON` `Polygon` or `MultiPolygon` in square feet.
///
/// # Errors
///
/// * [`GeometryError::UnsupportedGeometry`] for any other geometry type
/// * [`GeometryError::Unparseable`] if the coordinates cannot be decoded
/// * any validation error that makes the measured area uncertain
/// * [`GeometryError::ZeroArea`] if the geometry encloses nothing
pub fn geometry_area_sq_ft(geometry: &geojson::Geometry) -> Result<f64, GeometryError> {
    let kind = geojson_kind(&geometry.value);
    let decoded: geo::Geometry<f64> =
        geometry
            .clone()
            .try_into()
            .map_err(|e: geojson::Error| GeometryError::Unparseable {
                reason: e.to_string(),
            })?;

    let measured = match decoded {
        geo::Geometry::Polygon(polygon) => polygon_area_sq_ft(&polygon),
        geo::Geometry::MultiPolygon(multi) => multi_polygon_area_sq_ft(&multi),
        _ => {
            return Err(GeometryError::UnsupportedGeometry {
                kind: kind.to_string(),
            });
        }
    };

    let area = measured.into_result()?;
    if area > 0.0 {
        Ok(area)
    } else {
        Err(GeometryError::ZeroArea)
    }
}

/// Derives site capacity from raw envelope parameters.
///
/// * Caps that are missing, non-finite or non-positive take the policy
///   defaults.
/// * Parcel area is measured from the parcel geometry, else taken from
///   the recorded acreage, else [`policy::DEFAULT_PARCEL_ACRES`].
/// * Buildable area is measured from the buildable geometry. Without one
///   it is the coverage cap's share of the parcel; with an unusable one
///   it is [`policy::FALLBACK_BUILDABLE_RATIO`] of the parcel.
#[must_use]
pub fn summarize_envelope(params: &EnvelopeParameters) -> EnvelopeSummary {
    let far_cap = cap_or_default(params.far_cap, policy::DEFAULT_FAR_CAP);
    let height_cap_ft = cap_or_default(params.height_cap_ft, policy::DEFAULT_HEIGHT_CAP_FT);
    let coverage_cap_pct =
        cap_or_default(params.coverage_cap_pct, policy::DEFAULT_COVERAGE_CAP_PCT);

    let measured_parcel = match params.parcel_geometry.as_ref().map(geometry_area_sq_ft) {
        Some(Ok(sqft)) => Some(sqft),
        Some(Err(e)) => {
            log::warn!("Parcel geometry unusable: {e}");
            None
        }
        None => None,
    };
    let parcel_sqft = measured_parcel.unwrap_or_else(|| recorded_parcel_sqft(params.parcel_acres));

    let measured_buildable = match params.buildable_footprint.as_ref().map(geometry_area_sq_ft) {
        Some(Ok(sqft)) => Some(sqft),
        Some(Err(e)) => {
            log::warn!(
                "Buildable geometry unusable ({e}), assuming {}% of parcel",
                policy::FALLBACK_BUILDABLE_RATIO * 100.0
            );
            None
        }
        None => None,
    };
    let buildable_sqft = measured_buildable.unwrap_or_else(|| {
        if params.buildable_footprint.is_some() {
            parcel_sqft * policy::FALLBACK_BUILDABLE_RATIO
        } else {
            parcel_sqft * coverage_cap_pct / 100.0
        }
    });

    let envelope_quality = match (measured_parcel.is_some(), measured_buildable.is_some()) {
        (true, true) => EnvelopeQuality::High,
        (true, false) | (false, true) => EnvelopeQuality::Medium,
        (false, false) => EnvelopeQuality::Low,
    };

    EnvelopeSummary {
        parcel_acres: parcel_sqft / SQ_FT_PER_ACRE,
        parcel_sqft,
        buildable_sqft,
        far_cap,
        height_cap_ft,
        coverage_cap_pct,
        max_gfa: far_cap * parcel_sqft,
        envelope_quality,
    }
}

fn cap_or_default(cap: Option<f64>, default: f64) -> f64 {
    cap.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}

fn recorded_parcel_sqft(parcel_acres: Option<f64>) -> f64 {
    if let Some(acres) = parcel_acres.filter(|a| a.is_finite() && *a > 0.0) {
        return acres * SQ_FT_PER_ACRE;
    }
    log::warn!(
        "No usable parcel size, defaulting to {} acre",
        policy::DEFAULT_PARCEL_ACRES
    );
    policy::DEFAULT_PARCEL_ACRES * SQ_FT_PER_ACRE
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use site_feasibility_spatial::rectangle_around;

    use super::*;

    fn square_ft(side: f64) -> geojson::Geometry {
        let polygon = rectangle_around(Point::new(-96.797, 32.7767), side, side);
        geojson::Geometry::new(geojson::Value::from(&polygon))
    }

    fn line() -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::LineString(vec![
            vec![-96.8, 32.7],
            vec![-96.7, 32.8],
        ]))
    }

    #[test]
    fn empty_parameters_use_defaults() {
        let summary = summarize_envelope(&EnvelopeParameters::default());

        assert!((summary.parcel_acres - 1.0).abs() < f64::EPSILON);
        assert!((summary.parcel_sqft - 43_560.0).abs() < f64::EPSILON);
        assert!((summary.far_cap - 0.75).abs() < f64::EPSILON);
        assert!((summary.height_cap_ft - 55.0).abs() < f64::EPSILON);
        assert!((summary.coverage_cap_pct - 85.0).abs() < f64::EPSILON);
        assert!((summary.max_gfa - 32_670.0).abs() < 1e-9);
        assert!((summary.buildable_sqft - 37_026.0).abs() < 1e-9);
        assert_eq!(summary.envelope_quality, EnvelopeQuality::Low);
    }

    #[test]
    fn non_positive_caps_use_defaults() {
        let summary = summarize_envelope(&EnvelopeParameters {
            far_cap: Some(0.0),
            height_cap_ft: Some(-10.0),
            coverage_cap_pct: Some(f64::NAN),
            ..EnvelopeParameters::default()
        });

        assert!((summary.far_cap - 0.75).abs() < f64::EPSILON);
        assert!((summary.height_cap_ft - 55.0).abs() < f64::EPSILON);
        assert!((summary.coverage_cap_pct - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn measured_geometries_are_high_quality() {
        let summary = summarize_envelope(&EnvelopeParameters {
            parcel_geometry: Some(square_ft(300.0)),
            buildable_footprint: Some(square_ft(250.0)),
            far_cap: Some(1.5),
            ..EnvelopeParameters::default()
        });

        assert_eq!(summary.envelope_quality, EnvelopeQuality::High);
        assert!((summary.parcel_sqft / 90_000.0 - 1.0).abs() < 0.01);
        assert!((summary.buildable_sqft / 62_500.0 - 1.0).abs() < 0.01);
        assert!((summary.max_gfa - 1.5 * summary.parcel_sqft).abs() < 1e-6);
    }

    #[test]
    fn unusable_buildable_falls_back_to_seventy_percent() {
        let summary = summarize_envelope(&EnvelopeParameters {
            parcel_acres: Some(2.0),
            buildable_footprint: Some(line()),
            ..EnvelopeParameters::default()
        });

        assert!((summary.parcel_sqft - 87_120.0).abs() < f64::EPSILON);
        assert!((summary.buildable_sqft - 60_984.0).abs() < 1e-9);
        assert_eq!(summary.envelope_quality, EnvelopeQuality::Low);
    }

    #[test]
    fn unusable_parcel_uses_recorded_acres() {
        let summary = summarize_envelope(&EnvelopeParameters {
            parcel_geometry: Some(line()),
            buildable_footprint: Some(square_ft(100.0)),
            parcel_acres: Some(3.0),
            ..EnvelopeParameters::default()
        });

        assert!((summary.parcel_acres - 3.0).abs() < f64::EPSILON);
        assert_eq!(summary.envelope_quality, EnvelopeQuality::Medium);
    }

    #[test]
    fn area_rejects_lines() {
        assert!(matches!(
            geometry_area_sq_ft(&line()),
            Err(GeometryError::UnsupportedGeometry { kind }) if kind == "LineString"
        ));
    }
}
