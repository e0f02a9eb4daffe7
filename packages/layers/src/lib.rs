#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference-layer loading.
//!
//! Parses `GeoJSON` feature collections published by counties, FEMA and
//! state DOTs into typed [`BoundaryFeature`], [`ZoneFeature`] and
//! [`LineSegmentFeature`] values. A malformed document is an error; a
//! malformed individual feature is skipped with a warning so one bad
//! record never blanks out a whole layer.

pub mod properties;

use geo::{LineString, Polygon};
use geojson::{Feature, GeoJson};
use site_feasibility_layers_models::{BoundaryFeature, LineSegmentFeature, ZoneFeature};
use site_feasibility_spatial::validate_line_string;
use site_feasibility_spatial_models::{GeometryError, geojson_kind};
use thiserror::Error;

/// Errors that can occur while loading a reference layer.
#[derive(Debug, Error)]
pub enum LayerError {
    /// The document is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The document parsed, but is not a feature collection.
    #[error("Expected a FeatureCollection, found {found}")]
    NotFeatureCollection {
        /// What was found instead.
        found: &'static str,
    },
}

/// Parses jurisdiction boundaries. `MultiPolygon` features contribute one
/// boundary per member, in member order.
///
/// # Errors
///
/// Returns [`LayerError`] if the document is not a `GeoJSON` feature
/// collection.
pub fn parse_boundaries(geojson: &str, source: &str) -> Result<Vec<BoundaryFeature>, LayerError> {
    let features = feature_collection(geojson)?;
    let mut boundaries = Vec::with_capacity(features.len());

    for (ordinal, feature) in features.iter().enumerate() {
        let id = properties::feature_id(feature, ordinal);
        let polygons = match polygons_of(feature) {
            Ok(polygons) => polygons,
            Err(e) => {
                log::warn!("{source}: skipping boundary {id}: {e}");
                continue;
            }
        };
        let jurisdiction_name =
            properties::first_string(feature.properties.as_ref(), properties::NAME_FIELDS)
                .unwrap_or_else(|| source.to_string());

        boundaries.extend(polygons.into_iter().map(|geometry| BoundaryFeature {
            id: id.clone(),
            jurisdiction_name: jurisdiction_name.clone(),
            source: source.to_string(),
            geometry,
        }));
    }

    log::info!("{source}: loaded {} boundary polygons", boundaries.len());
    Ok(boundaries)
}

/// Parses flood zones. Features without a zone designation are skipped.
///
/// # Errors
///
/// Returns [`LayerError`] if the document is not a `GeoJSON` feature
/// collection.
pub fn parse_zones(geojson: &str, source: &str) -> Result<Vec<ZoneFeature>, LayerError> {
    let features = feature_collection(geojson)?;
    let mut zones = Vec::with_capacity(features.len());

    for (ordinal, feature) in features.iter().enumerate() {
        let id = properties::feature_id(feature, ordinal);
        let Some(zone_code) =
            properties::first_string(feature.properties.as_ref(), properties::ZONE_CODE_FIELDS)
        else {
            log::warn!("{source}: skipping zone {id}: no zone designation");
            continue;
        };
        let polygons = match polygons_of(feature) {
            Ok(polygons) => polygons,
            Err(e) => {
                log::warn!("{source}: skipping zone {id}: {e}");
                continue;
            }
        };

        zones.extend(polygons.into_iter().map(|geometry| ZoneFeature {
            id: id.clone(),
            zone_code: zone_code.clone(),
            source: source.to_string(),
            geometry,
        }));
    }

    log::info!("{source}: loaded {} flood zone polygons", zones.len());
    Ok(zones)
}

/// Parses traffic-count segments. `Point` count stations become
/// single-vertex lines; `MultiLineString` features contribute one segment
/// per member.
///
/// # Errors
///
/// Returns [`LayerError`] if the document is not a `GeoJSON` feature
/// collection.
pub fn parse_segments(
    geojson: &str,
    source: &str,
) -> Result<Vec<LineSegmentFeature>, LayerError> {
    let features = feature_collection(geojson)?;
    let mut segments = Vec::with_capacity(features.len());

    for (ordinal, feature) in features.iter().enumerate() {
        let id = properties::feature_id(feature, ordinal);
        let lines = match lines_of(feature) {
            Ok(lines) => lines,
            Err(e) => {
                log::warn!("{source}: skipping segment {id}: {e}");
                continue;
            }
        };
        let lines: Vec<LineString<f64>> = lines
            .into_iter()
            .filter(|line| match validate_line_string(line) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("{source}: skipping part of segment {id}: {e}");
                    false
                }
            })
            .collect();
        let props = feature.properties.as_ref();
        let roadway_name = properties::first_string(props, properties::ROADWAY_FIELDS);
        let aadt = properties::aadt(props);
        let year = properties::year(props);

        segments.extend(lines.into_iter().map(|geometry| LineSegmentFeature {
            id: id.clone(),
            roadway_name: roadway_name.clone(),
            aadt,
            year,
            source: source.to_string(),
            geometry,
        }));
    }

    log::info!("{source}: loaded {} traffic segments", segments.len());
    Ok(segments)
}

/// Parses a document into its features. A bare `Feature` is treated as a
/// one-feature collection.
fn feature_collection(geojson: &str) -> Result<Vec<Feature>, LayerError> {
    match geojson.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        GeoJson::Feature(feature) => Ok(vec![feature]),
        GeoJson::Geometry(_) => Err(LayerError::NotFeatureCollection { found: "Geometry" }),
    }
}

fn geometry_of(feature: &Feature) -> Result<(geo::Geometry<f64>, &'static str), GeometryError> {
    let geometry = feature.geometry.clone().ok_or_else(|| GeometryError::Unparseable {
        reason: "feature has no geometry".to_string(),
    })?;
    let kind = geojson_kind(&geometry.value);
    let geometry: geo::Geometry<f64> =
        geometry
            .try_into()
            .map_err(|e: geojson::Error| GeometryError::Unparseable {
                reason: e.to_string(),
            })?;
    Ok((geometry, kind))
}

fn polygons_of(feature: &Feature) -> Result<Vec<Polygon<f64>>, GeometryError> {
    match geometry_of(feature)? {
        (geo::Geometry::Polygon(polygon), _) => Ok(vec![polygon]),
        (geo::Geometry::MultiPolygon(multi), _) => Ok(multi.0),
        (_, kind) => Err(GeometryError::UnsupportedGeometry {
            kind: kind.to_string(),
        }),
    }
}

fn lines_of(feature: &Feature) -> Result<Vec<LineString<f64>>, GeometryError> {
    match geometry_of(feature)? {
        (geo::Geometry::LineString(line), _) => Ok(vec![line]),
        (geo::Geometry::MultiLineString(multi), _) => Ok(multi.0),
        (geo::Geometry::Point(point), _) => Ok(vec![LineString::new(vec![point.0])]),
        (_, kind) => Err(GeometryError::UnsupportedGeometry {
            kind: kind.to_string(),
        }),
    }
}
