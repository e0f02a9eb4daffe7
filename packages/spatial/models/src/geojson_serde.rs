//! Serde adapters that encode `geo` values as `GeoJSON` geometry objects.
//!
//! Use with `#[serde(with = "...")]` on model fields so that hosts
//! exchange geometry in the same shape reference layers arrive in.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

fn write<S, G>(geometry: &G, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    for<'a> geojson::Value: From<&'a G>,
{
    geojson::Geometry::new(geojson::Value::from(geometry)).serialize(serializer)
}

fn read<'de, D, G>(deserializer: D) -> Result<G, D::Error>
where
    D: Deserializer<'de>,
    G: TryFrom<geo::Geometry<f64>>,
    <G as TryFrom<geo::Geometry<f64>>>::Error: std::fmt::Display,
{
    let geometry = geojson::Geometry::deserialize(deserializer)?;
    let geometry: geo::Geometry<f64> = geometry.try_into().map_err(D::Error::custom)?;
    G::try_from(geometry).map_err(D::Error::custom)
}

/// `Polygon` <-> `GeoJSON` `Polygon`.
pub mod polygon {
    use geo::Polygon;
    use serde::{Deserializer, Serializer};

    /// Serializes a polygon as a `GeoJSON` geometry.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        polygon: &Polygon<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        super::write(polygon, serializer)
    }

    /// Deserializes a `GeoJSON` `Polygon` geometry.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a `GeoJSON` `Polygon`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Polygon<f64>, D::Error> {
        super::read(deserializer)
    }
}

/// `LineString` <-> `GeoJSON` `LineString`.
pub mod line_string {
    use geo::LineString;
    use serde::{Deserializer, Serializer};

    /// Serializes a line string as a `GeoJSON` geometry.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        line: &LineString<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        super::write(line, serializer)
    }

    /// Deserializes a `GeoJSON` `LineString` geometry.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a `GeoJSON` `LineString`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<LineString<f64>, D::Error> {
        super::read(deserializer)
    }
}

/// `Point` <-> `GeoJSON` `Point`.
pub mod point {
    use geo::Point;
    use serde::{Deserializer, Serializer};

    /// Serializes a point as a `GeoJSON` geometry.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(point: &Point<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        super::write(point, serializer)
    }

    /// Deserializes a `GeoJSON` `Point` geometry.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a `GeoJSON` `Point`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point<f64>, D::Error> {
        super::read(deserializer)
    }
}

/// `Option<MultiPolygon>` <-> `GeoJSON` `MultiPolygon` or `null`.
pub mod option_multi_polygon {
    use geo::MultiPolygon;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    /// Serializes an optional multi-polygon as a `GeoJSON` geometry or
    /// `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        geometry: &Option<MultiPolygon<f64>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        geometry
            .as_ref()
            .map(|mp| geojson::Geometry::new(geojson::Value::from(mp)))
            .serialize(serializer)
    }

    /// Deserializes a `GeoJSON` `MultiPolygon` (a bare `Polygon` is
    /// promoted) or `null`.
    ///
    /// # Errors
    ///
    /// Fails if the input is neither `null` nor a polygonal geometry.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<MultiPolygon<f64>>, D::Error> {
        let Some(geometry) = Option::<geojson::Geometry>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let geometry: geo::Geometry<f64> = geometry.try_into().map_err(D::Error::custom)?;
        match geometry {
            geo::Geometry::MultiPolygon(mp) => Ok(Some(mp)),
            geo::Geometry::Polygon(p) => Ok(Some(MultiPolygon(vec![p]))),
            _ => Err(D::Error::custom("expected a Polygon or MultiPolygon")),
        }
    }
}
