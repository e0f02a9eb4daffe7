//! Attribute extraction with per-publisher field-name fallbacks.
//!
//! County, FEMA and DOT layers spell the same attribute differently
//! (`AADT` vs `aadt`, `ROUTE_NAME` vs `roadway`). Each lookup takes the
//! candidate names in priority order and returns the first usable value.

use geojson::{Feature, JsonObject, feature::Id};

/// Jurisdiction name fields.
pub const NAME_FIELDS: &[&str] = &["name", "NAME", "county_name", "CNTY_NM"];
/// Flood-zone designation fields.
pub const ZONE_CODE_FIELDS: &[&str] = &["FLD_ZONE", "flood_zone", "zone", "ZONE"];
/// Roadway name fields.
pub const ROADWAY_FIELDS: &[&str] = &["ROUTE_NAME", "roadway", "RTE_NM"];
/// Traffic count fields.
pub const AADT_FIELDS: &[&str] = &["AADT", "aadt"];
/// Count-year fields.
pub const YEAR_FIELDS: &[&str] = &["AADT_YR", "year", "YEAR"];
/// Fallback identifier fields.
pub const ID_FIELDS: &[&str] = &["OBJECTID", "objectid", "id"];

/// First non-empty string (numbers are stringified) among `fields`.
#[must_use]
pub fn first_string(properties: Option<&JsonObject>, fields: &[&str]) -> Option<String> {
    let properties = properties?;
    fields.iter().find_map(|field| match properties.get(*field)? {
        serde_json::Value::String(s) => Some(s.trim())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First finite number among `fields`. Numeric strings are accepted
/// since several publishers serialize counts as text.
#[must_use]
pub fn first_number(properties: Option<&JsonObject>, fields: &[&str]) -> Option<f64> {
    let properties = properties?;
    fields
        .iter()
        .find_map(|field| match properties.get(*field)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        })
        .filter(|v: &f64| v.is_finite())
}

/// Feature identifier: the `GeoJSON` `id`, else an id-like property,
/// else the feature's ordinal in the collection.
#[must_use]
pub fn feature_id(feature: &Feature, ordinal: usize) -> String {
    match &feature.id {
        Some(Id::String(s)) if !s.is_empty() => s.clone(),
        Some(Id::Number(n)) => n.to_string(),
        _ => first_string(feature.properties.as_ref(), ID_FIELDS)
            .unwrap_or_else(|| ordinal.to_string()),
    }
}

/// AADT as a whole count. Missing, negative and non-finite values are 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn aadt(properties: Option<&JsonObject>) -> u64 {
    first_number(properties, AADT_FIELDS).map_or(0, |v| v.max(0.0).round() as u64)
}

/// Count year, if it is a plausible calendar year.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn year(properties: Option<&JsonObject>) -> Option<i32> {
    first_number(properties, YEAR_FIELDS)
        .filter(|v| (1900.0..=2200.0).contains(v))
        .map(|v| v as i32)
}
