#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Multi-factor feasibility score types.
//!
//! [`SiteConditions`] is the host's bag of site facts, every one optional.
//! Categorical facts stay strings so that an unfamiliar value degrades to
//! a neutral score instead of rejecting the whole document; the scorer
//! parses them with the enums below.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One component of the feasibility score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Factor {
    Flood,
    Soil,
    Utilities,
    Environmental,
    Traffic,
    Zoning,
    Topography,
}

impl Factor {
    /// Every factor, in scoring order.
    pub const ALL: [Self; 7] = [
        Self::Flood,
        Self::Soil,
        Self::Utilities,
        Self::Environmental,
        Self::Traffic,
        Self::Zoning,
        Self::Topography,
    ];
}

/// Soil survey building-site rating.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SoilBuildability {
    Favorable,
    Moderate,
    Severe,
}

/// Environmental hazard level near the site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EpaRisk {
    Low,
    Moderate,
    High,
}

/// Letter grade of an overall score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// How badly a kill factor hurts a site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KillSeverity {
    Critical,
    Warning,
}

/// A site condition that caps the overall score regardless of the other
/// factors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum KillFactor {
    /// Coastal high hazard flood zone (`VE`).
    #[serde(rename = "FLOOD_VE")]
    #[strum(serialize = "FLOOD_VE")]
    FloodVe,
    /// Wetlands cover effectively the whole parcel.
    #[serde(rename = "WETLAND_100PCT")]
    #[strum(serialize = "WETLAND_100PCT")]
    WetlandFullParcel,
    /// The nearest regulated facility is a Superfund site.
    #[serde(rename = "EPA_SUPERFUND")]
    #[strum(serialize = "EPA_SUPERFUND")]
    EpaSuperfund,
    /// Neither water nor sewer is within reach.
    #[serde(rename = "NO_UTILITIES")]
    #[strum(serialize = "NO_UTILITIES")]
    NoUtilities,
    /// Expansive soils.
    #[serde(rename = "SHRINK_SWELL_HIGH")]
    #[strum(serialize = "SHRINK_SWELL_HIGH")]
    ShrinkSwellHigh,
}

impl KillFactor {
    #[must_use]
    pub const fn severity(self) -> KillSeverity {
        match self {
            Self::FloodVe | Self::WetlandFullParcel | Self::EpaSuperfund => KillSeverity::Critical,
            Self::NoUtilities | Self::ShrinkSwellHigh => KillSeverity::Warning,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FloodVe => "Coastal High Hazard Zone",
            Self::WetlandFullParcel => "Entire Parcel is Wetland",
            Self::EpaSuperfund => "Superfund Site Proximity",
            Self::NoUtilities => "No Utilities Within 2km",
            Self::ShrinkSwellHigh => "High Shrink-Swell Soil",
        }
    }
}

/// Site facts gathered by the host. Anything missing scores neutral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConditions {
    /// FEMA flood zone designation, e.g. `AE`.
    pub flood_zone: Option<String>,
    /// Ground elevation in feet.
    pub elevation_ft: Option<f64>,
    /// Base flood elevation in feet.
    pub base_flood_elevation_ft: Option<f64>,
    /// Soil building-site rating, see [`SoilBuildability`].
    pub soil_buildability: Option<String>,
    /// Soil shrink-swell potential (`low`, `moderate`, `high`).
    pub shrink_swell_potential: Option<String>,
    pub water_line_distance_ft: Option<f64>,
    pub sewer_line_distance_ft: Option<f64>,
    /// Share of the parcel covered by wetlands, 0-100.
    pub wetlands_pct: Option<f64>,
    /// See [`EpaRisk`].
    pub epa_risk: Option<String>,
    /// Kind of the nearest regulated facility, e.g. `Superfund NPL`.
    pub nearest_facility_type: Option<String>,
    pub traffic_aadt: Option<u64>,
    pub zoning_code: Option<String>,
    /// Average slope in percent.
    pub slope_pct: Option<f64>,
}

/// Per-call weight overrides. `None` keeps the default weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FactorWeights {
    pub flood: Option<f64>,
    pub soil: Option<f64>,
    pub utilities: Option<f64>,
    pub environmental: Option<f64>,
    pub traffic: Option<f64>,
    pub zoning: Option<f64>,
    pub topography: Option<f64>,
}

impl FactorWeights {
    /// The override for `factor`, if any.
    #[must_use]
    pub const fn get(&self, factor: Factor) -> Option<f64> {
        match factor {
            Factor::Flood => self.flood,
            Factor::Soil => self.soil,
            Factor::Utilities => self.utilities,
            Factor::Environmental => self.environmental,
            Factor::Traffic => self.traffic,
            Factor::Zoning => self.zoning,
            Factor::Topography => self.topography,
        }
    }
}

/// One factor's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScore {
    pub factor: Factor,
    /// 0-100.
    pub score: f64,
    pub weight: f64,
    /// `score * weight`, rounded to two decimals.
    pub weighted: f64,
    /// False when the input was missing and a neutral score was used.
    pub measured: bool,
}

/// Weighted site feasibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityScore {
    /// Whole number, 0-100, after kill-factor caps.
    pub overall_score: f64,
    pub grade: Grade,
    /// One entry per [`Factor`], in [`Factor::ALL`] order.
    pub components: Vec<ComponentScore>,
    pub kill_factors: Vec<KillFactor>,
    /// Share of factors scored from real data, 0-1.
    pub confidence_level: f64,
}

impl FeasibilityScore {
    /// The component for `factor`.
    #[must_use]
    pub fn component(&self, factor: Factor) -> Option<&ComponentScore> {
        self.components.iter().find(|c| c.factor == factor)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn conditions_accept_partial_documents() {
        let conditions: SiteConditions =
            serde_json::from_str(r#"{"floodZone": "AE", "trafficAadt": 42000}"#).unwrap();

        assert_eq!(conditions.flood_zone.as_deref(), Some("AE"));
        assert_eq!(conditions.traffic_aadt, Some(42_000));
        assert_eq!(conditions.slope_pct, None);
    }

    #[test]
    fn weights_override_only_named_factors() {
        let weights: FactorWeights = serde_json::from_str(r#"{"traffic": 0.3}"#).unwrap();
        assert_eq!(weights.get(Factor::Traffic), Some(0.3));
        assert_eq!(weights.get(Factor::Flood), None);
    }

    #[test]
    fn kill_factors_use_legacy_codes() {
        assert_eq!(
            serde_json::to_value(KillFactor::WetlandFullParcel).unwrap(),
            "WETLAND_100PCT"
        );
        assert_eq!(KillFactor::from_str("FLOOD_VE").unwrap(), KillFactor::FloodVe);
        assert_eq!(KillFactor::NoUtilities.severity(), KillSeverity::Warning);
        assert_eq!(KillFactor::EpaSuperfund.title(), "Superfund Site Proximity");
    }

    #[test]
    fn categorical_inputs_parse_case_insensitively() {
        assert_eq!(
            SoilBuildability::from_str("Favorable").unwrap(),
            SoilBuildability::Favorable
        );
        assert_eq!(EpaRisk::from_str("HIGH").unwrap(), EpaRisk::High);
        assert!(EpaRisk::from_str("unknown").is_err());
    }

    #[test]
    fn grades_serialize_as_letters() {
        assert_eq!(serde_json::to_value(Grade::B).unwrap(), "B");
        assert!(Grade::A < Grade::F);
    }
}
