#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Compliance check types.
//!
//! A [`DesignProposal`] is checked against a [`RegulatoryEnvelope`] and
//! produces a [`ComplianceResult`] made of four [`ComplianceCheck`]s. The
//! geometry-free [`MassingEstimate`]/[`ZoningCaps`] pair is used when
//! scoring abstract templates that have not been sited yet.

use chrono::{DateTime, Utc};
use geo::{MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use site_feasibility_spatial_models::geojson_serde;
use strum_macros::{AsRefStr, Display, EnumString};

/// Outcome of a check. Ordered from best to worst, so the worst of a set
/// is its maximum.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    /// Within limits.
    #[default]
    Pass,
    /// Within limits but close to a cap, or not verifiable.
    Warn,
    /// A limit is exceeded.
    Fail,
}

/// Which regulatory limit a check covers. Checks always run in
/// declaration order.
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
pub enum CheckId {
    EnvelopeContainment,
    FarLimit,
    HeightLimit,
    CoverageLimit,
}

impl CheckId {
    /// Every check, in evaluation order.
    pub const ALL: [Self; 4] = [
        Self::EnvelopeContainment,
        Self::FarLimit,
        Self::HeightLimit,
        Self::CoverageLimit,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EnvelopeContainment => "Envelope Containment",
            Self::FarLimit => "Floor Area Ratio",
            Self::HeightLimit => "Height Limit",
            Self::CoverageLimit => "Lot Coverage",
        }
    }

    /// Unit the check's values are expressed in.
    #[must_use]
    pub const fn unit(self) -> CheckUnit {
        match self {
            Self::EnvelopeContainment | Self::CoverageLimit => CheckUnit::Pct,
            Self::FarLimit => CheckUnit::Far,
            Self::HeightLimit => CheckUnit::Ft,
        }
    }
}

/// Display unit of a check value.
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
pub enum CheckUnit {
    /// Percent.
    #[serde(rename = "pct")]
    #[strum(serialize = "pct")]
    Pct,
    /// Dimensionless floor-area ratio.
    #[serde(rename = "FAR")]
    #[strum(serialize = "FAR")]
    Far,
    /// Feet.
    #[serde(rename = "ft")]
    #[strum(serialize = "ft")]
    Ft,
}

/// One regulatory check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCheck {
    pub id: CheckId,
    pub name: String,
    pub status: ComplianceStatus,
    /// Measured value, rounded for display.
    pub current_value: f64,
    /// The cap it was compared against.
    pub limit_value: f64,
    pub unit: CheckUnit,
    /// Whole percent of the cap used.
    pub utilization_pct: f64,
    pub message: String,
    /// Portion of the footprint outside the envelope, for containment
    /// failures.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "geojson_serde::option_multi_polygon"
    )]
    pub violation_geometry: Option<MultiPolygon<f64>>,
}

/// The four checks of one proposal and their aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    /// Worst status among `checks`.
    pub overall: ComplianceStatus,
    /// Containment, FAR, height, coverage, in that order.
    pub checks: Vec<ComplianceCheck>,
    /// Messages of failing checks, in check order.
    pub violations: Vec<String>,
    /// Messages of warning checks, in check order.
    pub warnings: Vec<String>,
    pub checked_at: DateTime<Utc>,
    /// Short digest of the proposal and caps, for cache invalidation.
    pub input_hash: String,
}

impl ComplianceResult {
    /// Looks up a check by id.
    #[must_use]
    pub fn check(&self, id: CheckId) -> Option<&ComplianceCheck> {
        self.checks.iter().find(|check| check.id == id)
    }
}

/// What zoning allows on a parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryEnvelope {
    /// Maximum legally buildable footprint.
    #[serde(with = "geojson_serde::polygon")]
    pub envelope_geometry: Polygon<f64>,
    /// The lot.
    #[serde(with = "geojson_serde::polygon")]
    pub parcel_geometry: Polygon<f64>,
    /// Maximum floor-area ratio.
    pub far_cap: f64,
    pub height_cap_ft: f64,
    /// Maximum lot coverage, 0-100.
    pub coverage_cap_pct: f64,
    /// Recorded lot size, used when `parcel_geometry` is unusable.
    pub parcel_acres: f64,
}

/// A candidate building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignProposal {
    #[serde(with = "geojson_serde::polygon")]
    pub footprint_geometry: Polygon<f64>,
    pub height_ft: f64,
    pub floors: u32,
}

/// Size of an unsited building program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassingEstimate {
    pub gfa_sqft: f64,
    pub height_ft: f64,
    pub coverage_pct: f64,
}

/// Numeric caps of a site, without geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoningCaps {
    pub parcel_sqft: f64,
    pub far_cap: f64,
    pub height_cap_ft: f64,
    pub coverage_cap_pct: f64,
}

/// Outcome of the geometry-free template check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCompliance {
    pub status: ComplianceStatus,
    /// Points deducted from the compliance component, 0-150.
    pub penalty: u32,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn worst_status_is_max() {
        let statuses = [
            ComplianceStatus::Warn,
            ComplianceStatus::Pass,
            ComplianceStatus::Fail,
        ];
        assert_eq!(statuses.iter().max(), Some(&ComplianceStatus::Fail));
        assert!(ComplianceStatus::Pass < ComplianceStatus::Warn);
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ComplianceStatus::Warn).unwrap(),
            "\"WARN\""
        );
        assert_eq!(ComplianceStatus::Fail.to_string(), "FAIL");
        assert_eq!(
            ComplianceStatus::from_str("PASS").unwrap(),
            ComplianceStatus::Pass
        );
    }

    #[test]
    fn check_ids_and_units() {
        assert_eq!(CheckId::FarLimit.as_ref(), "far_limit");
        assert_eq!(
            serde_json::to_string(&CheckId::EnvelopeContainment).unwrap(),
            "\"envelope_containment\""
        );
        assert_eq!(CheckId::FarLimit.unit().to_string(), "FAR");
        assert_eq!(serde_json::to_string(&CheckUnit::Ft).unwrap(), "\"ft\"");
        assert_eq!(CheckId::CoverageLimit.name(), "Lot Coverage");
    }

    #[test]
    fn check_omits_missing_violation_geometry() {
        let check = ComplianceCheck {
            id: CheckId::HeightLimit,
            name: CheckId::HeightLimit.name().to_string(),
            status: ComplianceStatus::Pass,
            current_value: 40.0,
            limit_value: 45.0,
            unit: CheckUnit::Ft,
            utilization_pct: 89.0,
            message: "Height compliant (40' of 45' max)".to_string(),
            violation_geometry: None,
        };
        let json = serde_json::to_value(&check).unwrap();

        assert_eq!(json["currentValue"], 40.0);
        assert_eq!(json["utilizationPct"], 89.0);
        assert!(json.get("violationGeometry").is_none());
        assert_eq!(serde_json::from_value::<ComplianceCheck>(json).unwrap(), check);
    }

    #[test]
    fn proposal_reads_geojson_footprint() {
        let proposal: DesignProposal = serde_json::from_str(
            r#"{
                "footprintGeometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]},
                "heightFt": 40.0,
                "floors": 3
            }"#,
        )
        .unwrap();

        assert_eq!(proposal.floors, 3);
        assert_eq!(proposal.footprint_geometry.exterior().0.len(), 4);
    }
}
