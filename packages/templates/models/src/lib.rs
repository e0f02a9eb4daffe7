#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Template ranking types.
//!
//! [`DesignTemplate`] rows come from the template catalog and keep its
//! snake_case column names. Everything else is exchanged with the host in
//! camelCase.

use serde::{Deserialize, Serialize};
use site_feasibility_compliance_models::{ComplianceStatus, RegulatoryEnvelope};
use strum_macros::{AsRefStr, Display, EnumString};

/// Building use.
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
pub enum UseType {
    Industrial,
    Multifamily,
    Office,
    Retail,
    Medical,
    Hotel,
}

/// How close to the site's capacity a program is willing to build.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum RiskTolerance {
    /// Prefers 50-70% of max GFA.
    Safe,
    /// Prefers 70-90% of max GFA.
    #[default]
    Balanced,
    /// Prefers 85-100% of max GFA.
    Aggressive,
}

/// How much of the envelope summary was derived from real geometry.
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
pub enum EnvelopeQuality {
    /// Parcel and buildable geometry both measured.
    High,
    /// One of the two measured.
    Medium,
    /// Neither measured; defaults were used.
    Low,
}

/// A reusable building typology from the template catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTemplate {
    pub id: String,
    pub template_key: String,
    pub name: String,
    pub use_type: UseType,
    /// Typical footprint. Missing means the catalog default.
    #[serde(default)]
    pub footprint_area_target_sqft: Option<f64>,
    pub default_floors: u32,
    pub floor_to_floor_ft: f64,
}

/// The program a site is being evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramBucket {
    pub use_type: UseType,
    /// Target gross floor area in square feet.
    pub target_gfa: f64,
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
}

/// Raw envelope inputs as the host stores them. Every field is optional;
/// [`EnvelopeSummary`] fills gaps with defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeParameters {
    /// Parcel outline (`Polygon` or `MultiPolygon`).
    #[serde(default)]
    pub parcel_geometry: Option<geojson::Geometry>,
    /// Buildable footprint (`Polygon` or `MultiPolygon`).
    #[serde(default)]
    pub buildable_footprint: Option<geojson::Geometry>,
    #[serde(default)]
    pub far_cap: Option<f64>,
    #[serde(default)]
    pub height_cap_ft: Option<f64>,
    #[serde(default)]
    pub coverage_cap_pct: Option<f64>,
    /// Recorded lot size, used when the parcel geometry is unusable.
    #[serde(default)]
    pub parcel_acres: Option<f64>,
}

impl From<&RegulatoryEnvelope> for EnvelopeParameters {
    fn from(envelope: &RegulatoryEnvelope) -> Self {
        Self {
            parcel_geometry: Some(geojson::Geometry::new(geojson::Value::from(
                &envelope.parcel_geometry,
            ))),
            buildable_footprint: Some(geojson::Geometry::new(geojson::Value::from(
                &envelope.envelope_geometry,
            ))),
            far_cap: Some(envelope.far_cap),
            height_cap_ft: Some(envelope.height_cap_ft),
            coverage_cap_pct: Some(envelope.coverage_cap_pct),
            parcel_acres: Some(envelope.parcel_acres),
        }
    }
}

/// Site capacity with every default applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    pub parcel_acres: f64,
    pub parcel_sqft: f64,
    pub buildable_sqft: f64,
    pub far_cap: f64,
    pub height_cap_ft: f64,
    pub coverage_cap_pct: f64,
    /// `far_cap * parcel_sqft`.
    pub max_gfa: f64,
    pub envelope_quality: EnvelopeQuality,
}

/// One template's fit against a site and program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateScore {
    pub template_id: String,
    pub template_key: String,
    /// Closeness of GFA to the target, 0-100.
    pub fit_score: f64,
    /// Closeness of utilization to the preferred band, 0-100.
    pub utilization_score: f64,
    pub compliance_penalty: u32,
    pub risk_adjustment: f64,
    /// Weighted total, 0-100.
    pub final_score: f64,
    pub compliance_status: ComplianceStatus,
    pub estimated_gfa: f64,
    pub estimated_far: f64,
    pub estimated_height: f64,
    /// Whole percent of parcel area.
    pub estimated_coverage: f64,
}

/// Ranked shortlist plus overflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRanking {
    /// Up to three, passing templates first.
    pub recommended: Vec<TemplateScore>,
    /// Up to twelve more.
    pub more_options: Vec<TemplateScore>,
}
