#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Envelope compliance checker.
//!
//! Runs containment, FAR, height and lot-coverage checks for a design
//! proposal and aggregates them into the worst status. No input makes a
//! check fail to produce a result: unusable geometry or parameters turn
//! into WARN checks while the remaining checks still run.

pub mod checks;
pub mod policy;

pub use checks::{
    check_coverage_limit, check_envelope_containment, check_far_limit, check_height_limit,
};
pub use site_feasibility_compliance_models as models;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest as _, Sha256};
use site_feasibility_compliance_models::{
    CheckId, ComplianceCheck, ComplianceResult, ComplianceStatus, DesignProposal,
    MassingEstimate, RegulatoryEnvelope, TemplateCompliance, ZoningCaps,
};
use site_feasibility_spatial::{SQ_FT_PER_ACRE, polygon_area_sq_ft};

/// Checks `proposal` against `envelope`, stamped with the current time.
#[must_use]
pub fn check_compliance(
    proposal: &DesignProposal,
    envelope: &RegulatoryEnvelope,
) -> ComplianceResult {
    check_compliance_at(proposal, envelope, Utc::now())
}

/// Checks `proposal` against `envelope`, stamped with `checked_at`.
///
/// Identical inputs always produce identical results.
#[must_use]
pub fn check_compliance_at(
    proposal: &DesignProposal,
    envelope: &RegulatoryEnvelope,
    checked_at: DateTime<Utc>,
) -> ComplianceResult {
    let parcel_sqft = parcel_area_sq_ft(envelope);
    let footprint = polygon_area_sq_ft(&proposal.footprint_geometry);

    let containment =
        check_envelope_containment(&proposal.footprint_geometry, &envelope.envelope_geometry);

    let (far, coverage) = match &footprint.issue {
        Some(issue) => {
            log::warn!("Footprint area unusable: {issue}");
            (
                checks::unverified(CheckId::FarLimit, envelope.far_cap, "Unable to calculate FAR"),
                checks::unverified(
                    CheckId::CoverageLimit,
                    envelope.coverage_cap_pct,
                    "Unable to calculate coverage",
                ),
            )
        }
        None => (
            check_far_limit(footprint.value, proposal.floors, parcel_sqft, envelope.far_cap),
            check_coverage_limit(footprint.value, parcel_sqft, envelope.coverage_cap_pct),
        ),
    };

    let height = check_height_limit(proposal.height_ft, envelope.height_cap_ft);

    let checks = vec![containment, far, height, coverage];
    let overall = worst_status(&checks);
    let violations = messages_with_status(&checks, ComplianceStatus::Fail);
    let warnings = messages_with_status(&checks, ComplianceStatus::Warn);

    log::debug!(
        "Compliance {overall}: {} violations, {} warnings",
        violations.len(),
        warnings.len()
    );

    ComplianceResult {
        overall,
        checks,
        violations,
        warnings,
        checked_at,
        input_hash: input_hash(proposal, envelope),
    }
}

/// Whether `proposal` has no failing check. Warnings are allowed.
#[must_use]
pub fn is_design_compliant(proposal: &DesignProposal, envelope: &RegulatoryEnvelope) -> bool {
    check_compliance(proposal, envelope).overall != ComplianceStatus::Fail
}

/// Worst status among `checks`; PASS for none.
#[must_use]
pub fn worst_status(checks: &[ComplianceCheck]) -> ComplianceStatus {
    checks
        .iter()
        .map(|check| check.status)
        .max()
        .unwrap_or_default()
}

/// Parcel area in square feet.
///
/// Measured from the parcel geometry when it is usable, otherwise taken
/// from the recorded acreage. Returns `0.0` when neither is available.
#[must_use]
pub fn parcel_area_sq_ft(envelope: &RegulatoryEnvelope) -> f64 {
    let measured = polygon_area_sq_ft(&envelope.parcel_geometry);
    if measured.is_certain() && measured.value > 0.0 {
        return measured.value;
    }

    let reason = measured
        .issue
        .map_or_else(|| "zero area".to_string(), |issue| issue.to_string());
    let recorded = envelope.parcel_acres * SQ_FT_PER_ACRE;
    if recorded.is_finite() && recorded > 0.0 {
        log::warn!(
            "Parcel geometry unusable ({reason}), using recorded {} acres",
            envelope.parcel_acres
        );
        recorded
    } else {
        log::warn!("Parcel geometry unusable ({reason}) and no recorded acreage");
        0.0
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HashInput {
    footprint: geojson::Geometry,
    height_ft: f64,
    floors: u32,
    far_cap: f64,
    height_cap_ft: f64,
    coverage_cap_pct: f64,
}

/// First 16 hex characters of the SHA-256 of the proposal footprint,
/// height, floors and the envelope caps, as canonical JSON.
#[must_use]
pub fn input_hash(proposal: &DesignProposal, envelope: &RegulatoryEnvelope) -> String {
    let input = HashInput {
        footprint: geojson::Geometry::new(geojson::Value::from(&proposal.footprint_geometry)),
        height_ft: proposal.height_ft,
        floors: proposal.floors,
        far_cap: envelope.far_cap,
        height_cap_ft: envelope.height_cap_ft,
        coverage_cap_pct: envelope.coverage_cap_pct,
    };
    let bytes = serde_json::to_vec(&input).unwrap_or_else(|e| {
        log::warn!("Failed to serialize compliance hash input: {e}");
        Vec::new()
    });
    let digest = Sha256::digest(&bytes);
    let mut hash = hex::encode(digest);
    hash.truncate(policy::INPUT_HASH_LEN);
    hash
}

/// Geometry-free compliance shortcut for unsited templates.
///
/// FAR, height and coverage each add [`policy::TEMPLATE_FAIL_PENALTY`]
/// and fail when over their cap, or add [`policy::TEMPLATE_WARN_PENALTY`]
/// and warn when above [`policy::TEMPLATE_WARN_RATIO`] of it. Envelope
/// containment is not evaluated.
#[must_use]
pub fn check_template_compliance(
    estimate: &MassingEstimate,
    caps: &ZoningCaps,
) -> TemplateCompliance {
    let far = if caps.parcel_sqft.is_finite() && caps.parcel_sqft > 0.0 {
        estimate.gfa_sqft / caps.parcel_sqft
    } else {
        0.0
    };

    [
        (far, caps.far_cap),
        (estimate.height_ft, caps.height_cap_ft),
        (estimate.coverage_pct, caps.coverage_cap_pct),
    ]
    .into_iter()
    .fold(
        TemplateCompliance {
            status: ComplianceStatus::Pass,
            penalty: 0,
        },
        |mut result, (value, cap)| {
            if value > cap {
                result.penalty += policy::TEMPLATE_FAIL_PENALTY;
                result.status = ComplianceStatus::Fail;
            } else if value > cap * policy::TEMPLATE_WARN_RATIO {
                result.penalty += policy::TEMPLATE_WARN_PENALTY;
                result.status = result.status.max(ComplianceStatus::Warn);
            }
            result
        },
    )
}

fn messages_with_status(checks: &[ComplianceCheck], status: ComplianceStatus) -> Vec<String> {
    checks
        .iter()
        .filter(|check| check.status == status)
        .map(|check| check.message.clone())
        .collect()
}
