#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Template fit ranker.
//!
//! Scores catalog templates of the requested use type against a site's
//! [`EnvelopeSummary`] and a [`ProgramBucket`], then shortlists them.
//! Each score is a weighted sum of:
//!
//! * **fit** - closeness of template GFA to the target GFA
//! * **utilization** - closeness of template GFA / max GFA to the band
//!   the risk tolerance prefers
//! * **compliance** - `100 - penalty` from the geometry-free template
//!   compliance check
//!
//! plus a risk bonus, clamped to 0-100.

pub mod envelope;
pub mod policy;

pub use envelope::{geometry_area_sq_ft, summarize_envelope};
pub use site_feasibility_templates_models as models;

use site_feasibility_compliance::check_template_compliance;
use site_feasibility_compliance_models::{ComplianceStatus, MassingEstimate, ZoningCaps};
use site_feasibility_templates_models::{
    DesignTemplate, EnvelopeSummary, ProgramBucket, RiskTolerance, TemplateRanking, TemplateScore,
};

/// Scores one template. The template's use type is not checked here.
#[must_use]
pub fn score_template(
    template: &DesignTemplate,
    envelope: &EnvelopeSummary,
    bucket: &ProgramBucket,
) -> TemplateScore {
    let footprint_sqft = template
        .footprint_area_target_sqft
        .filter(|sqft| sqft.is_finite() && *sqft > 0.0)
        .unwrap_or(policy::DEFAULT_FOOTPRINT_SQFT);
    let floors = f64::from(template.default_floors);
    let gfa = footprint_sqft * floors;
    let height = floors * template.floor_to_floor_ft;
    let (coverage_pct, far) = if envelope.parcel_sqft > 0.0 {
        (
            footprint_sqft / envelope.parcel_sqft * 100.0,
            gfa / envelope.parcel_sqft,
        )
    } else {
        (0.0, 0.0)
    };

    let fit = fit_score(gfa, bucket.target_gfa);
    let utilization_pct = if envelope.max_gfa > 0.0 {
        gfa / envelope.max_gfa * 100.0
    } else {
        0.0
    };
    let utilization = if envelope.max_gfa > 0.0 {
        utilization_score(utilization_pct, bucket.risk_tolerance)
    } else {
        0.0
    };

    let compliance = check_template_compliance(
        &MassingEstimate {
            gfa_sqft: gfa,
            height_ft: height,
            coverage_pct,
        },
        &ZoningCaps {
            parcel_sqft: envelope.parcel_sqft,
            far_cap: envelope.far_cap,
            height_cap_ft: envelope.height_cap_ft,
            coverage_cap_pct: envelope.coverage_cap_pct,
        },
    );
    let risk_adjustment =
        risk_adjustment(bucket.risk_tolerance, compliance.status, utilization_pct);

    let final_score = (fit * policy::FIT_WEIGHT
        + utilization * policy::UTILIZATION_WEIGHT
        + (100.0 - f64::from(compliance.penalty)) * policy::COMPLIANCE_WEIGHT
        + risk_adjustment)
        .clamp(0.0, 100.0);

    TemplateScore {
        template_id: template.id.clone(),
        template_key: template.template_key.clone(),
        fit_score: fit.round(),
        utilization_score: utilization.round(),
        compliance_penalty: compliance.penalty,
        risk_adjustment,
        final_score: final_score.round(),
        compliance_status: compliance.status,
        estimated_gfa: gfa,
        estimated_far: (far * 100.0).round() / 100.0,
        estimated_height: height,
        estimated_coverage: coverage_pct.round(),
    }
}

/// Scores every template matching the bucket's use type and shortlists
/// them.
///
/// Scores are ordered by final score, highest first; equal scores keep
/// catalog order. `recommended` takes the best three non-failing scores
/// and backfills from the best failing ones, so it holds
/// `min(3, matching templates)` entries. `more_options` holds the rest,
/// non-failing first, up to twelve.
#[must_use]
pub fn rank_templates(
    templates: &[DesignTemplate],
    envelope: &EnvelopeSummary,
    bucket: &ProgramBucket,
) -> TemplateRanking {
    let mut scored: Vec<TemplateScore> = templates
        .iter()
        .filter(|template| template.use_type == bucket.use_type)
        .map(|template| score_template(template, envelope, bucket))
        .collect();
    scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    let (passing, failing): (Vec<_>, Vec<_>) = scored
        .into_iter()
        .partition(|score| score.compliance_status != ComplianceStatus::Fail);
    let mut passing = passing.into_iter();
    let mut failing = failing.into_iter();

    let mut recommended: Vec<TemplateScore> =
        passing.by_ref().take(policy::RECOMMENDED_COUNT).collect();
    let backfill = policy::RECOMMENDED_COUNT - recommended.len();
    recommended.extend(failing.by_ref().take(backfill));

    let more_options = passing
        .chain(failing)
        .take(policy::MORE_OPTIONS_LIMIT)
        .collect();

    log::debug!(
        "Ranked {} {} templates: {} recommended",
        templates.len(),
        bucket.use_type,
        recommended.len()
    );

    TemplateRanking {
        recommended,
        more_options,
    }
}

/// `100 - |gfa - target| / target * 100`, floored at 0. Targets below 1
/// sqft are treated as 1.
#[must_use]
pub fn fit_score(gfa: f64, target_gfa: f64) -> f64 {
    let delta = (gfa - target_gfa).abs();
    (100.0 - delta / target_gfa.max(1.0) * 100.0).max(0.0)
}

/// 100 inside the risk tolerance's preferred band, otherwise decaying
/// linearly with distance from the band center, clamped to 0-100.
#[must_use]
pub fn utilization_score(utilization_pct: f64, risk: RiskTolerance) -> f64 {
    let band = policy::utilization_band(risk);
    if band.contains(utilization_pct) {
        100.0
    } else {
        (100.0 - (band.center - utilization_pct).abs() * band.decay).clamp(0.0, 100.0)
    }
}

/// Bonus for templates whose utilization suits the risk tolerance.
/// Failing templates never get one.
#[must_use]
pub fn risk_adjustment(risk: RiskTolerance, status: ComplianceStatus, utilization_pct: f64) -> f64 {
    if status == ComplianceStatus::Fail {
        return 0.0;
    }
    match risk {
        RiskTolerance::Safe if utilization_pct < policy::SAFE_BONUS_MAX_UTILIZATION => {
            policy::SAFE_BONUS
        }
        RiskTolerance::Aggressive if utilization_pct > policy::AGGRESSIVE_BONUS_MIN_UTILIZATION => {
            policy::AGGRESSIVE_BONUS
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use site_feasibility_templates_models::{EnvelopeParameters, UseType};

    use super::*;

    fn one_acre() -> EnvelopeSummary {
        summarize_envelope(&EnvelopeParameters::default())
    }

    fn template(key: &str, use_type: UseType, footprint: f64, floors: u32) -> DesignTemplate {
        DesignTemplate {
            id: format!("id-{key}"),
            template_key: key.to_string(),
            name: key.to_string(),
            use_type,
            footprint_area_target_sqft: Some(footprint),
            default_floors: floors,
            floor_to_floor_ft: 36.0,
        }
    }

    fn bucket(target_gfa: f64, risk_tolerance: RiskTolerance) -> ProgramBucket {
        ProgramBucket {
            use_type: UseType::Industrial,
            target_gfa,
            risk_tolerance,
        }
    }

    #[test]
    fn balanced_single_story_warehouse() {
        let score = score_template(
            &template("bulk", UseType::Industrial, 20_000.0, 1),
            &one_acre(),
            &bucket(20_000.0, RiskTolerance::Balanced),
        );

        assert!((score.fit_score - 100.0).abs() < f64::EPSILON);
        assert!((score.utilization_score - 62.0).abs() < f64::EPSILON);
        assert_eq!(score.compliance_status, ComplianceStatus::Pass);
        assert_eq!(score.compliance_penalty, 0);
        assert!(score.risk_adjustment.abs() < f64::EPSILON);
        assert!((score.final_score - 89.0).abs() < f64::EPSILON);
        assert!((score.estimated_far - 0.46).abs() < 1e-9);
        assert!((score.estimated_coverage - 46.0).abs() < f64::EPSILON);
        assert!((score.estimated_height - 36.0).abs() < f64::EPSILON);
    }

    #[test]
    fn safe_bonus_is_clamped() {
        let score = score_template(
            &template("bulk", UseType::Industrial, 20_000.0, 1),
            &one_acre(),
            &bucket(20_000.0, RiskTolerance::Safe),
        );

        assert!((score.utilization_score - 100.0).abs() < f64::EPSILON);
        assert!((score.risk_adjustment - 10.0).abs() < f64::EPSILON);
        assert!((score.final_score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aggressive_bonus_applies_to_warnings() {
        let score = score_template(
            &template("big", UseType::Industrial, 30_000.0, 1),
            &one_acre(),
            &bucket(30_000.0, RiskTolerance::Aggressive),
        );

        assert_eq!(score.compliance_status, ComplianceStatus::Warn);
        assert_eq!(score.compliance_penalty, 10);
        assert!((score.risk_adjustment - 15.0).abs() < f64::EPSILON);
        assert!((score.final_score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn oversized_template_fails() {
        let score = score_template(
            &template("tower", UseType::Industrial, 20_000.0, 3),
            &one_acre(),
            &bucket(20_000.0, RiskTolerance::Aggressive),
        );

        assert_eq!(score.compliance_status, ComplianceStatus::Fail);
        assert_eq!(score.compliance_penalty, 100);
        assert!(score.risk_adjustment.abs() < f64::EPSILON);
        assert!(score.final_score >= 0.0);
    }

    #[test]
    fn missing_footprint_uses_default() {
        let mut t = template("bulk", UseType::Industrial, 0.0, 2);
        t.footprint_area_target_sqft = None;
        let score = score_template(&t, &one_acre(), &bucket(40_000.0, RiskTolerance::Balanced));

        assert!((score.estimated_gfa - 40_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fit_score_is_symmetric_and_floored() {
        assert!((fit_score(15_000.0, 20_000.0) - 75.0).abs() < 1e-9);
        assert!((fit_score(25_000.0, 20_000.0) - 75.0).abs() < 1e-9);
        assert!(fit_score(100_000.0, 20_000.0).abs() < f64::EPSILON);
        assert!((fit_score(0.5, 0.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn utilization_decays_from_band_center() {
        assert!((utilization_score(60.0, RiskTolerance::Balanced) - 60.0).abs() < 1e-9);
        assert!((utilization_score(95.0, RiskTolerance::Balanced) - 70.0).abs() < 1e-9);
        assert!((utilization_score(70.0, RiskTolerance::Aggressive) - 66.25).abs() < 1e-9);
        assert!((utilization_score(110.0, RiskTolerance::Aggressive) - 73.75).abs() < 1e-9);
        assert!(utilization_score(0.0, RiskTolerance::Aggressive).abs() < f64::EPSILON);
        assert!((utilization_score(70.0, RiskTolerance::Safe) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_max_gfa_scores_no_utilization() {
        let envelope = EnvelopeSummary {
            max_gfa: 0.0,
            ..one_acre()
        };
        let score = score_template(
            &template("bulk", UseType::Industrial, 20_000.0, 1),
            &envelope,
            &bucket(20_000.0, RiskTolerance::Balanced),
        );
        assert!(score.utilization_score.abs() < f64::EPSILON);
    }

    #[test]
    fn ranking_prefers_passing_and_backfills_failing() {
        let catalog = vec![
            template("fail-a", UseType::Industrial, 20_000.0, 3),
            template("pass-a", UseType::Industrial, 20_000.0, 1),
            template("office", UseType::Office, 20_000.0, 1),
            template("fail-b", UseType::Industrial, 40_000.0, 1),
            template("pass-b", UseType::Industrial, 15_000.0, 1),
            template("fail-c", UseType::Industrial, 50_000.0, 2),
        ];
        let ranking = rank_templates(
            &catalog,
            &one_acre(),
            &bucket(20_000.0, RiskTolerance::Balanced),
        );

        let keys: Vec<&str> = ranking
            .recommended
            .iter()
            .map(|s| s.template_key.as_str())
            .collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(&keys[..2], ["pass-a", "pass-b"]);
        assert!(keys[2].starts_with("fail"));
        assert_eq!(ranking.more_options.len(), 2);
        assert!(
            ranking
                .more_options
                .iter()
                .all(|s| s.compliance_status == ComplianceStatus::Fail)
        );
        assert!(
            ranking
                .recommended
                .iter()
                .chain(&ranking.more_options)
                .all(|s| s.template_key != "office")
        );
    }

    #[test]
    fn recommended_holds_min_of_three_and_matches() {
        let envelope = one_acre();
        let bucket = bucket(20_000.0, RiskTolerance::Balanced);
        for count in 0..6 {
            let catalog: Vec<DesignTemplate> = (0..count)
                .map(|i| template(&format!("t{i}"), UseType::Industrial, 20_000.0, 3))
                .collect();
            let ranking = rank_templates(&catalog, &envelope, &bucket);
            assert_eq!(ranking.recommended.len(), count.min(3));
            assert_eq!(ranking.more_options.len(), count.saturating_sub(3));
        }
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = vec![
            template("first", UseType::Industrial, 20_000.0, 1),
            template("second", UseType::Industrial, 20_000.0, 1),
            template("third", UseType::Industrial, 20_000.0, 1),
        ];
        let ranking = rank_templates(
            &catalog,
            &one_acre(),
            &bucket(20_000.0, RiskTolerance::Balanced),
        );

        let keys: Vec<&str> = ranking
            .recommended
            .iter()
            .map(|s| s.template_key.as_str())
            .collect();
        assert_eq!(keys, ["first", "second", "third"]);
    }

    #[test]
    fn more_options_are_capped() {
        let catalog: Vec<DesignTemplate> = (0..20)
            .map(|i| template(&format!("t{i}"), UseType::Industrial, 20_000.0, 1))
            .collect();
        let ranking = rank_templates(
            &catalog,
            &one_acre(),
            &bucket(20_000.0, RiskTolerance::Balanced),
        );

        assert_eq!(ranking.recommended.len(), 3);
        assert_eq!(ranking.more_options.len(), 12);
    }
}
