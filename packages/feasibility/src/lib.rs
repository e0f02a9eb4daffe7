#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Multi-factor feasibility score.
//!
//! Seven factors (flood, soil, utilities, environmental, traffic, zoning,
//! topography) are each scored 0-100 from [`SiteConditions`], weighted,
//! summed and capped by any triggered [`KillFactor`]. Missing inputs
//! score neutral and lower the confidence level instead of failing.

pub mod policy;

pub use site_feasibility_feasibility_models as models;

use site_feasibility_feasibility_models::{
    ComponentScore, EpaRisk, Factor, FactorWeights, FeasibilityScore, Grade, KillFactor,
    SiteConditions, SoilBuildability,
};
use site_feasibility_geospatial_models::GeospatialScoreRecord;

/// Scores a site with the default weights, overridden by `weights`.
///
/// Overrides that are negative or not finite are ignored.
#[must_use]
pub fn score_feasibility(conditions: &SiteConditions, weights: &FactorWeights) -> FeasibilityScore {
    let components: Vec<ComponentScore> = Factor::ALL
        .iter()
        .map(|&factor| {
            let (score, measured) = match factor_score(factor, conditions) {
                Some(score) => (score, true),
                None => (neutral_score(factor), false),
            };
            let weight = weight_for(factor, weights);
            ComponentScore {
                factor,
                score,
                weight,
                weighted: round_to(score * weight, 2),
                measured,
            }
        })
        .collect();

    let weighted_total: f64 = components.iter().map(|c| c.weighted).sum();
    let kill_factors = detect_kill_factors(conditions);
    let capped = kill_factors
        .iter()
        .map(|&factor| policy::kill_factor_cap(factor))
        .fold(weighted_total, f64::min);
    let overall_score = capped.clamp(0.0, 100.0).round();

    #[allow(clippy::cast_precision_loss)]
    let confidence_level = round_to(
        components.iter().filter(|c| c.measured).count() as f64 / components.len() as f64,
        2,
    );

    log::debug!(
        "Feasibility {overall_score} (weighted {weighted_total:.2}), kill factors {kill_factors:?}"
    );

    FeasibilityScore {
        overall_score,
        grade: grade_for(overall_score),
        components,
        kill_factors,
        confidence_level,
    }
}

/// Fills the flood zone and traffic count from a geospatial score where
/// the host did not supply them.
#[must_use]
pub fn with_geospatial(
    mut conditions: SiteConditions,
    record: &GeospatialScoreRecord,
) -> SiteConditions {
    if conditions.flood_zone.is_none() {
        conditions.flood_zone = record.flood_zone_code().map(str::to_string);
    }
    if conditions.traffic_aadt.is_none() {
        conditions.traffic_aadt = record.traffic_segment.as_ref().map(|segment| segment.aadt);
    }
    conditions
}

/// Component score for `factor`, or `None` when its inputs are missing.
#[must_use]
pub fn factor_score(factor: Factor, conditions: &SiteConditions) -> Option<f64> {
    match factor {
        Factor::Flood => flood_score(
            conditions.flood_zone.as_deref(),
            base_flood_elevation_delta(conditions),
        ),
        Factor::Soil => soil_score(conditions.soil_buildability.as_deref()),
        Factor::Utilities => utilities_score(
            conditions.water_line_distance_ft,
            conditions.sewer_line_distance_ft,
        ),
        Factor::Environmental => {
            environmental_score(conditions.wetlands_pct, conditions.epa_risk.as_deref())
        }
        Factor::Traffic => traffic_score(conditions.traffic_aadt),
        Factor::Zoning => zoning_score(conditions.zoning_code.as_deref()),
        Factor::Topography => topography_score(conditions.slope_pct),
    }
}

/// Score used when a factor has no usable input.
#[must_use]
pub const fn neutral_score(factor: Factor) -> f64 {
    match factor {
        Factor::Topography => policy::NEUTRAL_TOPOGRAPHY_SCORE,
        _ => policy::NEUTRAL_SCORE,
    }
}

/// Flood zone score. An `AE` site whose ground sits above base flood
/// elevation (`bfe_delta_ft > 0`) scores better than other `AE` sites.
#[must_use]
pub fn flood_score(zone: Option<&str>, bfe_delta_ft: Option<f64>) -> Option<f64> {
    let zone = non_blank(zone)?.to_ascii_uppercase();
    let zone = zone.as_str();

    Some(if policy::MINIMAL_FLOOD_ZONES.contains(&zone) {
        policy::MINIMAL_FLOOD_SCORE
    } else if zone == "AE" {
        if bfe_delta_ft.is_some_and(|delta| delta > 0.0) {
            policy::ELEVATED_AE_SCORE
        } else {
            policy::AE_SCORE
        }
    } else if policy::SPECIAL_HAZARD_FLOOD_ZONES.contains(&zone) {
        policy::SPECIAL_HAZARD_FLOOD_SCORE
    } else if policy::COASTAL_FLOOD_ZONES.contains(&zone) {
        policy::COASTAL_FLOOD_SCORE
    } else {
        policy::OTHER_FLOOD_SCORE
    })
}

/// Unrecognized ratings count as missing.
#[must_use]
pub fn soil_score(buildability: Option<&str>) -> Option<f64> {
    let rating = non_blank(buildability)?;
    match rating.parse::<SoilBuildability>() {
        Ok(SoilBuildability::Favorable) => Some(policy::FAVORABLE_SOIL_SCORE),
        Ok(SoilBuildability::Moderate) => Some(policy::MODERATE_SOIL_SCORE),
        Ok(SoilBuildability::Severe) => Some(policy::SEVERE_SOIL_SCORE),
        Err(_) => {
            log::debug!("Unrecognized soil rating {rating:?}");
            None
        }
    }
}

/// Banded by the average of the water and sewer distances. A line that
/// was not located counts as [`policy::MISSING_UTILITY_DISTANCE_FT`] away;
/// with neither located the factor is missing.
#[must_use]
pub fn utilities_score(water_ft: Option<f64>, sewer_ft: Option<f64>) -> Option<f64> {
    let water = usable_distance(water_ft);
    let sewer = usable_distance(sewer_ft);
    if water.is_none() && sewer.is_none() {
        return None;
    }

    let average = (water.unwrap_or(policy::MISSING_UTILITY_DISTANCE_FT)
        + sewer.unwrap_or(policy::MISSING_UTILITY_DISTANCE_FT))
        / 2.0;
    Some(
        policy::UTILITY_DISTANCE_BANDS
            .iter()
            .find(|(max_ft, _)| average <= *max_ft)
            .map_or(policy::REMOTE_UTILITY_SCORE, |(_, score)| *score),
    )
}

/// 100 less wetland coverage (up to [`policy::MAX_WETLAND_DEDUCTION`])
/// less the EPA risk deduction, floored at 0.
#[must_use]
pub fn environmental_score(wetlands_pct: Option<f64>, epa_risk: Option<&str>) -> Option<f64> {
    let wetlands = wetlands_pct.filter(|pct| pct.is_finite() && *pct >= 0.0);
    let risk = non_blank(epa_risk).and_then(|risk| risk.parse::<EpaRisk>().ok());
    if wetlands.is_none() && risk.is_none() {
        return None;
    }

    let wetland_deduction = wetlands.map_or(0.0, |pct| pct.min(policy::MAX_WETLAND_DEDUCTION));
    let risk_deduction = match risk {
        Some(EpaRisk::High) => policy::HIGH_EPA_DEDUCTION,
        Some(EpaRisk::Moderate) => policy::MODERATE_EPA_DEDUCTION,
        Some(EpaRisk::Low) | None => 0.0,
    };
    Some((100.0 - wetland_deduction - risk_deduction).max(0.0))
}

/// Banded by AADT. A zero count is treated as no count.
#[must_use]
pub fn traffic_score(aadt: Option<u64>) -> Option<f64> {
    let aadt = aadt.filter(|aadt| *aadt > 0)?;
    Some(
        policy::TRAFFIC_AADT_BANDS
            .iter()
            .find(|(min_aadt, _)| aadt >= *min_aadt)
            .map_or_else(
                || {
                    #[allow(clippy::cast_precision_loss)]
                    let bonus = aadt as f64 / policy::LOW_TRAFFIC_AADT_PER_POINT;
                    policy::LOW_TRAFFIC_BASE_SCORE + bonus.min(policy::LOW_TRAFFIC_MAX_BONUS)
                },
                |(_, score)| *score,
            ),
    )
}

/// Classifies the zoning code by the fragments in
/// [`policy::ZONING_CLASSES`].
#[must_use]
pub fn zoning_score(code: Option<&str>) -> Option<f64> {
    let code = non_blank(code)?.to_ascii_uppercase();
    Some(
        policy::ZONING_CLASSES
            .iter()
            .find(|(fragments, _)| fragments.iter().any(|f| code.contains(f)))
            .map_or(policy::OTHER_ZONING_SCORE, |(_, score)| *score),
    )
}

/// Banded by average slope. Flat ground (0%) is the best band.
#[must_use]
pub fn topography_score(slope_pct: Option<f64>) -> Option<f64> {
    let slope = slope_pct.filter(|slope| slope.is_finite() && *slope >= 0.0)?;
    Some(
        policy::SLOPE_BANDS
            .iter()
            .find(|(max_slope, _)| slope <= *max_slope)
            .map_or(policy::STEEP_SLOPE_SCORE, |(_, score)| *score),
    )
}

/// Every kill factor the conditions trigger, in [`KillFactor`] order.
#[must_use]
pub fn detect_kill_factors(conditions: &SiteConditions) -> Vec<KillFactor> {
    let is_coastal = non_blank(conditions.flood_zone.as_deref())
        .is_some_and(|zone| zone.eq_ignore_ascii_case("VE"));
    let is_wetland = conditions
        .wetlands_pct
        .is_some_and(|pct| pct >= policy::WETLAND_KILL_PCT);
    let is_superfund = conditions
        .nearest_facility_type
        .as_deref()
        .is_some_and(|kind| kind.to_ascii_lowercase().contains(policy::SUPERFUND_MARKER));
    let no_utilities = matches!(
        (
            usable_distance(conditions.water_line_distance_ft),
            usable_distance(conditions.sewer_line_distance_ft),
        ),
        (Some(water), Some(sewer)) if water.min(sewer) > policy::NO_UTILITIES_DISTANCE_FT
    );
    let expansive_soil = non_blank(conditions.shrink_swell_potential.as_deref())
        .is_some_and(|potential| potential.eq_ignore_ascii_case("high"));

    [
        (is_coastal, KillFactor::FloodVe),
        (is_wetland, KillFactor::WetlandFullParcel),
        (is_superfund, KillFactor::EpaSuperfund),
        (no_utilities, KillFactor::NoUtilities),
        (expansive_soil, KillFactor::ShrinkSwellHigh),
    ]
    .into_iter()
    .filter_map(|(triggered, factor)| triggered.then_some(factor))
    .collect()
}

/// Letter grade for an overall score.
#[must_use]
pub fn grade_for(score: f64) -> Grade {
    policy::GRADE_CUTOFFS
        .iter()
        .find(|(min, _)| score >= *min)
        .map_or(Grade::F, |(_, grade)| *grade)
}

fn weight_for(factor: Factor, weights: &FactorWeights) -> f64 {
    match weights.get(factor) {
        Some(weight) if weight.is_finite() && weight >= 0.0 => weight,
        Some(weight) => {
            log::warn!("Ignoring {factor} weight {weight}");
            policy::default_weight(factor)
        }
        None => policy::default_weight(factor),
    }
}

fn base_flood_elevation_delta(conditions: &SiteConditions) -> Option<f64> {
    let delta = conditions.elevation_ft? - conditions.base_flood_elevation_ft?;
    delta.is_finite().then_some(delta)
}

fn usable_distance(distance_ft: Option<f64>) -> Option<f64> {
    distance_ft.filter(|d| d.is_finite() && *d >= 0.0)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
