//! The four individual compliance checks.
//!
//! Each check is independent and always returns a [`ComplianceCheck`].
//! Inputs that cannot be evaluated (bad geometry, zero parcel area,
//! missing caps) produce a WARN with the value zeroed instead of a
//! `NaN` or an error.

use geo::Polygon;
use site_feasibility_compliance_models::{CheckId, ComplianceCheck, ComplianceStatus};
use site_feasibility_spatial::{
    multi_polygon_area_sq_ft, polygon_area_sq_ft, polygon_contains, polygon_difference,
};

use crate::policy;

/// Whether `footprint` lies entirely inside `envelope`.
///
/// Partial encroachment always fails; the current value is the whole
/// percent of the footprint that is still inside, and the part outside is
/// attached as the violation geometry.
#[must_use]
pub fn check_envelope_containment(
    footprint: &Polygon<f64>,
    envelope: &Polygon<f64>,
) -> ComplianceCheck {
    let id = CheckId::EnvelopeContainment;

    let contained = polygon_contains(envelope, footprint);
    if let Some(issue) = contained.issue {
        log::warn!("Envelope containment unverifiable: {issue}");
        return unverified(id, 100.0, "Unable to verify envelope containment");
    }

    if contained.value {
        return ComplianceCheck {
            id,
            name: id.name().to_string(),
            status: ComplianceStatus::Pass,
            current_value: 100.0,
            limit_value: 100.0,
            unit: id.unit(),
            utilization_pct: 100.0,
            message: "Design is fully within regulatory envelope".to_string(),
            violation_geometry: None,
        };
    }

    let outside = polygon_difference(footprint, envelope);
    let footprint_sqft = polygon_area_sq_ft(footprint);
    if let Some(issue) = outside.issue.or(footprint_sqft.issue) {
        log::warn!("Envelope overlap unmeasurable: {issue}");
        return unverified(id, 100.0, "Unable to verify envelope containment");
    }
    if footprint_sqft.value <= 0.0 {
        return unverified(id, 100.0, "Unable to verify envelope containment");
    }

    let outside_sqft = multi_polygon_area_sq_ft(&outside.value).value;
    let contained_pct =
        ((footprint_sqft.value - outside_sqft) / footprint_sqft.value * 100.0).round();
    // Rounding can leave -0.0 when nothing is inside.
    let contained_pct = if contained_pct <= 0.0 {
        0.0
    } else {
        contained_pct.min(100.0)
    };

    ComplianceCheck {
        id,
        name: id.name().to_string(),
        status: ComplianceStatus::Fail,
        current_value: contained_pct,
        limit_value: 100.0,
        unit: id.unit(),
        utilization_pct: contained_pct,
        message: format!(
            "Design extends outside regulatory envelope ({}% outside)",
            100.0 - contained_pct
        ),
        violation_geometry: (!outside.value.0.is_empty()).then_some(outside.value),
    }
}

/// Floor-area ratio of `footprint_sqft * floors` over `parcel_sqft`.
#[must_use]
pub fn check_far_limit(
    footprint_sqft: f64,
    floors: u32,
    parcel_sqft: f64,
    far_cap: f64,
) -> ComplianceCheck {
    let id = CheckId::FarLimit;
    if !is_usable_area(parcel_sqft) {
        return unverified(id, far_cap, "Unable to calculate FAR: parcel area unavailable");
    }
    if !is_usable_area(footprint_sqft) {
        return unverified(id, far_cap, "Unable to calculate FAR: footprint area unavailable");
    }
    if floors == 0 {
        return unverified(id, far_cap, "Unable to calculate FAR: no floors");
    }

    let far = footprint_sqft * f64::from(floors) / parcel_sqft;
    rate_against_cap(id, far, round_to(far, 2), far_cap, |status, pct| match status {
        ComplianceStatus::Fail => format!("FAR exceeds maximum ({far:.2} vs {far_cap} allowed)"),
        ComplianceStatus::Warn => format!("FAR at {pct}% of maximum ({far:.2} of {far_cap})"),
        ComplianceStatus::Pass => format!("FAR compliant ({far:.2} of {far_cap} max)"),
    })
}

/// Building height against the height cap.
#[must_use]
pub fn check_height_limit(height_ft: f64, height_cap_ft: f64) -> ComplianceCheck {
    let id = CheckId::HeightLimit;
    if !(height_ft.is_finite() && height_ft >= 0.0) {
        return unverified(id, height_cap_ft, "Unable to verify height");
    }

    rate_against_cap(id, height_ft, height_ft, height_cap_ft, |status, pct| match status {
        ComplianceStatus::Fail => {
            format!("Height exceeds maximum ({height_ft}' vs {height_cap_ft}' allowed)")
        }
        ComplianceStatus::Warn => {
            format!("Height at {pct}% of maximum ({height_ft}' of {height_cap_ft}')")
        }
        ComplianceStatus::Pass => format!("Height compliant ({height_ft}' of {height_cap_ft}' max)"),
    })
}

/// Footprint as a percent of parcel area against the coverage cap.
#[must_use]
pub fn check_coverage_limit(
    footprint_sqft: f64,
    parcel_sqft: f64,
    coverage_cap_pct: f64,
) -> ComplianceCheck {
    let id = CheckId::CoverageLimit;
    if !is_usable_area(parcel_sqft) {
        return unverified(
            id,
            coverage_cap_pct,
            "Unable to calculate coverage: parcel area unavailable",
        );
    }
    if !is_usable_area(footprint_sqft) {
        return unverified(
            id,
            coverage_cap_pct,
            "Unable to calculate coverage: footprint area unavailable",
        );
    }

    let coverage = footprint_sqft / parcel_sqft * 100.0;
    let cap = coverage_cap_pct;
    rate_against_cap(id, coverage, round_to(coverage, 1), cap, |status, pct| match status {
        ComplianceStatus::Fail => {
            format!("Coverage exceeds maximum ({coverage:.1}% vs {cap}% allowed)")
        }
        ComplianceStatus::Warn => format!("Coverage at {pct}% of maximum ({coverage:.1}%)"),
        ComplianceStatus::Pass => format!("Coverage compliant ({coverage:.1}% of {cap}% max)"),
    })
}

/// A WARN check for a value that could not be computed.
#[must_use]
pub fn unverified(id: CheckId, limit: f64, message: &str) -> ComplianceCheck {
    ComplianceCheck {
        id,
        name: id.name().to_string(),
        status: ComplianceStatus::Warn,
        current_value: 0.0,
        limit_value: finite_or_zero(limit),
        unit: id.unit(),
        utilization_pct: 0.0,
        message: message.to_string(),
        violation_geometry: None,
    }
}

/// Grades `current` against `cap`: FAIL above the cap, WARN at or above
/// [`policy::WARN_THRESHOLD_PCT`] of it, PASS otherwise. `message`
/// receives the status and the whole-percent utilization.
fn rate_against_cap(
    id: CheckId,
    current: f64,
    displayed: f64,
    cap: f64,
    message: impl FnOnce(ComplianceStatus, f64) -> String,
) -> ComplianceCheck {
    if !(cap.is_finite() && cap > 0.0) {
        log::warn!("{} cap unavailable: {cap}", id.name());
        return ComplianceCheck {
            current_value: displayed,
            ..unverified(id, cap, &format!("{} cap unavailable", cap_subject(id)))
        };
    }

    let utilization = current / cap * 100.0;
    let status = if current > cap {
        ComplianceStatus::Fail
    } else if utilization >= policy::WARN_THRESHOLD_PCT {
        ComplianceStatus::Warn
    } else {
        ComplianceStatus::Pass
    };
    let utilization_pct = utilization.round();

    ComplianceCheck {
        id,
        name: id.name().to_string(),
        status,
        current_value: displayed,
        limit_value: cap,
        unit: id.unit(),
        utilization_pct,
        message: message(status, utilization_pct),
        violation_geometry: None,
    }
}

const fn cap_subject(id: CheckId) -> &'static str {
    match id {
        CheckId::EnvelopeContainment => "Envelope",
        CheckId::FarLimit => "FAR",
        CheckId::HeightLimit => "Height",
        CheckId::CoverageLimit => "Coverage",
    }
}

fn is_usable_area(sqft: f64) -> bool {
    sqft.is_finite() && sqft > 0.0
}

const fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use geo::{LineString, Point};
    use site_feasibility_spatial::{SQ_FT_PER_ACRE, offset_feet, rectangle_around};

    use super::*;

    fn site() -> Point<f64> {
        Point::new(-95.3698, 29.7604)
    }

    #[test]
    fn far_pass_fail_and_warn() {
        let pass = check_far_limit(20_000.0, 1, SQ_FT_PER_ACRE, 0.75);
        assert_eq!(pass.status, ComplianceStatus::Pass);
        assert!((pass.current_value - 0.46).abs() < 1e-9);
        assert!((pass.utilization_pct - 61.0).abs() < f64::EPSILON);
        assert_eq!(pass.message, "FAR compliant (0.46 of 0.75 max)");

        let fail = check_far_limit(20_000.0, 2, SQ_FT_PER_ACRE, 0.75);
        assert_eq!(fail.status, ComplianceStatus::Fail);
        assert_eq!(fail.message, "FAR exceeds maximum (0.92 vs 0.75 allowed)");

        let warn = check_far_limit(15_000.0, 2, SQ_FT_PER_ACRE, 0.75);
        assert_eq!(warn.status, ComplianceStatus::Warn);
        assert_eq!(warn.message, "FAR at 92% of maximum (0.69 of 0.75)");
    }

    #[test]
    fn far_at_exactly_ninety_percent_warns() {
        let check = check_far_limit(450.0, 1, 1_000.0, 0.5);
        assert_eq!(check.status, ComplianceStatus::Warn);
        assert!((check.utilization_pct - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn height_thresholds() {
        let pass = check_height_limit(40.0, 45.0);
        assert_eq!(pass.status, ComplianceStatus::Pass);
        assert!((pass.utilization_pct - 89.0).abs() < f64::EPSILON);
        assert_eq!(pass.message, "Height compliant (40' of 45' max)");

        let warn = check_height_limit(41.0, 45.0);
        assert_eq!(warn.status, ComplianceStatus::Warn);
        assert_eq!(warn.message, "Height at 91% of maximum (41' of 45')");

        assert_eq!(check_height_limit(45.0, 45.0).status, ComplianceStatus::Warn);

        let fail = check_height_limit(50.5, 45.0);
        assert_eq!(fail.status, ComplianceStatus::Fail);
        assert_eq!(fail.message, "Height exceeds maximum (50.5' vs 45' allowed)");
    }

    #[test]
    fn coverage_rounds_to_one_decimal() {
        let check = check_coverage_limit(15_000.0, SQ_FT_PER_ACRE, 60.0);
        assert_eq!(check.status, ComplianceStatus::Pass);
        assert!((check.current_value - 34.4).abs() < 1e-9);
        assert_eq!(check.message, "Coverage compliant (34.4% of 60% max)");

        let fail = check_coverage_limit(30_000.0, SQ_FT_PER_ACRE, 60.0);
        assert_eq!(fail.status, ComplianceStatus::Fail);
        assert_eq!(fail.message, "Coverage exceeds maximum (68.9% vs 60% allowed)");
    }

    #[test]
    fn zero_parcel_warns_with_zero_value() {
        for check in [
            check_far_limit(10_000.0, 2, 0.0, 0.75),
            check_coverage_limit(10_000.0, 0.0, 60.0),
            check_coverage_limit(10_000.0, f64::NAN, 60.0),
        ] {
            assert_eq!(check.status, ComplianceStatus::Warn);
            assert!(check.current_value.abs() < f64::EPSILON);
            assert!(check.current_value.is_finite());
            assert!(check.utilization_pct.is_finite());
        }
    }

    #[test]
    fn missing_cap_warns() {
        let check = check_height_limit(40.0, 0.0);
        assert_eq!(check.status, ComplianceStatus::Warn);
        assert_eq!(check.message, "Height cap unavailable");
        assert!((check.current_value - 40.0).abs() < f64::EPSILON);

        let check = check_far_limit(10_000.0, 1, SQ_FT_PER_ACRE, f64::INFINITY);
        assert_eq!(check.status, ComplianceStatus::Warn);
        assert!(check.limit_value.abs() < f64::EPSILON);
    }

    #[test]
    fn contained_footprint_passes() {
        let envelope = rectangle_around(site(), 208.7, 208.7);
        let footprint = rectangle_around(site(), 100.0, 100.0);
        let check = check_envelope_containment(&footprint, &envelope);

        assert_eq!(check.status, ComplianceStatus::Pass);
        assert!((check.current_value - 100.0).abs() < f64::EPSILON);
        assert!(check.violation_geometry.is_none());
    }

    #[test]
    fn encroaching_footprint_fails_with_violation_geometry() {
        let envelope = rectangle_around(site(), 208.7, 208.7);
        // Top 10 ft of a 100 ft square pokes past the north edge.
        let footprint = rectangle_around(offset_feet(site(), 0.0, 64.35), 100.0, 100.0);
        let check = check_envelope_containment(&footprint, &envelope);

        assert_eq!(check.status, ComplianceStatus::Fail);
        assert!((check.current_value - 90.0).abs() < f64::EPSILON);
        assert_eq!(
            check.message,
            "Design extends outside regulatory envelope (10% outside)"
        );
        assert!(check.violation_geometry.is_some());
    }

    #[test]
    fn footprint_inside_envelope_hole_is_fully_outside() {
        let shell = rectangle_around(site(), 208.7, 208.7);
        let hole = rectangle_around(site(), 120.0, 120.0);
        let envelope = Polygon::new(shell.exterior().clone(), vec![hole.exterior().clone()]);
        let footprint = rectangle_around(site(), 50.0, 50.0);
        let check = check_envelope_containment(&footprint, &envelope);

        assert_eq!(check.status, ComplianceStatus::Fail);
        assert!(check.current_value.abs() < f64::EPSILON);
        assert!(check.current_value.is_sign_positive());
        assert!(check.utilization_pct.is_sign_positive());
        assert_eq!(
            check.message,
            "Design extends outside regulatory envelope (100% outside)"
        );
    }

    #[test]
    fn zero_floors_cannot_be_rated() {
        let check = check_far_limit(20_000.0, 0, SQ_FT_PER_ACRE, 0.75);
        assert_eq!(check.status, ComplianceStatus::Warn);
        assert_eq!(check.message, "Unable to calculate FAR: no floors");
        assert!(check.current_value.abs() < f64::EPSILON);
        assert!((check.limit_value - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn shrinking_never_turns_pass_into_fail() {
        let envelope = rectangle_around(site(), 208.7, 208.7);
        for side in [200.0, 150.0, 100.0, 50.0, 10.0] {
            let footprint = rectangle_around(site(), side, side);
            assert_eq!(
                check_envelope_containment(&footprint, &envelope).status,
                ComplianceStatus::Pass,
                "{side} ft square"
            );
        }
    }

    #[test]
    fn degenerate_footprint_warns() {
        let line = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 0.0)]),
            vec![],
        );
        let envelope = rectangle_around(site(), 208.7, 208.7);
        let check = check_envelope_containment(&line, &envelope);

        assert_eq!(check.status, ComplianceStatus::Warn);
        assert_eq!(check.message, "Unable to verify envelope containment");
        assert!(check.current_value.abs() < f64::EPSILON);
    }
}
