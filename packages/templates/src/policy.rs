//! Ranking policy: component weights, utilization bands, bonuses and
//! envelope defaults.

use site_feasibility_templates_models::RiskTolerance;

/// Weight of GFA fit in the final score.
pub const FIT_WEIGHT: f64 = 0.40;
/// Weight of utilization in the final score.
pub const UTILIZATION_WEIGHT: f64 = 0.30;
/// Weight of `100 - compliance penalty` in the final score.
pub const COMPLIANCE_WEIGHT: f64 = 0.30;

/// Footprint assumed for templates without a target.
pub const DEFAULT_FOOTPRINT_SQFT: f64 = 20_000.0;

/// Bonus for a conservative template under a safe program.
pub const SAFE_BONUS: f64 = 10.0;
/// Safe bonus applies below this utilization percent.
pub const SAFE_BONUS_MAX_UTILIZATION: f64 = 75.0;
/// Bonus for a maximizing template under an aggressive program.
pub const AGGRESSIVE_BONUS: f64 = 15.0;
/// Aggressive bonus applies above this utilization percent.
pub const AGGRESSIVE_BONUS_MIN_UTILIZATION: f64 = 85.0;

/// Size of the recommended shortlist.
pub const RECOMMENDED_COUNT: usize = 3;
/// Maximum size of the overflow list.
pub const MORE_OPTIONS_LIMIT: usize = 12;

/// FAR cap used when none is configured.
pub const DEFAULT_FAR_CAP: f64 = 0.75;
/// Height cap used when none is configured.
pub const DEFAULT_HEIGHT_CAP_FT: f64 = 55.0;
/// Coverage cap used when none is configured.
pub const DEFAULT_COVERAGE_CAP_PCT: f64 = 85.0;
/// Parcel size used when neither geometry nor acreage is usable.
pub const DEFAULT_PARCEL_ACRES: f64 = 1.0;
/// Share of the parcel assumed buildable when the buildable geometry is
/// unusable.
pub const FALLBACK_BUILDABLE_RATIO: f64 = 0.7;

/// Preferred utilization range for a risk tolerance. Inside the band
/// scores 100; outside, the score drops by `decay` per point of distance
/// from `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilizationBand {
    pub min: f64,
    pub max: f64,
    pub center: f64,
    pub decay: f64,
}

impl UtilizationBand {
    /// Whether `utilization_pct` is inside the band (inclusive).
    #[must_use]
    pub fn contains(&self, utilization_pct: f64) -> bool {
        (self.min..=self.max).contains(&utilization_pct)
    }
}

/// The preferred band for `risk`.
#[must_use]
pub const fn utilization_band(risk: RiskTolerance) -> UtilizationBand {
    match risk {
        RiskTolerance::Safe => UtilizationBand {
            min: 50.0,
            max: 70.0,
            center: 60.0,
            decay: 2.0,
        },
        RiskTolerance::Balanced => UtilizationBand {
            min: 70.0,
            max: 90.0,
            center: 80.0,
            decay: 2.0,
        },
        RiskTolerance::Aggressive => UtilizationBand {
            min: 85.0,
            max: 100.0,
            center: 92.5,
            decay: 1.5,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((FIT_WEIGHT + UTILIZATION_WEIGHT + COMPLIANCE_WEIGHT - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bands_are_centered() {
        for risk in [
            RiskTolerance::Safe,
            RiskTolerance::Balanced,
            RiskTolerance::Aggressive,
        ] {
            let band = utilization_band(risk);
            assert!(((band.min + band.max) / 2.0 - band.center).abs() < f64::EPSILON);
            assert!(band.contains(band.center));
        }
    }
}
