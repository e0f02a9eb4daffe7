//! Feasibility policy: factor weights, scoring bands, kill-factor caps and
//! grade cutoffs. Changing any value here changes persisted scores.

use site_feasibility_feasibility_models::{Factor, Grade, KillFactor};

/// Default weight of a factor. The defaults sum to 1.
#[must_use]
pub const fn default_weight(factor: Factor) -> f64 {
    match factor {
        Factor::Flood | Factor::Utilities => 0.20,
        Factor::Soil | Factor::Environmental => 0.15,
        Factor::Traffic | Factor::Zoning | Factor::Topography => 0.10,
    }
}

/// Score for any factor without usable input, except topography.
pub const NEUTRAL_SCORE: f64 = 50.0;
/// Score for topography without usable input.
pub const NEUTRAL_TOPOGRAPHY_SCORE: f64 = 70.0;

/// Flood zones with minimal hazard.
pub const MINIMAL_FLOOD_ZONES: &[&str] = &["X", "X500"];
pub const MINIMAL_FLOOD_SCORE: f64 = 100.0;
/// `AE` with the ground above base flood elevation.
pub const ELEVATED_AE_SCORE: f64 = 70.0;
pub const AE_SCORE: f64 = 40.0;
/// Other special flood hazard areas without a coastal component.
pub const SPECIAL_HAZARD_FLOOD_ZONES: &[&str] = &["A", "AO", "AH"];
pub const SPECIAL_HAZARD_FLOOD_SCORE: f64 = 35.0;
/// Coastal high hazard areas.
pub const COASTAL_FLOOD_ZONES: &[&str] = &["VE", "V"];
pub const COASTAL_FLOOD_SCORE: f64 = 10.0;
/// Any other published zone.
pub const OTHER_FLOOD_SCORE: f64 = 50.0;

pub const FAVORABLE_SOIL_SCORE: f64 = 100.0;
pub const MODERATE_SOIL_SCORE: f64 = 60.0;
pub const SEVERE_SOIL_SCORE: f64 = 20.0;

/// Distance assumed for a utility line that was not located.
pub const MISSING_UTILITY_DISTANCE_FT: f64 = 5_000.0;
/// `(max average distance in feet, score)`, nearest band first.
pub const UTILITY_DISTANCE_BANDS: [(f64, f64); 5] = [
    (150.0, 100.0),
    (300.0, 90.0),
    (500.0, 80.0),
    (1_000.0, 60.0),
    (2_000.0, 40.0),
];
/// Score beyond the last utility band.
pub const REMOTE_UTILITY_SCORE: f64 = 20.0;

/// Largest deduction wetlands can cause.
pub const MAX_WETLAND_DEDUCTION: f64 = 50.0;
pub const HIGH_EPA_DEDUCTION: f64 = 30.0;
pub const MODERATE_EPA_DEDUCTION: f64 = 15.0;

/// `(min AADT, score)`, busiest band first.
pub const TRAFFIC_AADT_BANDS: [(u64, f64); 5] = [
    (50_000, 100.0),
    (30_000, 90.0),
    (20_000, 80.0),
    (10_000, 70.0),
    (5_000, 60.0),
];
/// Base score below the last traffic band.
pub const LOW_TRAFFIC_BASE_SCORE: f64 = 40.0;
/// Below the last band, each this many vehicles add one point.
pub const LOW_TRAFFIC_AADT_PER_POINT: f64 = 250.0;
/// Cap on the points added below the last band.
pub const LOW_TRAFFIC_MAX_BONUS: f64 = 20.0;

/// `(code fragments, score)`, checked in order against the uppercased
/// zoning code; the first class with a matching fragment wins.
pub const ZONING_CLASSES: [(&[&str], f64); 4] = [
    (&["C-", "COMMERCIAL", "MU"], 100.0),
    (&["I-", "INDUSTRIAL"], 90.0),
    (&["R-", "RESIDENTIAL"], 50.0),
    (&["AG", "AGRICULTURAL"], 30.0),
];
/// Score for a zoning code outside every class.
pub const OTHER_ZONING_SCORE: f64 = 60.0;

/// `(max slope percent, score)`, flattest band first.
pub const SLOPE_BANDS: [(f64, f64); 4] = [(2.0, 100.0), (5.0, 85.0), (10.0, 70.0), (15.0, 50.0)];
/// Score beyond the last slope band.
pub const STEEP_SLOPE_SCORE: f64 = 30.0;

/// Wetland coverage at which the whole parcel counts as wetland.
pub const WETLAND_KILL_PCT: f64 = 95.0;
/// Both utilities farther than this (2 km) trigger [`KillFactor::NoUtilities`].
pub const NO_UTILITIES_DISTANCE_FT: f64 = 6_561.68;
/// Facility types containing this (case-insensitive) are Superfund sites.
pub const SUPERFUND_MARKER: &str = "superfund";

/// Highest overall score a site with `factor` can get.
#[must_use]
pub const fn kill_factor_cap(factor: KillFactor) -> f64 {
    match factor {
        KillFactor::FloodVe | KillFactor::EpaSuperfund => 20.0,
        KillFactor::WetlandFullParcel => 15.0,
        KillFactor::NoUtilities => 50.0,
        KillFactor::ShrinkSwellHigh => 60.0,
    }
}

/// `(min score, grade)`, best grade first. Anything lower is an F.
pub const GRADE_CUTOFFS: [(f64, Grade); 4] = [
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
    (50.0, Grade::D),
];
