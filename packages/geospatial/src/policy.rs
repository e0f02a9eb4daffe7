//! Scoring policy. Changing any value here changes persisted scores.

/// Jurisdiction confidence when a boundary contains the point.
pub const MATCHED_JURISDICTION_CONFIDENCE: f64 = 0.99;
/// Jurisdiction confidence when no boundary contains the point.
pub const UNMATCHED_JURISDICTION_CONFIDENCE: f64 = 0.5;

/// Composite weight of jurisdiction confidence.
pub const JURISDICTION_WEIGHT: f64 = 10.0;
/// Composite weight of inverted flood risk.
pub const FLOOD_WEIGHT: f64 = 40.0;
/// Composite weight of traffic visibility.
pub const TRAFFIC_WEIGHT: f64 = 50.0;

/// Special flood hazard area designations.
pub const HIGH_RISK_FLOOD_CODES: &[&str] = &["AE", "VE", "A", "AO", "AH"];
/// Minimal-hazard designation.
pub const MINIMAL_RISK_FLOOD_CODE: &str = "X";
/// Prefix of the FEMA 0.2% annual chance (500-year) designation.
pub const MINIMAL_RISK_FLOOD_PREFIX: &str = "0.2 PCT ANNUAL CHANCE";

/// Risk for a special flood hazard area.
pub const HIGH_FLOOD_RISK: f64 = 0.8;
/// Risk for a minimal-hazard zone.
pub const MINIMAL_FLOOD_RISK: f64 = 0.2;
/// Risk for any other matched zone.
pub const MODERATE_FLOOD_RISK: f64 = 0.5;
/// Risk when no zone contains the point. Sparse coverage is not penalized.
pub const NO_ZONE_FLOOD_RISK: f64 = 0.0;

/// Segments must be strictly closer than this to count.
pub const TRAFFIC_RADIUS_FT: f64 = 5_000.0;
/// AADT at which visibility saturates at 1.0.
pub const AADT_SATURATION: f64 = 100_000.0;

/// Indices above this read as high/excellent in notes.
pub const NOTES_HIGH_THRESHOLD: f64 = 0.7;
/// Indices above this read as moderate in notes.
pub const NOTES_MODERATE_THRESHOLD: f64 = 0.3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one_hundred() {
        assert!((JURISDICTION_WEIGHT + FLOOD_WEIGHT + TRAFFIC_WEIGHT - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pinned_values() {
        assert!((TRAFFIC_RADIUS_FT - 5_000.0).abs() < f64::EPSILON);
        assert!((AADT_SATURATION - 100_000.0).abs() < f64::EPSILON);
        assert_eq!(HIGH_RISK_FLOOD_CODES.len(), 5);
    }
}
