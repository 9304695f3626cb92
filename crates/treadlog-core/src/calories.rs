//! Calorie estimate for a treadmill walk.
//!
//! Uses a single MET value tuned for a ~2.2 mph walk at 5-6% incline. The
//! estimate depends on body weight and duration only.

/// Metabolic equivalent used for every session.
pub const MET: f64 = 4.3;

/// Pounds in one kilogram.
pub const LBS_PER_KG: f64 = 2.20462;

/// Front rise, in inches, that corresponds to a 100% incline reading.
pub const FULL_INCLINE_RISE_INCHES: f64 = 48.0;

/// Estimate calories burned, rounded to 2 decimals.
///
/// `distance_miles` and `incline_percent` are accepted so callers pass the
/// whole session, but they do not change the result.
pub fn calculate_calories(
    weight_lbs: f64,
    _distance_miles: f64,
    duration_minutes: f64,
    _incline_percent: f64,
) -> f64 {
    let weight_kg = weight_lbs / LBS_PER_KG;
    let hours = duration_minutes / 60.0;
    round2(MET * weight_kg * hours)
}

/// Convert a front rise in inches to an incline percentage.
pub fn incline_percent(rise_inches: f64) -> f64 {
    (rise_inches / FULL_INCLINE_RISE_INCHES) * 100.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
