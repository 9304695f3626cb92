//! Treadmill session record and its CSV cell format.
//!
//! Every numeric cell carries its unit inside the cell (`180.0 lbs`), so a
//! row is written once with fixed precision and read back by taking the
//! first whitespace-separated token of each cell.

use crate::calories::{calculate_calories, incline_percent};

/// Header line of the session store.
pub const CSV_HEADER: &str = "Date,Weight,Duration,Distance,Calories,Front Raise (in)";

/// Date format used for stored dates and the blank-date default.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// One logged treadmill session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub date: String,
    pub weight_lbs: f64,
    pub duration_minutes: f64,
    pub distance_miles: f64,
    pub calories: f64,
    pub total_rise_inches: f64,
}

impl SessionRecord {
    /// Build a record from the entered values, computing the calorie estimate.
    pub fn new(
        date: impl Into<String>,
        weight_lbs: f64,
        duration_minutes: f64,
        distance_miles: f64,
        total_rise_inches: f64,
    ) -> Self {
        let incline = incline_percent(total_rise_inches);
        let calories = calculate_calories(weight_lbs, distance_miles, duration_minutes, incline);
        Self {
            date: date.into(),
            weight_lbs,
            duration_minutes,
            distance_miles,
            calories,
            total_rise_inches,
        }
    }

    /// Incline percentage derived from the front rise.
    pub fn incline_percent(&self) -> f64 {
        incline_percent(self.total_rise_inches)
    }

    /// Format as one CSV data row, without the trailing newline.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{:.1} lbs,{:.1} min,{:.2} mi,{:.0} cal,{:.1} in raise",
            self.date,
            self.weight_lbs,
            self.duration_minutes,
            self.distance_miles,
            self.calories,
            self.total_rise_inches,
        )
    }
}

/// Parse a `minutes:seconds` duration into fractional minutes.
///
/// Both parts must be integers; surrounding whitespace is ignored.
pub fn parse_duration(input: &str) -> Option<f64> {
    let mut parts = input.trim().split(':');
    let minutes: i64 = parts.next()?.trim().parse().ok()?;
    let seconds: i64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(minutes as f64 + seconds as f64 / 60.0)
}

/// Read the number at the front of a unit-suffixed cell (`"30.0 min"` -> 30.0).
pub fn leading_number(cell: &str) -> Option<f64> {
    cell.split_whitespace().next()?.parse().ok()
}
