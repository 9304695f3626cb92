//! Records report over the most recent sessions.
//!
//! Reads the store back, keeps the newest `history_window` rows, and prints
//! the rows themselves, running totals, and a short trend comparing the
//! first and last of the newest `trend_window` rows.
//!
//! A missing store is returned to the caller. Anything that goes wrong after
//! that (unreadable file, short rows, cells without a number, no rows at
//! all) is printed as a warning and is not an error.

use std::io::Write;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ReportError, Result};
use crate::session::leading_number;
use crate::settings::Settings;
use crate::storage::{read_rows, StoredRow};

/// Cells the report reads from each row: date, weight, duration, distance, calories.
const REPORTED_CELLS: usize = 5;

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Direction of a change between two sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Up
        } else if delta < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "⬆️",
            Direction::Down => "⬇️",
            Direction::Flat => "➡️",
        }
    }
}

/// Signed change of one metric across the trend window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Change {
    pub delta: f64,
    pub direction: Direction,
}

impl Change {
    fn across(values: &[f64]) -> Self {
        let delta = match (values.first(), values.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        };
        Self {
            delta,
            direction: Direction::of(delta),
        }
    }
}

/// Totals and averages over the reported rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_duration_minutes: f64,
    pub total_distance_miles: f64,
    pub total_calories: f64,
    pub average_weight_lbs: f64,
    /// Date, weight, duration, distance and calories cells of the newest row
    pub most_recent: Vec<String>,
}

/// First-to-last changes over the newest few rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub sessions: usize,
    pub weight: Change,
    pub calories: Change,
    pub duration: Change,
    pub distance: Change,
}

/// Full report over the newest rows of the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub sessions: Vec<StoredRow>,
    pub summary: Summary,
    pub trend: Trend,
}

/// Numeric columns read out of one row.
struct Metrics {
    weight: f64,
    duration: f64,
    distance: f64,
    calories: f64,
}

impl Metrics {
    fn from_row(index: usize, row: &StoredRow) -> Result<Self, ReportError> {
        if row.len() < REPORTED_CELLS {
            return Err(ReportError::ShortRow {
                row: index + 1,
                found: row.len(),
                expected: REPORTED_CELLS,
            });
        }
        let number = |cell: usize, column: &'static str| {
            leading_number(&row[cell]).ok_or_else(|| ReportError::BadNumber {
                row: index + 1,
                column,
                value: row[cell].clone(),
            })
        };
        Ok(Self {
            weight: number(1, "weight")?,
            duration: number(2, "duration")?,
            distance: number(3, "distance")?,
            calories: number(4, "calories")?,
        })
    }
}

/// Keep the newest `window` rows, oldest first.
pub fn recent_rows(mut rows: Vec<StoredRow>, window: usize) -> Vec<StoredRow> {
    let skip = rows.len().saturating_sub(window);
    rows.drain(..skip);
    rows
}

/// Aggregate already-windowed rows.
///
/// # Errors
/// Returns an error if there are no rows, a row is too short, or a cell has
/// no leading number.
pub fn build_report(rows: Vec<StoredRow>, trend_window: usize) -> Result<Report, ReportError> {
    let metrics = rows
        .iter()
        .enumerate()
        .map(|(index, row)| Metrics::from_row(index, row))
        .collect::<Result<Vec<_>, _>>()?;
    summarize(rows, &metrics, trend_window)
}

/// Totals and trend over rows whose metrics have already been read.
fn summarize(
    rows: Vec<StoredRow>,
    metrics: &[Metrics],
    trend_window: usize,
) -> Result<Report, ReportError> {
    let newest = rows.last().ok_or(ReportError::Empty)?;

    let weights: Vec<f64> = metrics.iter().map(|m| m.weight).collect();
    let durations: Vec<f64> = metrics.iter().map(|m| m.duration).collect();
    let distances: Vec<f64> = metrics.iter().map(|m| m.distance).collect();
    let calories: Vec<f64> = metrics.iter().map(|m| m.calories).collect();

    let summary = Summary {
        total_duration_minutes: durations.iter().sum(),
        total_distance_miles: distances.iter().sum(),
        total_calories: calories.iter().sum(),
        average_weight_lbs: weights.iter().sum::<f64>() / weights.len() as f64,
        most_recent: newest[..REPORTED_CELLS].to_vec(),
    };

    let start = metrics.len().saturating_sub(trend_window);
    let trend = Trend {
        sessions: metrics.len() - start,
        weight: Change::across(&weights[start..]),
        calories: Change::across(&calories[start..]),
        duration: Change::across(&durations[start..]),
        distance: Change::across(&distances[start..]),
    };

    Ok(Report {
        sessions: rows,
        summary,
        trend,
    })
}

/// Print the records report for the store named in `settings`.
///
/// # Errors
/// Returns [`StoreError::Missing`](crate::error::StoreError::Missing) when
/// there is no store yet, or an IO error if `out` cannot be written.
pub fn print_records<W: Write>(
    settings: &Settings,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let rows = match read_rows(&settings.store_path) {
        Ok(rows) => rows,
        Err(e) if e.is_missing() => return Err(e.into()),
        Err(e) => {
            warn!(error = %e, "could not read session store");
            if format == OutputFormat::Text {
                writeln!(out, "\n📋 Last {} Sessions:", settings.history_window)?;
            }
            writeln!(out, "⚠️ Error reading records: {e}")?;
            return Ok(());
        }
    };

    let rows = recent_rows(rows, settings.history_window);
    debug!(rows = rows.len(), "building report");

    match format {
        OutputFormat::Text => {
            writeln!(out, "\n📋 Last {} Sessions:", settings.history_window)?;
            // each row is listed before it is read, so a bad row is the last one shown
            let mut metrics = Vec::with_capacity(rows.len());
            for (index, row) in rows.iter().enumerate() {
                writeln!(out, "{}", row.join(", "))?;
                match Metrics::from_row(index, row) {
                    Ok(row_metrics) => metrics.push(row_metrics),
                    Err(e) => return warn_malformed(&e, out),
                }
            }
            match summarize(rows, &metrics, settings.trend_window) {
                Ok(report) => write_text(&report, settings.trend_window, out)?,
                Err(e) => warn_malformed(&e, out)?,
            }
        }
        OutputFormat::Json => match build_report(rows, settings.trend_window) {
            Ok(report) => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
            Err(e) => warn_malformed(&e, out)?,
        },
    }
    Ok(())
}

fn warn_malformed<W: Write>(error: &ReportError, out: &mut W) -> Result<()> {
    warn!(%error, "malformed session store");
    writeln!(out, "⚠️ Error reading records: {error}")?;
    Ok(())
}

fn write_text<W: Write>(report: &Report, trend_window: usize, out: &mut W) -> Result<()> {
    let summary = &report.summary;
    writeln!(out, "\n📊 Summary:")?;
    writeln!(out, "Total Time: {:.1} min", summary.total_duration_minutes)?;
    writeln!(out, "Total Distance: {:.2} mi", summary.total_distance_miles)?;
    writeln!(out, "Total Calories: {:.0} cal", summary.total_calories)?;
    writeln!(out, "Average Weight: {:.1} lbs", summary.average_weight_lbs)?;
    writeln!(out, "Most Recent: {}", summary.most_recent.join(", "))?;

    let trend = &report.trend;
    writeln!(out, "\n📈 Trend (Last {trend_window} Sessions):")?;
    writeln!(
        out,
        "Weight change: {:+.1} lbs {}",
        trend.weight.delta,
        trend.weight.direction.arrow()
    )?;
    writeln!(
        out,
        "Calorie change: {:+.0} cal {}",
        trend.calories.delta,
        trend.calories.direction.arrow()
    )?;
    writeln!(
        out,
        "Treadmill time change: {:+.1} min {}",
        trend.duration.delta,
        trend.duration.direction.arrow()
    )?;
    writeln!(
        out,
        "Distance change: {:+.2} mi {}",
        trend.distance.delta,
        trend.distance.direction.arrow()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, StoreError};
    use crate::session::SessionRecord;
    use crate::storage::CsvStore;
    use std::fs;
    use tempfile::TempDir;

    fn row(cells: &[&str]) -> StoredRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn session_row(day: usize, weight: f64, minutes: f64, miles: f64) -> StoredRow {
        let record = SessionRecord::new(format!("{day:02}-01-2026"), weight, minutes, miles, 0.0);
        record.to_csv_row().split(',').map(str::to_string).collect()
    }

    fn report_text(settings: &Settings) -> String {
        let mut out = Vec::new();
        print_records(settings, OutputFormat::Text, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_recent_rows_keeps_newest() {
        let rows: Vec<StoredRow> = (0..25).map(|i| row(&[&i.to_string()])).collect();
        let recent = recent_rows(rows, 20);
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0][0], "5");
        assert_eq!(recent[19][0], "24");
    }

    #[test]
    fn test_recent_rows_fewer_than_window() {
        let rows = vec![row(&["a"]), row(&["b"])];
        assert_eq!(recent_rows(rows.clone(), 20), rows);
    }

    #[test]
    fn test_summary_totals() {
        let rows = vec![
            row(&["01-01-2026", "180.0 lbs", "30.0 min", "1.25 mi", "176 cal", "0.0 in raise"]),
            row(&["02-01-2026", "178.0 lbs", "25.5 min", "1.10 mi", "148 cal", "1.0 in raise"]),
        ];
        let report = build_report(rows, 5).unwrap();

        assert_eq!(report.summary.total_duration_minutes, 55.5);
        assert!((report.summary.total_distance_miles - 2.35).abs() < 1e-9);
        assert_eq!(report.summary.total_calories, 324.0);
        assert_eq!(report.summary.average_weight_lbs, 179.0);
        assert_eq!(
            report.summary.most_recent,
            vec!["02-01-2026", "178.0 lbs", "25.5 min", "1.10 mi", "148 cal"]
        );
    }

    #[test]
    fn test_single_row_trend_is_flat() {
        let report = build_report(vec![session_row(1, 180.0, 30.0, 1.25)], 5).unwrap();

        assert_eq!(report.trend.sessions, 1);
        for change in [
            report.trend.weight,
            report.trend.calories,
            report.trend.duration,
            report.trend.distance,
        ] {
            assert_eq!(change.delta, 0.0);
            assert_eq!(change.direction, Direction::Flat);
        }
    }

    #[test]
    fn test_trend_uses_last_five_rows() {
        let rows: Vec<StoredRow> = (1..=8)
            .map(|i| session_row(i, 190.0 - i as f64, 20.0 + i as f64, 1.0))
            .collect();
        let report = build_report(rows, 5).unwrap();

        assert_eq!(report.trend.sessions, 5);
        // rows 4..=8: weight 186 -> 182, duration 24 -> 28
        assert_eq!(report.trend.weight.delta, -4.0);
        assert_eq!(report.trend.weight.direction, Direction::Down);
        assert_eq!(report.trend.duration.delta, 4.0);
        assert_eq!(report.trend.duration.direction, Direction::Up);
        assert_eq!(report.trend.distance.direction, Direction::Flat);
    }

    #[test]
    fn test_empty_rows_is_an_error() {
        assert!(matches!(build_report(Vec::new(), 5), Err(ReportError::Empty)));
    }

    #[test]
    fn test_short_row_is_an_error() {
        let rows = vec![row(&["01-01-2026", "180.0 lbs", "30.0 min"])];
        assert!(matches!(
            build_report(rows, 5),
            Err(ReportError::ShortRow { row: 1, found: 3, .. })
        ));
    }

    #[test]
    fn test_non_numeric_cell_is_an_error() {
        let rows = vec![
            session_row(1, 180.0, 30.0, 1.0),
            row(&["02-01-2026", "heavy", "30.0 min", "1.00 mi", "176 cal", "0.0 in raise"]),
        ];
        assert!(matches!(
            build_report(rows, 5),
            Err(ReportError::BadNumber { row: 2, column: "weight", .. })
        ));
    }

    #[test]
    fn test_print_records_missing_store() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::with_store_path(dir.path().join("treadmill_log.csv"));
        let mut out = Vec::new();

        let result = print_records(&settings, OutputFormat::Text, &mut out);

        assert!(matches!(result, Err(CoreError::Store(StoreError::Missing { .. }))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_print_records_text() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::with_store_path(dir.path().join("treadmill_log.csv"));
        let mut store = CsvStore::open(&settings.store_path);
        store.append(&SessionRecord::new("01-01-2026", 180.0, 30.0, 1.25, 0.0)).unwrap();
        store.append(&SessionRecord::new("02-01-2026", 179.0, 32.0, 1.40, 2.0)).unwrap();

        let text = report_text(&settings);

        assert!(text.contains("📋 Last 20 Sessions:"));
        assert!(text.contains("01-01-2026, 180.0 lbs, 30.0 min, 1.25 mi, 176 cal, 0.0 in raise\n"));
        assert!(text.contains("Total Time: 62.0 min\n"));
        assert!(text.contains("Total Distance: 2.65 mi\n"));
        assert!(text.contains("Average Weight: 179.5 lbs\n"));
        assert!(text.contains("Most Recent: 02-01-2026, 179.0 lbs, 32.0 min, 1.40 mi, "));
        assert!(text.contains("📈 Trend (Last 5 Sessions):"));
        assert!(text.contains("Weight change: -1.0 lbs ⬇️\n"));
        assert!(text.contains("Treadmill time change: +2.0 min ⬆️\n"));
        assert!(text.contains("Distance change: +0.15 mi ⬆️\n"));
        assert!(!text.contains("Error reading records"));
    }

    #[test]
    fn test_print_records_only_last_twenty() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::with_store_path(dir.path().join("treadmill_log.csv"));
        let mut store = CsvStore::open(&settings.store_path);
        for day in 1..=25 {
            // the five oldest sessions are much longer and must not count
            let minutes = if day <= 5 { 100.0 } else { 10.0 };
            store
                .append(&SessionRecord::new(format!("{day:02}-01-2026"), 180.0, minutes, 1.0, 0.0))
                .unwrap();
        }

        let text = report_text(&settings);

        assert!(!text.contains("05-01-2026, "));
        assert!(text.contains("06-01-2026, "));
        assert!(text.contains("25-01-2026, "));
        assert!(text.contains("Total Time: 200.0 min\n"));
        assert!(text.contains("Total Distance: 20.00 mi\n"));
    }

    #[test]
    fn test_print_records_header_only_warns() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::with_store_path(dir.path().join("treadmill_log.csv"));
        fs::write(&settings.store_path, "Date,Weight,Duration,Distance,Calories,Front Raise (in)\n")
            .unwrap();

        let text = report_text(&settings);

        assert!(text.contains("⚠️ Error reading records: no sessions recorded"));
        assert!(!text.contains("Summary"));
    }

    #[test]
    fn test_print_records_malformed_row_warns() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::with_store_path(dir.path().join("treadmill_log.csv"));
        fs::write(
            &settings.store_path,
            "Date,Weight,Duration,Distance,Calories,Front Raise (in)\n01-01-2026,oops\n",
        )
        .unwrap();

        let text = report_text(&settings);

        assert!(text.contains("01-01-2026, oops\n"));
        assert!(text.contains("⚠️ Error reading records: row 1 has 2 cells"));
    }

    #[test]
    fn test_print_records_stops_listing_at_first_bad_row() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::with_store_path(dir.path().join("treadmill_log.csv"));
        fs::write(
            &settings.store_path,
            "Date,Weight,Duration,Distance,Calories,Front Raise (in)\n\
             01-01-2026,180.0 lbs,30.0 min,1.25 mi,176 cal,0.0 in raise\n\
             02-01-2026,bad,30.0 min,1.25 mi,176 cal,0.0 in raise\n\
             03-01-2026,179.0 lbs,30.0 min,1.25 mi,175 cal,0.0 in raise\n",
        )
        .unwrap();

        let text = report_text(&settings);

        assert!(text.contains("01-01-2026, 180.0 lbs"));
        assert!(text.contains("02-01-2026, bad"));
        assert!(!text.contains("03-01-2026"));
        assert!(text.ends_with(
            "02-01-2026, bad, 30.0 min, 1.25 mi, 176 cal, 0.0 in raise\n\
             ⚠️ Error reading records: could not read weight from 'bad' in row 2\n"
        ));
        assert!(!text.contains("Summary"));
    }

    #[test]
    fn test_print_records_json() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::with_store_path(dir.path().join("treadmill_log.csv"));
        let mut store = CsvStore::open(&settings.store_path);
        store.append(&SessionRecord::new("01-01-2026", 180.0, 30.0, 1.25, 0.0)).unwrap();

        let mut out = Vec::new();
        print_records(&settings, OutputFormat::Json, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["summary"]["total_calories"], 176.0);
        assert_eq!(json["trend"]["weight"]["direction"], "flat");
        assert_eq!(json["sessions"].as_array().unwrap().len(), 1);
    }
}
