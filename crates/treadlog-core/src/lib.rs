//! # Treadlog Core Library
//!
//! Business logic for the treadmill session logger. The `treadlog` binary is
//! a thin shell over this crate: it parses arguments, installs logging and
//! hands stdin/stdout to the flows defined here.
//!
//! ## Architecture
//!
//! - **Calories**: fixed-MET calorie estimate from weight and duration
//! - **Entry**: prompt-per-field collector producing one session at a time
//! - **Storage**: append-only CSV file, header written once
//! - **Report**: last-20 listing, totals and a last-5 trend
//!
//! ## Key Components
//!
//! - [`EntryCollector`]: Interactive logging flow
//! - [`CsvStore`]: Session persistence
//! - [`print_records`]: Records report
//! - [`Settings`]: Store path and report windows

pub mod calories;
pub mod entry;
pub mod error;
pub mod report;
pub mod session;
pub mod settings;
pub mod storage;

pub use calories::{calculate_calories, incline_percent};
pub use entry::{Answer, EntryCollector, LogEnd, LogOutcome};
pub use error::{CoreError, ReportError, StoreError};
pub use report::{print_records, OutputFormat, Report};
pub use session::SessionRecord;
pub use settings::Settings;
pub use storage::CsvStore;
