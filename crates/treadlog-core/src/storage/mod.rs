//! Flat-file session storage.
//!
//! Sessions live in a single append-only CSV file. There is no update or
//! delete; the reporting side reads the whole file back.

mod csv_store;

pub use csv_store::{read_rows, CsvStore, StoredRow};
