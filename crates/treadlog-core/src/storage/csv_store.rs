//! Append-only CSV store for treadmill sessions.
//!
//! The header is written once, ahead of the first row, and only when the
//! file did not exist when the store was opened. A run that never appends
//! leaves the file system untouched.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::session::{SessionRecord, CSV_HEADER};

/// One data row as read back from the store, split into cells.
pub type StoredRow = Vec<String>;

/// Writer half of the session store.
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    header_pending: bool,
}

impl CsvStore {
    /// Open the store at `path`.
    ///
    /// Only checks whether the file exists; nothing is created until the
    /// first [`append`](Self::append).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let header_pending = !path.exists();
        debug!(path = %path.display(), header_pending, "opened session store");
        Self {
            path,
            header_pending,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one session as a CSV row.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&mut self, record: &SessionRecord) -> Result<(), StoreError> {
        let wrap = |source: std::io::Error| StoreError::AppendFailed {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(wrap)?;

        if self.header_pending {
            writeln!(file, "{CSV_HEADER}").map_err(wrap)?;
            self.header_pending = false;
            debug!(path = %self.path.display(), "wrote store header");
        }

        let row = record.to_csv_row();
        writeln!(file, "{row}").map_err(wrap)?;
        debug!(path = %self.path.display(), %row, "appended session");
        Ok(())
    }
}

/// Read every data row of the store, skipping the header line.
///
/// # Errors
/// Returns [`StoreError::Missing`] if the file does not exist, or
/// [`StoreError::ReadFailed`] if it cannot be read.
pub fn read_rows(path: &Path) -> Result<Vec<StoredRow>, StoreError> {
    if !path.exists() {
        return Err(StoreError::Missing {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| StoreError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let rows: Vec<StoredRow> = content
        .lines()
        .skip(1)
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect();

    debug!(path = %path.display(), rows = rows.len(), "read session store");
    Ok(rows)
}
