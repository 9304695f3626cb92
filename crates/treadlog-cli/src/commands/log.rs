use std::io;

use treadlog_core::{CsvStore, EntryCollector, Settings};

pub fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = CsvStore::open(&settings.store_path);
    let stdin = io::stdin();
    let stdout = io::stdout();

    let outcome = EntryCollector::new(stdin.lock(), stdout.lock()).run(&mut store)?;
    tracing::debug!(
        store = %store.path().display(),
        logged = outcome.logged,
        ended_by = ?outcome.ended_by,
        "logging finished"
    );
    Ok(())
}
