use std::io;

use treadlog_core::{print_records, CoreError, OutputFormat, Settings, StoreError};

pub fn run(settings: &Settings, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    match print_records(settings, format, &mut stdout.lock()) {
        Ok(()) => Ok(()),
        Err(CoreError::Store(StoreError::Missing { .. })) => {
            println!(
                "❗ No {} file found yet. Start logging sessions first!",
                settings.store_file_name()
            );
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
