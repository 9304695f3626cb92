use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use treadlog_core::settings::DEFAULT_STORE_FILE;
use treadlog_core::{OutputFormat, Settings};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "treadlog", version, about = "Treadmill session logger")]
struct Cli {
    /// Session store file
    #[arg(long, default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,
    /// Print the records report as JSON
    #[arg(long)]
    json: bool,
    /// `records` prints the report; anything else starts logging
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 1..)]
    args: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    /// Interactive session entry
    Log,
    /// Last-20 report
    Records,
}

impl Cli {
    fn mode(&self) -> Mode {
        match self.args.first().map(String::as_str) {
            Some("records") => Mode::Records,
            _ => Mode::Log,
        }
    }

    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Resolve the command line. Arguments clap rejects (including `--help`
/// and `--version`) mean plain logging against the default store.
fn invocation<I, T>(args: I) -> (Mode, Settings, OutputFormat)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => (cli.mode(), Settings::with_store_path(&cli.store), cli.format()),
        Err(e) => {
            tracing::debug!(error = %e, "unrecognized arguments, logging");
            (Mode::Log, Settings::default(), OutputFormat::Text)
        }
    }
}

fn main() {
    logging::init();

    let (mode, settings, format) = invocation(std::env::args_os());
    let result = match mode {
        Mode::Log => commands::log::run(&settings),
        Mode::Records => commands::records::run(&settings, format),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
