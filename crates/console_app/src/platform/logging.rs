//! Logging initialization for the terminal console.
//!
//! The terminal UI owns stdout, so log output goes to a file only.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

/// Initialize the file logger at `path` with `level`.
///
/// Unknown level names fall back to `info`. If the file cannot be created
/// the console runs without logging.
pub fn initialize(path: &Path, level: &str) {
    let level = console_logging::parse_level(level).unwrap_or(LevelFilter::Info);
    if level == LevelFilter::Off {
        return;
    }

    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, build_config(), file);
        }
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
        }
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
