//! Platform logging initialization for the movie finder.
//!
//! The terminal belongs to the UI, so log output goes to a file only.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

/// Initialize the file logger at `path`.
///
/// Failure to create the file is reported on stderr and leaves logging disabled.
pub fn initialize(path: &Path, level: LevelFilter) {
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
        .add_filter_allow_str("finder")
        .build()
}
