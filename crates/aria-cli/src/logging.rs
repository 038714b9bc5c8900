//! Logger setup.
//!
//! Warnings and errors go to stderr unless `LOGS_DIR` is set, in which case
//! everything is appended to `aria.log` there. `RUST_LOG` overrides the level.

use std::{fs::OpenOptions, path::Path};

use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::LevelFilter;

const LOG_FILE: &str = "aria.log";

pub fn init(logs_dir: Option<&Path>) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Warn).parse_default_env();

    if let Some(dir) = logs_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        let path = dir.join(LOG_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to initialize logger")
}
