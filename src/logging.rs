//! Logging setup for the `autoviz` binary.
//!
//! Library code only talks to the [`log`] facade. This module installs
//! `env_logger` behind it: the default filter is `info`, `RUST_LOG`
//! overrides it, and records go to stderr. When the config names a
//! `log_file`, every record is also appended to that file.
//!
//! ```no_run
//! use autoviz::{config::AnalysisConfig, logging};
//!
//! logging::init(&AnalysisConfig::default()).expect("Failed to initialize logging");
//! log::info!("App started");
//! ```

use crate::config::AnalysisConfig;
use crate::error::{AutovizError, Result, ResultExt as _};
use env_logger::{Builder, Env, Target, WriteStyle};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

pub const DEFAULT_FILTER: &str = "info";

/// Installs the global logger.
///
/// # Errors
///
/// Returns [`AutovizError::Io`] if the log file cannot be opened and
/// [`AutovizError::Config`] if a logger is already installed.
pub fn init(config: &AnalysisConfig) -> Result<()> {
    builder(config.log_file.as_deref())?
        .try_init()
        .map_err(|e| AutovizError::Config(format!("Failed to initialize logging: {e}")))?;

    if let Some(path) = &config.log_file {
        log::info!("Logging initialized, mirroring to {}", path.display());
    }
    Ok(())
}

/// Builder configured from `RUST_LOG` (default `info`), optionally mirroring
/// to `log_file`.
///
/// # Errors
///
/// Returns [`AutovizError::Io`] if the log file cannot be opened.
pub fn builder(log_file: Option<&Path>) -> Result<Builder> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format_timestamp_millis().format_target(true);

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        builder
            .write_style(WriteStyle::Never)
            .target(Target::Pipe(Box::new(Tee { file })));
    }
    Ok(builder)
}

/// Copies each record to stderr and the log file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
