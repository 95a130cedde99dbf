//! Console and file logging.
//!
//! Every event is rendered as one JSON line. The file sink shares a single
//! mutex-guarded handle opened in append mode, and the formatter writes a
//! whole line per lock, so records from concurrent requests never interleave.

use crate::{Error, Result, config::LogsConfig};
use std::{
    fs::{self, File, OpenOptions},
    path::Path,
    sync::Mutex,
};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Validates that a log level string is valid
pub fn validate_log_level(level: &str) -> Result<()> {
    level.parse::<LevelFilter>().map_err(|_| {
        Error::logging(format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        ))
    })?;
    Ok(())
}

/// Opens `path` for appending, creating it and any missing parent directories.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Builds the subscriber without installing it. `RUST_LOG` takes precedence
/// over the configured level.
pub fn subscriber(config: &LogsConfig) -> Result<impl Subscriber + Send + Sync + 'static> {
    validate_log_level(&config.level)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = config
        .file
        .as_deref()
        .map(|path| open_log_file(Path::new(path)))
        .transpose()?
        .map(|file| {
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .with(file_layer))
}

pub fn init(config: &LogsConfig) -> Result<()> {
    subscriber(config)?
        .try_init()
        .map_err(|e| Error::logging(e.to_string()))
}
