use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_log_path};

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("failed to create log directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open log file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid log filter {filter:?}")]
    Filter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("failed to install the log subscriber: {0}")]
    Install(String),
}

pub fn log_file_path(settings: &LogSettings) -> PathBuf {
    settings.file.clone().unwrap_or_else(default_log_path)
}

/// `RUST_LOG` wins over the configured level.
fn build_filter(level: &str) -> Result<EnvFilter, LogInitError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| LogInitError::Filter {
        filter: level.to_string(),
        source,
    })
}

fn open_log_file(path: &Path) -> Result<File, LogInitError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| LogInitError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogInitError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Send `tracing` output to the log file; the terminal belongs to the UI.
pub fn init_logging(settings: &LogSettings) -> Result<PathBuf, LogInitError> {
    let path = log_file_path(settings);
    let file = open_log_file(&path)?;
    let filter = build_filter(&settings.level)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| LogInitError::Install(e.to_string()))?;

    Ok(path)
}
