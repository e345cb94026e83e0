use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

/// Where log events go. The TUI owns stdout and the alternate screen, so
/// interactive sessions only log when a file is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Disabled,
}

pub fn log_target(config: &LogConfig, override_file: Option<&Path>, interactive: bool) -> LogTarget {
    if let Some(path) = override_file.or(config.file.as_deref()) {
        return LogTarget::File(path.to_path_buf());
    }
    if interactive {
        LogTarget::Disabled
    } else {
        LogTarget::Stderr
    }
}

/// `RUST_LOG` wins over the configured level; a bad level falls back to `info`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(config: &LogConfig, target: &LogTarget) -> AppResult<()> {
    let filter = build_filter(&config.level);
    let result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).map_err(|source| {
                    AppError::io_with_context(
                        source,
                        format!("failed to create log directory: {}", parent.display()),
                    )
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| {
                    AppError::io_with_context(
                        source,
                        format!("failed to open log file: {}", path.display()),
                    )
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    result.map_err(|err| AppError::logging(err.to_string()))?;
    tracing::info!(level = %config.level, "logging initialized");
    Ok(())
}
