//! File logging. The terminal belongs to the dashboard, so everything goes to
//! a daily rolling file under the config directory.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_PREFIX: &str = "tickerboard.log";

pub fn default_log_dir() -> Result<PathBuf> {
    Ok(crate::config::Config::config_dir()?.join("logs"))
}

/// Install the global subscriber. `RUST_LOG` wins over the `info` default.
/// Keep the guard alive until exit or buffered lines are lost.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))?;

    Ok(guard)
}
