//! File logger bootstrap. The TUI owns the terminal while it runs, so
//! diagnostics go to rotated files under the data directory instead.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use log::info;
use std::fs;

const LOG_FILE_BASENAME: &str = "dayplan";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Starts the file logger. The returned handle must stay alive for the
/// process lifetime. Level comes from `RUST_LOG`, defaulting to `info`.
pub fn init() -> Result<LoggerHandle> {
    let dirs = ProjectDirs::from("", "", "dayplan").context("locating data directory")?;
    let log_dir = dirs.data_dir().join("logs");
    fs::create_dir_all(&log_dir).with_context(|| format!("creating {:?}", log_dir))?;
    let handle = Logger::try_with_env_or_str("info")
        .context("configuring log level")?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("starting file logger")?;
    info!("dayplan {} started", env!("CARGO_PKG_VERSION"));
    Ok(handle)
}
