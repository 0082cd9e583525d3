// ============================================================================
// drapto-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Helper Functions for Logging
//
// This file contains utility functions related to logging in the Drapto CLI
// application. Interactive (foreground) runs use `env_logger`, configured
// directly in main.rs. Daemonized / file-backed runs use `fern`, set up here,
// which writes to a log file with ANSI escapes stripped and timestamps the
// way `env_logger`'s default format does.
//
// KEY COMPONENTS:
// - Timestamp generation for log files and other time-based operations
// - `setup_file_logging`: fern-based logger for daemonized runs
//
// AI-ASSISTANT-INFO: Logging utilities and helper functions

use std::path::Path;

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// This function is used to generate unique timestamps for log files,
/// temporary directories, and other time-based operations.
///
/// # Returns
/// A string containing the formatted timestamp (e.g., "20240601_123045")
///
/// # Example
/// ```
/// let log_filename = format!("drapto_log_{}.txt", get_timestamp());
/// // Result: "drapto_log_20240601_123045.txt"
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Sets up file-backed logging via `fern` for daemonized runs, where there is
/// no terminal to write to and `env_logger`'s stderr output would be lost.
///
/// Creates the log file's parent directory if needed and installs a global
/// logger writing lines of the form `[2024-06-01 12:30:45] INFO  message` to
/// `log_file`, filtered at `level`.
pub fn setup_file_logging(log_file: &Path, level: log::LevelFilter) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let log_path = log_file.to_path_buf();

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(log_path)?)
        .apply()?;

    Ok(())
}