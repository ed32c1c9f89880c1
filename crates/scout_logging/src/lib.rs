#![deny(missing_docs)]
//! Shared logging utilities for the jobscout workspace.
//!
//! This crate provides the `scout_*` logging macros used by the core, engine
//! and app crates, the logger initialization used by the binary, and a
//! minimal test initializer for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scout_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scout_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scout_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scout_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scout_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogDestination {
    /// Write to the configured log file only.
    #[default]
    File,
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both the log file and the terminal.
    Both,
}

impl FromStr for LogDestination {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "terminal" => Ok(Self::Terminal),
            "both" => Ok(Self::Both),
            other => Err(LoggingError::UnknownDestination(other.to_string())),
        }
    }
}

/// Failures while installing the global logger.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The destination name is not one of `file`, `terminal` or `both`.
    #[error("unknown log destination '{0}' (expected file, terminal or both)")]
    UnknownDestination(String),
    /// The log file could not be created.
    #[error("could not create log file at {path:?}: {source}")]
    CreateFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// A global logger was already installed.
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

/// Installs the global logger for the binary.
///
/// `File` truncates `log_path` on start. With `Both`, a log file that cannot be
/// created is reported as an error after the terminal logger is still
/// installed, so the caller can warn about it.
pub fn initialize(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> Result<(), LoggingError> {
    let config = build_config();

    let mut file_failure = None;
    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File => vec![create_file_logger(level, config, log_path)?],
        LogDestination::Terminal => vec![term_logger(level, config)],
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![term_logger(level, config.clone())];
            match create_file_logger(level, config, log_path) {
                Ok(file_logger) => loggers.push(file_logger),
                Err(err) => file_failure = Some(err),
            }
            loggers
        }
    };

    CombinedLogger::init(loggers).map_err(|_| LoggingError::AlreadyInitialized)?;
    match file_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn term_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Result<Box<dyn SharedLogger>, LoggingError> {
    let file = File::create(log_path).map_err(|source| LoggingError::CreateFile {
        path: log_path.to_path_buf(),
        source,
    })?;
    Ok(WriteLogger::new(level, config, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_parses_case_insensitively() {
        assert_eq!("FILE".parse::<LogDestination>().unwrap(), LogDestination::File);
        assert_eq!(" both ".parse::<LogDestination>().unwrap(), LogDestination::Both);
        assert_eq!(
            "terminal".parse::<LogDestination>().unwrap(),
            LogDestination::Terminal
        );
    }

    #[test]
    fn unknown_destination_is_rejected() {
        let err = "syslog".parse::<LogDestination>().unwrap_err();
        assert!(matches!(err, LoggingError::UnknownDestination(name) if name == "syslog"));
    }
}
