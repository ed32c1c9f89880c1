use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jobscout_engine::{
    EndpointError, Endpoints, GatewaySettings, StreamSettings, DEFAULT_CHECK_PATH,
    DEFAULT_STREAM_PATH,
};
use scout_logging::{scout_info, LogDestination};
use serde::{Deserialize, Serialize};

use super::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub check_path: String,
    pub stream_path: String,
    pub connect_timeout_secs: u64,
    /// `None` lets the eligibility check wait forever.
    pub request_timeout_secs: Option<u64>,
    pub log: LogDestination,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            check_path: DEFAULT_CHECK_PATH.to_string(),
            stream_path: DEFAULT_STREAM_PATH.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: Some(30),
            log: LogDestination::File,
            log_path: PathBuf::from("jobscout.log"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads `path`; a missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

impl AppConfig {
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
    }

    pub fn endpoints(&self) -> Result<Endpoints, EndpointError> {
        let endpoints = Endpoints::from_base(&self.base_url, &self.check_path, &self.stream_path)?;
        scout_info!(
            "Using check endpoint {} and stream endpoint {}",
            endpoints.check_url,
            endpoints.stream_url
        );
        Ok(endpoints)
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn stream_settings(&self) -> StreamSettings {
        StreamSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("jobscout.ron");
        fs::write(
            &path,
            "(base_url: \"http://scraper.local:9000/\", request_timeout_secs: None, log: both)",
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.base_url, "http://scraper.local:9000/");
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.log, LogDestination::Both);
        assert_eq!(config.check_path, DEFAULT_CHECK_PATH);
        assert_eq!(config.gateway_settings().request_timeout, None);
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("jobscout.ron");
        fs::write(&path, "(base_url: 42").unwrap();

        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = AppConfig::default();
        let cli = Cli::try_parse_from(["jobscout", "--base-url", "http://other:8000", "--log", "terminal"])
            .unwrap();

        config.apply_overrides(&cli);

        assert_eq!(config.log, LogDestination::Terminal);
        let endpoints = config.endpoints().unwrap();
        assert_eq!(endpoints.check_url, "http://other:8000/scrape_jobs_check");
        assert_eq!(endpoints.stream_url, "http://other:8000/scrape_jobs");
    }
}
