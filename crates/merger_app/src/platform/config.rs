use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use merger_engine::{EngineConfig, ServiceSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "pdf_merger.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Settings read from `pdf_merger.ron`. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: u64,
    pub max_download_bytes: u64,
    pub download_dir: PathBuf,
    pub alert_timeout_ms: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let service = ServiceSettings::default();
        Self {
            base_url: service.base_url,
            connect_timeout_secs: service.connect_timeout.as_secs(),
            request_timeout_secs: service.request_timeout.as_secs(),
            max_upload_bytes: service.max_upload_bytes,
            max_download_bytes: service.max_download_bytes,
            download_dir: PathBuf::from("./downloads"),
            alert_timeout_ms: 5_000,
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            service: ServiceSettings {
                base_url: self.base_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_upload_bytes: self.max_upload_bytes,
                max_download_bytes: self.max_download_bytes,
            },
            download_dir: self.download_dir.clone(),
            alert_timeout: Duration::from_millis(self.alert_timeout_ms),
        }
    }
}

/// Reads the config file. A missing file is not an error and yields defaults.
pub(crate) fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
