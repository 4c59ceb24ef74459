//! Configuration structures for the invox pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{InvoxError, Result};

/// Main configuration for the invox pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoxConfig {
    /// Input/output folder configuration.
    pub data: DataConfig,

    /// Document-analysis service configuration.
    pub service: ServiceConfig,
}

impl Default for InvoxConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

/// Input and output folders for batch processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Folder scanned for `*.pdf` input files.
    pub input_folder: PathBuf,

    /// Folder where per-invoice CSV files are written.
    pub output_folder: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("invoices"),
            output_folder: PathBuf::from("out"),
        }
    }
}

/// Document-analysis service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the analysis service. Must be set before `process` or
    /// `batch` can talk to the service.
    pub endpoint: String,

    /// Staging location the service reads uploaded documents from
    /// (e.g. a bucket path writable by the service account).
    pub upload_location: String,

    /// Bearer token for the service. Unauthenticated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Interval between job-status polls, in milliseconds.
    pub poll_interval_ms: u64,

    /// Give up waiting for a job after this many seconds.
    pub poll_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            upload_location: String::new(),
            api_token: None,
            poll_interval_ms: 250,
            poll_timeout_secs: 600,
        }
    }
}

impl InvoxConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| InvoxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| InvoxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = InvoxConfig::default();

        assert_eq!(config.data.input_folder, PathBuf::from("invoices"));
        assert_eq!(config.data.output_folder, PathBuf::from("out"));
        assert_eq!(config.service.poll_interval_ms, 250);
        assert_eq!(config.service.api_token, None);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: InvoxConfig = toml::from_str(
            r#"
            [data]
            input_folder = "scans"

            [service]
            endpoint = "https://analysis.example.com"
            upload_location = "staging/invoices"
            "#,
        )
        .unwrap();

        assert_eq!(config.data.input_folder, PathBuf::from("scans"));
        // Unset fields fall back to defaults.
        assert_eq!(config.data.output_folder, PathBuf::from("out"));
        assert_eq!(config.service.endpoint, "https://analysis.example.com");
        assert_eq!(config.service.poll_timeout_secs, 600);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = InvoxConfig::default();
        config.service.endpoint = "https://analysis.example.com".to_string();
        config.save(&path).unwrap();

        let reloaded = InvoxConfig::from_file(&path).unwrap();

        assert_eq!(reloaded.service.endpoint, config.service.endpoint);
    }

    #[test]
    fn test_from_file_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[data\ninput_folder = ").unwrap();

        assert!(InvoxConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = InvoxConfig::default();
        config.service.endpoint = "https://analysis.example.com".to_string();
        config.service.api_token = Some("secret".to_string());

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: InvoxConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.service.endpoint, config.service.endpoint);
        assert_eq!(parsed.service.api_token, config.service.api_token);
        assert_eq!(parsed.data.input_folder, config.data.input_folder);
    }
}
