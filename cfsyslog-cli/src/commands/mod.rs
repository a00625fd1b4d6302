//! Command handlers -- one module per subcommand

pub mod config;
pub mod parse;

use std::path::Path;

use tracing::info;

use cfsyslog_core::config::CfSyslogConfig;
use cfsyslog_core::error::{CfSyslogError, ConfigError};

use crate::error::CliError;

/// Effective configuration and where it came from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: CfSyslogConfig,
    /// Config file path, or `"defaults"` when running without a file.
    pub source: String,
}

/// Load the configuration for a command.
///
/// A missing file at the default path falls back to built-in defaults plus
/// env overrides. A missing file given explicitly with `--config` is an error.
pub async fn load_config(path: &Path, explicit: bool) -> Result<LoadedConfig, CliError> {
    match CfSyslogConfig::load(path).await {
        Ok(config) => Ok(LoadedConfig {
            config,
            source: path.display().to_string(),
        }),
        Err(CfSyslogError::Config(ConfigError::FileNotFound { .. })) if !explicit => {
            info!(path = %path.display(), "config file not found, using defaults");
            Ok(LoadedConfig {
                config: CfSyslogConfig::from_env()?,
                source: "defaults".to_owned(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_default_path_falls_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cfsyslog.toml");

        let loaded = load_config(&path, false).await.expect("should fall back");
        assert_eq!(loaded.source, "defaults");
    }

    #[tokio::test]
    async fn test_missing_explicit_path_is_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.toml");

        let err = load_config(&path, true).await.expect_err("should fail");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_existing_file_is_source() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("custom.toml");
        tokio::fs::write(&path, "[parser]\nparse_access_log = true\n")
            .await
            .expect("write config");

        let loaded = load_config(&path, true).await.expect("should load");
        assert_eq!(loaded.source, path.display().to_string());
        assert!(loaded.config.parser.parse_access_log);
    }
}
