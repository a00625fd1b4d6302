//! `cfsyslog config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use cfsyslog_core::config::CfSyslogConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::commands::load_config;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

const SECTIONS: &str = "general, parser";

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    explicit: bool,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => {
            execute_show(config_path, explicit, section, writer).await
        }
    }
}

/// Load and validate the configuration file, reporting any errors.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (missing file, parse errors, invalid values).
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match CfSyslogConfig::load(config_path).await {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Display the effective configuration (file + env overrides + defaults).
///
/// # Errors
///
/// Returns `CliError::Config` if loading fails or `CliError::Command` if the section name is invalid.
async fn execute_show(
    config_path: &Path,
    explicit: bool,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let loaded = load_config(config_path, explicit).await?;
    let report = build_report(&loaded.config, loaded.source, section)?;
    writer.render(&report)
}

fn build_report(
    config: &CfSyslogConfig,
    source: String,
    section: Option<String>,
) -> Result<ConfigReport, CliError> {
    let (settings, config_toml) = match section.as_deref() {
        None => (serde_json::to_value(config)?, to_toml(config)),
        Some("general") => (
            serde_json::to_value(&config.general)?,
            to_toml(&config.general),
        ),
        Some("parser") => (
            serde_json::to_value(&config.parser)?,
            to_toml(&config.parser),
        ),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {other} (expected: {SECTIONS})"
            )));
        }
    };

    Ok(ConfigReport {
        source,
        section,
        settings,
        config_toml,
    })
}

fn to_toml<T: Serialize>(value: &T) -> String {
    toml::to_string_pretty(value).unwrap_or_else(|e| format!("(serialization error: {e})"))
}

/// Configuration display report.
///
/// `config_toml` is only used for text rendering; JSON output carries `settings`.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path, or `"defaults"`
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Effective settings
    pub settings: serde_json::Value,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_text(payload: &impl Render) -> String {
        let mut buffer = Vec::new();
        payload
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_build_report_full_config() {
        let report = build_report(&CfSyslogConfig::default(), "defaults".to_owned(), None)
            .expect("full report");

        assert!(report.section.is_none());
        assert_eq!(report.settings["general"]["log_level"], "info");
        assert!(report.settings["parser"].get("max_input_size").is_none());
        assert!(report.config_toml.contains("[general]"));
        assert!(report.config_toml.contains("[parser]"));
    }

    #[test]
    fn test_build_report_parser_section() {
        let report = build_report(
            &CfSyslogConfig::default(),
            "cfsyslog.toml".to_owned(),
            Some("parser".to_owned()),
        )
        .expect("parser section");

        assert_eq!(report.settings["parse_access_log"], false);
        assert!(report.config_toml.contains("timestamp_pattern"));
        assert!(!report.config_toml.contains("log_level"));

        let output = render_text(&report);
        assert!(output.contains("[parser]"), "should show section name");
        assert!(output.contains("cfsyslog.toml"));
    }

    #[test]
    fn test_build_report_unknown_section() {
        let err = build_report(
            &CfSyslogConfig::default(),
            "defaults".to_owned(),
            Some("storage".to_owned()),
        )
        .err()
        .expect("unknown section should fail");

        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("expected: general, parser"));
    }

    #[test]
    fn test_config_report_json_skips_toml() {
        let report = build_report(
            &CfSyslogConfig::default(),
            "defaults".to_owned(),
            Some("general".to_owned()),
        )
        .expect("general section");

        let parsed = serde_json::to_value(&report).expect("JSON serialization should succeed");
        assert_eq!(parsed["source"], "defaults");
        assert_eq!(parsed["section"], "general");
        assert_eq!(parsed["settings"]["log_format"], "json");
        assert!(parsed.get("config_toml").is_none());
    }

    #[test]
    fn test_config_validation_report_valid() {
        let output = render_text(&ConfigValidationReport {
            source: "cfsyslog.toml".to_owned(),
            valid: true,
            errors: Vec::new(),
        });
        assert!(output.contains("VALID"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_config_validation_report_invalid() {
        let output = render_text(&ConfigValidationReport {
            source: "bad.toml".to_owned(),
            valid: false,
            errors: vec!["invalid config value for 'parser.max_input_size'".to_owned()],
        });
        assert!(output.contains("INVALID"));
        assert!(output.contains("parser.max_input_size"));
    }

    #[test]
    fn test_config_validation_report_json() {
        let report = ConfigValidationReport {
            source: "bad.toml".to_owned(),
            valid: false,
            errors: vec!["error message".to_owned()],
        };
        let parsed = serde_json::to_value(&report).expect("JSON serialization should succeed");
        assert_eq!(parsed["valid"].as_bool(), Some(false));
        assert_eq!(parsed["errors"].as_array().map(Vec::len), Some(1));
    }
}
