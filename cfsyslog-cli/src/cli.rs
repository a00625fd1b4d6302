//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "cfsyslog.toml";

/// cfsyslog -- Cloud Foundry syslog drain parser.
///
/// Use `cfsyslog <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "cfsyslog", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file [default: cfsyslog.toml].
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective config path (explicit or default).
    pub fn config_path(&self) -> &Path {
        self.config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Whether `--config` was given explicitly.
    pub fn config_is_explicit(&self) -> bool {
        self.config.is_some()
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON (NDJSON for `parse`).
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse syslog lines from a file or stdin.
    Parse(ParseArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- parse ----

/// Parse RFC 5424 lines emitted by a loggregator syslog drain.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Input file (default: stdin, `-` also reads stdin).
    pub input: Option<PathBuf>,

    /// Parse gorouter access logs regardless of the config file.
    #[arg(long)]
    pub access_log: bool,

    /// Keep the raw input line in each record.
    #[arg(long)]
    pub include_raw: bool,

    /// Override the header timestamp pattern (strftime, `%L`/`%N` fractions).
    #[arg(long)]
    pub timestamp_pattern: Option<String>,

    /// Exit with code 3 if any line could not be parsed.
    #[arg(long)]
    pub strict: bool,
}

impl ParseArgs {
    /// Input file path, `None` means stdin.
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }
}

// ---- config ----

/// Manage cfsyslog configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, parser).
        #[arg(long)]
        section: Option<String>,
    },
}
