//! CLI-specific error types and exit code mapping

use cfsyslog_core::error::CfSyslogError;
use cfsyslog_parser::ParserError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// `parse --strict` saw lines that could not be parsed.
    #[error("{count} line(s) could not be parsed")]
    Unparsable { count: u64 },

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from cfsyslog-core.
    #[error("{0}")]
    Core(#[from] CfSyslogError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                          |
    /// |------|----------------------------------|
    /// | 0    | Success                          |
    /// | 1    | General / command error          |
    /// | 2    | Configuration error              |
    /// | 3    | Unparsable lines (`--strict`)    |
    /// | 10   | IO error                         |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Core(CfSyslogError::Config(_)) => 2,
            Self::Unparsable { .. } => 3,
            Self::Io(_) | Self::Core(CfSyslogError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(CfSyslogError::Parse(_)) => 1,
        }
    }
}

impl From<ParserError> for CliError {
    fn from(e: ParserError) -> Self {
        match e {
            ParserError::Config { .. } => Self::Config(e.to_string()),
            other => Self::Command(other.to_string()),
        }
    }
}
