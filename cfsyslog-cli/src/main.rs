//! cfsyslog -- Cloud Foundry syslog drain parser CLI
//!
//! Reads RFC 5424 lines from a file or stdin, parses them with
//! `cfsyslog-parser` and writes records to stdout as text or NDJSON.
//! Logs go to stderr.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use cfsyslog_core::config::GeneralConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config_path().to_path_buf();
    let explicit = cli.config_is_explicit();
    let loaded = commands::load_config(&config_path, explicit).await;

    // 설정이 깨져 있어도 `config validate`가 보고할 수 있도록 로깅은 기본값으로 시작
    let general = loaded
        .as_ref()
        .map(|l| l.config.general.clone())
        .unwrap_or_else(|_| GeneralConfig::default());
    logging::init_tracing(&general, cli.log_level.as_deref())
        .map_err(|e| CliError::Command(format!("{e:#}")))?;

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Parse(args) => {
            let loaded = loaded?;
            tracing::info!(source = %loaded.source, "cfsyslog starting");
            commands::parse::execute(args, &loaded.config, &writer).await
        }
        Commands::Config(args) => {
            commands::config::execute(args, &config_path, explicit, &writer).await
        }
    }
}
