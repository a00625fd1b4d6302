//! `cfsyslog parse` command handler

use std::io::Write;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use cfsyslog_core::config::CfSyslogConfig;
use cfsyslog_core::pipeline::LineParser;
use cfsyslog_parser::{CfSyslogParser, ParserConfig};

use crate::cli::ParseArgs;
use crate::error::CliError;
use crate::output::OutputWriter;

/// Execute the `parse` command.
pub async fn execute(
    args: ParseArgs,
    config: &CfSyslogConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let parser = CfSyslogParser::new(parser_config(&args, config))?;

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());

    let summary = match args.input_path() {
        Some(path) => {
            info!(path = %path.display(), "parsing file");
            let file = tokio::fs::File::open(path).await?;
            process_lines(BufReader::new(file), &parser, writer, &mut out).await?
        }
        None => {
            info!("parsing stdin");
            process_lines(BufReader::new(tokio::io::stdin()), &parser, writer, &mut out).await?
        }
    };
    out.flush()?;

    info!(
        lines = summary.lines,
        parsed = summary.parsed,
        unparsable = summary.unparsable,
        "parse finished"
    );

    if args.strict && summary.unparsable > 0 {
        return Err(CliError::Unparsable {
            count: summary.unparsable,
        });
    }

    Ok(())
}

/// Parser settings from the config file with command-line flags applied on top.
fn parser_config(args: &ParseArgs, config: &CfSyslogConfig) -> ParserConfig {
    let mut parser_config = ParserConfig::from_core(&config.parser);
    if args.access_log {
        parser_config.parse_access_log = true;
    }
    if args.include_raw {
        parser_config.include_raw_message = true;
    }
    if let Some(pattern) = &args.timestamp_pattern {
        parser_config.timestamp_pattern = pattern.clone();
    }
    parser_config
}

/// Line counts for one `parse` run. Blank lines are not counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub lines: u64,
    pub parsed: u64,
    pub unparsable: u64,
}

/// Parse every line from `reader`, writing records to `out`.
///
/// Invalid UTF-8 is replaced rather than aborting the run.
pub async fn process_lines<R>(
    mut reader: R,
    parser: &dyn LineParser,
    writer: &OutputWriter,
    out: &mut dyn Write,
) -> Result<ParseSummary, CliError>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = ParseSummary::default();
    let mut buf = Vec::new();
    let mut line_no: u64 = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;

        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        summary.lines += 1;
        match parser.parse(line) {
            Ok(parsed) => {
                summary.parsed += 1;
                writer.write_record(out, &parsed)?;
            }
            Err(e) => {
                summary.unparsable += 1;
                warn!(line = line_no, format = parser.format_name(), error = %e, "skipping line");
            }
        }
    }

    Ok(summary)
}
