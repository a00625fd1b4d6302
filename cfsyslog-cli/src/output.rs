//! Output formatting abstraction for text vs JSON rendering
//!
//! All subcommand output flows through [`OutputWriter`] which handles format switching.
//! Reports use [`OutputWriter::render`]; parsed records are streamed one per line
//! with [`OutputWriter::write_record`].

use std::io::Write;

use serde::Serialize;

use cfsyslog_core::types::ParsedLine;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Abstraction for writing CLI output in different formats.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a report payload to stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.render_to(&mut handle, payload)
    }

    /// Render a report payload to an arbitrary writer.
    ///
    /// For `Text` format, delegates to `Render::render_text()`.
    /// For `Json` format, serialises via `serde_json` (pretty).
    pub fn render_to<T: Render + Serialize>(
        &self,
        w: &mut dyn Write,
        payload: &T,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => {
                payload.render_text(w)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }

    /// Write one parsed record.
    ///
    /// `Json` writes a single NDJSON line `{"time": ..., "record": ...}`.
    /// `Text` writes `<rfc3339 time> [severity] host app: message`.
    pub fn write_record(&self, w: &mut dyn Write, line: &ParsedLine) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => line.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *w, line)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Trait for human-readable text rendering.
///
/// Implemented by every CLI output payload alongside `serde::Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

impl Render for ParsedLine {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        write!(w, "{} {}", self.time.to_rfc3339(), self.record)?;
        if let Some(log) = &self.record.access_log {
            write!(
                w,
                " (access: {} {} {} -> {})",
                log.method, log.pathname, log.status, log.backend_address
            )?;
        }
        writeln!(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfsyslog_core::pipeline::LineParser;
    use cfsyslog_parser::{CfSyslogParser, ParserConfigBuilder};

    const APP_LINE: &str = r#"<14>1 2024-01-15T12:00:00.000Z cell-1 my-app [APP/PROC/WEB/0] - [tags@47450 origin="rep"] Listening on 8080"#;

    const ROUTER_LINE: &str = concat!(
        r#"<14>1 2021-12-24T22:20:01.438069+00:00 cell-1 my-app [RTR/0] - [tags@47450 origin="gorouter"] "#,
        r#"example.com - [2021-12-24T22:20:01.429164095Z] "GET /styles.css HTTP/1.1" 304 0 0 "#,
        r#""-" "curl/8.0" "10.0.0.1:5000" "10.0.1.2:61000" gorouter_time:0.000625"#,
    );

    #[derive(Serialize)]
    struct TestPayload {
        field1: String,
        field2: u32,
    }

    impl Render for TestPayload {
        fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
            writeln!(w, "Field1: {}", self.field1)?;
            writeln!(w, "Field2: {}", self.field2)?;
            Ok(())
        }
    }

    fn render(format: OutputFormat, payload: &TestPayload) -> String {
        let mut buffer = Vec::new();
        OutputWriter::new(format)
            .render_to(&mut buffer, payload)
            .expect("rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    fn record(format: OutputFormat, line: &ParsedLine) -> String {
        let mut buffer = Vec::new();
        OutputWriter::new(format)
            .write_record(&mut buffer, line)
            .expect("record should render");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_render_text_format() {
        let output = render(
            OutputFormat::Text,
            &TestPayload {
                field1: "test value".to_owned(),
                field2: 42,
            },
        );
        assert!(output.contains("Field1: test value"));
        assert!(output.contains("Field2: 42"));
    }

    #[test]
    fn test_render_json_is_pretty() {
        let output = render(
            OutputFormat::Json,
            &TestPayload {
                field1: "test".to_owned(),
                field2: 100,
            },
        );
        assert!(output.contains('\n'), "pretty JSON should contain newlines");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(parsed["field1"].as_str(), Some("test"));
        assert_eq!(parsed["field2"].as_u64(), Some(100));
    }

    #[test]
    fn test_write_record_text() {
        let parsed = CfSyslogParser::default().parse(APP_LINE).expect("should parse");
        let output = record(OutputFormat::Text, &parsed);
        assert_eq!(
            output,
            "2024-01-15T12:00:00+00:00 [info] cell-1 my-app: Listening on 8080\n"
        );
    }

    #[test]
    fn test_write_record_ndjson() {
        let parsed = CfSyslogParser::default().parse(APP_LINE).expect("should parse");
        let output = record(OutputFormat::Json, &parsed);

        assert_eq!(output.lines().count(), 1, "NDJSON should be a single line");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(value["time"], "2024-01-15T12:00:00+00:00");
        assert_eq!(value["record"]["header"]["proc_id"], "[APP/PROC/WEB/0]");
        assert_eq!(value["record"]["structured_data"]["tags@47450"]["origin"], "rep");
        assert_eq!(value["record"]["message"], "Listening on 8080");
        assert!(value["record"].get("access_log").is_none());

        let text = record(OutputFormat::Text, &parsed);
        let text_time = text.split(' ').next().expect("text starts with time");
        assert_eq!(value["time"], text_time, "json and text should agree on time");
    }

    #[test]
    fn test_write_record_text_with_access_log() {
        let config = ParserConfigBuilder::new()
            .parse_access_log(true)
            .build()
            .expect("valid config");
        let parser = CfSyslogParser::new(config).expect("valid parser");
        let parsed = parser.parse(ROUTER_LINE).expect("should parse");
        let output = record(OutputFormat::Text, &parsed);
        assert!(output.contains("(access: GET /styles.css 304 -> 10.0.1.2:61000)"));
    }

    #[test]
    fn test_render_text_unicode_content() {
        let output = render(
            OutputFormat::Text,
            &TestPayload {
                field1: "Unicode: 日本語 한글 🦀".to_owned(),
                field2: 0,
            },
        );
        assert!(output.contains("日本語"));
        assert!(output.contains("🦀"));
    }
}
