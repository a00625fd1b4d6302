//! Integration tests for `cfsyslog parse` command.
//!
//! Feeds drain lines to the built binary through files and stdin.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const APP_LINE: &str = r#"<14>1 2024-01-15T12:00:00.123456+00:00 org.space.app 6a2b-41d4 [APP/PROC/WEB/0] - [tags@47450 origin="rep" source_type="APP/PROC/WEB"] Listening on 8080"#;

const ROUTER_LINE: &str = concat!(
    r#"<14>1 2021-12-24T22:20:01.438069+00:00 some-hostname some-appname [RTR/0] - "#,
    r#"[tags@47450 __v1_type="LogMessage" origin="gorouter" source_type="RTR"] "#,
    r#"example.com - [2021-12-24T22:20:01.429164095Z] "GET /styles.css HTTP/1.1" 304 0 0 "#,
    r#""https://example.com/" "Mozilla/5.0" "some-remote-host" "some-backend-host" "#,
    r#"x_forwarded_for:"a, b" response_time:0.008452 gorouter_time:0.000625"#,
);

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cfsyslog"));
    cmd.current_dir(dir).args(args).env("RUST_LOG", "error");
    for var in [
        "CFSYSLOG_PARSER_PARSE_ACCESS_LOG",
        "CFSYSLOG_PARSER_INCLUDE_RAW_MESSAGE",
        "CFSYSLOG_PARSER_TIMESTAMP_PATTERN",
        "CFSYSLOG_PARSER_MAX_INPUT_SIZE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn run_with_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = command(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("should spawn cfsyslog");
    let mut stdin = child.stdin.take().expect("stdin is piped");
    if let Err(e) = stdin.write_all(input.as_bytes()) {
        // 입력을 읽기 전에 종료된 경우 (설정 에러 등)
        assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe);
    }
    drop(stdin);
    child.wait_with_output().expect("should wait for cfsyslog")
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect()
}

#[test]
fn test_parse_stdin_ndjson() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let input = format!("{APP_LINE}\n\n{APP_LINE}\n");

    let output = run_with_stdin(temp_dir.path(), &["--output", "json", "parse"], &input);

    assert_eq!(output.status.code(), Some(0));
    let records = json_lines(&output);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["time"], "2024-01-15T12:00:00.123456+00:00");
    assert_eq!(records[0]["record"]["header"]["app_name"], "6a2b-41d4");
    assert_eq!(
        records[0]["record"]["structured_data"]["tags@47450"]["source_type"],
        "APP/PROC/WEB"
    );
    assert_eq!(records[0]["record"]["message"], "Listening on 8080");
}

#[test]
fn test_parse_file_text_output() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let input_path = temp_dir.path().join("drain.log");
    fs::write(&input_path, format!("{APP_LINE}\n")).expect("should write input");

    let output = command(temp_dir.path(), &["parse", "drain.log"])
        .output()
        .expect("should run cfsyslog");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "2024-01-15T12:00:00.123456+00:00 [info] org.space.app 6a2b-41d4: Listening on 8080\n"
    );
}

#[test]
fn test_parse_access_log_flag() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = run_with_stdin(
        temp_dir.path(),
        &["--output", "json", "parse", "--access-log", "--include-raw"],
        ROUTER_LINE,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = json_lines(&output);
    let record = &records[0]["record"];
    assert_eq!(record["access_log"]["method"], "GET");
    assert_eq!(record["access_log"]["status"], "304");
    assert_eq!(record["access_log"]["extra"]["x_forwarded_for"], "a, b");
    assert_eq!(record["access_log"]["extra"]["gorouter_time"], 0.000625);
    assert_eq!(record["raw"], ROUTER_LINE);
}

#[test]
fn test_parse_access_log_from_config_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(
        temp_dir.path().join("cfsyslog.toml"),
        "[parser]\nparse_access_log = true\n",
    )
    .expect("should write config");

    let output = run_with_stdin(temp_dir.path(), &["--output", "json", "parse"], ROUTER_LINE);

    let records = json_lines(&output);
    assert_eq!(records[0]["record"]["access_log"]["pathname"], "/styles.css");
}

#[test]
fn test_parse_skips_unparsable_lines() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let input = format!("not syslog\n{APP_LINE}\n<13>2 2024-01-15T12:00:00Z h a p m - x\n");

    let output = run_with_stdin(temp_dir.path(), &["--output", "json", "parse"], &input);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(json_lines(&output).len(), 1);
}

#[test]
fn test_parse_strict_exit_code() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let input = format!("{APP_LINE}\nfoo bar\n");

    let output = run_with_stdin(temp_dir.path(), &["parse", "--strict"], &input);

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 line(s) could not be parsed"));
}

#[test]
fn test_parse_custom_timestamp_pattern() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let input = "<13>1 20240115120000 h a p m - compact\n";

    let output = run_with_stdin(
        temp_dir.path(),
        &[
            "--output",
            "json",
            "parse",
            "--strict",
            "--timestamp-pattern",
            "%Y%m%d%H%M%S",
        ],
        input,
    );

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(json_lines(&output)[0]["time"], "2024-01-15T12:00:00+00:00");
}

#[test]
fn test_parse_missing_input_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = command(temp_dir.path(), &["parse", "missing.log"])
        .output()
        .expect("should run cfsyslog");

    assert_eq!(output.status.code(), Some(10), "io errors exit with 10");
}

#[test]
fn test_parse_explicit_missing_config() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = command(temp_dir.path(), &["-c", "missing.toml", "parse"])
        .stdin(Stdio::null())
        .output()
        .expect("should run cfsyslog");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_parse_blank_timestamp_pattern_is_config_error() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = command(temp_dir.path(), &["parse", "--timestamp-pattern", " "])
        .stdin(Stdio::null())
        .output()
        .expect("should run cfsyslog");

    assert_eq!(output.status.code(), Some(2));
}
