//! 라우터(gorouter) HTTP 액세스 로그 하위 파서
//!
//! ```text
//! <host> - [<timestamp>] "<method> <pathname> <protocol>" <status> <bytes_received> <bytes_sent> "<referer>" "<user_agent>" "<remote_address>" "<backend_address>" key:value ...
//! ```
//!
//! 고정 레이아웃 접두부를 매칭한 뒤, 나머지에서 `key:value` 토큰을 왼쪽부터 겹치지 않게 찾습니다.
//! 값은 숫자(`[0-9.]+`), 따옴표 문자열, NILVALUE(`-`) 중 하나입니다.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use cfsyslog_core::types::{AccessLog, FieldValue};
use regex::{Captures, Regex};

static PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^(?P<host>[^ ]+) - \[(?P<timestamp>[^\]]+)\] "#,
        r#""(?P<method>[^ ]+) (?P<pathname>[^ ]+) (?P<protocol>[^"]+)" "#,
        r#"(?P<status>[^ ]+) (?P<bytes_received>[^ ]+) (?P<bytes_sent>[^ ]+) "#,
        r#""(?P<referer>[^"]+)" "(?P<user_agent>[^"]+)" "#,
        r#""(?P<remote_address>[^"]+)" "(?P<backend_address>[^"]+)""#,
    ))
    .unwrap()
});

static EXTRA_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(?P<param>[a-zA-Z0-9_-]+):(?P<value>[0-9.]+|"[^"]+"|-)(?: |\n|\\|$)"#)
        .unwrap()
});

/// 메시지를 액세스 로그로 파싱합니다.
///
/// 접두부가 매칭되지 않으면 `None`입니다.
pub fn parse_access_log(message: &str) -> Option<AccessLog> {
    let caps = PREFIX_REGEX.captures(message)?;
    let prefix_end = caps.get(0)?.end();
    let field = |name: &str| capture(&caps, name);

    Some(AccessLog {
        host: field("host"),
        timestamp: field("timestamp"),
        method: field("method"),
        pathname: field("pathname"),
        protocol: field("protocol"),
        status: field("status"),
        bytes_received: field("bytes_received"),
        bytes_sent: field("bytes_sent"),
        referer: field("referer"),
        user_agent: field("user_agent"),
        remote_address: field("remote_address"),
        backend_address: field("backend_address"),
        extra: parse_extra_fields(message[prefix_end..].trim()),
    })
}

fn capture(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_owned())
        .unwrap_or_default()
}

/// 접두부 이후의 `key:value` 토큰을 추출합니다.
///
/// 형식에 맞지 않는 토큰은 건너뜁니다. 같은 키가 반복되면 나중 값이 남습니다.
pub fn parse_extra_fields(text: &str) -> BTreeMap<String, FieldValue> {
    EXTRA_FIELD_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let param = caps.name("param")?.as_str();
            let value = caps.name("value")?.as_str();
            Some((param.to_owned(), coerce_value(value)))
        })
        .collect()
}

/// 토큰 값을 타입이 지정된 값으로 변환합니다.
///
/// - `"..."` -> 따옴표를 벗긴 `Text`
/// - `^[0-9]+(\.[0-9]+)?$` -> `Number`
/// - 그 외 (`-`, `1.2.3` 등) -> 원문 `Text`
pub fn coerce_value(raw: &str) -> FieldValue {
    if let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return FieldValue::Text(inner.to_owned());
    }
    if is_number_literal(raw) {
        if let Ok(n) = raw.parse::<f64>() {
            return FieldValue::Number(n);
        }
    }
    FieldValue::Text(raw.to_owned())
}

fn is_number_literal(raw: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match raw.split_once('.') {
        Some((int, frac)) => digits(int) && digits(frac),
        None => digits(raw),
    }
}
