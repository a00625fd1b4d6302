#![no_main]

use arbitrary::Arbitrary;
use cfsyslog_parser::parser::access_log::parse_access_log;
use libfuzzer_sys::fuzz_target;

/// 퍼저용 구조적 입력 -- 접두부 형태를 유지한 액세스 로그
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    host: String,
    timestamp: String,
    request: String,
    status: String,
    referer: String,
    user_agent: String,
    /// 접두부 이후 `key:value` 토큰 (최대 16개 사용)
    extra: Vec<(String, String)>,
    tail: String,
}

fuzz_target!(|input: FuzzInput| {
    let mut message = format!(
        r#"{} - [{}] "{}" {} 0 0 "{}" "{}" "remote" "backend""#,
        input.host, input.timestamp, input.request, input.status, input.referer, input.user_agent
    );
    for (key, value) in input.extra.iter().take(16) {
        message.push(' ');
        message.push_str(key);
        message.push(':');
        message.push_str(value);
    }
    message.push_str(&input.tail);

    if let Some(log) = parse_access_log(&message) {
        assert!(!log.host.is_empty());
        assert!(!log.status.is_empty());
    }
    let _ = parse_access_log(&input.tail);
});
