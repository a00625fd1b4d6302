#![no_main]

use cfsyslog_core::pipeline::LineParser;
use cfsyslog_parser::{CfSyslogParser, ParserConfigBuilder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    // 크래시나 패닉 없이 Ok 또는 Err을 반환해야 한다
    let _ = CfSyslogParser::default().parse(line);

    let Ok(config) = ParserConfigBuilder::new()
        .parse_access_log(true)
        .include_raw_message(true)
        .build()
    else {
        return;
    };
    let Ok(parser) = CfSyslogParser::new(config) else {
        return;
    };

    // 원문을 다시 파싱하면 같은 레코드가 나와야 한다
    if let Ok(first) = parser.parse(line) {
        let raw = first.record.raw.clone().unwrap_or_default();
        let second = parser.parse(&raw).expect("raw line should parse again");
        assert_eq!(first, second);
    }
});
