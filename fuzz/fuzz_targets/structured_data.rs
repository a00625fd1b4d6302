#![no_main]

use cfsyslog_parser::parser::structured_data::{parse_structured_data, scan_element};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(element) = scan_element(text) {
        assert!(element.len <= text.len());
        assert!(text.is_char_boundary(element.len));
    }

    // 커서는 입력 범위 안, 문자 경계에 있어야 한다
    if let Ok((_, cursor)) = parse_structured_data(text, 0) {
        assert!(cursor <= text.len());
        assert!(text.is_char_boundary(cursor));
    }
});
