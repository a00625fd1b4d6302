#![no_main]

use arbitrary::Arbitrary;
use cfsyslog_core::pipeline::TimeResolver;
use cfsyslog_parser::PatternTimeResolver;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    pattern: String,
    timestamp: String,
}

fuzz_target!(|input: FuzzInput| {
    // 잘못된 패턴은 생성 단계에서 거부되고, 해석은 패닉 없이 None을 돌려줘야 한다
    if let Ok(resolver) = PatternTimeResolver::new(&input.pattern) {
        let _ = resolver.resolve(&input.timestamp);
    }
    let _ = PatternTimeResolver::default().resolve(&input.timestamp);
});
