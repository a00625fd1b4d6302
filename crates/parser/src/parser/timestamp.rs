//! 헤더 타임스탬프 해석기
//!
//! strftime 스타일 패턴(`%L` 밀리초, `%N` 나노초 확장 포함)을 chrono 형식 문자열로
//! 변환하여 타임스탬프를 해석합니다.
//!
//! # 패턴 변환
//! - `.%L`, `.%N` -> `%.f` (소수부 자릿수 자유, 생략 가능)
//! - `%L` -> `%3f`, `%N` -> `%9f`
//! - 그 외는 그대로 전달
//!
//! 패턴에 `%z`가 있으면 입력 끝의 `Z`/`z`를 `+0000`으로 바꿔 해석합니다.
//! 패턴에 오프셋이 없으면 UTC로 간주합니다.
//!
//! # 소수부 생략 허용
//! chrono의 `%.f`는 점과 소수부를 함께 생략할 수 있습니다. 따라서 기본 패턴
//! (`...%S.%L%z`)은 `1985-04-12T23:20:50Z`처럼 소수부가 없는 타임스탬프도 받아들입니다.
//! strptime의 `.%L`보다 느슨하며, 소수부가 있는 입력의 해석 결과는 같습니다.

use std::borrow::Cow;

use cfsyslog_core::config::DEFAULT_TIMESTAMP_PATTERN;
use cfsyslog_core::pipeline::TimeResolver;
use chrono::format::{Fixed, Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::error::ParserError;

/// 패턴 기반 [`TimeResolver`] 구현
#[derive(Debug, Clone)]
pub struct PatternTimeResolver {
    /// 설정된 원본 패턴
    pattern: String,
    /// chrono 형식 문자열
    format: String,
    /// 패턴에 UTC 오프셋이 포함되어 있는지
    has_offset: bool,
    /// 끝의 `Z`를 `+0000`으로 정규화할지 (`%z` 사용 시)
    zulu_as_utc: bool,
}

impl PatternTimeResolver {
    /// 패턴을 검증하고 해석기를 생성합니다.
    pub fn new(pattern: &str) -> Result<Self, ParserError> {
        if pattern.trim().is_empty() {
            return Err(ParserError::Config {
                field: "timestamp_pattern".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        let resolver = Self::compile(pattern);
        if StrftimeItems::new(&resolver.format).any(|item| matches!(item, Item::Error)) {
            return Err(ParserError::Config {
                field: "timestamp_pattern".to_owned(),
                reason: format!("invalid strftime pattern '{pattern}'"),
            });
        }
        Ok(resolver)
    }

    fn compile(pattern: &str) -> Self {
        let format = translate_pattern(pattern);
        let mut has_offset = false;
        let mut zulu_as_utc = false;
        for item in StrftimeItems::new(&format) {
            match item {
                Item::Fixed(Fixed::TimezoneOffset) => {
                    has_offset = true;
                    zulu_as_utc = true;
                }
                Item::Fixed(
                    Fixed::TimezoneOffsetColon
                    | Fixed::TimezoneOffsetDoubleColon
                    | Fixed::TimezoneOffsetTripleColon
                    | Fixed::TimezoneOffsetColonZ
                    | Fixed::TimezoneOffsetZ
                    | Fixed::RFC2822
                    | Fixed::RFC3339,
                ) => has_offset = true,
                _ => {}
            }
        }
        Self {
            pattern: pattern.to_owned(),
            format,
            has_offset,
            zulu_as_utc,
        }
    }

    /// 설정된 원본 패턴
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// 변환된 chrono 형식 문자열
    pub fn chrono_format(&self) -> &str {
        &self.format
    }
}

impl Default for PatternTimeResolver {
    fn default() -> Self {
        Self::compile(DEFAULT_TIMESTAMP_PATTERN)
    }
}

impl TimeResolver for PatternTimeResolver {
    fn resolve(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        let zulu = raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z'));
        let input: Cow<'_, str> = match zulu {
            Some(head) if self.zulu_as_utc => Cow::Owned(format!("{head}+0000")),
            _ => Cow::Borrowed(raw),
        };

        if self.has_offset {
            DateTime::parse_from_str(&input, &self.format).ok()
        } else {
            NaiveDateTime::parse_from_str(&input, &self.format)
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        }
    }
}

/// strftime 확장 지시자를 chrono 형식으로 변환합니다.
fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        let (replacement, consumed) = if rest.starts_with(".%L") || rest.starts_with(".%N") {
            ("%.f", 3)
        } else if rest.starts_with("%L") {
            ("%3f", 2)
        } else if rest.starts_with("%N") {
            ("%9f", 2)
        } else if rest.starts_with("%%") {
            ("%%", 2)
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        };
        out.push_str(replacement);
        rest = &rest[consumed..];
    }
    out
}
