//! PRI 필드 파서 (RFC 5424 Section 6.2.1)
//!
//! `<N>` 형식의 우선순위 값을 facility와 severity로 분해합니다.

use cfsyslog_core::types::{Pri, SyslogSeverity};

use crate::error::ParserError;

/// 부분 문자열을 음이 아닌 정수로 해석합니다.
///
/// ASCII 숫자만 허용합니다. 부호, 공백, 진법 접두사는 거부되며
/// `u32` 범위를 넘으면 `None`입니다.
pub fn parse_integer(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// 라인 앞머리의 PRI를 파싱합니다.
///
/// 성공하면 `Pri`와 닫는 `>`의 바이트 인덱스를 반환합니다.
/// facility 상한은 검사하지 않습니다.
pub fn parse_pri(text: &str) -> Result<(Pri, usize), ParserError> {
    if !text.starts_with('<') {
        return Err(ParserError::MalformedPri {
            reason: "missing '<'",
        });
    }

    let end = text[1..]
        .find('>')
        .map(|i| i + 1)
        .ok_or(ParserError::MalformedPri {
            reason: "unterminated PRI",
        })?;

    if end < 2 {
        return Err(ParserError::MalformedPri {
            reason: "empty PRI value",
        });
    }

    let value = parse_integer(&text[1..end]).ok_or(ParserError::MalformedPri {
        reason: "PRI value is not a non-negative integer",
    })?;

    let pri = Pri {
        facility: value >> 3,
        severity: SyslogSeverity::from_pri(value),
    };
    Ok((pri, end))
}
