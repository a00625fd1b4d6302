//! 헤더 필드 스캐너 (RFC 5424 Section 6.2)
//!
//! PRI 다음에 오는 여섯 개의 공백 구분 필드를 고정 순서로 읽습니다.
//! 이스케이프나 인용 처리가 없는 순수 위치 기반 스캔입니다.

use cfsyslog_core::types::Header;

use super::pri::parse_pri;
use crate::error::ParserError;

/// 헤더 필드 구분자
const HEADER_SPLIT_CHAR: char = ' ';

/// 헤더 필드 순서
pub const HEADER_FIELDS: [&str; 6] = [
    "version",
    "timestamp",
    "hostname",
    "app_name",
    "proc_id",
    "msg_id",
];

/// 지원하는 유일한 syslog 버전
const SUPPORTED_VERSION: &str = "1";

/// `start`부터 다음 공백 직전까지의 블록을 읽습니다.
///
/// 블록과 공백 다음 위치를 반환합니다. 공백이 없거나 블록이 비어 있으면 `None`입니다.
pub fn parse_header_block(text: &str, start: usize) -> Option<(&str, usize)> {
    let rest = text.get(start..)?;
    let len = rest.find(HEADER_SPLIT_CHAR)?;
    if len == 0 {
        return None;
    }
    Some((&rest[..len], start + len + 1))
}

/// PRI와 여섯 개의 헤더 필드를 파싱합니다.
///
/// 성공하면 헤더와 Structured Data 시작 위치를 반환합니다.
pub fn parse_header(text: &str) -> Result<(Header, usize), ParserError> {
    let (pri, pri_end) = parse_pri(text)?;

    let mut cursor = pri_end + 1;
    let mut blocks = [""; 6];
    for (slot, field) in blocks.iter_mut().zip(HEADER_FIELDS) {
        let (block, next) =
            parse_header_block(text, cursor).ok_or(ParserError::MalformedHeader { field })?;
        *slot = block;
        cursor = next;
    }

    let [version, timestamp, hostname, app_name, proc_id, msg_id] = blocks;
    if version != SUPPORTED_VERSION {
        return Err(ParserError::UnsupportedVersion {
            version: version.to_owned(),
        });
    }

    let header = Header {
        pri,
        version: 1,
        timestamp: timestamp.to_owned(),
        hostname: hostname.to_owned(),
        app_name: app_name.to_owned(),
        proc_id: proc_id.to_owned(),
        msg_id: msg_id.to_owned(),
    };
    Ok((header, cursor))
}
