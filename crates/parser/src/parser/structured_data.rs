//! Structured Data 파서 (RFC 5424 Section 6.3)
//!
//! ```text
//! "[" SD-ID ( SP | SD-PARAM )* "]"
//! SD-ID    := [a-zA-Z_-]+ ("@" [0-9]+)?
//! SD-PARAM := [a-zA-Z0-9_-]+ "=" DQUOTE VALUE DQUOTE
//! ```
//!
//! 값 안의 `"`, `]`, `\`는 반드시 `\`로 이스케이프되어야 하며, `\`는 바로 다음 한 글자를
//! 이스케이프합니다. 값은 이스케이프 시퀀스를 그대로 유지한 채 저장됩니다.
//!
//! 요소 스캐너는 이스케이프 상태를 가진 단일 패스 바이트 스캐너로, 입력 길이에 선형입니다.

use cfsyslog_core::types::{NILVALUE, SdParams, StructuredData};

use crate::error::ParserError;

/// 한 개의 SD-ELEMENT 스캔 결과
///
/// 슬라이스는 모두 입력 문자열을 빌립니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdElement<'a> {
    /// SD-ID (`@<enterprise-number>` 포함)
    pub id: &'a str,
    /// (이름, 원문 값) 목록, 등장 순서
    pub params: Vec<(&'a str, &'a str)>,
    /// `[`부터 `]`까지 소비한 바이트 수
    pub len: usize,
}

/// 요소 스캔 실패
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    /// 요소 시작 기준 바이트 오프셋
    pub offset: usize,
    pub reason: &'static str,
}

impl ScanError {
    fn at(offset: usize, reason: &'static str) -> Self {
        Self { offset, reason }
    }
}

fn is_sd_id_char(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'-'
}

fn is_param_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// 입력 맨 앞에서 SD-ELEMENT 하나를 스캔합니다.
///
/// 파라미터 사이의 공백은 0개 이상 허용합니다 (`a="1"b="2"`, `a="1"  b="2"` 모두 유효).
pub fn scan_element(input: &str) -> Result<SdElement<'_>, ScanError> {
    let bytes = input.as_bytes();

    if bytes.first() != Some(&b'[') {
        return Err(ScanError::at(0, "expected '['"));
    }
    let mut pos = 1;

    // SD-ID
    let id_start = pos;
    while bytes.get(pos).is_some_and(|&b| is_sd_id_char(b)) {
        pos += 1;
    }
    if pos == id_start {
        return Err(ScanError::at(pos, "empty SD-ID"));
    }
    if bytes.get(pos) == Some(&b'@') {
        pos += 1;
        let number_start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        if pos == number_start {
            return Err(ScanError::at(pos, "enterprise number must be digits"));
        }
    }
    let id = &input[id_start..pos];

    let mut params = Vec::new();
    loop {
        match bytes.get(pos) {
            None => return Err(ScanError::at(pos, "unterminated element")),
            Some(b' ') => pos += 1,
            Some(b']') => {
                pos += 1;
                break;
            }
            Some(&b) if is_param_name_char(b) => {
                let name_start = pos;
                while bytes.get(pos).is_some_and(|&b| is_param_name_char(b)) {
                    pos += 1;
                }
                let name = &input[name_start..pos];

                if bytes.get(pos) != Some(&b'=') {
                    return Err(ScanError::at(pos, "expected '=' after parameter name"));
                }
                pos += 1;
                if bytes.get(pos) != Some(&b'"') {
                    return Err(ScanError::at(pos, "parameter value must be quoted"));
                }
                pos += 1;

                let value_start = pos;
                loop {
                    match bytes.get(pos) {
                        None => return Err(ScanError::at(pos, "unterminated parameter value")),
                        Some(b'\\') => {
                            if pos + 1 >= bytes.len() {
                                return Err(ScanError::at(pos, "dangling escape"));
                            }
                            pos += 2;
                        }
                        Some(b'"') => break,
                        Some(b']') => {
                            return Err(ScanError::at(pos, "unescaped ']' in parameter value"));
                        }
                        Some(_) => pos += 1,
                    }
                }
                params.push((name, &input[value_start..pos]));
                // 닫는 따옴표
                pos += 1;
            }
            Some(_) => return Err(ScanError::at(pos, "unexpected character in element")),
        }
    }

    Ok(SdElement {
        id,
        params,
        len: pos,
    })
}

/// `start` 위치의 Structured Data 블록을 파싱합니다.
///
/// - `-` (NILVALUE): 빈 매핑, 한 글자만 소비
/// - `[`: 인접한 요소를 가능한 만큼 소비. 첫 요소가 실패하면 에러,
///   이후 요소가 실패하면 그 위치에서 멈춥니다 (나머지는 메시지가 됨)
///
/// 같은 SD-ID나 같은 파라미터 이름이 반복되면 나중 값이 앞의 값을 덮어씁니다.
/// 성공하면 매핑과 블록 끝 위치를 반환합니다.
pub fn parse_structured_data(
    text: &str,
    start: usize,
) -> Result<(StructuredData, usize), ParserError> {
    let rest = text.get(start..).unwrap_or_default();

    if rest.starts_with(NILVALUE) {
        return Ok((StructuredData::new(), start + NILVALUE.len()));
    }
    if !rest.starts_with('[') {
        let reason = if rest.is_empty() {
            "missing structured data"
        } else {
            "expected '-' or '['"
        };
        return Err(ParserError::MalformedStructuredData {
            offset: start,
            reason,
        });
    }

    let mut sd = StructuredData::new();
    let mut cursor = start;

    let first = scan_element(rest).map_err(|e| ParserError::MalformedStructuredData {
        offset: start + e.offset,
        reason: e.reason,
    })?;
    cursor += first.len;
    insert_element(&mut sd, first);

    while let Ok(element) = scan_element(&text[cursor..]) {
        cursor += element.len;
        insert_element(&mut sd, element);
    }

    Ok((sd, cursor))
}

fn insert_element(sd: &mut StructuredData, element: SdElement<'_>) {
    let params: SdParams = element
        .params
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect();
    sd.insert(element.id.to_owned(), params);
}
