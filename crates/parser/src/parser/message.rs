//! 메시지 추출 -- Structured Data 이후 나머지 텍스트

/// `cursor` 이후의 텍스트를 trim하여 메시지로 반환합니다.
///
/// 남은 텍스트가 없으면 빈 문자열입니다.
pub fn extract_message(text: &str, cursor: usize) -> String {
    text.get(cursor..).unwrap_or_default().trim().to_owned()
}
