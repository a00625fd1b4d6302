//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 파서는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더(익스포터) 설치는 호스트의 몫이며, 설치되지 않은 경우 호출은 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `cfsyslog_`
//! - 모듈명: `parser_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(cfsyslog_core::metrics::PARSER_LINES_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 실패 단계 레이블 키 (pri, header, version, timestamp, structured_data, input)
pub const LABEL_STAGE: &str = "stage";

// ─── Parser 메트릭 ─────────────────────────────────────────────────

/// Parser: 파싱을 시도한 전체 라인 수 (counter)
pub const PARSER_LINES_TOTAL: &str = "cfsyslog_parser_lines_total";

/// Parser: 파싱 불가 라인 수 (counter, label: stage)
pub const PARSER_UNPARSABLE_TOTAL: &str = "cfsyslog_parser_unparsable_total";

/// Parser: 액세스 로그 접두부 매칭 실패 수 (counter)
pub const PARSER_ACCESS_LOG_MISSES_TOTAL: &str = "cfsyslog_parser_access_log_misses_total";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(
        PARSER_LINES_TOTAL,
        "Total number of lines handed to the syslog parser"
    );
    describe_counter!(
        PARSER_UNPARSABLE_TOTAL,
        "Total number of lines rejected as unparsable, by failing stage"
    );
    describe_counter!(
        PARSER_ACCESS_LOG_MISSES_TOTAL,
        "Total number of router lines whose access-log prefix did not match"
    );
}
