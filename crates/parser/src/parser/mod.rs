//! 파싱 모듈 -- 문법 단위별 파서와 오케스트레이터
//!
//! 잎 단계부터:
//! - [`pri`]: `<N>` 우선순위 -> facility / severity
//! - [`header`]: 공백 구분 헤더 필드 6개
//! - [`structured_data`]: `[SD-ID param="value" ...]` 요소 스캐너와 블록 파서
//! - [`message`]: 나머지 텍스트
//! - [`access_log`]: 라우터 HTTP 액세스 로그 하위 파서
//! - [`timestamp`]: 패턴 기반 타임스탬프 해석기
//! - [`cf_syslog`]: 위 단계를 순서대로 실행하는 [`CfSyslogParser`]

pub mod access_log;
pub mod cf_syslog;
pub mod header;
pub mod message;
pub mod pri;
pub mod structured_data;
pub mod timestamp;

pub use cf_syslog::CfSyslogParser;
pub use timestamp::PatternTimeResolver;
