//! Cloud Foundry syslog 파서
//!
//! loggregator syslog drain이 내보내는 RFC 5424 라인을 구조화된 레코드로 변환합니다.
//! 플랫폼 태그(`tags@47450`)의 origin이 라우터인 라인은 선택적으로 HTTP 액세스 로그로
//! 추가 파싱할 수 있습니다.
//!
//! 파서 자체는 I/O를 하지 않으며, 한 번의 호출은 입력 한 줄에 대해 완결됩니다.
//!
//! # 모듈 구성
//!
//! - [`parser`]: 문법 단위 파서와 오케스트레이터
//! - [`config`]: 파서 설정 (core 설정 확장)
//! - [`error`]: 단계별 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! line -> PRI -> Header -> TimeResolver -> StructuredData -> Message -> (AccessLog)
//!                                                                         |
//!                                              tags@47450 origin="gorouter" && parse_access_log
//! ```

pub mod config;
pub mod error;
pub mod parser;

// --- 주요 타입 re-export ---

// 설정
pub use config::{ParserConfig, ParserConfigBuilder};

// 에러
pub use error::ParserError;

// 파서
pub use parser::{CfSyslogParser, PatternTimeResolver};
