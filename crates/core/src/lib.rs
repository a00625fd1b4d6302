//! cfsyslog 공통 크레이트
//!
//! 파서와 호스트(CLI)가 공유하는 도메인 타입, 에러, 설정, trait, 메트릭 이름을 정의합니다.

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{CfSyslogError, ConfigError, ParseError};

// 설정
pub use config::{CfSyslogConfig, GeneralConfig, SyslogParserConfig};

// 파이프라인 trait
pub use pipeline::{LineParser, TimeResolver};

// 도메인 타입
pub use types::{
    AccessLog, FieldValue, Header, ParsedLine, ParsedMessage, Pri, SdParams, StructuredData,
    SyslogSeverity,
};
