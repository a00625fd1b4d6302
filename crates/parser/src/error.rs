//! 파서 에러 타입
//!
//! [`ParserError`]는 파싱 단계별 실패 사유를 표현합니다.
//! `From<ParserError> for CfSyslogError` 변환이 구현되어 있으며, 이 경계에서
//! 모든 파싱 실패는 단일한 `ParseError::Unparsable`로 합쳐집니다.

use cfsyslog_core::error::{CfSyslogError, ConfigError, ParseError};

/// 파서 도메인 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    /// 빈 입력
    #[error("empty input")]
    EmptyInput,

    /// 최대 입력 크기 초과
    #[error("input too large: {size} bytes (max: {max})")]
    InputTooLarge {
        /// 입력 크기 (바이트)
        size: usize,
        /// 허용 최대 크기 (바이트)
        max: usize,
    },

    /// PRI 필드 해석 실패
    #[error("malformed PRI: {reason}")]
    MalformedPri {
        /// 실패 사유
        reason: &'static str,
    },

    /// 헤더 필드 누락 또는 빈 필드
    #[error("malformed header: missing or empty {field}")]
    MalformedHeader {
        /// 읽지 못한 헤더 필드 이름
        field: &'static str,
    },

    /// VERSION이 "1"이 아님
    #[error("unsupported syslog version '{version}'")]
    UnsupportedVersion {
        /// 원문 버전 토큰
        version: String,
    },

    /// 타임스탬프를 설정된 패턴으로 해석할 수 없음
    #[error("unparsable timestamp '{timestamp}'")]
    UnparsableTimestamp {
        /// 원문 타임스탬프 토큰
        timestamp: String,
    },

    /// Structured Data 형식 오류
    #[error("malformed structured data at offset {offset}: {reason}")]
    MalformedStructuredData {
        /// 실패 위치 (라인 내 바이트 오프셋)
        offset: usize,
        /// 실패 사유
        reason: &'static str,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl ParserError {
    /// 실패 단계 이름 (메트릭 레이블, 로그 필드용)
    pub fn stage(&self) -> &'static str {
        match self {
            Self::EmptyInput | Self::InputTooLarge { .. } => "input",
            Self::MalformedPri { .. } => "pri",
            Self::MalformedHeader { .. } => "header",
            Self::UnsupportedVersion { .. } => "version",
            Self::UnparsableTimestamp { .. } => "timestamp",
            Self::MalformedStructuredData { .. } => "structured_data",
            Self::Config { .. } => "config",
        }
    }
}

impl From<ParserError> for CfSyslogError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::Config { field, reason } => {
                CfSyslogError::Config(ConfigError::InvalidValue { field, reason })
            }
            _ => CfSyslogError::Parse(ParseError::Unparsable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_data_error_display() {
        let err = ParserError::MalformedStructuredData {
            offset: 42,
            reason: "unescaped ']' in parameter value",
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("unescaped"));
    }

    #[test]
    fn header_error_names_field() {
        let err = ParserError::MalformedHeader { field: "hostname" };
        assert!(err.to_string().contains("hostname"));
        assert_eq!(err.stage(), "header");
    }

    #[test]
    fn parse_failures_collapse_to_unparsable() {
        let errors = [
            ParserError::EmptyInput,
            ParserError::InputTooLarge { size: 10, max: 5 },
            ParserError::MalformedPri { reason: "missing '<'" },
            ParserError::UnsupportedVersion {
                version: "2".to_owned(),
            },
            ParserError::UnparsableTimestamp {
                timestamp: "yesterday".to_owned(),
            },
        ];
        for err in errors {
            let top: CfSyslogError = err.into();
            assert!(matches!(top, CfSyslogError::Parse(ParseError::Unparsable)));
        }
    }

    #[test]
    fn config_error_stays_config() {
        let err = ParserError::Config {
            field: "max_input_size".to_owned(),
            reason: "must be greater than 0".to_owned(),
        };
        let top: CfSyslogError = err.into();
        assert!(matches!(
            top,
            CfSyslogError::Config(ConfigError::InvalidValue { .. })
        ));
    }
}
