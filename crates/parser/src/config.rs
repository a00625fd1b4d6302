//! 파서 설정
//!
//! [`ParserConfig`]는 core의 [`SyslogParserConfig`](cfsyslog_core::config::SyslogParserConfig)
//! (`[parser]` 섹션)를 기반으로 파서 동작을 결정합니다.
//!
//! # 사용 예시
//! ```
//! use cfsyslog_core::config::CfSyslogConfig;
//! use cfsyslog_parser::config::{ParserConfig, ParserConfigBuilder};
//!
//! let core_config = CfSyslogConfig::default();
//! let config = ParserConfig::from_core(&core_config.parser);
//! assert!(!config.parse_access_log);
//!
//! let config = ParserConfigBuilder::new()
//!     .parse_access_log(true)
//!     .build()
//!     .unwrap();
//! assert!(config.parse_access_log);
//! ```

use cfsyslog_core::config::{DEFAULT_TIMESTAMP_PATTERN, SyslogParserConfig};
use serde::{Deserialize, Serialize};

use crate::error::ParserError;
use crate::parser::timestamp::PatternTimeResolver;

/// 파서 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// `tags@47450` origin이 `gorouter`인 라인의 메시지를 액세스 로그로 추가 파싱
    pub parse_access_log: bool,
    /// 원문 라인을 `raw` 필드에 포함
    pub include_raw_message: bool,
    /// 헤더 타임스탬프 해석 패턴
    pub timestamp_pattern: String,
    /// 최대 입력 크기 (바이트), `None`이면 제한 없음
    pub max_input_size: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            parse_access_log: false,
            include_raw_message: false,
            timestamp_pattern: DEFAULT_TIMESTAMP_PATTERN.to_owned(),
            max_input_size: None,
        }
    }
}

impl ParserConfig {
    /// core의 `[parser]` 섹션에서 파서 설정을 생성합니다.
    pub fn from_core(core: &SyslogParserConfig) -> Self {
        Self {
            parse_access_log: core.parse_access_log,
            include_raw_message: core.include_raw_message,
            timestamp_pattern: core.timestamp_pattern.clone(),
            max_input_size: core.max_input_size,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ParserError> {
        if self.max_input_size == Some(0) {
            return Err(ParserError::Config {
                field: "max_input_size".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        PatternTimeResolver::new(&self.timestamp_pattern)?;

        Ok(())
    }
}

/// 파서 설정 빌더
#[derive(Default)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 액세스 로그 하위 파싱 여부를 설정합니다.
    pub fn parse_access_log(mut self, enabled: bool) -> Self {
        self.config.parse_access_log = enabled;
        self
    }

    /// 원문 포함 여부를 설정합니다.
    pub fn include_raw_message(mut self, enabled: bool) -> Self {
        self.config.include_raw_message = enabled;
        self
    }

    /// 타임스탬프 패턴을 설정합니다.
    pub fn timestamp_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.timestamp_pattern = pattern.into();
        self
    }

    /// 최대 입력 크기를 설정합니다. 기본값은 제한 없음입니다.
    pub fn max_input_size(mut self, size: usize) -> Self {
        self.config.max_input_size = Some(size);
        self
    }

    /// 설정을 검증하고 `ParserConfig`를 생성합니다.
    pub fn build(self) -> Result<ParserConfig, ParserError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        ParserConfig::default().validate().unwrap();
    }

    #[test]
    fn from_core_preserves_values() {
        let core = SyslogParserConfig {
            parse_access_log: true,
            include_raw_message: true,
            timestamp_pattern: "%Y-%m-%d %H:%M:%S".to_owned(),
            max_input_size: Some(1024),
        };
        let config = ParserConfig::from_core(&core);
        assert!(config.parse_access_log);
        assert!(config.include_raw_message);
        assert_eq!(config.timestamp_pattern, "%Y-%m-%d %H:%M:%S");
        assert_eq!(config.max_input_size, Some(1024));
    }

    #[test]
    fn validate_rejects_zero_max_input_size() {
        let config = ParserConfig {
            max_input_size: Some(0),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_input_size"));
    }

    #[test]
    fn default_has_no_input_limit() {
        assert_eq!(ParserConfig::default().max_input_size, None);
        assert_eq!(
            ParserConfig::from_core(&SyslogParserConfig::default()).max_input_size,
            None
        );
    }

    #[test]
    fn validate_rejects_bad_pattern() {
        let config = ParserConfig {
            timestamp_pattern: "%Y %!".to_owned(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ParserError::Config { .. })
        ));
    }

    #[test]
    fn builder_creates_valid_config() {
        let config = ParserConfigBuilder::new()
            .parse_access_log(true)
            .include_raw_message(true)
            .timestamp_pattern("%Y-%m-%dT%H:%M:%S%z")
            .max_input_size(2048)
            .build()
            .unwrap();
        assert!(config.parse_access_log);
        assert!(config.include_raw_message);
        assert_eq!(config.timestamp_pattern, "%Y-%m-%dT%H:%M:%S%z");
        assert_eq!(config.max_input_size, Some(2048));
    }

    #[test]
    fn builder_rejects_invalid_config() {
        assert!(ParserConfigBuilder::new().max_input_size(0).build().is_err());
    }
}
