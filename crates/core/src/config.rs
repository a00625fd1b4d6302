//! 설정 관리 -- cfsyslog.toml 파싱 및 런타임 설정
//!
//! [`CfSyslogConfig`]는 로깅과 파서 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`CFSYSLOG_PARSER_PARSE_ACCESS_LOG=true` 형식)
//! 3. 설정 파일 (`cfsyslog.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), cfsyslog_core::error::CfSyslogError> {
//! use cfsyslog_core::config::CfSyslogConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = CfSyslogConfig::load("cfsyslog.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = CfSyslogConfig::parse("[parser]\nparse_access_log = true")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CfSyslogError, ConfigError};

/// 기본 타임스탬프 패턴 (strftime, `%L` = 밀리초 소수부)
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%dT%H:%M:%S.%L%z";

/// cfsyslog 통합 설정
///
/// `cfsyslog.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CfSyslogConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 파서 설정
    #[serde(default)]
    pub parser: SyslogParserConfig,
}

impl CfSyslogConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CfSyslogError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 기본값에 환경변수 오버라이드만 적용한 설정을 만듭니다.
    ///
    /// 설정 파일 없이 실행할 때 사용합니다.
    pub fn from_env() -> Result<Self, CfSyslogError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CfSyslogError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CfSyslogError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                CfSyslogError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, CfSyslogError> {
        toml::from_str(toml_str).map_err(|e| {
            CfSyslogError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `CFSYSLOG_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "CFSYSLOG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "CFSYSLOG_GENERAL_LOG_FORMAT");

        // Parser
        override_bool(
            &mut self.parser.parse_access_log,
            "CFSYSLOG_PARSER_PARSE_ACCESS_LOG",
        );
        override_bool(
            &mut self.parser.include_raw_message,
            "CFSYSLOG_PARSER_INCLUDE_RAW_MESSAGE",
        );
        override_string(
            &mut self.parser.timestamp_pattern,
            "CFSYSLOG_PARSER_TIMESTAMP_PATTERN",
        );
        override_usize(
            &mut self.parser.max_input_size,
            "CFSYSLOG_PARSER_MAX_INPUT_SIZE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), CfSyslogError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.parser.timestamp_pattern.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "parser.timestamp_pattern".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.parser.max_input_size == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "parser.max_input_size".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 파서 설정 (`[parser]` 섹션)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyslogParserConfig {
    /// 라우터 액세스 로그 하위 파싱 활성화
    pub parse_access_log: bool,
    /// 원문 라인을 레코드에 포함
    pub include_raw_message: bool,
    /// 헤더 타임스탬프 해석 패턴
    pub timestamp_pattern: String,
    /// 최대 입력 크기 (바이트), 없으면 제한 없음
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_size: Option<usize>,
}

impl Default for SyslogParserConfig {
    fn default() -> Self {
        Self {
            parse_access_log: false,
            include_raw_message: false,
            timestamp_pattern: DEFAULT_TIMESTAMP_PATTERN.to_owned(),
            max_input_size: None,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut Option<usize>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
