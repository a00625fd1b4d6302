//! 에러 타입 -- 도메인별 에러 정의

/// cfsyslog 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum CfSyslogError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파싱 에러
///
/// 파서 경계에서는 실패 단계를 구분하지 않습니다.
/// 어느 단계에서 실패했는지는 파서 크레이트의 상세 에러와 로그로만 확인할 수 있습니다.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 파싱 불가 라인
    #[error("unparsable line")]
    Unparsable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_display() {
        let err = CfSyslogError::from(ParseError::Unparsable);
        assert_eq!(err.to_string(), "parse error: unparsable line");
    }

    #[test]
    fn invalid_value_display_names_field() {
        let err = ConfigError::InvalidValue {
            field: "parser.max_input_size".to_owned(),
            reason: "must be greater than 0".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("parser.max_input_size"));
        assert!(msg.contains("greater than 0"));
    }

    #[test]
    fn config_error_converts_to_top_level() {
        let err: CfSyslogError = ConfigError::FileNotFound {
            path: "cfsyslog.toml".to_owned(),
        }
        .into();
        assert!(matches!(err, CfSyslogError::Config(_)));
    }
}
