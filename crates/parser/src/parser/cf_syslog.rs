//! Cloud Foundry syslog 파서 -- 단계 오케스트레이션
//!
//! ```text
//! PRI -> 헤더 -> 타임스탬프 해석 -> Structured Data -> 메시지 -> (조건부) 액세스 로그
//! ```
//!
//! 어느 단계든 실패하면 즉시 중단하며 부분 결과는 버립니다.
//! 단계 간 역추적은 없습니다.
//!
//! # 사용 예시
//! ```
//! use cfsyslog_core::pipeline::LineParser;
//! use cfsyslog_parser::CfSyslogParser;
//!
//! let parser = CfSyslogParser::default();
//! let line = "<13>1 1985-04-12T23:20:50.52Z host app proc msgid [instance@47450 a=\"1\"] hello";
//! let parsed = parser.parse(line).unwrap();
//! assert_eq!(parsed.record.message, "hello");
//! assert_eq!(parsed.record.sd_param("instance@47450", "a"), Some("1"));
//! ```

use cfsyslog_core::error::{CfSyslogError, ParseError};
use cfsyslog_core::metrics as m;
use cfsyslog_core::pipeline::{LineParser, TimeResolver};
use cfsyslog_core::types::{ParsedLine, ParsedMessage, StructuredData};
use tracing::{debug, trace};

use super::access_log::parse_access_log;
use super::header::parse_header;
use super::message::extract_message;
use super::structured_data::parse_structured_data;
use super::timestamp::PatternTimeResolver;
use crate::config::ParserConfig;
use crate::error::ParserError;

/// Cloud Foundry IANA enterprise 번호
pub const CF_ENTERPRISE_ID: u32 = 47450;

/// 플랫폼 태그 SD-ID (`tags@47450`)
pub const CF_TAGS_SD_ID: &str = "tags@47450";

/// 라우터 액세스 로그를 표시하는 origin 값
pub const ROUTER_ORIGIN: &str = "gorouter";

/// Cloud Foundry RFC 5424 syslog 파서
///
/// 불변 설정과 타임스탬프 해석기만 보관하므로 여러 스레드에서 공유할 수 있습니다.
pub struct CfSyslogParser {
    config: ParserConfig,
    time_resolver: Box<dyn TimeResolver>,
}

impl CfSyslogParser {
    /// 설정을 검증하고 파서를 생성합니다.
    pub fn new(config: ParserConfig) -> Result<Self, ParserError> {
        config.validate()?;
        let time_resolver = PatternTimeResolver::new(&config.timestamp_pattern)?;
        Ok(Self {
            config,
            time_resolver: Box::new(time_resolver),
        })
    }

    /// 타임스탬프 해석기를 교체합니다.
    pub fn with_time_resolver(mut self, resolver: impl TimeResolver + 'static) -> Self {
        self.time_resolver = Box::new(resolver);
        self
    }

    /// 현재 설정
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// 한 줄을 파싱하고, 실패 시 실패한 단계의 상세 에러를 반환합니다.
    pub fn parse_line(&self, line: &str) -> Result<ParsedLine, ParserError> {
        if line.is_empty() {
            return Err(ParserError::EmptyInput);
        }
        if let Some(max) = self.config.max_input_size.filter(|&max| line.len() > max) {
            return Err(ParserError::InputTooLarge {
                size: line.len(),
                max,
            });
        }

        let (header, cursor) = parse_header(line)?;

        let time = self.time_resolver.resolve(&header.timestamp).ok_or_else(|| {
            ParserError::UnparsableTimestamp {
                timestamp: header.timestamp.clone(),
            }
        })?;

        let (structured_data, cursor) = parse_structured_data(line, cursor)?;
        let message = extract_message(line, cursor);

        let access_log = if self.config.parse_access_log && is_router_origin(&structured_data) {
            let parsed = parse_access_log(&message);
            if parsed.is_none() {
                debug!(
                    app_name = header.app_name.as_str(),
                    "router line did not match access log layout"
                );
                metrics::counter!(m::PARSER_ACCESS_LOG_MISSES_TOTAL).increment(1);
            }
            parsed
        } else {
            None
        };

        let raw = self.config.include_raw_message.then(|| line.to_owned());

        trace!(
            hostname = header.hostname.as_str(),
            app_name = header.app_name.as_str(),
            sd_elements = structured_data.len(),
            "parsed syslog line"
        );

        Ok(ParsedLine {
            time,
            record: ParsedMessage {
                header,
                structured_data,
                message,
                access_log,
                raw,
            },
        })
    }
}

impl Default for CfSyslogParser {
    fn default() -> Self {
        Self {
            config: ParserConfig::default(),
            time_resolver: Box::new(PatternTimeResolver::default()),
        }
    }
}

impl LineParser for CfSyslogParser {
    fn format_name(&self) -> &str {
        "cf-syslog"
    }

    fn parse(&self, line: &str) -> Result<ParsedLine, CfSyslogError> {
        metrics::counter!(m::PARSER_LINES_TOTAL).increment(1);
        self.parse_line(line).map_err(|err| {
            let stage = err.stage();
            debug!(stage, error = %err, "unparsable line");
            metrics::counter!(m::PARSER_UNPARSABLE_TOTAL, m::LABEL_STAGE => stage).increment(1);
            CfSyslogError::Parse(ParseError::Unparsable)
        })
    }
}

/// `tags@47450`의 `origin`이 라우터인지 확인합니다.
fn is_router_origin(sd: &StructuredData) -> bool {
    sd.get(CF_TAGS_SD_ID)
        .and_then(|tags| tags.get("origin"))
        .is_some_and(|origin| origin == ROUTER_ORIGIN)
}
