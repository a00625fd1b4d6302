//! 도메인 타입 -- 파싱 결과 레코드
//!
//! 파서가 한 줄을 해석해 만들어내는 데이터 구조를 정의합니다.
//! 모든 레코드는 호출마다 새로 생성되며, 생성 이후에는 변경되지 않습니다.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// RFC 5424 NILVALUE -- "의도적으로 비어 있음"을 나타내는 자리표시자
pub const NILVALUE: &str = "-";

/// Syslog severity (RFC 5424 Section 6.2.1)
///
/// PRI 값의 하위 3비트로 선택됩니다. 순서는 코드 값(0-7)과 같습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyslogSeverity {
    /// 0: 시스템 사용 불가
    Emergency,
    /// 1: 즉시 조치 필요
    Alert,
    /// 2: 치명적 상태
    Critical,
    /// 3: 에러
    Error,
    /// 4: 경고
    Warning,
    /// 5: 정상이지만 주목할 만한 상태
    Notice,
    /// 6: 정보성 메시지
    Info,
    /// 7: 디버그 메시지
    Debug,
}

impl SyslogSeverity {
    /// 코드 순서대로 정렬된 전체 severity 테이블
    pub const ALL: [Self; 8] = [
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// PRI 값에서 severity를 선택합니다. 하위 3비트만 사용합니다.
    pub fn from_pri(pri: u32) -> Self {
        Self::ALL[(pri & 0b111) as usize]
    }

    /// severity 코드 (0-7)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// 소문자 severity 이름
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for SyslogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PRI 필드에서 분해한 facility / severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pri {
    /// PRI >> 3
    pub facility: u32,
    /// PRI & 0b111
    pub severity: SyslogSeverity,
}

/// RFC 5424 헤더
///
/// `timestamp` 이후의 필드는 원문 토큰을 그대로 보관합니다.
/// NILVALUE(`-`)도 변환 없이 문자열로 남습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub pri: Pri,
    /// 항상 1 (검증을 통과한 경우에만 레코드가 생성됨)
    pub version: u8,
    /// 원문 타임스탬프 토큰
    pub timestamp: String,
    pub hostname: String,
    pub app_name: String,
    pub proc_id: String,
    pub msg_id: String,
}

/// 하나의 SD-ELEMENT에 속한 파라미터 (이름 -> 값, 이스케이프 원문 유지)
pub type SdParams = BTreeMap<String, String>;

/// SD-ID -> 파라미터 매핑
pub type StructuredData = BTreeMap<String, SdParams>;

/// 액세스 로그 추가 필드 값
///
/// 숫자 리터럴은 `Number`, 그 외(따옴표 문자열, NILVALUE 등)는 `Text`가 됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// 숫자 값이면 반환합니다.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// 문자열 값이면 반환합니다.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// 라우터(gorouter) HTTP 액세스 로그
///
/// 고정 레이아웃 접두부의 필드는 모두 문자열로 보관합니다 (`status`도 문자열).
/// 뒤따르는 `key:value` 토큰은 [`extra`](Self::extra)에 타입이 지정된 값으로 들어갑니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessLog {
    pub host: String,
    pub timestamp: String,
    pub method: String,
    pub pathname: String,
    pub protocol: String,
    pub status: String,
    pub bytes_received: String,
    pub bytes_sent: String,
    pub referer: String,
    pub user_agent: String,
    pub remote_address: String,
    pub backend_address: String,
    /// 접두부 이후의 `key:value` 토큰
    #[serde(default)]
    pub extra: BTreeMap<String, FieldValue>,
}

/// 한 줄을 파싱한 최종 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub header: Header,
    /// NILVALUE이면 빈 매핑
    pub structured_data: StructuredData,
    /// Structured Data 이후 나머지 텍스트 (trim, 없으면 빈 문자열)
    pub message: String,
    /// 라우터 액세스 로그 (설정 + origin 태그가 맞고 접두부가 매칭된 경우만)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_log: Option<AccessLog>,
    /// 원문 라인 (설정된 경우만)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ParsedMessage {
    /// SD 파라미터 값을 조회합니다.
    pub fn sd_param(&self, sd_id: &str, name: &str) -> Option<&str> {
        self.structured_data
            .get(sd_id)
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }
}

impl fmt::Display for ParsedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.header.pri.severity, self.header.hostname, self.header.app_name, self.message,
        )
    }
}

/// 파서 성공 결과 -- 해석된 시각 + 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// 헤더 타임스탬프를 설정된 패턴으로 해석한 시각
    ///
    /// 직렬화 시 [`DateTime::to_rfc3339`] 형식을 씁니다 (UTC도 `+00:00`).
    #[serde(serialize_with = "serialize_rfc3339")]
    pub time: DateTime<FixedOffset>,
    pub record: ParsedMessage,
}

fn serialize_rfc3339<S>(time: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&time.to_rfc3339())
}
