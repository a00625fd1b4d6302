//! 파이프라인 trait -- 파서 확장 포인트 정의

use chrono::{DateTime, FixedOffset};

use crate::error::CfSyslogError;
use crate::types::ParsedLine;

/// 라인 파서 trait
///
/// 새로운 로그 형식을 지원하려면 이 trait을 구현합니다.
/// 구현체는 호출 간 가변 상태를 갖지 않아야 하며, 여러 스레드에서 공유될 수 있습니다.
pub trait LineParser: Send + Sync {
    /// 지원하는 로그 형식 이름
    fn format_name(&self) -> &str;

    /// 한 줄을 파싱
    ///
    /// 실패는 단계와 무관하게 `ParseError::Unparsable`로 보고됩니다.
    fn parse(&self, line: &str) -> Result<ParsedLine, CfSyslogError>;
}

/// 헤더 타임스탬프 해석기
///
/// 원문 타임스탬프 토큰을 시각으로 변환합니다. 해석할 수 없으면 `None`을 반환합니다.
pub trait TimeResolver: Send + Sync {
    fn resolve(&self, raw: &str) -> Option<DateTime<FixedOffset>>;
}
