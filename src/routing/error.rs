use std::fmt;

use crate::labels::LabelError;

/// 라우팅 설정 생성 중 발생하는 컨테이너 단위 오류입니다.
///
/// 어느 것도 전체 빌드를 중단시키지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 라벨 누락 (기본값으로 대체됨)
    LabelNotFound(LabelError),
    /// 사용할 수 있는 네트워크 주소가 없음
    NoRoutableAddress {
        container: String,
        reason: String,
    },
    /// 숫자 라벨 파싱 실패 (기본값으로 대체됨)
    MalformedNumericLabel {
        container: String,
        label: String,
        value: String,
    },
}

impl From<LabelError> for ConfigError {
    fn from(err: LabelError) -> Self {
        ConfigError::LabelNotFound(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LabelNotFound(e) => write!(f, "{}", e),
            ConfigError::NoRoutableAddress { container, reason } =>
                write!(f, "컨테이너 {}의 라우팅 가능한 주소 없음: {}", container, reason),
            ConfigError::MalformedNumericLabel { container, label, value } =>
                write!(f, "컨테이너 {}의 숫자 라벨 {} 값 {} 파싱 실패", container, label, value),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::LabelNotFound(e) => Some(e),
            _ => None,
        }
    }
}
