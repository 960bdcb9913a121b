use std::fmt;

#[derive(Debug)]
pub enum DockerError {
    /// Docker 데몬 연결 실패
    ConnectionError {
        source: bollard::errors::Error,
        context: String,
    },
    /// 컨테이너 목록 조회 실패
    ListContainersError {
        source: bollard::errors::Error,
        context: String,
    },
    /// 컨테이너 상세 조회 실패
    InspectError {
        container_id: String,
        source: bollard::errors::Error,
    },
    /// 이벤트 스트림 오류
    EventStreamError {
        source: bollard::errors::Error,
    },
}

impl DockerError {
    /// 재시도로 복구될 수 있는 오류인지 판단합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DockerError::ConnectionError { .. } | DockerError::ListContainersError { .. }
        )
    }
}

impl fmt::Display for DockerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockerError::ConnectionError { source, context } =>
                write!(f, "Docker 데몬 연결 실패 ({}): {}", context, source),
            DockerError::ListContainersError { source, context } =>
                write!(f, "컨테이너 목록 조회 실패 ({}): {}", context, source),
            DockerError::InspectError { container_id, source } =>
                write!(f, "컨테이너 {} 상세 조회 실패: {}", container_id, source),
            DockerError::EventStreamError { source } =>
                write!(f, "Docker 이벤트 스트림 오류: {}", source),
        }
    }
}

impl std::error::Error for DockerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DockerError::ConnectionError { source, .. }
            | DockerError::ListContainersError { source, .. }
            | DockerError::InspectError { source, .. }
            | DockerError::EventStreamError { source } => Some(source),
        }
    }
}

impl From<bollard::errors::Error> for DockerError {
    fn from(err: bollard::errors::Error) -> Self {
        DockerError::ConnectionError {
            source: err,
            context: "Docker 데몬 연결 실패".to_string(),
        }
    }
}
