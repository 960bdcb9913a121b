use crate::docker::DockerError;
use crate::routing::RoutingConfig;

#[derive(Debug)]
pub enum ProviderEvent {
    /// 새 라우팅 설정 (이전과 달라진 경우에만 전송)
    ConfigurationUpdated(RoutingConfig),
    /// 에러 상황
    Error(DockerError),
}
