use std::pin::Pin;
use async_trait::async_trait;
use bollard::container::{InspectContainerOptions, ListContainersOptions};
use bollard::models::{ContainerInspectResponse, ContainerSummary, EventMessage};
use bollard::system::EventsOptions;
use bollard::{Docker, API_DEFAULT_VERSION};
use futures_util::{Stream, StreamExt};

use super::DockerError;

/// 연결 타임아웃 (초)
const CONNECT_TIMEOUT_SECS: u64 = 120;

pub type EventStream = Pin<Box<dyn Stream<Item = Result<EventMessage, DockerError>> + Send>>;

#[async_trait]
pub trait DockerClient: Send + Sync {
    async fn list_containers(
        &self,
        options: Option<ListContainersOptions<String>>,
    ) -> Result<Vec<ContainerSummary>, DockerError>;

    async fn inspect_container(&self, id: &str) -> Result<ContainerInspectResponse, DockerError>;

    fn events(&self, options: Option<EventsOptions<String>>) -> EventStream;
}

// 실제 Docker 클라이언트 구현
#[derive(Clone)]
pub struct BollardDockerClient(Docker);

impl BollardDockerClient {
    /// 엔드포인트가 없으면 로컬 기본값으로 연결합니다.
    pub fn connect(endpoint: Option<&str>) -> Result<Self, DockerError> {
        let docker = match endpoint {
            None => Docker::connect_with_local_defaults()?,
            Some(addr) if addr.starts_with("unix://") => Docker::connect_with_unix(
                addr,
                CONNECT_TIMEOUT_SECS,
                API_DEFAULT_VERSION,
            )?,
            Some(addr) => Docker::connect_with_http(addr, CONNECT_TIMEOUT_SECS, API_DEFAULT_VERSION)
                .map_err(|e| DockerError::ConnectionError {
                    source: e,
                    context: format!("엔드포인트 {}", addr),
                })?,
        };
        Ok(Self(docker))
    }
}

#[async_trait]
impl DockerClient for BollardDockerClient {
    async fn list_containers(
        &self,
        options: Option<ListContainersOptions<String>>,
    ) -> Result<Vec<ContainerSummary>, DockerError> {
        self.0
            .list_containers(options)
            .await
            .map_err(|e| DockerError::ListContainersError {
                source: e,
                context: "실행 중인 컨테이너 조회".to_string(),
            })
    }

    async fn inspect_container(&self, id: &str) -> Result<ContainerInspectResponse, DockerError> {
        self.0
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| DockerError::InspectError {
                container_id: id.to_string(),
                source: e,
            })
    }

    fn events(&self, options: Option<EventsOptions<String>>) -> EventStream {
        Box::pin(
            self.0
                .events(options)
                .map(|event| event.map_err(|e| DockerError::EventStreamError { source: e })),
        )
    }
}
