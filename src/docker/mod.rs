//! Docker 데몬에서 컨테이너 스냅샷을 얻어 라우팅 설정을 만드는 프로바이더입니다.

mod client;
mod convert;
mod error_types;
mod events_types;
mod retry;

pub use client::{BollardDockerClient, DockerClient, EventStream};
pub use convert::descriptor_from_inspect;
pub use error_types::DockerError;
pub use events_types::ProviderEvent;
pub use retry::{with_retry, ContainerListRetry, RetryPolicy, RetryableOperation};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use bollard::container::ListContainersOptions;
use bollard::models::{ContainerSummary, EventMessage, EventMessageTypeEnum};
use bollard::system::EventsOptions;
use futures_util::stream::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::container::ContainerDescriptor;
use crate::logging::{log_build, BuildLog};
use crate::routing::{AssemblerOptions, ConfigAssembler, RoutingConfig};
use crate::settings::DockerSettings;

/// 설정 재생성을 유발하는 컨테이너 이벤트
const WATCHED_ACTIONS: [&str; 5] = ["start", "stop", "die", "destroy", "update"];

pub struct DockerProvider {
    client: Arc<dyn DockerClient>,
    assembler: ConfigAssembler,
    settings: DockerSettings,
}

/// 감시 루프가 유지하는 빌드 상태
#[derive(Default)]
struct BuildState {
    build_id: u64,
    last: Option<RoutingConfig>,
}

impl DockerProvider {
    pub fn new(client: Box<dyn DockerClient>, settings: DockerSettings) -> Self {
        let assembler = ConfigAssembler::new(AssemblerOptions::from(&settings));
        Self {
            client: Arc::from(client),
            assembler,
            settings,
        }
    }

    /// bollard 클라이언트로 프로바이더를 생성합니다.
    pub fn with_defaults(settings: DockerSettings) -> Result<Self, DockerError> {
        let client = BollardDockerClient::connect(settings.endpoint.as_deref())?;
        info!(endpoint = ?settings.endpoint, "Docker 클라이언트 초기화 완료");
        Ok(Self::new(Box::new(client), settings))
    }

    pub fn assembler(&self) -> &ConfigAssembler {
        &self.assembler
    }

    pub fn settings(&self) -> &DockerSettings {
        &self.settings
    }

    pub(crate) async fn try_list_containers(&self) -> Result<Vec<ContainerSummary>, DockerError> {
        // all: false → 실행 중인 컨테이너만
        let options = Some(ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        });
        self.client.list_containers(options).await
    }

    /// 실행 중인 컨테이너의 스냅샷을 조회합니다.
    ///
    /// 목록 조회는 재시도 정책을 따르며, 조회 사이에 사라진 컨테이너는 건너뜁니다.
    pub async fn snapshot(&self) -> Result<Vec<ContainerDescriptor>, DockerError> {
        let policy = RetryPolicy::from(&self.settings.retry);
        let summaries = with_retry(ContainerListRetry { provider: self }, policy).await?;
        debug!(count = summaries.len(), "컨테이너 목록 조회 성공");

        let mut containers = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            let Some(id) = summary.id.as_deref() else {
                continue;
            };
            match self.client.inspect_container(id).await {
                Ok(inspected) => containers.push(descriptor_from_inspect(&inspected)),
                Err(e) => warn!(error = %e, container_id = %id, "컨테이너 상세 조회 실패, 건너뜀"),
            }
        }

        Ok(containers)
    }

    /// 현재 스냅샷으로 라우팅 설정을 한 번 생성합니다.
    pub async fn load_configuration(&self) -> Result<RoutingConfig, DockerError> {
        let containers = self.snapshot().await?;
        Ok(self.assembler.load_config(&containers))
    }

    fn create_event_filters() -> HashMap<String, Vec<String>> {
        let mut filters = HashMap::new();
        filters.insert("type".to_string(), vec!["container".to_string()]);
        filters.insert(
            "event".to_string(),
            WATCHED_ACTIONS.iter().map(|action| action.to_string()).collect(),
        );
        filters
    }

    fn is_relevant(event: &EventMessage) -> bool {
        event.typ == Some(EventMessageTypeEnum::CONTAINER)
            && event
                .action
                .as_deref()
                .map_or(false, |action| WATCHED_ACTIONS.contains(&action))
    }

    /// 설정 변경 이벤트 채널을 반환합니다.
    ///
    /// 초기 설정을 먼저 보내고, 감시가 켜져 있으면 컨테이너 이벤트마다 설정을
    /// 다시 만듭니다. 빌드는 하나의 태스크에서 순차적으로 실행되며, 직전 결과와
    /// 같은 설정은 다시 보내지 않습니다. tokio 런타임 안에서 호출해야 합니다.
    pub fn provide(self) -> mpsc::Receiver<ProviderEvent> {
        let (tx, rx) = mpsc::channel(32);
        let provider = Arc::new(self);

        tokio::spawn(async move {
            let mut state = BuildState::default();

            if !provider.rebuild("initial", &mut state, &tx).await {
                return;
            }

            if !provider.settings.watch {
                debug!("컨테이너 감시 비활성화");
                return;
            }

            let options = EventsOptions {
                filters: Self::create_event_filters(),
                ..Default::default()
            };
            let mut events = provider.client.events(Some(options));

            while let Some(event) = events.next().await {
                match event {
                    Ok(event) if Self::is_relevant(&event) => {
                        let action = event.action.clone().unwrap_or_default();
                        let container_id = event
                            .actor
                            .as_ref()
                            .and_then(|actor| actor.id.as_deref())
                            .unwrap_or("unknown");
                        info!(container_id = %container_id, action = %action, "컨테이너 이벤트 수신");

                        if !provider.rebuild(&action, &mut state, &tx).await {
                            return;
                        }
                    }
                    Ok(event) => {
                        debug!(action = ?event.action, "처리되지 않는 이벤트");
                    }
                    Err(e) => {
                        warn!(error = %e, "Docker 이벤트 처리 오류");
                        if tx.send(ProviderEvent::Error(e)).await.is_err() {
                            return;
                        }
                    }
                }
            }

            info!("Docker 이벤트 스트림 종료");
        });

        rx
    }

    /// 설정을 다시 만들고 달라졌으면 전송합니다. 수신 측이 닫혔으면 false.
    async fn rebuild(
        &self,
        trigger: &str,
        state: &mut BuildState,
        tx: &mpsc::Sender<ProviderEvent>,
    ) -> bool {
        state.build_id += 1;
        let started = Instant::now();
        let mut log = BuildLog::new(state.build_id, trigger);

        let containers = match self.snapshot().await {
            Ok(containers) => containers,
            Err(e) => return tx.send(ProviderEvent::Error(e)).await.is_ok(),
        };

        let assembly = self.assembler.assemble(&containers);
        log.with_assembly(containers.len(), &assembly);
        log.changed = state.last.as_ref() != Some(&assembly.config);
        log.duration_ms = started.elapsed().as_millis() as u64;
        log_build(&log);

        if !log.changed {
            return true;
        }

        state.last = Some(assembly.config.clone());
        tx.send(ProviderEvent::ConfigurationUpdated(assembly.config))
            .await
            .is_ok()
    }
}
