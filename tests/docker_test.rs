use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use bollard::container::ListContainersOptions;
use bollard::models::{
    ContainerConfig, ContainerInspectResponse, ContainerSummary, EndpointSettings, EventActor,
    EventMessage, EventMessageTypeEnum, HostConfig, NetworkSettings,
};
use bollard::system::EventsOptions;
use docker_label_provider::container::NetworkMode;
use docker_label_provider::docker::{
    descriptor_from_inspect, DockerClient, DockerError, DockerProvider, EventStream, ProviderEvent,
};
use docker_label_provider::settings::{DockerSettings, RetrySettings};

// Mock Docker Client
#[derive(Clone, Default)]
struct MockDockerClient {
    // 목록 조회마다 하나씩 꺼내며 마지막 스냅샷은 유지
    snapshots: Arc<Mutex<VecDeque<Vec<ContainerInspectResponse>>>>,
    current: Arc<Mutex<Vec<ContainerInspectResponse>>>,
    events: Arc<Mutex<Vec<EventMessage>>>,
    missing: Arc<Mutex<Vec<String>>>,
    fail_list: bool,
}

impl MockDockerClient {
    fn with_snapshots(snapshots: Vec<Vec<ContainerInspectResponse>>) -> Self {
        Self {
            snapshots: Arc::new(Mutex::new(snapshots.into())),
            ..Default::default()
        }
    }

    fn with_events(self, events: Vec<EventMessage>) -> Self {
        *self.events.lock().unwrap() = events;
        self
    }
}

fn io_error(message: &str) -> bollard::errors::Error {
    bollard::errors::Error::IOError {
        err: std::io::Error::new(std::io::ErrorKind::Other, message.to_string()),
    }
}

#[async_trait::async_trait]
impl DockerClient for MockDockerClient {
    async fn list_containers(
        &self,
        _options: Option<ListContainersOptions<String>>,
    ) -> Result<Vec<ContainerSummary>, DockerError> {
        if self.fail_list {
            return Err(DockerError::ListContainersError {
                source: io_error("daemon unavailable"),
                context: "test".to_string(),
            });
        }

        let snapshot = {
            let mut snapshots = self.snapshots.lock().unwrap();
            if snapshots.len() > 1 {
                snapshots.pop_front().unwrap_or_default()
            } else {
                snapshots.front().cloned().unwrap_or_default()
            }
        };
        let summaries = snapshot
            .iter()
            .map(|c| ContainerSummary { id: c.id.clone(), ..Default::default() })
            .collect();
        *self.current.lock().unwrap() = snapshot;
        Ok(summaries)
    }

    async fn inspect_container(&self, id: &str) -> Result<ContainerInspectResponse, DockerError> {
        if self.missing.lock().unwrap().iter().any(|m| m == id) {
            return Err(DockerError::InspectError {
                container_id: id.to_string(),
                source: io_error("no such container"),
            });
        }
        self.current
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| DockerError::InspectError {
                container_id: id.to_string(),
                source: io_error("no such container"),
            })
    }

    fn events(&self, _options: Option<EventsOptions<String>>) -> EventStream {
        let events: Vec<_> = self.events.lock().unwrap().drain(..).map(Ok).collect();
        Box::pin(futures_util::stream::iter(events))
    }
}

fn inspect(name: &str, ip: &str, labels: &[(&str, &str)]) -> ContainerInspectResponse {
    ContainerInspectResponse {
        id: Some(format!("id-{}", name)),
        name: Some(format!("/{}", name)),
        config: Some(ContainerConfig {
            labels: Some(
                labels
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            ..Default::default()
        }),
        host_config: Some(HostConfig {
            network_mode: Some("bridge".to_string()),
            ..Default::default()
        }),
        network_settings: Some(NetworkSettings {
            networks: Some(HashMap::from([(
                "bridge".to_string(),
                EndpointSettings {
                    ip_address: Some(ip.to_string()),
                    ..Default::default()
                },
            )])),
            ports: Some(HashMap::from([("80/tcp".to_string(), None)])),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn container_event(action: &str, id: &str) -> EventMessage {
    EventMessage {
        typ: Some(EventMessageTypeEnum::CONTAINER),
        action: Some(action.to_string()),
        actor: Some(EventActor {
            id: Some(id.to_string()),
            attributes: None,
        }),
        ..Default::default()
    }
}

fn create_test_settings(watch: bool) -> DockerSettings {
    DockerSettings {
        watch,
        retry: RetrySettings {
            max_attempts: 1,
            interval: 0,
        },
        ..Default::default()
    }
}

#[test]
fn test_descriptor_from_inspect() {
    let mut response = inspect("web", "172.17.0.2", &[("traefik.port", "8080")]);
    response.host_config = Some(HostConfig {
        network_mode: Some("host".to_string()),
        ..Default::default()
    });

    let descriptor = descriptor_from_inspect(&response);

    assert_eq!(descriptor.name, "web");
    assert_eq!(descriptor.labels["traefik.port"], "8080");
    assert_eq!(descriptor.networks["bridge"], "172.17.0.2");
    assert_eq!(descriptor.network_mode, NetworkMode::Host);
    assert!(descriptor.exposed_ports.contains("80/tcp"));
}

#[test]
fn test_descriptor_falls_back_to_config_exposed_ports() {
    let mut response = inspect("web", "172.17.0.2", &[]);
    if let Some(settings) = response.network_settings.as_mut() {
        settings.ports = None;
    }
    if let Some(config) = response.config.as_mut() {
        config.exposed_ports = Some(HashMap::from([("8080/tcp".to_string(), HashMap::new())]));
    }

    let descriptor = descriptor_from_inspect(&response);

    assert_eq!(descriptor.exposed_ports.len(), 1);
    assert!(descriptor.exposed_ports.contains("8080/tcp"));
    assert_eq!(descriptor.network_mode, NetworkMode::Default);
}

#[test]
fn test_descriptor_without_name_uses_id() {
    let response = ContainerInspectResponse {
        id: Some("abc123".to_string()),
        ..Default::default()
    };

    let descriptor = descriptor_from_inspect(&response);

    assert_eq!(descriptor.name, "abc123");
    assert!(descriptor.labels.is_empty());
    assert!(descriptor.networks.is_empty());
    assert!(descriptor.exposed_ports.is_empty());
}

#[tokio::test]
async fn test_load_configuration() {
    let client = MockDockerClient::with_snapshots(vec![vec![
        inspect("test1", "127.0.0.1", &[("traefik.backend", "foobar")]),
        inspect("test2", "127.0.0.2", &[("traefik.backend", "foobar")]),
    ]]);
    let provider = DockerProvider::new(Box::new(client), create_test_settings(false));

    let config = provider.load_configuration().await.unwrap();

    let backend = &config.backends["backend-foobar"];
    assert_eq!(backend.servers["server-test1"].url, "http://127.0.0.1:80");
    assert_eq!(backend.servers["server-test2"].url, "http://127.0.0.2:80");
    assert!(config.frontends.contains_key("frontend-Host-test1-docker-localhost"));
    assert!(config.frontends.contains_key("frontend-Host-test2-docker-localhost"));
}

#[tokio::test]
async fn test_snapshot_skips_containers_that_fail_inspect() {
    let client = MockDockerClient::with_snapshots(vec![vec![
        inspect("alive", "10.0.0.1", &[]),
        inspect("gone", "10.0.0.2", &[]),
    ]]);
    client.missing.lock().unwrap().push("id-gone".to_string());
    let provider = DockerProvider::new(Box::new(client), create_test_settings(false));

    let snapshot = provider.snapshot().await.unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "alive");
}

#[tokio::test]
async fn test_provide_without_watch_sends_initial_configuration() {
    let client = MockDockerClient::with_snapshots(vec![vec![inspect("test", "127.0.0.1", &[])]]);
    let provider = DockerProvider::new(Box::new(client), create_test_settings(false));

    let mut rx = provider.provide();

    match rx.recv().await {
        Some(ProviderEvent::ConfigurationUpdated(config)) => {
            assert!(config.backends.contains_key("backend-test"));
        }
        other => panic!("초기 설정 예상, 실제: {:?}", other),
    }
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_provide_skips_unchanged_configuration() {
    let client = MockDockerClient::with_snapshots(vec![vec![inspect("test", "127.0.0.1", &[])]])
        .with_events(vec![container_event("start", "id-other")]);
    let provider = DockerProvider::new(Box::new(client), create_test_settings(true));

    let mut rx = provider.provide();

    assert!(matches!(rx.recv().await, Some(ProviderEvent::ConfigurationUpdated(_))));
    // 스냅샷이 같으므로 재전송 없이 스트림 종료
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_provide_rebuilds_on_container_event() {
    let client = MockDockerClient::with_snapshots(vec![
        vec![inspect("test1", "127.0.0.1", &[])],
        vec![
            inspect("test1", "127.0.0.1", &[]),
            inspect("test2", "127.0.0.2", &[]),
        ],
    ])
    .with_events(vec![
        container_event("exec_start", "id-test1"),
        container_event("start", "id-test2"),
    ]);
    let provider = DockerProvider::new(Box::new(client), create_test_settings(true));

    let mut rx = provider.provide();

    match rx.recv().await {
        Some(ProviderEvent::ConfigurationUpdated(config)) => assert_eq!(config.backends.len(), 1),
        other => panic!("초기 설정 예상, 실제: {:?}", other),
    }
    match rx.recv().await {
        Some(ProviderEvent::ConfigurationUpdated(config)) => {
            assert_eq!(config.backends.len(), 2);
            assert!(config.backends.contains_key("backend-test2"));
        }
        other => panic!("갱신된 설정 예상, 실제: {:?}", other),
    }
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_provide_reports_list_failure() {
    let client = MockDockerClient {
        fail_list: true,
        ..Default::default()
    };
    let provider = DockerProvider::new(Box::new(client), create_test_settings(false));

    let mut rx = provider.provide();

    match rx.recv().await {
        Some(ProviderEvent::Error(e)) => {
            assert!(e.is_retryable());
            assert!(e.to_string().contains("daemon unavailable"));
        }
        other => panic!("오류 이벤트 예상, 실제: {:?}", other),
    }
}

#[tokio::test]
async fn test_provider_uses_settings_for_assembly() {
    let settings = DockerSettings {
        domain: "apps.internal".to_string(),
        label_prefix: "rproxy.".to_string(),
        ..create_test_settings(false)
    };
    let client = MockDockerClient::with_snapshots(vec![vec![inspect(
        "api",
        "10.0.0.7",
        &[("rproxy.backend", "api-pool"), ("traefik.backend", "ignored")],
    )]]);
    let provider = DockerProvider::new(Box::new(client), settings);

    let config = provider.load_configuration().await.unwrap();

    assert!(config.backends.contains_key("backend-api-pool"));
    assert!(config.frontends.contains_key("frontend-Host-api-apps-internal"));
    assert_eq!(provider.assembler().options().domain, "apps.internal");
}
