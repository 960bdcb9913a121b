use std::collections::btree_map::Entry;
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::container::ContainerDescriptor;
use crate::labels::{self, ContainerLabels, LabelError, DEFAULT_LABEL_PREFIX};
use crate::settings::DockerSettings;
use super::error::ConfigError;
use super::filter::should_expose;
use super::network::resolve_ip_address;
use super::port::{is_valid_port, resolve_port};
use super::rule::CompoundRule;
use super::types::{Backend, Frontend, Route, RoutingConfig, Server};

pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_WEIGHT: u32 = 1;
pub const DEFAULT_PRIORITY: i32 = 0;
pub const DEFAULT_PASS_HOST_HEADER: bool = true;

/// 조립기 전역 옵션
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// 기본 규칙에 붙는 전역 도메인
    pub domain: String,
    pub exposed_by_default: bool,
    pub label_prefix: String,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            domain: "docker.localhost".to_string(),
            exposed_by_default: true,
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
        }
    }
}

impl From<&DockerSettings> for AssemblerOptions {
    fn from(settings: &DockerSettings) -> Self {
        Self {
            domain: settings.domain.clone(),
            exposed_by_default: settings.exposed_by_default,
            label_prefix: settings.label_prefix.clone(),
        }
    }
}

/// 한 번의 빌드 결과. 오류는 정보성이며 설정 생성을 막지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub config: RoutingConfig,
    pub errors: Vec<ConfigError>,
}

/// 컨테이너 스냅샷을 라우팅 설정으로 변환합니다.
///
/// 내부 상태를 변경하지 않으므로 빌드 시점과 렌더링 시점 모두에서
/// `get_*` 도우미를 동기화 없이 호출할 수 있습니다.
#[derive(Debug, Clone, Default)]
pub struct ConfigAssembler {
    options: AssemblerOptions,
}

impl ConfigAssembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    /// 접두사가 붙은 전체 라벨 키
    pub fn label_key(&self, suffix: &str) -> String {
        format!("{}{}", self.options.label_prefix, suffix)
    }

    fn labels(&self, container: &ContainerDescriptor) -> ContainerLabels {
        ContainerLabels::from_container(container, &self.options.label_prefix)
    }

    /// 접두사가 붙은 라벨을 조회합니다. 없으면 `LabelError::NotFound`.
    pub fn get_label(&self, container: &ContainerDescriptor, suffix: &str) -> Result<String, LabelError> {
        labels::get_label(container, &self.label_key(suffix))
    }

    pub fn get_domain(&self, container: &ContainerDescriptor) -> String {
        self.domain_of(&self.labels(container))
    }

    /// 컨테이너의 복합 규칙 (기본값 `Host:<name>.<domain>`)
    pub fn get_frontend_rule(&self, container: &ContainerDescriptor) -> CompoundRule {
        self.rule_of(container, &self.labels(container))
    }

    /// 원자 규칙 원문 목록
    pub fn get_frontend_rules(&self, container: &ContainerDescriptor) -> Vec<String> {
        self.get_frontend_rule(container).texts()
    }

    /// 원자 규칙 이름 집합
    pub fn get_frontend_name(&self, container: &ContainerDescriptor) -> BTreeSet<String> {
        self.get_frontend_rule(container).names().into_iter().collect()
    }

    pub fn get_backend(&self, container: &ContainerDescriptor) -> String {
        self.backend_of(container, &self.labels(container))
    }

    pub fn get_protocol(&self, container: &ContainerDescriptor) -> String {
        self.protocol_of(&self.labels(container))
    }

    pub fn get_ip_address(&self, container: &ContainerDescriptor) -> Result<String, ConfigError> {
        self.ip_address_of(container, &self.labels(container))
    }

    pub fn get_port(&self, container: &ContainerDescriptor) -> String {
        self.port_of(container, &self.labels(container), &mut Vec::new())
    }

    pub fn get_weight(&self, container: &ContainerDescriptor) -> u32 {
        let labels = self.labels(container);
        self.numeric_label(container, labels::WEIGHT, labels.weight.as_deref(), DEFAULT_WEIGHT, &mut Vec::new())
    }

    pub fn get_priority(&self, container: &ContainerDescriptor) -> i32 {
        let labels = self.labels(container);
        self.numeric_label(container, labels::FRONTEND_PRIORITY, labels.priority.as_deref(), DEFAULT_PRIORITY, &mut Vec::new())
    }

    pub fn get_pass_host_header(&self, container: &ContainerDescriptor) -> bool {
        self.pass_host_header_of(container, &self.labels(container))
    }

    pub fn get_entry_points(&self, container: &ContainerDescriptor) -> Vec<String> {
        Self::entry_points_of(&self.labels(container))
    }

    /// 컨테이너가 프록시 대상인지 판단합니다.
    pub fn container_filter(&self, container: &ContainerDescriptor) -> bool {
        should_expose(container, &self.labels(container), self.options.exposed_by_default)
    }

    /// 스냅샷 전체로부터 라우팅 설정을 만듭니다.
    pub fn load_config(&self, containers: &[ContainerDescriptor]) -> RoutingConfig {
        self.assemble(containers).config
    }

    /// 라우팅 설정과 컨테이너별 오류를 함께 반환합니다.
    pub fn assemble(&self, containers: &[ContainerDescriptor]) -> Assembly {
        let mut assembly = Assembly::default();

        for container in containers {
            let labels = self.labels(container);
            if !should_expose(container, &labels, self.options.exposed_by_default) {
                continue;
            }
            self.add_container(container, &labels, &mut assembly);
        }

        info!(
            containers = containers.len(),
            frontends = assembly.config.frontends.len(),
            backends = assembly.config.backends.len(),
            errors = assembly.errors.len(),
            "라우팅 설정 생성 완료"
        );
        assembly
    }

    fn add_container(&self, container: &ContainerDescriptor, labels: &ContainerLabels, assembly: &mut Assembly) {
        let errors = &mut assembly.errors;
        let rule = self.rule_of(container, labels);
        let backend_name = format!("backend-{}", self.backend_of(container, labels));
        let frontend_name = format!("frontend-{}", rule.name());

        // 라우트 키는 항상 "route-" + 프론트엔드 키에서 시작
        let compound = rule.len() > 1;
        let routes = rule
            .rules()
            .iter()
            .map(|atomic| {
                let key = if compound {
                    format!("route-{}-{}", frontend_name, atomic.name())
                } else {
                    format!("route-{}", frontend_name)
                };
                (key, Route { rule: atomic.as_str().to_string() })
            })
            .collect();

        let frontend = Frontend {
            backend: backend_name.clone(),
            pass_host_header: self.pass_host_header_of(container, labels),
            priority: self.numeric_label(container, labels::FRONTEND_PRIORITY, labels.priority.as_deref(), DEFAULT_PRIORITY, errors),
            entry_points: Self::entry_points_of(labels),
            routes,
        };

        // 이름 충돌 시 backend와 routes만 나중 컨테이너 값으로 교체
        match assembly.config.frontends.entry(frontend_name.clone()) {
            Entry::Occupied(mut existing) => {
                warn!(
                    container = %container.name,
                    frontend = %frontend_name,
                    "동일한 프론트엔드 이름이 이미 존재하여 백엔드와 라우트를 덮어씀"
                );
                let existing = existing.get_mut();
                existing.backend = frontend.backend;
                existing.routes = frontend.routes;
            }
            Entry::Vacant(slot) => {
                slot.insert(frontend);
            }
        }

        let server = match self.ip_address_of(container, labels) {
            Ok(address) => {
                let port = self.port_of(container, labels, errors);
                let weight = self.numeric_label(container, labels::WEIGHT, labels.weight.as_deref(), DEFAULT_WEIGHT, errors);
                Some(Server::new(&self.protocol_of(labels), &address, &port, weight))
            }
            Err(e) => {
                warn!(error = %e, container = %container.name, "서버 주소를 결정할 수 없어 서버 제외");
                errors.push(e);
                None
            }
        };

        let backend = assembly
            .config
            .backends
            .entry(backend_name.clone())
            .or_insert_with(Backend::default);

        if let Some(server) = server {
            debug!(
                container = %container.name,
                backend = %backend_name,
                url = %server.url,
                "백엔드에 서버 추가"
            );
            backend.servers.insert(format!("server-{}", container.name), server);
        }
    }

    fn domain_of(&self, labels: &ContainerLabels) -> String {
        labels
            .domain
            .clone()
            .unwrap_or_else(|| self.options.domain.clone())
    }

    fn rule_of(&self, container: &ContainerDescriptor, labels: &ContainerLabels) -> CompoundRule {
        let rule = labels
            .frontend_rule
            .as_deref()
            .map(CompoundRule::parse)
            .filter(|rule| !rule.is_empty());

        rule.unwrap_or_else(|| {
            CompoundRule::parse(&format!("Host:{}.{}", container.name, self.domain_of(labels)))
        })
    }

    fn backend_of(&self, container: &ContainerDescriptor, labels: &ContainerLabels) -> String {
        labels
            .backend
            .clone()
            .unwrap_or_else(|| container.name.clone())
    }

    fn protocol_of(&self, labels: &ContainerLabels) -> String {
        labels
            .protocol
            .clone()
            .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string())
    }

    fn ip_address_of(&self, container: &ContainerDescriptor, labels: &ContainerLabels) -> Result<String, ConfigError> {
        resolve_ip_address(
            &container.name,
            &container.network_mode,
            labels.network.as_deref(),
            &container.networks,
        )
    }

    fn port_of(&self, container: &ContainerDescriptor, labels: &ContainerLabels, errors: &mut Vec<ConfigError>) -> String {
        let override_port = match labels.port.as_deref() {
            Some(port) if is_valid_port(port) => Some(port.trim()),
            Some(port) => {
                let error = ConfigError::MalformedNumericLabel {
                    container: container.name.clone(),
                    label: self.label_key(labels::PORT),
                    value: port.to_string(),
                };
                warn!(error = %error, "포트 라벨 무시, 노출 포트 사용");
                errors.push(error);
                None
            }
            None => None,
        };
        resolve_port(override_port, &container.exposed_ports)
    }

    fn pass_host_header_of(&self, container: &ContainerDescriptor, labels: &ContainerLabels) -> bool {
        match labels.pass_host_header.as_deref() {
            None => DEFAULT_PASS_HOST_HEADER,
            Some(value) => value.trim().to_ascii_lowercase().parse().unwrap_or_else(|_| {
                warn!(
                    container = %container.name,
                    value = %value,
                    "passHostHeader 라벨 값이 bool이 아님, 기본값 사용"
                );
                DEFAULT_PASS_HOST_HEADER
            }),
        }
    }

    fn entry_points_of(labels: &ContainerLabels) -> Vec<String> {
        labels
            .entry_points
            .as_deref()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn numeric_label<T: FromStr>(
        &self,
        container: &ContainerDescriptor,
        suffix: &str,
        value: Option<&str>,
        default: T,
        errors: &mut Vec<ConfigError>,
    ) -> T {
        let Some(raw) = value else {
            return default;
        };
        match raw.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                let error = ConfigError::MalformedNumericLabel {
                    container: container.name.clone(),
                    label: self.label_key(suffix),
                    value: raw.to_string(),
                };
                warn!(error = %error, "숫자 라벨 파싱 실패, 기본값 사용");
                errors.push(error);
                default
            }
        }
    }
}
