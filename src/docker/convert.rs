use std::collections::{BTreeMap, BTreeSet};
use bollard::models::ContainerInspectResponse;

use crate::container::{ContainerDescriptor, NetworkMode};

/// Docker inspect 응답을 라우팅에 필요한 컨테이너 정보로 변환합니다.
pub fn descriptor_from_inspect(container: &ContainerInspectResponse) -> ContainerDescriptor {
    // inspect 응답의 이름은 '/'로 시작함
    let name = container
        .name
        .as_deref()
        .map(|name| name.trim_start_matches('/').to_string())
        .filter(|name| !name.is_empty())
        .or_else(|| container.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let labels = container
        .config
        .as_ref()
        .and_then(|config| config.labels.clone())
        .unwrap_or_default();

    let network_mode = NetworkMode::from_docker(
        container
            .host_config
            .as_ref()
            .and_then(|host| host.network_mode.as_deref()),
    );

    let settings = container.network_settings.as_ref();

    let networks: BTreeMap<String, String> = settings
        .and_then(|s| s.networks.as_ref())
        .map(|networks| {
            networks
                .iter()
                .map(|(name, endpoint)| {
                    (name.clone(), endpoint.ip_address.clone().unwrap_or_default())
                })
                .collect()
        })
        .unwrap_or_default();

    // 포트 매핑이 없으면 이미지에 선언된 노출 포트를 사용
    let exposed_ports: BTreeSet<String> = match settings.and_then(|s| s.ports.as_ref()) {
        Some(ports) => ports.keys().cloned().collect(),
        None => container
            .config
            .as_ref()
            .and_then(|config| config.exposed_ports.as_ref())
            .map(|ports| ports.keys().cloned().collect())
            .unwrap_or_default(),
    };

    ContainerDescriptor {
        name,
        labels,
        networks,
        network_mode,
        exposed_ports,
    }
}
