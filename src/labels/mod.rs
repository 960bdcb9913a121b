//! 컨테이너 라벨 조회 기능을 제공하는 모듈입니다.
//!
//! 모든 상위 컴포넌트는 "라벨 조회 → 없으면 기본값" 패턴을 따릅니다.
//! `LabelError::NotFound`는 치명적인 오류가 아니라 기본값을 사용하라는 신호입니다.

mod error;

use std::collections::HashMap;
use tracing::trace;

use crate::container::ContainerDescriptor;

pub use error::LabelError;

pub const DEFAULT_LABEL_PREFIX: &str = "traefik.";

pub const ENABLE: &str = "enable";
pub const BACKEND: &str = "backend";
pub const DOMAIN: &str = "domain";
pub const FRONTEND_RULE: &str = "frontend.rule";
pub const FRONTEND_PASS_HOST_HEADER: &str = "frontend.passHostHeader";
pub const FRONTEND_PRIORITY: &str = "frontend.priority";
pub const FRONTEND_ENTRY_POINTS: &str = "frontend.entryPoints";
pub const PORT: &str = "port";
pub const WEIGHT: &str = "weight";
pub const PROTOCOL: &str = "protocol";
pub const DOCKER_NETWORK: &str = "docker.network";

/// 단일 라벨 값을 조회합니다.
pub fn get_label(container: &ContainerDescriptor, key: &str) -> Result<String, LabelError> {
    container
        .labels
        .get(key)
        .cloned()
        .ok_or_else(|| LabelError::not_found(key))
}

/// 여러 라벨을 한 번에 조회합니다.
///
/// 존재하는 키만 담은 맵을 항상 반환하며, 누락된 키가 있으면
/// 누락 키 전체를 담은 오류를 함께 돌려줍니다. 호출자는 오류와 무관하게
/// 부분 결과를 사용할 수 있습니다.
pub fn get_labels(
    container: &ContainerDescriptor,
    keys: &[&str],
) -> (HashMap<String, String>, Option<LabelError>) {
    let mut found = HashMap::new();
    let mut missing = Vec::new();

    for key in keys {
        match get_label(container, key) {
            Ok(value) => {
                found.insert(key.to_string(), value);
            }
            Err(_) => missing.push(key.to_string()),
        }
    }

    let error = if missing.is_empty() {
        None
    } else {
        Some(LabelError::NotFound { keys: missing })
    };
    (found, error)
}

/// 접두사가 붙은 라벨을 한 번에 읽어 만든 타입 있는 레코드
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerLabels {
    pub enable: Option<String>,
    pub backend: Option<String>,
    pub domain: Option<String>,
    pub frontend_rule: Option<String>,
    pub pass_host_header: Option<String>,
    pub priority: Option<String>,
    pub entry_points: Option<String>,
    pub port: Option<String>,
    pub weight: Option<String>,
    pub protocol: Option<String>,
    pub network: Option<String>,
}

impl ContainerLabels {
    pub fn parse(labels: &HashMap<String, String>, prefix: &str) -> Self {
        let mut parsed = Self::default();

        for (key, value) in labels {
            let Some(suffix) = key.strip_prefix(prefix) else {
                continue;
            };
            let slot = match suffix {
                ENABLE => &mut parsed.enable,
                BACKEND => &mut parsed.backend,
                DOMAIN => &mut parsed.domain,
                FRONTEND_RULE => &mut parsed.frontend_rule,
                FRONTEND_PASS_HOST_HEADER => &mut parsed.pass_host_header,
                FRONTEND_PRIORITY => &mut parsed.priority,
                FRONTEND_ENTRY_POINTS => &mut parsed.entry_points,
                PORT => &mut parsed.port,
                WEIGHT => &mut parsed.weight,
                PROTOCOL => &mut parsed.protocol,
                DOCKER_NETWORK => &mut parsed.network,
                other => {
                    trace!(label = %other, "알 수 없는 라벨 무시");
                    continue;
                }
            };
            *slot = Some(value.clone());
        }

        parsed
    }

    pub fn from_container(container: &ContainerDescriptor, prefix: &str) -> Self {
        Self::parse(&container.labels, prefix)
    }
}
