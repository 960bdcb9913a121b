use std::collections::{BTreeMap, BTreeSet, HashMap};

/// 컨테이너의 네트워크 모드
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NetworkMode {
    #[default]
    Default,
    Host,
    Other(String),
}

impl NetworkMode {
    pub fn from_docker(mode: Option<&str>) -> Self {
        match mode {
            None | Some("") | Some("default") | Some("bridge") => NetworkMode::Default,
            Some("host") => NetworkMode::Host,
            Some(other) => NetworkMode::Other(other.to_string()),
        }
    }

    pub fn is_host(&self) -> bool {
        matches!(self, NetworkMode::Host)
    }
}

/// 오케스트레이션 계층에서 넘어온 컨테이너 정보 (읽기 전용)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerDescriptor {
    pub name: String,
    pub labels: HashMap<String, String>,
    /// 네트워크 이름 → IP
    pub networks: BTreeMap<String, String>,
    pub network_mode: NetworkMode,
    /// `<port>/tcp` 형식의 노출 포트
    pub exposed_ports: BTreeSet<String>,
}

impl ContainerDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_network(mut self, name: impl Into<String>, ip: impl Into<String>) -> Self {
        self.networks.insert(name.into(), ip.into());
        self
    }

    pub fn with_network_mode(mut self, mode: NetworkMode) -> Self {
        self.network_mode = mode;
        self
    }

    pub fn with_exposed_port(mut self, port: impl Into<String>) -> Self {
        self.exposed_ports.insert(port.into());
        self
    }
}
