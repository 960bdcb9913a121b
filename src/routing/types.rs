use std::collections::BTreeMap;
use serde::Serialize;

/// 라우팅 규칙 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub rule: String,
}

/// 요청을 백엔드로 보내는 규칙 집합
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontend {
    pub backend: String,
    pub pass_host_header: bool,
    pub priority: i32,
    pub entry_points: Vec<String>,
    pub routes: BTreeMap<String, Route>,
}

/// 백엔드 서버 엔드포인트
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Server {
    pub url: String,
    pub weight: u32,
}

impl Server {
    pub fn new(protocol: &str, address: &str, port: &str, weight: u32) -> Self {
        Self {
            url: format!("{}://{}:{}", protocol, address, port),
            weight,
        }
    }
}

/// 서버 풀
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Backend {
    pub servers: BTreeMap<String, Server>,
}

/// 컨테이너 스냅샷 하나로부터 만들어지는 전체 라우팅 설정
///
/// 정렬된 맵을 사용하므로 같은 입력은 항상 같은 출력으로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoutingConfig {
    pub frontends: BTreeMap<String, Frontend>,
    pub backends: BTreeMap<String, Backend>,
}

impl RoutingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frontends.is_empty() && self.backends.is_empty()
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
