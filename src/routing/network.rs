use std::collections::BTreeMap;
use tracing::debug;

use crate::container::NetworkMode;
use super::error::ConfigError;

/// 호스트 네트워크 모드에서 사용하는 주소
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

/// 백엔드 서버로 접근할 IP를 선택합니다.
///
/// 우선순위:
/// 1. 호스트 네트워크 모드 → 루프백 주소
/// 2. 선호 네트워크가 실제로 연결되어 있으면 그 IP
/// 3. 나머지 경우 이름 순으로 첫 번째 네트워크의 IP
///
/// IP가 비어 있는 네트워크는 후보에서 제외합니다. 연결된 네트워크가 하나뿐이어도
/// IP가 비어 있으면 빈 주소로 URL을 만들지 않고 `NoRoutableAddress`를 반환합니다.
pub fn resolve_ip_address(
    container: &str,
    mode: &NetworkMode,
    preferred: Option<&str>,
    networks: &BTreeMap<String, String>,
) -> Result<String, ConfigError> {
    if mode.is_host() {
        return Ok(LOOPBACK_ADDRESS.to_string());
    }

    if let Some(name) = preferred {
        match networks.get(name).filter(|ip| !ip.is_empty()) {
            Some(ip) => return Ok(ip.clone()),
            None => debug!(
                container = %container,
                network = %name,
                "선호 네트워크에 연결되어 있지 않음, 기본 선택 사용"
            ),
        }
    }

    networks
        .iter()
        .find(|(_, ip)| !ip.is_empty())
        .map(|(_, ip)| ip.clone())
        .ok_or_else(|| ConfigError::NoRoutableAddress {
            container: container.to_string(),
            reason: match mode {
                NetworkMode::Other(other) => format!("연결된 네트워크 없음 (모드: {})", other),
                _ => "연결된 네트워크 없음".to_string(),
            },
        })
}
