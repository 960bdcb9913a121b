use std::collections::BTreeSet;

/// `"80/tcp"` 형태의 노출 포트 키에서 포트 번호를 꺼냅니다.
pub fn parse_exposed_port(key: &str) -> Option<u16> {
    let number = key.split_once('/').map(|(port, _)| port).unwrap_or(key);
    number.trim().parse().ok()
}

/// 포트 라벨 값이 유효한 포트 번호인지 확인합니다.
pub fn is_valid_port(value: &str) -> bool {
    value.trim().parse::<u16>().map_or(false, |port| port > 0)
}

/// 백엔드 서버 포트를 결정합니다.
///
/// 오버라이드가 있으면 그대로 반환하고, 없으면 노출 포트 중 가장 낮은 번호를
/// 사용합니다. 노출 포트가 없으면 빈 문자열을 반환합니다.
pub fn resolve_port(override_port: Option<&str>, exposed_ports: &BTreeSet<String>) -> String {
    if let Some(port) = override_port {
        return port.to_string();
    }

    exposed_ports
        .iter()
        .filter_map(|key| parse_exposed_port(key))
        .min()
        .map(|port| port.to_string())
        .unwrap_or_default()
}
