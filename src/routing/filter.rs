use tracing::debug;

use crate::container::ContainerDescriptor;
use crate::labels::ContainerLabels;

/// 컨테이너를 프록시에 노출할지 결정합니다.
///
/// - `enable` 라벨이 `false`면 제외, 그 밖의 값이면 포함
/// - 라벨이 없으면 `exposed_by_default`를 따르되, 노출 포트가 정확히 하나이거나
///   규칙/포트 라벨이 명시된 경우에만 포함
pub fn should_expose(
    container: &ContainerDescriptor,
    labels: &ContainerLabels,
    exposed_by_default: bool,
) -> bool {
    if let Some(enable) = labels.enable.as_deref() {
        let expose = enable != "false";
        debug!(container = %container.name, enable = %enable, expose, "enable 라벨로 노출 여부 결정");
        return expose;
    }

    if !exposed_by_default {
        debug!(container = %container.name, "기본 노출 비활성화, 컨테이너 제외");
        return false;
    }

    let explicit_target = labels.frontend_rule.is_some() || labels.port.is_some();
    let port_count = container.exposed_ports.len();
    if port_count != 1 && !explicit_target {
        debug!(
            container = %container.name,
            port_count,
            "노출 포트가 모호하고 규칙/포트 라벨 없음, 컨테이너 제외"
        );
        return false;
    }

    true
}
