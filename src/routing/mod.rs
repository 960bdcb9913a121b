//! 컨테이너 메타데이터를 라우팅 설정(프론트엔드, 백엔드, 서버)으로 변환하는 핵심 모듈입니다.

mod assembler;
mod error;
mod filter;
mod network;
mod port;
mod rule;
mod types;

pub use assembler::{
    Assembly, AssemblerOptions, ConfigAssembler,
    DEFAULT_PASS_HOST_HEADER, DEFAULT_PRIORITY, DEFAULT_PROTOCOL, DEFAULT_WEIGHT,
};
pub use error::ConfigError;
pub use filter::should_expose;
pub use network::{resolve_ip_address, LOOPBACK_ADDRESS};
pub use port::{is_valid_port, parse_exposed_port, resolve_port};
pub use rule::{slugify, AtomicRule, CompoundRule, RULE_SEPARATOR};
pub use types::{Backend, Frontend, Route, RoutingConfig, Server};
