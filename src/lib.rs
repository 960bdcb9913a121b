//! Docker 컨테이너 라벨로부터 리버스 프록시 라우팅 설정을 생성하는 프로바이더입니다.
//!
//! # 주요 기능
//!
//! - 라벨 기반 프론트엔드 규칙 파싱 및 이름 생성
//! - 다중 네트워크/호스트 네트워크 환경에서의 주소 선택
//! - 노출 포트 선택 및 컨테이너 필터링
//! - 여러 컨테이너를 하나의 백엔드로 묶는 설정 조립
//!
//! # 예제
//!
//! ```
//! use docker_label_provider::container::ContainerDescriptor;
//! use docker_label_provider::routing::{AssemblerOptions, ConfigAssembler};
//!
//! let assembler = ConfigAssembler::new(AssemblerOptions::default());
//!
//! let container = ContainerDescriptor::new("whoami")
//!     .with_network("bridge", "172.17.0.2")
//!     .with_exposed_port("80/tcp");
//!
//! let config = assembler.load_config(&[container]);
//! let backend = &config.backends["backend-whoami"];
//! assert_eq!(backend.servers["server-whoami"].url, "http://172.17.0.2:80");
//! assert!(config.frontends.contains_key("frontend-Host-whoami-docker-localhost"));
//! ```
//!
//! # 복합 규칙
//!
//! ```
//! use docker_label_provider::routing::CompoundRule;
//!
//! let rule = CompoundRule::parse("PathPrefix:/test2&&Host:foo.bar");
//! assert_eq!(rule.names(), vec!["PathPrefix-test2", "Host-foo-bar"]);
//! ```

pub mod container;
pub mod docker;
pub mod labels;
pub mod logging;
pub mod routing;
pub mod settings;
