use serde::Deserialize;
use std::env;
use super::{parse_env_var, Result, SettingsError};
use crate::labels::DEFAULT_LABEL_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetrySettings {
    /// 최대 시도 횟수
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 재시도 간격 (초)
    #[serde(default = "default_retry_interval")]
    pub interval: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval: default_retry_interval(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_interval() -> u64 {
    2 // 2초
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DockerSettings {
    /// Docker 데몬 주소 (없으면 로컬 기본값)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// 기본 규칙에 사용할 전역 도메인
    #[serde(default = "default_domain")]
    pub domain: String,

    /// 라벨이 없는 컨테이너도 기본으로 노출할지 여부
    #[serde(default = "default_true")]
    pub exposed_by_default: bool,

    /// 컨테이너 이벤트 감시 여부
    #[serde(default = "default_true")]
    pub watch: bool,

    /// 라벨 접두사
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,

    #[serde(default)]
    pub retry: RetrySettings,
}

impl DockerSettings {
    pub fn from_env() -> Result<Self> {
        let settings = Self {
            endpoint: env::var("PROXY_DOCKER_ENDPOINT").ok().filter(|e| !e.is_empty()),
            domain: parse_env_var("PROXY_DOCKER_DOMAIN", default_domain)?,
            exposed_by_default: parse_env_var("PROXY_EXPOSED_BY_DEFAULT", default_true)?,
            watch: parse_env_var("PROXY_DOCKER_WATCH", default_true)?,
            label_prefix: parse_env_var("PROXY_LABEL_PREFIX", default_label_prefix)?,
            retry: RetrySettings {
                max_attempts: parse_env_var("PROXY_RETRY_MAX_ATTEMPTS", default_max_attempts)?,
                interval: parse_env_var("PROXY_RETRY_INTERVAL", default_retry_interval)?,
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(SettingsError::InvalidConfig {
                field: "docker.domain".to_string(),
                reason: "도메인은 비어있을 수 없습니다".to_string(),
            });
        }

        // 라벨 접두사 검증
        if !self.label_prefix.ends_with('.') {
            return Err(SettingsError::InvalidConfig {
                field: "docker.label_prefix".to_string(),
                reason: format!("라벨 접두사는 '.'으로 끝나야 합니다: {}", self.label_prefix),
            });
        }

        if self.retry.max_attempts == 0 {
            return Err(SettingsError::InvalidConfig {
                field: "docker.retry.max_attempts".to_string(),
                reason: "최대 시도 횟수는 1 이상이어야 합니다".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for DockerSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            domain: default_domain(),
            exposed_by_default: true,
            watch: true,
            label_prefix: default_label_prefix(),
            retry: RetrySettings::default(),
        }
    }
}

fn default_domain() -> String {
    "docker.localhost".to_string()
}

fn default_true() -> bool {
    true
}

fn default_label_prefix() -> String {
    DEFAULT_LABEL_PREFIX.to_string()
}
