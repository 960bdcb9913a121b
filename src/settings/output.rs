use serde::Deserialize;
use std::env;
use super::{parse_env_var, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(OutputFormat::Toml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// 생성된 라우팅 설정을 기록할 위치
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputSettings {
    /// 출력 파일 (없으면 stdout)
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            file: env::var("PROXY_OUTPUT_FILE").ok().filter(|f| !f.is_empty()),
            format: parse_env_var("PROXY_OUTPUT_FORMAT", OutputFormat::default)?,
        })
    }
}
