use std::{env, fs, path::Path};
use serde::Deserialize;
use tracing::debug;

pub mod logging;
pub mod docker;
mod error;
mod output;

pub use logging::LogSettings;
pub use docker::{DockerSettings, RetrySettings};
pub use error::SettingsError;
pub use output::{OutputFormat, OutputSettings};

pub type Result<T> = std::result::Result<T, SettingsError>;

/// 설정 파일 경로를 담는 환경 변수
pub const CONFIG_FILE_ENV: &str = "PROXY_CONFIG_FILE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    // Docker 프로바이더 설정
    #[serde(default)]
    pub docker: DockerSettings,

    // 렌더링 결과 출력 설정
    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// `PROXY_CONFIG_FILE`이 있으면 TOML 파일에서, 없으면 환경 변수에서 읽습니다.
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var(CONFIG_FILE_ENV) {
            Self::from_toml_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let settings = Self::from_toml_str(&content)?;
        debug!(path = %path.as_ref().display(), "설정 파일 로드 완료");
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let settings = Self {
            logging: LogSettings::from_env()?,
            docker: DockerSettings::from_env()?,
            output: OutputSettings::from_env()?,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        self.docker.validate()
    }
}

/// 환경 변수를 파싱합니다. 변수가 없으면 기본값을 사용합니다.
pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}
