use std::path::Path;
use tracing::{info, warn, Level, span};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::routing::Assembly;
use crate::settings::logging::{LogFormat, LogOutput};
use crate::settings::LogSettings;

/// 로깅 시스템을 초기화합니다.
///
/// 반환되는 guard는 프로그램이 끝날 때까지 유지해야 버퍼된 로그가 모두 기록됩니다.
pub fn init_logging(settings: &LogSettings) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = settings.level.to_string().to_lowercase();
        EnvFilter::new(format!("{},bollard=warn", level))
    });

    let (writer, guard) = match &settings.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::File(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| "docker_label_provider.log".to_string());
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let result = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("로깅 초기화 실패: {}", e);
    }

    guard
}

/// 한 번의 설정 빌드에 대한 기록
#[derive(Debug, Clone, Default)]
pub struct BuildLog {
    pub build_id: u64,
    pub trigger: String,
    pub containers: usize,
    pub frontends: usize,
    pub backends: usize,
    pub errors: Vec<String>,
    pub duration_ms: u64,
    pub changed: bool,
}

impl BuildLog {
    pub fn new(build_id: u64, trigger: impl Into<String>) -> Self {
        Self {
            build_id,
            trigger: trigger.into(),
            ..Default::default()
        }
    }

    pub fn with_assembly(&mut self, containers: usize, assembly: &Assembly) {
        self.containers = containers;
        self.frontends = assembly.config.frontends.len();
        self.backends = assembly.config.backends.len();
        self.errors = assembly.errors.iter().map(ToString::to_string).collect();
    }
}

pub fn log_build(log: &BuildLog) {
    let span = span!(
        Level::INFO,
        "build",
        build_id = log.build_id,
        trigger = %log.trigger,
        duration_ms = log.duration_ms
    );
    let _enter = span.enter();

    if log.errors.is_empty() {
        info!(
            containers = log.containers,
            frontends = log.frontends,
            backends = log.backends,
            changed = log.changed,
            "라우팅 설정 빌드 완료"
        );
    } else {
        warn!(
            containers = log.containers,
            frontends = log.frontends,
            backends = log.backends,
            changed = log.changed,
            errors = ?log.errors,
            "라우팅 설정 빌드 완료 (일부 컨테이너 오류)"
        );
    }
}
