use std::process::ExitCode;
use tracing::{error, info};

use docker_label_provider::docker::{DockerProvider, ProviderEvent};
use docker_label_provider::logging::init_logging;
use docker_label_provider::routing::RoutingConfig;
use docker_label_provider::settings::{OutputFormat, OutputSettings, Settings};

fn render(config: &RoutingConfig, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Toml => config.to_toml().map_err(|e| e.to_string()),
        OutputFormat::Json => config.to_json().map_err(|e| e.to_string()),
    }
}

async fn write_config(config: &RoutingConfig, output: &OutputSettings) -> Result<(), String> {
    let rendered = render(config, output.format)?;
    match &output.file {
        Some(path) => tokio::fs::write(path, rendered)
            .await
            .map_err(|e| format!("{}: {}", path, e)),
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = init_logging(&settings.logging);
    info!(
        domain = %settings.docker.domain,
        exposed_by_default = settings.docker.exposed_by_default,
        watch = settings.docker.watch,
        "프로바이더 시작"
    );

    let provider = match DockerProvider::with_defaults(settings.docker.clone()) {
        Ok(provider) => provider,
        Err(e) => {
            error!(error = %e, "Docker 프로바이더 초기화 실패");
            return ExitCode::FAILURE;
        }
    };

    let mut events = provider.provide();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(ProviderEvent::ConfigurationUpdated(config)) => {
                    if let Err(e) = write_config(&config, &settings.output).await {
                        error!(error = %e, "라우팅 설정 출력 실패");
                    }
                }
                Some(ProviderEvent::Error(e)) => {
                    error!(error = %e, "프로바이더 오류");
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("종료 신호 수신");
                break;
            }
        }
    }

    ExitCode::SUCCESS
}
