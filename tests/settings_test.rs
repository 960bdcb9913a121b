use docker_label_provider::settings::logging::{LogFormat, LogOutput};
use docker_label_provider::settings::{OutputFormat, Settings, SettingsError};

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;  // 환경 변수 격리

    const ENV_VARS: [&str; 13] = [
        "PROXY_CONFIG_FILE",
        "PROXY_LOG_LEVEL",
        "PROXY_LOG_FORMAT",
        "PROXY_LOG_OUTPUT",
        "PROXY_DOCKER_ENDPOINT",
        "PROXY_DOCKER_DOMAIN",
        "PROXY_EXPOSED_BY_DEFAULT",
        "PROXY_DOCKER_WATCH",
        "PROXY_LABEL_PREFIX",
        "PROXY_OUTPUT_FILE",
        "PROXY_OUTPUT_FORMAT",
        "PROXY_RETRY_MAX_ATTEMPTS",
        "PROXY_RETRY_INTERVAL",
    ];

    fn cleanup_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    // 테스트용 임시 TOML 파일 생성 헬퍼
    fn create_test_toml(content: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");
        std::fs::write(&file_path, content).unwrap();
        (file_path.to_str().unwrap().to_string(), dir)
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        cleanup_env();

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.logging.level, tracing::Level::INFO);
        assert_eq!(settings.logging.format, LogFormat::Text);
        assert_eq!(settings.logging.output, LogOutput::Stdout);
        assert_eq!(settings.docker.domain, "docker.localhost");
        assert!(settings.docker.exposed_by_default);
        assert!(settings.docker.watch);
        assert_eq!(settings.docker.label_prefix, "traefik.");
        assert_eq!(settings.docker.endpoint, None);
        assert_eq!(settings.docker.retry.max_attempts, 3);
        assert_eq!(settings.docker.retry.interval, 2);
        assert_eq!(settings.output.file, None);
        assert_eq!(settings.output.format, OutputFormat::Toml);
    }

    #[test]
    #[serial]
    fn test_settings_from_env() {
        cleanup_env();

        std::env::set_var("PROXY_LOG_LEVEL", "debug");
        std::env::set_var("PROXY_LOG_FORMAT", "json");
        std::env::set_var("PROXY_DOCKER_DOMAIN", "apps.internal");
        std::env::set_var("PROXY_EXPOSED_BY_DEFAULT", "false");
        std::env::set_var("PROXY_DOCKER_WATCH", "false");
        std::env::set_var("PROXY_LABEL_PREFIX", "custom.");
        std::env::set_var("PROXY_OUTPUT_FORMAT", "json");
        std::env::set_var("PROXY_RETRY_MAX_ATTEMPTS", "5");

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.docker.domain, "apps.internal");
        assert!(!settings.docker.exposed_by_default);
        assert!(!settings.docker.watch);
        assert_eq!(settings.docker.label_prefix, "custom.");
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.docker.retry.max_attempts, 5);

        cleanup_env();
    }

    #[test]
    #[serial]
    fn test_settings_validation() {
        cleanup_env();

        // 1. 잘못된 로그 레벨
        std::env::set_var("PROXY_LOG_LEVEL", "invalid_level");
        assert!(Settings::from_env().is_err());
        cleanup_env();

        // 2. 잘못된 라벨 접두사
        std::env::set_var("PROXY_LABEL_PREFIX", "invalid-prefix");
        let result = Settings::from_env();
        assert!(matches!(result, Err(SettingsError::InvalidConfig { .. })));
        cleanup_env();

        // 3. bool이 아닌 노출 설정
        std::env::set_var("PROXY_EXPOSED_BY_DEFAULT", "sometimes");
        let result = Settings::from_env();
        assert!(matches!(result, Err(SettingsError::EnvVarInvalid { .. })));
        cleanup_env();

        // 4. 빈 도메인
        std::env::set_var("PROXY_DOCKER_DOMAIN", " ");
        assert!(Settings::from_env().is_err());
        cleanup_env();

        // 5. 시도 횟수 0
        std::env::set_var("PROXY_RETRY_MAX_ATTEMPTS", "0");
        assert!(Settings::from_env().is_err());
        cleanup_env();
    }

    #[test]
    #[serial]
    fn test_settings_from_toml() {
        cleanup_env();

        let toml_content = r#"
            [logging]
            format = "json"
            level = "debug"
            output = "/tmp/provider.log"

            [docker]
            endpoint = "tcp://127.0.0.1:2375"
            domain = "test.local"
            exposed_by_default = false
            label_prefix = "test."

            [docker.retry]
            max_attempts = 4

            [output]
            file = "/tmp/rules.toml"
        "#;

        let (file_path, _temp_dir) = create_test_toml(toml_content);
        let settings = Settings::from_toml_file(&file_path).unwrap();

        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(settings.logging.output, LogOutput::File("/tmp/provider.log".to_string()));
        assert_eq!(settings.docker.endpoint.as_deref(), Some("tcp://127.0.0.1:2375"));
        assert_eq!(settings.docker.domain, "test.local");
        assert!(!settings.docker.exposed_by_default);
        assert!(settings.docker.watch);
        assert_eq!(settings.docker.label_prefix, "test.");
        assert_eq!(settings.docker.retry.max_attempts, 4);
        assert_eq!(settings.docker.retry.interval, 2);
        assert_eq!(settings.output.file.as_deref(), Some("/tmp/rules.toml"));
        assert_eq!(settings.output.format, OutputFormat::Toml);
    }

    #[test]
    #[serial]
    fn test_settings_load_prefers_config_file() {
        cleanup_env();

        let (file_path, _temp_dir) = create_test_toml("[docker]\ndomain = \"from.file\"\n");
        std::env::set_var("PROXY_CONFIG_FILE", &file_path);
        std::env::set_var("PROXY_DOCKER_DOMAIN", "from.env");

        let settings = Settings::load().unwrap();
        assert_eq!(settings.docker.domain, "from.file");

        cleanup_env();
    }

    #[test]
    fn test_settings_invalid_toml() {
        let result = Settings::from_toml_str("[docker\ndomain = ");
        assert!(matches!(result, Err(SettingsError::ParseError { .. })));

        let result = Settings::from_toml_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());

        let result = Settings::from_toml_str("[docker]\nlabel_prefix = \"nodot\"\n");
        assert!(matches!(result, Err(SettingsError::InvalidConfig { .. })));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Settings::from_toml_file("/nonexistent/provider.toml");
        assert!(matches!(result, Err(SettingsError::FileError { .. })));
    }
}
