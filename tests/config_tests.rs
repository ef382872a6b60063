// Configuration loading and validation

use research_bench::bench::RunnerOptions;
use research_bench::config::config::{AppConfig, BackendKind};
use research_bench::config::loader::{ConfigLoader, ConfigValidationError};
use std::time::Duration;

#[test]
fn test_defaults_without_file() {
    figment::Jail::expect_with(|_jail| {
        let config = ConfigLoader::load()?;

        assert_eq!(config.document.url, "ws://localhost:8000");
        assert_eq!(config.key_value.url, "redis://localhost:6379");
        assert_eq!(config.key_value.keyspace, "Research");
        assert_eq!(
            config.benchmark.backends,
            vec![BackendKind::Document, BackendKind::KeyValue]
        );
        assert!(config.benchmark.fail_on_error);
        Ok(())
    });
}

#[test]
fn test_file_and_env_overrides() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "research-bench.toml",
            r#"
                [document]
                url = "mem://"
                username = ""

                [benchmark]
                backends = ["memory", "document"]
                include = ["Read"]
                measurement_iterations = 5
                iteration_time_ms = 50
            "#,
        )?;
        jail.set_env("RESEARCH_BENCH_KEY_VALUE__KEYSPACE", "Papers");
        jail.set_env("RESEARCH_BENCH_BENCHMARK__FAIL_ON_ERROR", "false");

        let config = ConfigLoader::load()?;

        assert_eq!(config.document.url, "mem://");
        assert_eq!(config.document.namespace, "research");
        assert_eq!(config.key_value.keyspace, "Papers");
        assert_eq!(
            config.benchmark.backends,
            vec![BackendKind::Memory, BackendKind::Document]
        );
        assert!(!config.benchmark.fail_on_error);

        let options = RunnerOptions::from_config(&config.benchmark);
        assert_eq!(options.include, vec!["Read".to_string()]);
        assert_eq!(options.measurement_iterations, Some(5));
        assert_eq!(options.iteration_time, Some(Duration::from_millis(50)));
        Ok(())
    });
}

#[test]
fn test_validate_development_config() {
    assert!(ConfigLoader::validate(&AppConfig::development()).is_ok());
    assert!(ConfigLoader::validate(&AppConfig::in_memory()).is_ok());
}

#[test]
fn test_validate_rejects_missing_url() {
    let mut config = AppConfig::development();
    config.key_value.url.clear();

    assert!(matches!(
        ConfigLoader::validate(&config),
        Err(ConfigValidationError::MissingUrl(BackendKind::KeyValue))
    ));
}

#[test]
fn test_validate_rejects_empty_backends_and_zero_iterations() {
    let mut config = AppConfig::in_memory();
    config.benchmark.backends.clear();
    assert!(matches!(
        ConfigLoader::validate(&config),
        Err(ConfigValidationError::NoBackends)
    ));

    let mut config = AppConfig::in_memory();
    config.benchmark.measurement_iterations = Some(0);
    assert!(matches!(
        ConfigLoader::validate(&config),
        Err(ConfigValidationError::InvalidIterations)
    ));

    let mut config = AppConfig::in_memory();
    config.benchmark.iteration_time_ms = Some(0);
    assert!(matches!(
        ConfigLoader::validate(&config),
        Err(ConfigValidationError::InvalidIterationTime)
    ));
}

#[test]
fn test_backend_aliases_in_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "research-bench.toml",
            r#"
                [benchmark]
                backends = ["surrealdb", "redis", "key_value"]
            "#,
        )?;

        let config = ConfigLoader::load()?;

        assert_eq!(
            config.benchmark.backends,
            vec![BackendKind::Document, BackendKind::KeyValue, BackendKind::KeyValue]
        );
        Ok(())
    });
}

#[test]
fn test_unknown_backend_is_rejected() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "research-bench.toml",
            r#"
                [benchmark]
                backends = ["mongo"]
            "#,
        )?;

        assert!(ConfigLoader::load().is_err());
        Ok(())
    });
}
