use super::EngineConfig;
use crate::ParallelContext;
use figment::Jail;

fn load_in_jail(custom_config: Option<&str>) -> Result<EngineConfig, figment::Error> {
    EngineConfig::load_with_custom_config(custom_config).map_err(|e| format!("{e:#}").into())
}

#[test]
fn test_config_loads_defaults() {
    Jail::expect_with(|_| {
        let config = load_in_jail(None)?;
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.concurrency, 0);
        assert_eq!(config.thread_percentage, 100);
        assert_eq!(config.max_threads, 0);
        Ok(())
    });
}

#[test]
fn test_repo_config_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "enumerable.toml",
            r#"
            [parallel]
            concurrency = 6
            "#,
        )?;
        let config = load_in_jail(None)?;
        assert_eq!(config.concurrency, 6);
        // Untouched keys keep their defaults
        assert_eq!(config.thread_percentage, 100);
        Ok(())
    });
}

#[test]
fn test_custom_config_path() {
    Jail::expect_with(|jail| {
        jail.create_file("enumerable.toml", "[parallel]\nconcurrency = 2")?;
        jail.create_file("custom.toml", "[parallel]\nconcurrency = 9\nmax_threads = 4")?;
        let config = load_in_jail(Some("custom.toml"))?;
        assert_eq!(config.concurrency, 9);
        assert_eq!(config.max_threads, 4);
        Ok(())
    });
}

#[test]
fn test_missing_custom_config_falls_back_to_defaults() {
    Jail::expect_with(|_| {
        let config = load_in_jail(Some("non_existent.toml"))?;
        assert_eq!(config, EngineConfig::default());
        Ok(())
    });
}

#[test]
fn test_env_has_highest_priority() {
    Jail::expect_with(|jail| {
        jail.create_file("enumerable.toml", "[parallel]\nconcurrency = 6")?;
        jail.set_env("ENUMERABLE_PARALLEL__CONCURRENCY", 3);
        jail.set_env("ENUMERABLE_PARALLEL__THREAD_PERCENTAGE", 50);
        let config = load_in_jail(None)?;
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.thread_percentage, 50);
        Ok(())
    });
}

#[test]
fn test_invalid_percentage_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("enumerable.toml", "[parallel]\nthread_percentage = 150")?;
        let err = EngineConfig::load().unwrap_err();
        assert!(err.to_string().contains("thread_percentage"));
        Ok(())
    });
}

#[test]
fn test_malformed_value_reports_section() {
    Jail::expect_with(|jail| {
        jail.create_file("enumerable.toml", "[parallel]\nconcurrency = \"many\"")?;
        let err = EngineConfig::load().unwrap_err();
        assert!(err.to_string().contains("[parallel]"));
        Ok(())
    });
}

#[test]
fn test_resolve_concurrency() {
    let explicit = EngineConfig {
        concurrency: 5,
        ..EngineConfig::default()
    };
    assert_eq!(explicit.resolve_concurrency(), 5);

    let capped = EngineConfig {
        max_threads: 1,
        ..EngineConfig::default()
    };
    assert_eq!(capped.resolve_concurrency(), 1);

    let derived = EngineConfig::default();
    assert_eq!(
        derived.resolve_concurrency(),
        ParallelContext::available().concurrency()
    );
}

#[test]
fn test_context_from_config() {
    let config = EngineConfig {
        concurrency: 3,
        ..EngineConfig::default()
    };
    assert_eq!(ParallelContext::from_config(&config).concurrency(), 3);
}
