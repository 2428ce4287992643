//! Integration tests for config

#[cfg(test)]
mod tests {
    use forge_config::*;
    use forge_types::Platform;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 5] = [
        constants::ENV_LOCAL_SOURCES,
        constants::ENV_SOURCES,
        constants::ENV_PREFIX,
        constants::ENV_TARGET_PLATFORM,
        constants::ENV_BUILD_JOBS,
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[paths]
local_sources = "/var/cache/forge"
sources = "/tmp/forge/sources"

[build]
target_platform = "windows"
build_jobs = 4
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.local_sources(), PathBuf::from("/var/cache/forge"));
        assert_eq!(config.sources(), PathBuf::from("/tmp/forge/sources"));
        assert_eq!(config.prefix(), PathBuf::from(constants::PREFIX));
        assert_eq!(config.target_platform(), Platform::Windows);
        assert_eq!(config.build_jobs(), 4);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Config::load_from_file(Path::new("/nonexistent/forge.toml")).await;
        assert!(matches!(
            result,
            Err(forge_errors::Error::Config(
                forge_errors::ConfigError::NotFound { .. }
            ))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.target_platform(), Platform::host());
        assert_eq!(config.sources(), PathBuf::from(constants::SOURCES_DIR));
        assert!(config.build_jobs() >= 1);
    }

    #[test]
    fn test_invalid_platform_in_file() {
        let result = Config::from_toml("[build]\ntarget_platform = \"beos\"\n");
        assert!(matches!(
            result,
            Err(forge_errors::Error::Config(
                forge_errors::ConfigError::ParseError { .. }
            ))
        ));
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var(constants::ENV_TARGET_PLATFORM, "darwin");
        std::env::set_var(constants::ENV_SOURCES, "/build/sources");
        std::env::set_var(constants::ENV_BUILD_JOBS, "2");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.target_platform(), Platform::Darwin);
        assert_eq!(config.sources(), PathBuf::from("/build/sources"));
        assert_eq!(config.build_jobs(), 2);

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var(constants::ENV_TARGET_PLATFORM, "beos");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    fn test_calculate_build_jobs() {
        assert_eq!(calculate_build_jobs(6), 6);
        assert!(calculate_build_jobs(0) >= 1);
    }
}
