//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SONOS_HUB_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SONOS_HUB_SERVER__PORT=5000`
/// - `SONOS_HUB_SOCO_CLI__PORT=8000`
/// - `SONOS_HUB_SOCO_CLI__MACROS_PATH=/data/macros.txt`
/// - `SONOS_HUB_SOCO_CLI__REQUEST_TIMEOUT_SECS=15`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("soco_cli.port", 8000)?
        .set_default("soco_cli.use_local_cache", false)?
        .set_default("soco_cli.request_timeout_secs", 30)?
        .set_default("soco_cli.startup_attempts", 10)?
        .set_default("soco_cli.startup_interval_ms", 300)?
        .set_default("soco_cli.stop_timeout_secs", 5)?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: SONOS_HUB_SOCO_CLI__PORT=8001
    builder = builder.add_source(
        Environment::with_prefix("SONOS_HUB")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.soco_cli.port == 0 {
        return Err(ConfigError::ValidationError(
            "soco-cli port cannot be 0".to_string(),
        ));
    }

    if config.server.port == config.soco_cli.port {
        return Err(ConfigError::ValidationError(format!(
            "Server and soco-cli cannot share port {}",
            config.server.port
        )));
    }

    if config.soco_cli.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "soco-cli request timeout cannot be 0".to_string(),
        ));
    }

    if config.soco_cli.startup_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "soco-cli startup attempts cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("soco-cli URL: {}", config.soco_cli.server_url());
    match &config.soco_cli.executable_path {
        Some(path) => tracing::info!("soco-cli Executable: {}", path.display()),
        None => tracing::info!("soco-cli Executable: <auto>"),
    }
    if let Some(path) = &config.soco_cli.macros_path {
        tracing::info!("soco-cli Macros: {}", path.display());
    }
    tracing::info!("soco-cli Local Cache: {}", config.soco_cli.use_local_cache);
    tracing::info!("soco-cli Timeout: {}s", config.soco_cli.request_timeout_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_shared_port() {
        let mut config = AppConfig::default();
        config.soco_cli.port = config.server.port;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.soco_cli.request_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 5050\n\n[soco_cli]\nport = 8100\nmacros_path = \"/data/macros.txt\"\nuse_local_cache = true"
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 5050);
        assert_eq!(config.soco_cli.port, 8100);
        assert!(config.soco_cli.use_local_cache);
        assert_eq!(
            config.soco_cli.macros_path.as_deref(),
            Some(Path::new("/data/macros.txt"))
        );
        assert_eq!(config.soco_cli.request_timeout_secs, 30);
    }
}
