//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// soco-cli 命令服务器配置
    #[serde(default)]
    pub soco_cli: SocoCliConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// soco-cli 命令服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct SocoCliConfig {
    /// sonos-http-api-server 可执行文件路径，未设置时自动查找
    #[serde(default)]
    pub executable_path: Option<PathBuf>,

    /// 命令服务器监听端口
    #[serde(default = "default_soco_port")]
    pub port: u16,

    /// 宏定义文件路径（传给 `--macros`）
    #[serde(default)]
    pub macros_path: Option<PathBuf>,

    /// 使用本地缓存的音箱列表（`--use-local-speaker-list`）
    #[serde(default)]
    pub use_local_cache: bool,

    /// 单次命令请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 启动就绪检查次数
    #[serde(default = "default_startup_attempts")]
    pub startup_attempts: u32,

    /// 启动就绪检查间隔（毫秒）
    #[serde(default = "default_startup_interval")]
    pub startup_interval_ms: u64,

    /// 停止时等待进程退出的时间（秒）
    #[serde(default = "default_stop_timeout")]
    pub stop_timeout_secs: u64,
}

fn default_soco_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_startup_attempts() -> u32 {
    10
}

fn default_startup_interval() -> u64 {
    300
}

fn default_stop_timeout() -> u64 {
    5
}

impl Default for SocoCliConfig {
    fn default() -> Self {
        Self {
            executable_path: None,
            port: default_soco_port(),
            macros_path: None,
            use_local_cache: false,
            request_timeout_secs: default_request_timeout(),
            startup_attempts: default_startup_attempts(),
            startup_interval_ms: default_startup_interval(),
            stop_timeout_secs: default_stop_timeout(),
        }
    }
}

impl SocoCliConfig {
    /// 命令服务器 Base URL
    pub fn server_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.soco_cli.port, 8000);
        assert_eq!(config.soco_cli.request_timeout_secs, 30);
        assert!(config.soco_cli.macros_path.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_soco_server_url() {
        let config = SocoCliConfig {
            port: 8123,
            ..Default::default()
        };
        assert_eq!(config.server_url(), "http://localhost:8123");
    }
}
