//! Command Server Port - 命令服务器进程生命周期抽象
//!
//! 具体实现（启动 soco-cli 子进程）在 infrastructure/process 层

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// 命令服务器启动错误
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("Failed to spawn command server '{executable}': {message}")]
    SpawnFailed { executable: String, message: String },

    #[error("Command server exited during startup (status: {0})")]
    ExitedDuringStartup(String),
}

/// 命令服务器状态
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub is_running: bool,
    pub process_id: Option<u32>,
    /// 仅在运行时给出
    pub server_url: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

/// Command Server Port
///
/// 最多持有一个存活的子进程句柄
#[async_trait]
pub trait CommandServerPort: Send + Sync {
    /// 若未运行则启动并等待就绪；已运行时立即返回
    async fn ensure_running(&self) -> Result<(), SupervisorError>;

    /// 终止子进程并清除句柄，未运行时返回 false
    async fn stop(&self) -> bool;

    /// 基于进程退出状态判断存活，不做网络探测
    async fn is_running(&self) -> bool;

    async fn status(&self) -> ServerStatus;

    /// 命令服务器 Base URL，如 `http://localhost:8000`
    fn server_url(&self) -> String;
}
