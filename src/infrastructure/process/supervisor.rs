//! soco-cli Supervisor - 管理 sonos-http-api-server 子进程
//!
//! 实现 CommandServerPort：
//! - 按需启动（`--port`、可选 `--macros`、可选 `--use-local-speaker-list`）
//! - 有限次数的就绪轮询（进程存活 + 端口可连接）
//! - 基于退出状态的存活判断
//! - 停止并清除句柄
//!
//! 进程崩溃不会自动重启，下一次 ensure_running 时重新拉起。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use crate::application::ports::{CommandServerPort, ServerStatus, SupervisorError};

/// Supervisor 配置
#[derive(Debug, Clone)]
pub struct SocoCliSupervisorConfig {
    /// 已解析的可执行文件路径
    pub executable: PathBuf,
    /// 命令服务器监听端口
    pub port: u16,
    /// 宏定义文件
    pub macros_path: Option<PathBuf>,
    /// 使用本地缓存的音箱列表
    pub use_local_cache: bool,
    /// 就绪检查次数
    pub startup_attempts: u32,
    /// 就绪检查间隔
    pub startup_interval: Duration,
    /// 停止时等待退出的时间
    pub stop_timeout: Duration,
}

impl Default for SocoCliSupervisorConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(super::EXECUTABLE_NAME),
            port: 8000,
            macros_path: None,
            use_local_cache: false,
            startup_attempts: 10,
            startup_interval: Duration::from_millis(300),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

impl SocoCliSupervisorConfig {
    pub fn new(executable: impl Into<PathBuf>, port: u16) -> Self {
        Self {
            executable: executable.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_macros(mut self, path: impl Into<PathBuf>) -> Self {
        self.macros_path = Some(path.into());
        self
    }

    pub fn with_startup(mut self, attempts: u32, interval: Duration) -> Self {
        self.startup_attempts = attempts;
        self.startup_interval = interval;
        self
    }

    /// 子进程参数
    fn args(&self) -> Vec<String> {
        let mut args = vec!["--port".to_string(), self.port.to_string()];
        if let Some(path) = &self.macros_path {
            args.push("--macros".to_string());
            args.push(path.display().to_string());
        }
        if self.use_local_cache {
            args.push("--use-local-speaker-list".to_string());
        }
        args
    }
}

/// 运行中的子进程句柄
struct RunningServer {
    child: Child,
    pid: Option<u32>,
    started_at: DateTime<Utc>,
}

/// 子进程存活状态
enum Liveness {
    NotStarted,
    Running,
    Exited(String),
}

/// soco-cli Supervisor
pub struct SocoCliSupervisor {
    config: SocoCliSupervisorConfig,
    server: Mutex<Option<RunningServer>>,
    /// 串行化启动，避免并发调用方重复拉起进程
    start_lock: Mutex<()>,
}

impl SocoCliSupervisor {
    pub fn new(config: SocoCliSupervisorConfig) -> Self {
        Self {
            config,
            server: Mutex::new(None),
            start_lock: Mutex::new(()),
        }
    }

    /// 检查子进程状态，已退出的句柄会被清除
    async fn liveness(&self) -> Liveness {
        let mut guard = self.server.lock().await;
        let Some(running) = guard.as_mut() else {
            return Liveness::NotStarted;
        };

        match running.child.try_wait() {
            Ok(None) => Liveness::Running,
            Ok(Some(status)) => {
                *guard = None;
                Liveness::Exited(status.to_string())
            }
            Err(e) => {
                *guard = None;
                Liveness::Exited(e.to_string())
            }
        }
    }

    /// 启动子进程；句柄在就绪前只由启动方持有
    async fn spawn(&self) -> Result<RunningServer, SupervisorError> {
        let args = self.config.args();
        let executable = self.config.executable.display().to_string();

        tracing::info!(
            executable = %executable,
            args = ?args,
            "Starting soco-cli server"
        );

        let mut child = Command::new(&self.config.executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SupervisorError::SpawnFailed {
                executable: executable.clone(),
                message: e.to_string(),
            })?;

        if let Some(stdout) = child.stdout.take() {
            forward_output(stdout, "stdout");
        }
        if let Some(stderr) = child.stderr.take() {
            forward_output(stderr, "stderr");
        }

        let pid = child.id();
        tracing::info!(
            pid = ?pid,
            port = self.config.port,
            "Started soco-cli server"
        );

        Ok(RunningServer {
            child,
            pid,
            started_at: Utc::now(),
        })
    }

    /// 轮询直到端口可连接；进程退出则失败；次数耗尽但进程仍在时视为已启动
    async fn wait_until_ready(&self, running: &mut RunningServer) -> Result<(), SupervisorError> {
        for attempt in 1..=self.config.startup_attempts {
            tokio::time::sleep(self.config.startup_interval).await;

            let exited = match running.child.try_wait() {
                Ok(None) => None,
                Ok(Some(status)) => Some(status.to_string()),
                Err(e) => Some(e.to_string()),
            };
            if let Some(status) = exited {
                tracing::error!(status = %status, "soco-cli process exited during startup");
                return Err(SupervisorError::ExitedDuringStartup(status));
            }

            if TcpStream::connect(("localhost", self.config.port)).await.is_ok() {
                tracing::info!(attempt = attempt, "soco-cli server is accepting connections");
                return Ok(());
            }

            tracing::debug!(
                attempt = attempt,
                max_attempts = self.config.startup_attempts,
                "Waiting for soco-cli server"
            );
        }

        tracing::warn!("soco-cli server started but is not yet accepting connections");
        Ok(())
    }
}

/// 将子进程输出转发到日志，同时避免管道写满阻塞子进程
fn forward_output<R>(reader: R, stream: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            tracing::debug!(target: "soco_cli", stream = stream, "{}", line);
        }
    });
}

#[async_trait]
impl CommandServerPort for SocoCliSupervisor {
    async fn ensure_running(&self) -> Result<(), SupervisorError> {
        if matches!(self.liveness().await, Liveness::Running) {
            return Ok(());
        }

        let _start = self.start_lock.lock().await;
        // 等锁期间可能已被其他调用方启动
        if matches!(self.liveness().await, Liveness::Running) {
            return Ok(());
        }

        // 就绪前不发布句柄，并发调用方会在 start_lock 上等待
        let mut running = self.spawn().await?;
        self.wait_until_ready(&mut running).await?;
        *self.server.lock().await = Some(running);
        Ok(())
    }

    async fn stop(&self) -> bool {
        let Some(mut running) = self.server.lock().await.take() else {
            return false;
        };

        if let Ok(Some(status)) = running.child.try_wait() {
            tracing::info!(status = %status, "soco-cli server had already exited");
            return false;
        }

        if let Err(e) = running.child.start_kill() {
            tracing::error!(error = %e, "Failed to stop soco-cli server");
            return false;
        }

        match tokio::time::timeout(self.config.stop_timeout, running.child.wait()).await {
            Ok(Ok(status)) => {
                tracing::info!(status = %status, "Stopped soco-cli server");
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Failed to reap soco-cli server");
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.config.stop_timeout.as_secs(),
                    "soco-cli server did not exit before timeout"
                );
            }
        }
        true
    }

    async fn is_running(&self) -> bool {
        matches!(self.liveness().await, Liveness::Running)
    }

    async fn status(&self) -> ServerStatus {
        let is_running = self.is_running().await;
        let guard = self.server.lock().await;

        ServerStatus {
            is_running,
            process_id: guard.as_ref().and_then(|r| r.pid),
            server_url: is_running.then(|| self.server_url()),
            started_at: guard.as_ref().map(|r| r.started_at),
        }
    }

    fn server_url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}
