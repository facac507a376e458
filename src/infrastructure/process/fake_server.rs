//! Fake Command Server - 用于测试的命令服务器
//!
//! 不启动任何进程，只维护运行标志，指向给定 URL（通常是 mock server）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{CommandServerPort, ServerStatus, SupervisorError};

/// Fake Command Server
pub struct FakeCommandServer {
    url: String,
    fail_start: bool,
    running: AtomicBool,
    start_count: AtomicUsize,
    started_at: Mutex<Option<DateTime<Utc>>>,
}

impl FakeCommandServer {
    /// 启动总是成功
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fail_start: false,
            running: AtomicBool::new(false),
            start_count: AtomicUsize::new(0),
            started_at: Mutex::new(None),
        }
    }

    /// 启动总是失败
    pub fn failing(url: impl Into<String>) -> Self {
        Self {
            fail_start: true,
            ..Self::new(url)
        }
    }

    /// 实际启动次数
    pub fn start_count(&self) -> usize {
        self.start_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandServerPort for FakeCommandServer {
    async fn ensure_running(&self) -> Result<(), SupervisorError> {
        if self.fail_start {
            return Err(SupervisorError::SpawnFailed {
                executable: "fake".to_string(),
                message: "start disabled".to_string(),
            });
        }
        if !self.running.swap(true, Ordering::SeqCst) {
            self.start_count.fetch_add(1, Ordering::SeqCst);
            *self.started_at.lock().unwrap_or_else(|e| e.into_inner()) = Some(Utc::now());
        }
        Ok(())
    }

    async fn stop(&self) -> bool {
        self.running.swap(false, Ordering::SeqCst)
    }

    async fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn status(&self) -> ServerStatus {
        let is_running = self.running.load(Ordering::SeqCst);
        ServerStatus {
            is_running,
            process_id: None,
            server_url: is_running.then(|| self.url.clone()),
            started_at: *self.started_at.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }

    fn server_url(&self) -> String {
        self.url.clone()
    }
}
