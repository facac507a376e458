//! Request Gate - 命令服务器请求串行化
//!
//! soco-cli 在并发 HTTP 请求下会把一个请求的响应体返回给另一个请求，
//! 因此所有发往命令服务器的请求必须一次一个。
//! 容量为 1 的互斥门；permit 在 drop 时释放，任何退出路径都会归还。

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// 请求串行化门，clone 后共享同一个槽位
#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    slot: Arc<Mutex<()>>,
}

/// 持有期间独占命令服务器
pub type RequestPermit<'a> = MutexGuard<'a, ()>;

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 等待并获取唯一槽位，等待者按 FIFO 顺序获得
    pub async fn acquire(&self) -> RequestPermit<'_> {
        self.slot.lock().await
    }

    /// 当前是否有请求在途
    pub fn is_busy(&self) -> bool {
        self.slot.try_lock().is_err()
    }
}
