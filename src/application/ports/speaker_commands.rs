//! Speaker Command Port - 音箱命令执行抽象
//!
//! 外部命令服务器是设备命令的唯一执行者。
//! 所有方法都不返回错误：失败编码在返回值中（空列表或非零 exit_code），
//! 因为离线音箱是常见情况而不是异常。

use async_trait::async_trait;

use crate::domain::speaker::{CommandRequest, CommandResult};

/// Speaker Command Port
#[async_trait]
pub trait SpeakerCommandPort: Send + Sync {
    /// 已发现的音箱名称，任何失败返回空列表
    async fn list_speakers(&self) -> Vec<String>;

    /// 触发重新发现，任何失败返回空列表
    async fn rediscover_speakers(&self) -> Vec<String>;

    /// 执行一条命令，每个请求恰好对应一个结果
    async fn execute(&self, request: &CommandRequest) -> CommandResult;
}
