//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::SupervisorError;
use crate::domain::speaker::CommandError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 命令执行失败（命令服务器返回非零 exit_code）
    #[error("Command '{action}' failed on {speaker}: {message}")]
    CommandFailed {
        speaker: String,
        action: String,
        message: String,
    },

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<CommandError> for ApplicationError {
    fn from(err: CommandError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<SupervisorError> for ApplicationError {
    fn from(err: SupervisorError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}
