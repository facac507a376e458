//! Speaker Context - Errors

use thiserror::Error;

/// 构造命令请求时的错误（调用方编程错误）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Speaker name cannot be empty")]
    EmptySpeaker,

    #[error("Action cannot be empty")]
    EmptyAction,
}
