//! Speaker Context - 音箱控制限界上下文
//!
//! 职责:
//! - 命令请求 / 命令结果（soco-cli 命令语法的结构化表示）
//! - 音箱状态快照
//! - 失败分类（离线 vs 其他错误）

mod command;
mod errors;
mod failure;
mod snapshot;

pub use command::{CommandRequest, CommandResult};
pub use errors::CommandError;
pub use failure::{classify_failure, is_connectivity_failure, FailureKind, CONNECTIVITY_MARKERS};
pub use snapshot::{SpeakerSnapshot, OFFLINE_MESSAGE};
