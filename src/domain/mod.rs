//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Speaker Context: 命令请求/结果、状态快照、失败分类
//! - Library Context: 收藏、播放列表、队列文本解析

pub mod library;
pub mod speaker;

pub use library::{parse_numbered_list, parse_queue_list, ListItem, QueueItem};
pub use speaker::{
    classify_failure, is_connectivity_failure, CommandError, CommandRequest, CommandResult,
    FailureKind, SpeakerSnapshot,
};
