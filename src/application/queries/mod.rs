//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：读取音箱、库与命令服务器状态

mod library_queries;
mod speaker_queries;

pub mod handlers;

pub use library_queries::*;
pub use speaker_queries::*;
