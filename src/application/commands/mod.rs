//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：改变音箱或命令服务器状态的操作

mod server_commands;
mod speaker_commands;

pub mod handlers;

pub use server_commands::*;
pub use speaker_commands::*;
