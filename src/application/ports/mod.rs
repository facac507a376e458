//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod command_server;
mod speaker_commands;

pub use command_server::{CommandServerPort, ServerStatus, SupervisorError};
pub use speaker_commands::SpeakerCommandPort;
