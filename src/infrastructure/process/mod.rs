//! Process - 命令服务器子进程管理
//!
//! CommandServerPort 的实现

mod executable;
mod fake_server;
mod supervisor;

pub use executable::{resolve_executable, EXECUTABLE_NAME};
pub use fake_server::FakeCommandServer;
pub use supervisor::{SocoCliSupervisor, SocoCliSupervisorConfig};
