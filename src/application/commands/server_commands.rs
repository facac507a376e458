//! Command Server Commands

/// 启动命令服务器
#[derive(Debug, Clone)]
pub struct StartServer;

/// 停止命令服务器
#[derive(Debug, Clone)]
pub struct StopServer;

/// 重启命令服务器（先停后启）
#[derive(Debug, Clone)]
pub struct RestartServer;
