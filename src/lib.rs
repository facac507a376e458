//! Sonos Hub - soco-cli 命令服务器的串行化网关
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speaker: 命令请求/结果、失败分类、音箱状态快照
//! - Library: 收藏、播放列表、队列的文本解析
//!
//! 应用层 (application/):
//! - Ports: CommandServerPort（子进程生命周期）、SpeakerCommandPort（命令网关）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器（含状态聚合）
//!
//! 基础设施层 (infrastructure/):
//! - Process: soco-cli 子进程 Supervisor
//! - Adapters: HTTP 命令客户端 + 全局请求闸门
//! - HTTP: RESTful API

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
