//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CommandServerPort、SpeakerCommandPort）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器（含音箱状态聚合）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Speaker commands
    ExecuteCommand,
    RediscoverSpeakers,
    SetVolume,
    ToggleMute,
    // Server commands
    RestartServer,
    StartServer,
    StopServer,
    // Handlers
    handlers::{
        ExecuteCommandHandler, RediscoverSpeakersHandler, RestartServerHandler,
        SetVolumeHandler, StartServerHandler, StopServerHandler, ToggleMuteHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{CommandServerPort, ServerStatus, SpeakerCommandPort, SupervisorError};

pub use queries::{
    // Speaker queries
    GetServerStatus,
    GetSpeakerInfo,
    GetVolume,
    ListSpeakers,
    // Library queries
    GetQueue,
    LibraryKind,
    ListGroups,
    ListLibrary,
    // Handlers
    handlers::{
        GetQueueHandler, GetServerStatusHandler, GetSpeakerInfoHandler, GetVolumeHandler,
        LibraryListing, ListGroupsHandler, ListLibraryHandler, ListSpeakersHandler,
        QueueListing,
    },
};
