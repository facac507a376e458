//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ExecuteCommandHandler, RediscoverSpeakersHandler, RestartServerHandler, SetVolumeHandler,
    StartServerHandler, StopServerHandler, ToggleMuteHandler,
    // Query handlers
    GetQueueHandler, GetServerStatusHandler, GetSpeakerInfoHandler, GetVolumeHandler,
    ListGroupsHandler, ListLibraryHandler, ListSpeakersHandler,
    // Ports
    CommandServerPort, SpeakerCommandPort,
};

/// 应用状态
///
/// 命令服务器只有一个实例，所有 handler 共享同一个 supervisor 和网关
pub struct AppState {
    // ========== Ports ==========
    pub server: Arc<dyn CommandServerPort>,
    pub commands: Arc<dyn SpeakerCommandPort>,

    // ========== Command Handlers ==========
    pub start_server_handler: StartServerHandler,
    pub stop_server_handler: StopServerHandler,
    pub restart_server_handler: RestartServerHandler,
    pub execute_command_handler: ExecuteCommandHandler,
    pub set_volume_handler: SetVolumeHandler,
    pub toggle_mute_handler: ToggleMuteHandler,
    pub rediscover_handler: RediscoverSpeakersHandler,

    // ========== Query Handlers ==========
    pub server_status_handler: GetServerStatusHandler,
    pub list_speakers_handler: ListSpeakersHandler,
    pub speaker_info_handler: GetSpeakerInfoHandler,
    pub get_volume_handler: GetVolumeHandler,
    pub list_groups_handler: ListGroupsHandler,
    pub list_library_handler: ListLibraryHandler,
    pub get_queue_handler: GetQueueHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(server: Arc<dyn CommandServerPort>, commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self {
            // Ports
            server: server.clone(),
            commands: commands.clone(),

            // Command handlers
            start_server_handler: StartServerHandler::new(server.clone()),
            stop_server_handler: StopServerHandler::new(server.clone()),
            restart_server_handler: RestartServerHandler::new(server.clone()),
            execute_command_handler: ExecuteCommandHandler::new(commands.clone()),
            set_volume_handler: SetVolumeHandler::new(commands.clone()),
            toggle_mute_handler: ToggleMuteHandler::new(commands.clone()),
            rediscover_handler: RediscoverSpeakersHandler::new(commands.clone()),

            // Query handlers
            server_status_handler: GetServerStatusHandler::new(server),
            list_speakers_handler: ListSpeakersHandler::new(commands.clone()),
            speaker_info_handler: GetSpeakerInfoHandler::new(commands.clone()),
            get_volume_handler: GetVolumeHandler::new(commands.clone()),
            list_groups_handler: ListGroupsHandler::new(commands.clone()),
            list_library_handler: ListLibraryHandler::new(commands.clone()),
            get_queue_handler: GetQueueHandler::new(commands),
        }
    }
}
