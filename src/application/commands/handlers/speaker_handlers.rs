//! Speaker Command Handlers

use std::sync::Arc;

use crate::application::commands::{ExecuteCommand, RediscoverSpeakers, SetVolume, ToggleMute};
use crate::application::error::ApplicationError;
use crate::application::ports::SpeakerCommandPort;
use crate::domain::speaker::{CommandRequest, CommandResult, SpeakerSnapshot};

// ============================================================================
// ExecuteCommand
// ============================================================================

/// ExecuteCommand Handler
///
/// 只有请求本身无效时返回错误；命令失败通过 exit_code 表达
pub struct ExecuteCommandHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl ExecuteCommandHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, command: ExecuteCommand) -> Result<CommandResult, ApplicationError> {
        let request = CommandRequest::with_args(command.speaker, command.action, command.args)?;
        let result = self.commands.execute(&request).await;

        if !result.is_success() {
            tracing::debug!(
                request = %request,
                exit_code = result.exit_code,
                error = ?result.error_msg,
                "Command returned failure"
            );
        }

        Ok(result)
    }
}

// ============================================================================
// SetVolume
// ============================================================================

/// SetVolume Handler
pub struct SetVolumeHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl SetVolumeHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, command: SetVolume) -> Result<CommandResult, ApplicationError> {
        if !(0..=100).contains(&command.volume) {
            return Err(ApplicationError::validation(
                "Volume must be between 0 and 100",
            ));
        }

        let action = if command.group { "group_volume" } else { "volume" };
        let request =
            CommandRequest::with_args(command.speaker, action, [command.volume.to_string()])?;
        Ok(self.commands.execute(&request).await)
    }
}

// ============================================================================
// ToggleMute
// ============================================================================

/// ToggleMute Handler
///
/// 先读取当前静音状态，再设置为相反值；读取失败时直接返回读取结果
pub struct ToggleMuteHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl ToggleMuteHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, command: ToggleMute) -> Result<CommandResult, ApplicationError> {
        let read = CommandRequest::new(command.speaker.clone(), "mute")?;
        let current = self.commands.execute(&read).await;

        let Some(output) = current.output() else {
            return Ok(current);
        };

        let new_state = if SpeakerSnapshot::parse_mute(output) {
            "off"
        } else {
            "on"
        };
        let write = CommandRequest::with_args(command.speaker, "mute", [new_state])?;
        Ok(self.commands.execute(&write).await)
    }
}

// ============================================================================
// RediscoverSpeakers
// ============================================================================

/// RediscoverSpeakers Handler
pub struct RediscoverSpeakersHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl RediscoverSpeakersHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, _command: RediscoverSpeakers) -> Vec<String> {
        let speakers = self.commands.rediscover_speakers().await;
        tracing::info!(count = speakers.len(), "Speakers rediscovered");
        speakers
    }
}
