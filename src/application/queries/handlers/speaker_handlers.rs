//! Speaker Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CommandServerPort, ServerStatus, SpeakerCommandPort};
use crate::application::queries::{GetServerStatus, GetSpeakerInfo, GetVolume, ListSpeakers};
use crate::domain::speaker::{
    classify_failure, CommandError, CommandRequest, FailureKind, SpeakerSnapshot,
};

// ============================================================================
// ListSpeakers
// ============================================================================

/// ListSpeakers Handler
pub struct ListSpeakersHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl ListSpeakersHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, _query: ListSpeakers) -> Vec<String> {
        self.commands.list_speakers().await
    }
}

// ============================================================================
// GetSpeakerInfo - 状态聚合
// ============================================================================

/// 核心探测项，按顺序执行
#[derive(Debug, Clone, Copy)]
enum Probe {
    Volume,
    Mute,
    Playback,
    Track,
}

impl Probe {
    const SEQUENCE: [Probe; 4] = [Probe::Volume, Probe::Mute, Probe::Playback, Probe::Track];

    fn action(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Mute => "mute",
            Self::Playback => "playback",
            Self::Track => "track",
        }
    }

    fn apply(self, output: &str, snapshot: &mut SpeakerSnapshot) {
        match self {
            Self::Volume => snapshot.volume = SpeakerSnapshot::parse_volume(output),
            Self::Mute => snapshot.is_muted = SpeakerSnapshot::parse_mute(output),
            Self::Playback => snapshot.playback_state = Some(output.to_string()),
            Self::Track => snapshot.current_track = Some(output.to_string()),
        }
    }
}

/// GetSpeakerInfo Handler
///
/// 依次执行 volume → mute → playback → track → battery。
/// volume 兼作连通性探测：任一核心探测被判定为离线时立即停止，
/// 返回已填充的部分快照，不再占用串行通道。
/// battery 仅尽力而为（大多数型号没有电池）。
pub struct GetSpeakerInfoHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl GetSpeakerInfoHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, query: GetSpeakerInfo) -> SpeakerSnapshot {
        let mut snapshot = SpeakerSnapshot::new(query.speaker.clone());

        if let Err(err) = self.collect(&query.speaker, &mut snapshot).await {
            let message = err.to_string();
            if classify_failure(&message) == FailureKind::Connectivity {
                snapshot.mark_offline();
            } else {
                tracing::error!(
                    speaker = %query.speaker,
                    error = %message,
                    "Failed to get speaker info"
                );
                snapshot.note_error(message);
            }
        }

        snapshot
    }

    async fn collect(
        &self,
        speaker: &str,
        snapshot: &mut SpeakerSnapshot,
    ) -> Result<(), CommandError> {
        for probe in Probe::SEQUENCE {
            let request = CommandRequest::new(speaker, probe.action())?;
            let result = self.commands.execute(&request).await;

            if result.is_connectivity_failure() {
                tracing::warn!(
                    speaker = %speaker,
                    probe = probe.action(),
                    error = ?result.error_msg,
                    "Speaker appears to be offline"
                );
                snapshot.mark_offline();
                return Ok(());
            }

            match result.output() {
                Some(output) => probe.apply(output, snapshot),
                None if !result.is_success() => {
                    let message = result.error_msg.as_deref().unwrap_or_default();
                    snapshot.note_error(format!("{}: {}", probe.action(), message));
                }
                None => {}
            }
        }

        let request = CommandRequest::new(speaker, "battery")?;
        let battery = self.commands.execute(&request).await;
        if let Some(output) = battery.output() {
            snapshot.battery_level = SpeakerSnapshot::parse_battery(output);
        }

        Ok(())
    }
}

// ============================================================================
// GetVolume
// ============================================================================

/// GetVolume Handler
pub struct GetVolumeHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl GetVolumeHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, query: GetVolume) -> Result<u8, ApplicationError> {
        let request = CommandRequest::new(query.speaker.clone(), "volume")?;
        let result = self.commands.execute(&request).await;

        result
            .output()
            .and_then(SpeakerSnapshot::parse_volume)
            .ok_or_else(|| ApplicationError::CommandFailed {
                speaker: query.speaker,
                action: "volume".to_string(),
                message: result
                    .error_msg
                    .clone()
                    .unwrap_or_else(|| "Failed to get volume".to_string()),
            })
    }
}

// ============================================================================
// GetServerStatus
// ============================================================================

/// GetServerStatus Handler
pub struct GetServerStatusHandler {
    server: Arc<dyn CommandServerPort>,
}

impl GetServerStatusHandler {
    pub fn new(server: Arc<dyn CommandServerPort>) -> Self {
        Self { server }
    }

    pub async fn handle(&self, _query: GetServerStatus) -> ServerStatus {
        self.server.status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speaker::OFFLINE_MESSAGE;
    use crate::infrastructure::adapters::{Reply, ScriptedSpeakerCommands};

    fn handler(commands: &Arc<ScriptedSpeakerCommands>) -> GetSpeakerInfoHandler {
        GetSpeakerInfoHandler::new(commands.clone())
    }

    fn info(speaker: &str) -> GetSpeakerInfo {
        GetSpeakerInfo {
            speaker: speaker.to_string(),
        }
    }

    #[tokio::test]
    async fn test_offline_volume_probe_short_circuits() {
        let commands = Arc::new(
            ScriptedSpeakerCommands::new()
                .reply("Kitchen", "volume", Reply::fail(22, "Connection timed out")),
        );

        let snapshot = handler(&commands).handle(info("Kitchen")).await;

        assert!(snapshot.is_offline);
        assert_eq!(snapshot.error_message.as_deref(), Some(OFFLINE_MESSAGE));
        assert_eq!(snapshot.volume, None);
        assert_eq!(commands.call_count(), 1);
    }

    #[tokio::test]
    async fn test_full_snapshot_ignores_battery_failure() {
        let commands = Arc::new(
            ScriptedSpeakerCommands::new()
                .reply("Office", "volume", Reply::ok("35"))
                .reply("Office", "mute", Reply::ok("off"))
                .reply("Office", "playback", Reply::ok("PLAYING"))
                .reply("Office", "track", Reply::ok("Song X"))
                .reply("Office", "battery", Reply::fail(1, "battery not supported")),
        );

        let snapshot = handler(&commands).handle(info("Office")).await;

        assert_eq!(snapshot.volume, Some(35));
        assert!(!snapshot.is_muted);
        assert_eq!(snapshot.playback_state.as_deref(), Some("PLAYING"));
        assert_eq!(snapshot.current_track.as_deref(), Some("Song X"));
        assert_eq!(snapshot.battery_level, None);
        assert!(!snapshot.is_offline);
        assert_eq!(snapshot.error_message, None);
        assert_eq!(commands.call_count(), 5);
    }

    #[tokio::test]
    async fn test_battery_percent_is_parsed() {
        let commands = Arc::new(
            ScriptedSpeakerCommands::new()
                .reply("Roam", "volume", Reply::ok("10"))
                .reply("Roam", "mute", Reply::ok("on"))
                .reply("Roam", "playback", Reply::ok("STOPPED"))
                .reply("Roam", "track", Reply::ok(""))
                .reply("Roam", "battery", Reply::ok("64%")),
        );

        let snapshot = handler(&commands).handle(info("Roam")).await;

        assert!(snapshot.is_muted);
        assert_eq!(snapshot.battery_level, Some(64));
    }

    #[tokio::test]
    async fn test_offline_midway_keeps_partial_snapshot() {
        let commands = Arc::new(
            ScriptedSpeakerCommands::new()
                .reply("Den", "volume", Reply::ok("20"))
                .reply("Den", "mute", Reply::ok("off"))
                .reply("Den", "playback", Reply::fail(-1, "[Errno 113] No route to host")),
        );

        let snapshot = handler(&commands).handle(info("Den")).await;

        assert!(snapshot.is_offline);
        assert_eq!(snapshot.volume, Some(20));
        assert_eq!(snapshot.current_track, None);
        assert_eq!(commands.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unparseable_volume_is_left_unset() {
        let commands = Arc::new(
            ScriptedSpeakerCommands::new()
                .reply("Den", "volume", Reply::ok("loud"))
                .reply("Den", "mute", Reply::ok("off"))
                .reply("Den", "playback", Reply::ok("PAUSED_PLAYBACK"))
                .reply("Den", "track", Reply::ok("Song Y")),
        );

        let snapshot = handler(&commands).handle(info("Den")).await;

        assert_eq!(snapshot.volume, None);
        assert_eq!(snapshot.playback_state.as_deref(), Some("PAUSED_PLAYBACK"));
        assert!(!snapshot.is_offline);
    }

    #[tokio::test]
    async fn test_protocol_error_continues_and_is_reported() {
        let commands = Arc::new(
            ScriptedSpeakerCommands::new()
                .reply("Den", "volume", Reply::fail(1, "Error: unexpected reply"))
                .reply("Den", "mute", Reply::ok("off"))
                .reply("Den", "playback", Reply::ok("PLAYING"))
                .reply("Den", "track", Reply::ok("Song Z")),
        );

        let snapshot = handler(&commands).handle(info("Den")).await;

        assert!(!snapshot.is_offline);
        assert_eq!(snapshot.volume, None);
        assert_eq!(snapshot.current_track.as_deref(), Some("Song Z"));
        assert_eq!(
            snapshot.error_message.as_deref(),
            Some("volume: Error: unexpected reply")
        );
        assert_eq!(commands.call_count(), 5);
    }

    #[tokio::test]
    async fn test_empty_name_returns_error_snapshot() {
        let commands = Arc::new(ScriptedSpeakerCommands::new());

        let snapshot = handler(&commands).handle(info("")).await;

        assert!(!snapshot.is_offline);
        assert_eq!(
            snapshot.error_message.as_deref(),
            Some("Speaker name cannot be empty")
        );
        assert_eq!(commands.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_volume_failure() {
        let commands = Arc::new(
            ScriptedSpeakerCommands::new().reply("Den", "volume", Reply::fail(-1, "timeout")),
        );
        let handler = GetVolumeHandler::new(commands);

        let err = handler
            .handle(GetVolume {
                speaker: "Den".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::CommandFailed { .. }));
    }
}
