//! Library Query Handlers

use std::sync::Arc;

use serde::Serialize;

use crate::application::error::ApplicationError;
use crate::application::ports::SpeakerCommandPort;
use crate::application::queries::{GetQueue, ListGroups, ListLibrary};
use crate::domain::library::{parse_numbered_list, parse_queue_list, ListItem, QueueItem};
use crate::domain::speaker::{CommandRequest, CommandResult};

// ============================================================================
// Response DTOs
// ============================================================================

/// 库列表响应，保留原始输出便于前端排查
#[derive(Debug, Clone, Serialize)]
pub struct LibraryListing {
    pub items: Vec<ListItem>,
    pub raw: Option<String>,
    pub exit_code: Option<i32>,
}

impl LibraryListing {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            raw: None,
            exit_code: None,
        }
    }
}

/// 队列响应
#[derive(Debug, Clone, Serialize)]
pub struct QueueListing {
    pub tracks: Vec<QueueItem>,
    pub raw: Option<String>,
    pub exit_code: i32,
}

/// 取第一台已发现的音箱
async fn first_speaker(commands: &dyn SpeakerCommandPort) -> Option<String> {
    commands.list_speakers().await.into_iter().next()
}

// ============================================================================
// ListLibrary
// ============================================================================

/// ListLibrary Handler
pub struct ListLibraryHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl ListLibraryHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, query: ListLibrary) -> Result<LibraryListing, ApplicationError> {
        let Some(speaker) = first_speaker(self.commands.as_ref()).await else {
            return Ok(LibraryListing::empty());
        };

        let request = CommandRequest::with_args(speaker, query.kind.action(), query.kind.args())?;
        let result = self.commands.execute(&request).await;

        Ok(LibraryListing {
            items: parse_numbered_list(result.output()),
            raw: result.result,
            exit_code: Some(result.exit_code),
        })
    }
}

// ============================================================================
// ListGroups
// ============================================================================

/// ListGroups Handler
///
/// 没有任何音箱时返回 None
pub struct ListGroupsHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl ListGroupsHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, _query: ListGroups) -> Result<Option<CommandResult>, ApplicationError> {
        let Some(speaker) = first_speaker(self.commands.as_ref()).await else {
            return Ok(None);
        };

        let request = CommandRequest::new(speaker, "groups")?;
        Ok(Some(self.commands.execute(&request).await))
    }
}

// ============================================================================
// GetQueue
// ============================================================================

/// GetQueue Handler
///
/// soco-cli 偶尔对 list_queue 返回成功但空的输出，此时重试一次
pub struct GetQueueHandler {
    commands: Arc<dyn SpeakerCommandPort>,
}

impl GetQueueHandler {
    pub fn new(commands: Arc<dyn SpeakerCommandPort>) -> Self {
        Self { commands }
    }

    pub async fn handle(&self, query: GetQueue) -> Result<QueueListing, ApplicationError> {
        let request = CommandRequest::new(query.speaker, "list_queue")?;
        let mut result = self.commands.execute(&request).await;

        if result.is_success() && result.output().map_or(true, |o| o.trim().is_empty()) {
            tracing::warn!(speaker = %request.speaker(), "list_queue returned empty result, retrying");
            result = self.commands.execute(&request).await;
        }

        Ok(QueueListing {
            tracks: parse_queue_list(result.output()),
            raw: result.result,
            exit_code: result.exit_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::queries::LibraryKind;
    use crate::infrastructure::adapters::{Reply, ScriptedSpeakerCommands};

    #[tokio::test]
    async fn test_library_without_speakers_is_empty() {
        let commands = Arc::new(ScriptedSpeakerCommands::new());
        let handler = ListLibraryHandler::new(commands.clone());

        let listing = handler
            .handle(ListLibrary {
                kind: LibraryKind::Favorites,
            })
            .await
            .unwrap();
        assert!(listing.items.is_empty());
        assert_eq!(listing.exit_code, None);
        assert_eq!(commands.call_count(), 0);
    }

    #[tokio::test]
    async fn test_playlist_tracks_use_first_speaker() {
        let commands = Arc::new(
            ScriptedSpeakerCommands::new()
                .with_speakers(["Den", "Office"])
                .reply("Den", "list_playlist_tracks", Reply::ok("1: Intro\n2: Outro")),
        );
        let handler = ListLibraryHandler::new(commands.clone());

        let listing = handler
            .handle(ListLibrary {
                kind: LibraryKind::PlaylistTracks("Road Trip".into()),
            })
            .await
            .unwrap();

        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.exit_code, Some(0));
        let calls = commands.calls();
        assert_eq!(calls[0].speaker(), "Den");
        assert_eq!(calls[0].args(), ["Road Trip".to_string()]);
    }

    #[tokio::test]
    async fn test_queue_retries_once_on_empty_output() {
        let commands = Arc::new(ScriptedSpeakerCommands::new().reply_sequence(
            "Den",
            "list_queue",
            [Reply::ok("  "), Reply::ok("1: Artist: A | Album: B | Title: C")],
        ));
        let handler = GetQueueHandler::new(commands.clone());

        let queue = handler
            .handle(GetQueue {
                speaker: "Den".into(),
            })
            .await
            .unwrap();

        assert_eq!(commands.call_count(), 2);
        assert_eq!(queue.tracks.len(), 1);
        assert_eq!(queue.tracks[0].title, "C");
    }

    #[tokio::test]
    async fn test_groups_without_speakers() {
        let commands = Arc::new(ScriptedSpeakerCommands::new());
        let handler = ListGroupsHandler::new(commands);

        assert!(handler.handle(ListGroups).await.unwrap().is_none());
    }
}
