//! Speaker Handlers - 发现、状态聚合与通用命令

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{run, CommandResponse};
use crate::application::{ExecuteCommand, GetSpeakerInfo, ListSpeakers, RediscoverSpeakers};
use crate::domain::speaker::SpeakerSnapshot;
use crate::infrastructure::http::dto::{ApiResponse, CommandRequestDto};
use crate::infrastructure::http::state::AppState;

/// 已发现的音箱名称；命令服务器不可用时为空列表
pub async fn list_speakers(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<String>>> {
    let speakers = state.list_speakers_handler.handle(ListSpeakers).await;
    Json(ApiResponse::success(speakers))
}

pub async fn rediscover_speakers(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<String>>> {
    let speakers = state.rediscover_handler.handle(RediscoverSpeakers).await;
    Json(ApiResponse::success(speakers))
}

/// 音箱状态快照
///
/// 总是成功返回：离线或部分失败体现在 is_offline / error_message 中
pub async fn speaker_info(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Json<ApiResponse<SpeakerSnapshot>> {
    let snapshot = state
        .speaker_info_handler
        .handle(GetSpeakerInfo { speaker: name })
        .await;
    Json(ApiResponse::success(snapshot))
}

/// 执行任意命令
pub async fn execute_command(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CommandRequestDto>,
) -> CommandResponse {
    let command = ExecuteCommand {
        speaker: req.speaker,
        action: req.action,
        args: req.args,
    };
    run(&state, command).await
}
