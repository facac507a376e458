//! Playback Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{run, CommandResponse};
use crate::application::{ExecuteCommand, GetVolume, SetVolume, ToggleMute};
use crate::infrastructure::http::dto::{ApiResponse, TrackResponse, VolumeResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn play_pause(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "pauseplay")).await
}

/// 设置音量，超出 0-100 返回 BadRequest
pub async fn set_volume(
    State(state): State<Arc<AppState>>,
    Path((name, volume)): Path<(String, i32)>,
) -> CommandResponse {
    let result = state
        .set_volume_handler
        .handle(SetVolume {
            speaker: name,
            volume,
            group: false,
        })
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn get_volume(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<VolumeResponse>>, ApiError> {
    let volume = state
        .get_volume_handler
        .handle(GetVolume { speaker: name })
        .await?;
    Ok(Json(ApiResponse::success(VolumeResponse { volume })))
}

pub async fn toggle_mute(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> CommandResponse {
    let result = state
        .toggle_mute_handler
        .handle(ToggleMute { speaker: name })
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn current_track(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<TrackResponse>>, ApiError> {
    let result = state
        .execute_command_handler
        .handle(ExecuteCommand::new(name, "track"))
        .await?;
    Ok(Json(ApiResponse::success(TrackResponse {
        track: result.result,
        exit_code: result.exit_code,
    })))
}

pub async fn next_track(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "next")).await
}

pub async fn previous_track(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "previous")).await
}

/// 跳转到指定位置（HH:MM:SS 或秒数，由 soco-cli 解析）
pub async fn seek(
    State(state): State<Arc<AppState>>,
    Path((name, position)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "seek").arg(position)).await
}
