//! Queue Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{parse_count, run, CommandResponse};
use crate::application::{ExecuteCommand, GetQueue, QueueListing};
use crate::infrastructure::http::dto::{ApiResponse, CountResponse, ShareLinkRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn get_queue(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<QueueListing>>, ApiError> {
    let listing = state.get_queue_handler.handle(GetQueue { speaker: name }).await?;
    Ok(Json(ApiResponse::success(listing)))
}

async fn count(
    state: &AppState,
    name: String,
    action: &str,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let result = state
        .execute_command_handler
        .handle(ExecuteCommand::new(name, action))
        .await?;
    Ok(Json(ApiResponse::success(CountResponse {
        value: parse_count(result.output()),
        exit_code: result.exit_code,
    })))
}

pub async fn queue_length(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    count(&state, name, "queue_length").await
}

pub async fn queue_position(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    count(&state, name, "queue_position").await
}

pub async fn play_from_queue(
    State(state): State<Arc<AppState>>,
    Path((name, track)): Path<(String, u32)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "play_from_queue").arg(track.to_string())).await
}

pub async fn play_queue(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "play_queue")).await
}

pub async fn clear_queue(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "clear_queue")).await
}

/// 移除队列中的曲目（支持 soco-cli 的范围写法，如 "3,5-7"）
pub async fn remove_from_queue(
    State(state): State<Arc<AppState>>,
    Path((name, tracks)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "remove_from_queue").arg(tracks)).await
}

pub async fn add_favorite_to_queue(
    State(state): State<Arc<AppState>>,
    Path((name, favorite)): Path<(String, String)>,
) -> CommandResponse {
    run(
        &state,
        ExecuteCommand::new(name, "add_favourite_to_queue").arg(favorite),
    )
    .await
}

pub async fn add_playlist_to_queue(
    State(state): State<Arc<AppState>>,
    Path((name, playlist)): Path<(String, String)>,
) -> CommandResponse {
    run(
        &state,
        ExecuteCommand::new(name, "add_playlist_to_queue").arg(playlist),
    )
    .await
}

/// 分享链接放在请求体中，URL 不适合作为路径段
pub async fn add_sharelink_to_queue(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<ShareLinkRequest>,
) -> CommandResponse {
    run(
        &state,
        ExecuteCommand::new(name, "add_sharelink_to_queue").arg(req.url),
    )
    .await
}

pub async fn save_queue(
    State(state): State<Arc<AppState>>,
    Path((name, playlist)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "save_queue").arg(playlist)).await
}
