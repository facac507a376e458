//! Playback Settings Handlers - shuffle / repeat / crossfade / sleep timer

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{is_on, run, CommandResponse};
use crate::application::ExecuteCommand;
use crate::infrastructure::http::dto::{ApiResponse, RawSettingResponse, ToggleSettingResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

async fn read_toggle(
    state: &AppState,
    name: String,
    action: &str,
) -> Result<Json<ApiResponse<ToggleSettingResponse>>, ApiError> {
    let result = state
        .execute_command_handler
        .handle(ExecuteCommand::new(name, action))
        .await?;
    Ok(Json(ApiResponse::success(ToggleSettingResponse {
        enabled: is_on(result.output()),
        raw: result.result,
        exit_code: result.exit_code,
    })))
}

async fn read_raw(
    state: &AppState,
    name: String,
    action: &str,
) -> Result<Json<ApiResponse<RawSettingResponse>>, ApiError> {
    let result = state
        .execute_command_handler
        .handle(ExecuteCommand::new(name, action))
        .await?;
    Ok(Json(ApiResponse::success(RawSettingResponse {
        value: result.result,
        exit_code: result.exit_code,
    })))
}

pub async fn get_shuffle(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<ToggleSettingResponse>>, ApiError> {
    read_toggle(&state, name, "shuffle").await
}

pub async fn set_shuffle(
    State(state): State<Arc<AppState>>,
    Path((name, value)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "shuffle").arg(value)).await
}

pub async fn get_repeat(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<RawSettingResponse>>, ApiError> {
    read_raw(&state, name, "repeat").await
}

pub async fn set_repeat(
    State(state): State<Arc<AppState>>,
    Path((name, mode)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "repeat").arg(mode)).await
}

pub async fn get_crossfade(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<ToggleSettingResponse>>, ApiError> {
    read_toggle(&state, name, "cross_fade").await
}

pub async fn set_crossfade(
    State(state): State<Arc<AppState>>,
    Path((name, value)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "cross_fade").arg(value)).await
}

/// 剩余睡眠时间（soco-cli 原文）
pub async fn get_sleep_timer(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<RawSettingResponse>>, ApiError> {
    read_raw(&state, name, "sleep_timer").await
}

pub async fn set_sleep_timer(
    State(state): State<Arc<AppState>>,
    Path((name, duration)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "sleep_timer").arg(duration)).await
}

pub async fn cancel_sleep_timer(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "sleep_timer").arg("off")).await
}
