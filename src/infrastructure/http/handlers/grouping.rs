//! Grouping Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{run, CommandResponse};
use crate::application::{ExecuteCommand, ListGroups, SetVolume};
use crate::infrastructure::http::dto::{ApiResponse, GroupsResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 分组信息（通过第一台音箱查询）
pub async fn list_groups(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<GroupsResponse>>, ApiError> {
    let groups = match state.list_groups_handler.handle(ListGroups).await? {
        Some(result) => GroupsResponse {
            groups: result.result,
            exit_code: Some(result.exit_code),
        },
        None => GroupsResponse {
            groups: None,
            exit_code: None,
        },
    };
    Ok(Json(ApiResponse::success(groups)))
}

pub async fn group_speaker(
    State(state): State<Arc<AppState>>,
    Path((name, coordinator)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "group").arg(coordinator)).await
}

pub async fn ungroup_speaker(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "ungroup")).await
}

pub async fn party_mode(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "party_mode")).await
}

pub async fn ungroup_all(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "ungroup_all")).await
}

pub async fn set_group_volume(
    State(state): State<Arc<AppState>>,
    Path((name, volume)): Path<(String, i32)>,
) -> CommandResponse {
    let result = state
        .set_volume_handler
        .handle(SetVolume {
            speaker: name,
            volume,
            group: true,
        })
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn transfer_playback(
    State(state): State<Arc<AppState>>,
    Path((name, target)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "transfer_playback").arg(target)).await
}
