//! Command Server Handlers - soco-cli 进程管理

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetServerStatus, RestartServer, ServerStatus, StartServer, StopServer};
use crate::infrastructure::http::dto::{ApiResponse, Empty, StopServerResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn server_status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ServerStatus>> {
    let status = state.server_status_handler.handle(GetServerStatus).await;
    Json(ApiResponse::success(status))
}

/// 启动命令服务器（已在运行时直接成功）
pub async fn start_server(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.start_server_handler.handle(StartServer).await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn stop_server(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StopServerResponse>> {
    let stopped = state.stop_server_handler.handle(StopServer).await;
    Json(ApiResponse::success(StopServerResponse { stopped }))
}

pub async fn restart_server(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.restart_server_handler.handle(RestartServer).await?;
    Ok(Json(ApiResponse::ok()))
}
