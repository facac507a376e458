//! HTTP Handlers
//!
//! /api/sonos 下的所有端点，按功能分组

mod grouping;
mod library;
mod ping;
mod playback;
mod queue;
mod server;
mod settings;
mod speakers;

pub use grouping::*;
pub use library::*;
pub use ping::*;
pub use playback::*;
pub use queue::*;
pub use server::*;
pub use settings::*;
pub use speakers::*;

use axum::Json;

use crate::application::ExecuteCommand;
use crate::domain::speaker::CommandResult;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

type CommandResponse = Result<Json<ApiResponse<CommandResult>>, ApiError>;

/// 执行单条命令并原样返回 CommandResult
///
/// 命令失败不是 HTTP 错误，调用方通过 exit_code 判断
async fn run(state: &AppState, command: ExecuteCommand) -> CommandResponse {
    let result = state.execute_command_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// soco-cli 开关类输出（"on" / "off"）
fn is_on(output: Option<&str>) -> bool {
    output.is_some_and(|o| o.trim().eq_ignore_ascii_case("on"))
}

/// 无法解析为数字时按 0 处理
fn parse_count(output: Option<&str>) -> u32 {
    output.and_then(|o| o.trim().parse().ok()).unwrap_or(0)
}
