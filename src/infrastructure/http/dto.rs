//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self::success(Empty {})
    }
}

// ============================================================================
// Command DTOs
// ============================================================================

/// 通用命令请求
#[derive(Debug, Deserialize)]
pub struct CommandRequestDto {
    pub speaker: String,
    pub action: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// 分享链接（Spotify、Apple Music 等）
#[derive(Debug, Deserialize)]
pub struct ShareLinkRequest {
    pub url: String,
}

// ============================================================================
// Server DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StopServerResponse {
    /// 是否停止了一个正在运行的进程
    pub stopped: bool,
}

// ============================================================================
// Speaker DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VolumeResponse {
    pub volume: u8,
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub track: Option<String>,
    pub exit_code: i32,
}

/// 开关类设置（shuffle / crossfade）
#[derive(Debug, Serialize)]
pub struct ToggleSettingResponse {
    pub enabled: bool,
    pub raw: Option<String>,
    pub exit_code: i32,
}

/// 原文类设置（repeat / sleep timer / groups）
#[derive(Debug, Serialize)]
pub struct RawSettingResponse {
    pub value: Option<String>,
    pub exit_code: i32,
}

/// 计数类结果（队列长度 / 位置）
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub value: u32,
    pub exit_code: i32,
}

/// 分组信息；没有任何音箱时 exit_code 为 None
#[derive(Debug, Serialize)]
pub struct GroupsResponse {
    pub groups: Option<String>,
    pub exit_code: Option<i32>,
}
