//! Speaker Context - Snapshot

use serde::Serialize;

/// 离线时写入快照的提示
pub const OFFLINE_MESSAGE: &str = "Speaker is offline or unreachable";

/// 音箱状态快照
///
/// 每次请求重新构建，不做缓存（音量/曲目可能被实体遥控器或其他控制端随时修改）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerSnapshot {
    pub name: String,
    /// 音量 0-100，未知时为 None
    pub volume: Option<u8>,
    pub is_muted: bool,
    /// 播放状态原文，如 "PLAYING" / "PAUSED_PLAYBACK"
    pub playback_state: Option<String>,
    pub current_track: Option<String>,
    /// 电量百分比，仅便携型号（Roam/Move）有
    pub battery_level: Option<u8>,
    pub is_offline: bool,
    pub error_message: Option<String>,
}

impl SpeakerSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            volume: None,
            is_muted: false,
            playback_state: None,
            current_track: None,
            battery_level: None,
            is_offline: false,
            error_message: None,
        }
    }

    /// 标记离线
    pub fn mark_offline(&mut self) {
        self.is_offline = true;
        self.error_message = Some(OFFLINE_MESSAGE.to_string());
    }

    /// 记录第一条非离线错误，不覆盖已有错误
    pub fn note_error(&mut self, message: impl Into<String>) {
        if self.error_message.is_none() {
            self.error_message = Some(message.into());
        }
    }

    /// 解析音量输出，超出 0-100 或非数字时返回 None
    pub fn parse_volume(raw: &str) -> Option<u8> {
        raw.trim().parse::<u8>().ok().filter(|v| *v <= 100)
    }

    /// 解析电量输出，允许尾随 `%`
    pub fn parse_battery(raw: &str) -> Option<u8> {
        raw.trim()
            .replace('%', "")
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|v| *v <= 100)
    }

    /// 解析静音输出，"on" 为静音
    pub fn parse_mute(raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case("on")
    }
}
