//! Speaker Queries

/// 列出已发现的音箱
#[derive(Debug, Clone)]
pub struct ListSpeakers;

/// 获取音箱状态快照
#[derive(Debug, Clone)]
pub struct GetSpeakerInfo {
    pub speaker: String,
}

/// 读取当前音量
#[derive(Debug, Clone)]
pub struct GetVolume {
    pub speaker: String,
}

/// 命令服务器状态
#[derive(Debug, Clone)]
pub struct GetServerStatus;
