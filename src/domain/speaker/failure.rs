//! Failure Classifier - 失败分类
//!
//! soco-cli 及其底层 HTTP 库对“音箱不可达”给出各种不同的错误文本，
//! 子串匹配是唯一稳定的信号。这里是已知短语的名单，不是解析器：
//! 未收录的新措辞会落到 `Other`。

/// 失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 音箱或网络不可达（离线）
    Connectivity,
    /// 其他错误（协议错误、无效请求等）
    Other,
}

/// 网络不可达标记（小写，大小写不敏感匹配）
pub const CONNECTIVITY_MARKERS: &[&str] = &[
    "timed out",
    "timeout",
    "connection refused",
    "unreachable",
    "no route to host",
    "network is unreachable",
    "connecttimeouterror",
    "max retries exceeded",
];

/// 根据错误文本分类
pub fn classify_failure(message: &str) -> FailureKind {
    let lower = message.to_lowercase();
    if CONNECTIVITY_MARKERS.iter().any(|m| lower.contains(m)) {
        FailureKind::Connectivity
    } else {
        FailureKind::Other
    }
}

/// 错误文本是否表示离线；None 视为非离线
pub fn is_connectivity_failure(message: Option<&str>) -> bool {
    message
        .map(|m| classify_failure(m) == FailureKind::Connectivity)
        .unwrap_or(false)
}
