//! Speaker Context - Command Value Objects

use serde::{Deserialize, Serialize};

use super::errors::CommandError;
use super::failure::is_connectivity_failure;

/// 命令请求
///
/// 对应 soco-cli 的 `/{speaker}/{action}[/{arg}...]` 语法。
///
/// 不变量:
/// - speaker 与 action 非空
/// - 构造后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    speaker: String,
    action: String,
    args: Vec<String>,
}

impl CommandRequest {
    /// 创建无参数命令
    pub fn new(speaker: impl Into<String>, action: impl Into<String>) -> Result<Self, CommandError> {
        Self::with_args(speaker, action, Vec::<String>::new())
    }

    /// 创建带参数命令，参数顺序即路径段顺序
    pub fn with_args<I, S>(
        speaker: impl Into<String>,
        action: impl Into<String>,
        args: I,
    ) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let speaker = speaker.into();
        let action = action.into();

        if speaker.trim().is_empty() {
            return Err(CommandError::EmptySpeaker);
        }
        if action.trim().is_empty() {
            return Err(CommandError::EmptyAction);
        }

        Ok(Self {
            speaker,
            action,
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// 未编码的路径段: speaker, action, args...
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.speaker.as_str())
            .chain(std::iter::once(self.action.as_str()))
            .chain(self.args.iter().map(String::as_str))
    }
}

impl std::fmt::Display for CommandRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.speaker, self.action)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// 命令结果
///
/// 不变量:
/// - exit_code == 0 时 error_msg 为 None
/// - exit_code != 0 时 error_msg 总有内容，result 不可信
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub speaker: String,
    pub action: String,
    pub args: Vec<String>,
    pub exit_code: i32,
    pub result: Option<String>,
    pub error_msg: Option<String>,
}

impl CommandResult {
    /// 按不变量规整后构造
    pub fn new(
        speaker: impl Into<String>,
        action: impl Into<String>,
        args: Vec<String>,
        exit_code: i32,
        result: Option<String>,
        error_msg: Option<String>,
    ) -> Self {
        let error_msg = if exit_code == 0 {
            None
        } else {
            error_msg
                .filter(|m| !m.trim().is_empty())
                .or_else(|| Some(format!("Command failed with exit code {}", exit_code)))
        };

        Self {
            speaker: speaker.into(),
            action: action.into(),
            args,
            exit_code,
            result,
            error_msg,
        }
    }

    /// 成功结果
    pub fn success(request: &CommandRequest, result: impl Into<String>) -> Self {
        Self::new(
            request.speaker(),
            request.action(),
            request.args().to_vec(),
            0,
            Some(result.into()),
            None,
        )
    }

    /// 失败结果（HTTP 状态码、-1 传输错误或命令服务器返回的退出码）
    pub fn failure(request: &CommandRequest, exit_code: i32, error_msg: impl Into<String>) -> Self {
        Self::new(
            request.speaker(),
            request.action(),
            request.args().to_vec(),
            exit_code,
            None,
            Some(error_msg.into()),
        )
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// 仅在成功时返回输出
    pub fn output(&self) -> Option<&str> {
        if self.is_success() {
            self.result.as_deref()
        } else {
            None
        }
    }

    /// 失败且错误文本指向网络不可达
    pub fn is_connectivity_failure(&self) -> bool {
        !self.is_success() && is_connectivity_failure(self.error_msg.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_empty_speaker() {
        assert_eq!(
            CommandRequest::new("  ", "volume").unwrap_err(),
            CommandError::EmptySpeaker
        );
    }

    #[test]
    fn test_request_rejects_empty_action() {
        assert_eq!(
            CommandRequest::new("Kitchen", "").unwrap_err(),
            CommandError::EmptyAction
        );
    }

    #[test]
    fn test_request_segments_keep_order() {
        let request = CommandRequest::with_args("Den", "seek", ["0:01:30"]).unwrap();
        let segments: Vec<&str> = request.segments().collect();
        assert_eq!(segments, vec!["Den", "seek", "0:01:30"]);
        assert_eq!(request.to_string(), "Den seek 0:01:30");
    }

    #[test]
    fn test_success_has_no_error() {
        let result = CommandResult::new("Den", "volume", vec![], 0, Some("20".into()), Some("noise".into()));
        assert!(result.is_success());
        assert!(result.error_msg.is_none());
        assert_eq!(result.output(), Some("20"));
    }

    #[test]
    fn test_failure_always_has_error() {
        let result = CommandResult::new("Den", "volume", vec![], 1, Some("junk".into()), Some(String::new()));
        assert_eq!(result.error_msg.as_deref(), Some("Command failed with exit code 1"));
        assert_eq!(result.output(), None);
    }

    #[test]
    fn test_connectivity_failure_requires_non_zero_exit() {
        let request = CommandRequest::new("Den", "volume").unwrap();
        let failed = CommandResult::failure(&request, 22, "Connection timed out");
        assert!(failed.is_connectivity_failure());

        let other = CommandResult::failure(&request, 1, "invalid speaker name");
        assert!(!other.is_connectivity_failure());
    }
}
