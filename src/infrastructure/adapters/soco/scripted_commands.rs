//! Scripted Speaker Commands - 用于测试的内存命令执行器
//!
//! 不访问任何网络，按 (speaker, action) 返回预设结果并记录调用

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::application::ports::SpeakerCommandPort;
use crate::domain::speaker::{CommandRequest, CommandResult};

/// 预设回复
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(String),
    Fail(i32, String),
}

impl Reply {
    pub fn ok(output: impl Into<String>) -> Self {
        Self::Ok(output.into())
    }

    pub fn fail(exit_code: i32, message: impl Into<String>) -> Self {
        Self::Fail(exit_code, message.into())
    }
}

type ReplyKey = (String, String);

/// Scripted Speaker Commands
///
/// 同一命令的多个回复依次返回，最后一个会被重复使用；
/// 未预设的命令返回 exit_code 1
#[derive(Default)]
pub struct ScriptedSpeakerCommands {
    speakers: Vec<String>,
    replies: Mutex<HashMap<ReplyKey, VecDeque<Reply>>>,
    calls: Mutex<Vec<CommandRequest>>,
}

impl ScriptedSpeakerCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speakers<I, S>(mut self, speakers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.speakers = speakers.into_iter().map(Into::into).collect();
        self
    }

    pub fn reply(self, speaker: &str, action: &str, reply: Reply) -> Self {
        self.reply_sequence(speaker, action, [reply])
    }

    pub fn reply_sequence<I>(mut self, speaker: &str, action: &str, replies: I) -> Self
    where
        I: IntoIterator<Item = Reply>,
    {
        self.replies
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .entry((speaker.to_string(), action.to_string()))
            .or_default()
            .extend(replies);
        self
    }

    /// 已执行的命令
    pub fn calls(&self) -> Vec<CommandRequest> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn next_reply(&self, request: &CommandRequest) -> Option<Reply> {
        let mut replies = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        let queue = replies.get_mut(&(request.speaker().to_string(), request.action().to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl SpeakerCommandPort for ScriptedSpeakerCommands {
    async fn list_speakers(&self) -> Vec<String> {
        self.speakers.clone()
    }

    async fn rediscover_speakers(&self) -> Vec<String> {
        self.speakers.clone()
    }

    async fn execute(&self, request: &CommandRequest) -> CommandResult {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        match self.next_reply(request) {
            Some(Reply::Ok(output)) => CommandResult::success(request, output),
            Some(Reply::Fail(exit_code, message)) => {
                CommandResult::failure(request, exit_code, message)
            }
            None => CommandResult::failure(
                request,
                1,
                format!("Unknown command: {}", request),
            ),
        }
    }
}
