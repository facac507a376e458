//! Speaker Commands

/// 执行任意 soco-cli 命令
#[derive(Debug, Clone)]
pub struct ExecuteCommand {
    pub speaker: String,
    pub action: String,
    pub args: Vec<String>,
}

impl ExecuteCommand {
    pub fn new(speaker: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            action: action.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// 设置音量（0-100），group 为 true 时设置整个组
#[derive(Debug, Clone)]
pub struct SetVolume {
    pub speaker: String,
    pub volume: i32,
    pub group: bool,
}

/// 切换静音
#[derive(Debug, Clone)]
pub struct ToggleMute {
    pub speaker: String,
}

/// 触发音箱重新发现
#[derive(Debug, Clone)]
pub struct RediscoverSpeakers;
