//! soco-cli 响应解析
//!
//! 命令响应:
//! `{"speaker": "...", "action": "...", "args": [...], "exit_code": 0, "result": "...", "error_msg": "..."}`
//! 字段名大小写不敏感；缺失的回显字段使用请求值，缺失的 exit_code 视为 0。

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::speaker::{CommandRequest, CommandResult};

/// 响应解析错误
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("invalid exit_code: {0}")]
    InvalidExitCode(String),
}

/// 按小写字段名查找
fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
        .filter(|value| !value.is_null())
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_object(body: &str) -> Result<Map<String, Value>, EnvelopeError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(EnvelopeError::NotAnObject),
        Err(e) => Err(EnvelopeError::InvalidJson(e.to_string())),
    }
}

fn parse_exit_code(value: Option<&Value>) -> Result<i32, EnvelopeError> {
    let Some(value) = value else {
        return Ok(0);
    };

    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| EnvelopeError::InvalidExitCode(value.to_string()))
}

/// 解析命令响应
pub fn parse_command_envelope(
    request: &CommandRequest,
    body: &str,
) -> Result<CommandResult, EnvelopeError> {
    let object = parse_object(body)?;

    let speaker = field(&object, "speaker")
        .map(as_text)
        .unwrap_or_else(|| request.speaker().to_string());
    let action = field(&object, "action")
        .map(as_text)
        .unwrap_or_else(|| request.action().to_string());
    let args = match field(&object, "args") {
        Some(Value::Array(items)) => items.iter().map(as_text).collect(),
        _ => request.args().to_vec(),
    };
    let exit_code = parse_exit_code(field(&object, "exit_code"))?;
    let result = field(&object, "result").map(as_text);
    let error_msg = field(&object, "error_msg").map(as_text);

    Ok(CommandResult::new(speaker, action, args, exit_code, result, error_msg))
}

/// 解析名称列表响应，如 `{"speakers": [...]}`；空白名称被丢弃，字段缺失返回空列表
pub fn parse_name_list(body: &str, list_field: &str) -> Result<Vec<String>, EnvelopeError> {
    let object = parse_object(body)?;

    let names = match field(&object, list_field) {
        Some(Value::Array(items)) => items
            .iter()
            .map(as_text)
            .filter(|name| !name.trim().is_empty())
            .collect(),
        _ => Vec::new(),
    };
    Ok(names)
}
