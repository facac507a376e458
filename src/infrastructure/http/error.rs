//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const BAD_GATEWAY: i32 = 502;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// 命令服务器返回了失败
    CommandFailed(String),
    ServiceUnavailable(String),
}

impl ApiError {
    fn parts(&self) -> (i32, &str) {
        match self {
            ApiError::BadRequest(msg) => (errno::BAD_REQUEST, msg),
            ApiError::CommandFailed(msg) => (errno::BAD_GATEWAY, msg),
            ApiError::ServiceUnavailable(msg) => (errno::SERVICE_UNAVAILABLE, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, msg) = self.parts();

        match self {
            ApiError::BadRequest(_) => {
                tracing::warn!(errno = code, error = %msg, "Bad request");
            }
            ApiError::CommandFailed(_) => {
                tracing::warn!(errno = code, error = %msg, "Speaker command failed");
            }
            ApiError::ServiceUnavailable(_) => {
                tracing::error!(errno = code, error = %msg, "Service unavailable");
            }
        }

        (StatusCode::OK, Json(ErrorResponse::new(code, msg))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            err @ ApplicationError::CommandFailed { .. } => ApiError::CommandFailed(err.to_string()),
            ApplicationError::ExternalServiceError(msg) => ApiError::ServiceUnavailable(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_mapping() {
        assert!(matches!(
            ApiError::from(ApplicationError::validation("bad volume")),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::ExternalServiceError("down".into())),
            ApiError::ServiceUnavailable(_)
        ));

        let failed = ApiError::from(ApplicationError::CommandFailed {
            speaker: "Den".into(),
            action: "volume".into(),
            message: "timeout".into(),
        });
        assert_eq!(failed.parts(), (errno::BAD_GATEWAY, "Command 'volume' failed on Den: timeout"));
    }
}
