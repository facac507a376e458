//! HTTP Speaker Command Client - 调用 soco-cli HTTP API
//!
//! 实现 SpeakerCommandPort，每个操作:
//! ensure_running → 获取 RequestGate → 构造 URL → GET → 解析 → 释放
//!
//! soco-cli HTTP API:
//! GET /speakers                       -> {"speakers": [...]}
//! GET /rediscover                     -> {"speakers_discovered": [...]}
//! GET /{speaker}/{action}[/{arg}...]  -> {"speaker", "action", "args", "exit_code", "result", "error_msg"}

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::envelope::{parse_command_envelope, parse_name_list};
use super::gate::RequestGate;
use crate::application::ports::{CommandServerPort, SpeakerCommandPort};
use crate::domain::speaker::{CommandRequest, CommandResult};

/// 传输层失败（无 HTTP 状态码）时使用的 exit_code
pub const TRANSPORT_FAILURE: i32 = -1;

/// HTTP 命令客户端配置
#[derive(Debug, Clone)]
pub struct HttpCommandClientConfig {
    /// 单次请求超时，保证卡死的命令服务器不会永久占住 RequestGate
    pub timeout: Duration,
}

impl Default for HttpCommandClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpCommandClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// 构造命令 URL，每个路径段独立百分号编码
pub fn command_url(base_url: &str, request: &CommandRequest) -> Result<Url, String> {
    let mut url = Url::parse(base_url).map_err(|e| e.to_string())?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| format!("Cannot append path to {}", base_url))?;
        path.pop_if_empty();
        for segment in request.segments() {
            path.push(segment);
        }
    }
    Ok(url)
}

/// 展开 error source 链，底层的 "Connection refused" / "timed out" 供失败分类使用
fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// HTTP 命令客户端
pub struct HttpSpeakerCommandClient {
    client: Client,
    server: Arc<dyn CommandServerPort>,
    gate: RequestGate,
}

impl HttpSpeakerCommandClient {
    /// 创建客户端；gate 由调用方注入，可与其他组件共享
    pub fn new(
        config: HttpCommandClientConfig,
        server: Arc<dyn CommandServerPort>,
        gate: RequestGate,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            server,
            gate,
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.server.server_url().trim_end_matches('/'), endpoint)
    }

    /// GET /speakers 或 /rediscover，任何失败返回空列表
    async fn fetch_names(&self, endpoint: &str, list_field: &str) -> Vec<String> {
        if let Err(e) = self.server.ensure_running().await {
            tracing::error!(endpoint = endpoint, error = %e, "Command server unavailable");
            return Vec::new();
        }

        let url = self.endpoint_url(endpoint);
        let _permit = self.gate.acquire().await;

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(url = %url, error = %describe_error(&e), "soco-cli request failed");
                return Vec::new();
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::error!(
                url = %url,
                status = status.as_u16(),
                body = %body,
                "soco-cli request failed"
            );
            return Vec::new();
        }

        match parse_name_list(&body, list_field) {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Failed to parse soco-cli response");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl SpeakerCommandPort for HttpSpeakerCommandClient {
    async fn list_speakers(&self) -> Vec<String> {
        self.fetch_names("speakers", "speakers").await
    }

    async fn rediscover_speakers(&self) -> Vec<String> {
        self.fetch_names("rediscover", "speakers_discovered").await
    }

    async fn execute(&self, request: &CommandRequest) -> CommandResult {
        if let Err(e) = self.server.ensure_running().await {
            tracing::error!(request = %request, error = %e, "Command server unavailable");
            return CommandResult::failure(
                request,
                TRANSPORT_FAILURE,
                format!("Command server unavailable: {}", e),
            );
        }

        let url = match command_url(&self.server.server_url(), request) {
            Ok(url) => url,
            Err(e) => {
                return CommandResult::failure(
                    request,
                    TRANSPORT_FAILURE,
                    format!("Invalid command URL: {}", e),
                )
            }
        };

        let _permit = self.gate.acquire().await;
        tracing::debug!(url = %url, "Executing command");

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                let message = describe_error(&e);
                tracing::error!(request = %request, error = %message, "Failed to execute command");
                return CommandResult::failure(request, TRANSPORT_FAILURE, message);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %url,
                status = status.as_u16(),
                body = %body,
                "soco-cli request failed"
            );
            return CommandResult::failure(
                request,
                i32::from(status.as_u16()),
                format!("HTTP {}", status.as_u16()),
            );
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let message = describe_error(&e);
                tracing::error!(request = %request, error = %message, "Failed to read command response");
                return CommandResult::failure(request, TRANSPORT_FAILURE, message);
            }
        };

        match parse_command_envelope(request, &body) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(request = %request, error = %e, body = %body, "Failed to parse command response");
                CommandResult::failure(
                    request,
                    TRANSPORT_FAILURE,
                    format!("Failed to parse response: {}", e),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::process::FakeCommandServer;
    use axum::extract::{Path as AxumPath, State};
    use axum::routing::get;
    use axum::{Json, Router};
    use futures_util::future::join_all;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(url: &str, timeout: Duration) -> HttpSpeakerCommandClient {
        HttpSpeakerCommandClient::new(
            HttpCommandClientConfig::default().with_timeout(timeout),
            Arc::new(FakeCommandServer::new(url)),
            RequestGate::new(),
        )
        .unwrap()
    }

    fn ok_envelope(speaker: &str, action: &str, result: &str) -> serde_json::Value {
        json!({
            "speaker": speaker,
            "action": action,
            "args": [],
            "exit_code": 0,
            "result": result,
            "error_msg": ""
        })
    }

    #[test]
    fn test_command_url_encodes_each_segment() {
        let request =
            CommandRequest::with_args("Living Room", "play-favorite", ["My Jazz Mix"]).unwrap();
        let url = command_url("http://localhost:8000", &request).unwrap();

        assert_eq!(url.path(), "/Living%20Room/play-favorite/My%20Jazz%20Mix");

        let decoded: Vec<String> = url
            .path_segments()
            .unwrap()
            .map(|s| urlencoding::decode(s).unwrap().into_owned())
            .collect();
        assert_eq!(decoded, vec!["Living Room", "play-favorite", "My Jazz Mix"]);
    }

    #[test]
    fn test_command_url_escapes_reserved_characters() {
        let request =
            CommandRequest::with_args("Den", "play_favourite", ["AC/DC: Live? #1 100%"]).unwrap();
        let url = command_url("http://localhost:8000/", &request).unwrap();

        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(
            urlencoding::decode(segments[2]).unwrap(),
            "AC/DC: Live? #1 100%"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[tokio::test]
    async fn test_list_speakers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/speakers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"speakers": ["Kitchen", "", "Office"]})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        assert_eq!(client.list_speakers().await, vec!["Kitchen", "Office"]);
    }

    #[tokio::test]
    async fn test_list_speakers_empty_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(path("/speakers"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        assert!(client.list_speakers().await.is_empty());
    }

    #[tokio::test]
    async fn test_rediscover_speakers() {
        let server = MockServer::start().await;
        Mock::given(path("/rediscover"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"speakers_discovered": ["Den", "Roam"]})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        assert_eq!(client.rediscover_speakers().await, vec!["Den", "Roam"]);
    }

    #[tokio::test]
    async fn test_execute_sends_encoded_path() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(
                "Living Room",
                "play-favorite",
                "",
            )))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let request =
            CommandRequest::with_args("Living Room", "play-favorite", ["My Jazz Mix"]).unwrap();
        let result = client.execute(&request).await;

        assert!(result.is_success());
        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(
            received[0].url.path(),
            "/Living%20Room/play-favorite/My%20Jazz%20Mix"
        );
    }

    #[tokio::test]
    async fn test_execute_http_error_becomes_result() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let request = CommandRequest::new("Nowhere", "volume").unwrap();
        let result = client.execute(&request).await;

        assert_eq!(result.exit_code, 404);
        assert_eq!(result.error_msg.as_deref(), Some("HTTP 404"));
        assert_eq!(result.speaker, "Nowhere");
    }

    #[tokio::test]
    async fn test_execute_malformed_body_becomes_result() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let request = CommandRequest::new("Den", "track").unwrap();
        let result = client.execute(&request).await;

        assert_eq!(result.exit_code, TRANSPORT_FAILURE);
        assert!(result
            .error_msg
            .as_deref()
            .unwrap()
            .starts_with("Failed to parse response"));
    }

    #[tokio::test]
    async fn test_execute_transport_error_becomes_result() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = client_for(&format!("http://127.0.0.1:{}", port), Duration::from_secs(5));
        let request = CommandRequest::new("Den", "volume").unwrap();
        let result = client.execute(&request).await;

        assert_eq!(result.exit_code, TRANSPORT_FAILURE);
        assert!(result.error_msg.is_some());
        assert!(result.is_connectivity_failure());
    }

    #[tokio::test]
    async fn test_execute_fails_fast_when_server_cannot_start() {
        let server = MockServer::start().await;
        let client = HttpSpeakerCommandClient::new(
            HttpCommandClientConfig::default(),
            Arc::new(FakeCommandServer::failing(server.uri())),
            RequestGate::new(),
        )
        .unwrap();

        let request = CommandRequest::new("Den", "volume").unwrap();
        let result = client.execute(&request).await;

        assert_eq!(result.exit_code, TRANSPORT_FAILURE);
        assert!(result
            .error_msg
            .as_deref()
            .unwrap()
            .starts_with("Command server unavailable"));
        assert!(server.received_requests().await.unwrap().is_empty());
        assert!(client.list_speakers().await.is_empty());
    }

    #[tokio::test]
    async fn test_gate_released_after_timeout() {
        let server = MockServer::start().await;
        Mock::given(path("/Den/volume"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(ok_envelope("Den", "volume", "20"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;
        Mock::given(path("/Den/mute"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope("Den", "mute", "off")))
            .mount(&server)
            .await;

        let gate = RequestGate::new();
        let client = HttpSpeakerCommandClient::new(
            HttpCommandClientConfig::default().with_timeout(Duration::from_millis(200)),
            Arc::new(FakeCommandServer::new(server.uri())),
            gate.clone(),
        )
        .unwrap();

        let slow = client
            .execute(&CommandRequest::new("Den", "volume").unwrap())
            .await;
        assert_eq!(slow.exit_code, TRANSPORT_FAILURE);
        assert!(slow.is_connectivity_failure());
        assert!(!gate.is_busy());

        let fast = client
            .execute(&CommandRequest::new("Den", "mute").unwrap())
            .await;
        assert_eq!(fast.output(), Some("off"));
    }

    /// 记录命令服务器一侧看到的并发度与到达顺序
    #[derive(Default)]
    struct Recorder {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        arrivals: std::sync::Mutex<Vec<String>>,
    }

    async fn record(
        State(recorder): State<Arc<Recorder>>,
        AxumPath((speaker, action, arg)): AxumPath<(String, String, String)>,
    ) -> Json<serde_json::Value> {
        let now = recorder.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        recorder.max_in_flight.fetch_max(now, Ordering::SeqCst);
        recorder.arrivals.lock().unwrap().push(arg.clone());

        tokio::time::sleep(Duration::from_millis(50)).await;

        recorder.in_flight.fetch_sub(1, Ordering::SeqCst);
        Json(ok_envelope(&speaker, &action, &arg))
    }

    async fn start_recording_server() -> (String, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let app = Router::new()
            .route("/:speaker/:action/:arg", get(record))
            .with_state(recorder.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), recorder)
    }

    #[tokio::test]
    async fn test_concurrent_commands_are_serialized_in_gate_order() {
        let (url, recorder) = start_recording_server().await;
        let client = Arc::new(client_for(&url, Duration::from_secs(5)));

        // 依次排队：每个任务先到达闸门，下一个才被创建
        let mut handles = Vec::new();
        for i in 0..5 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                let request = CommandRequest::with_args("Den", "volume", [i.to_string()]).unwrap();
                client.execute(&request).await
            }));
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let results: Vec<CommandResult> = join_all(handles)
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect();

        assert!(results.iter().all(CommandResult::is_success));
        assert_eq!(recorder.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(
            *recorder.arrivals.lock().unwrap(),
            vec!["0", "1", "2", "3", "4"]
        );
        assert_eq!(
            results.iter().map(|r| r.output().unwrap()).collect::<Vec<_>>(),
            vec!["0", "1", "2", "3", "4"]
        );
    }
}
