//! Command Server Handlers - 运维操作

use std::sync::Arc;

use crate::application::commands::{RestartServer, StartServer, StopServer};
use crate::application::error::ApplicationError;
use crate::application::ports::CommandServerPort;

/// StartServer Handler
pub struct StartServerHandler {
    server: Arc<dyn CommandServerPort>,
}

impl StartServerHandler {
    pub fn new(server: Arc<dyn CommandServerPort>) -> Self {
        Self { server }
    }

    pub async fn handle(&self, _command: StartServer) -> Result<(), ApplicationError> {
        self.server.ensure_running().await?;
        Ok(())
    }
}

/// StopServer Handler
///
/// 返回是否真的停止了一个正在运行的进程
pub struct StopServerHandler {
    server: Arc<dyn CommandServerPort>,
}

impl StopServerHandler {
    pub fn new(server: Arc<dyn CommandServerPort>) -> Self {
        Self { server }
    }

    pub async fn handle(&self, _command: StopServer) -> bool {
        self.server.stop().await
    }
}

/// RestartServer Handler
pub struct RestartServerHandler {
    server: Arc<dyn CommandServerPort>,
}

impl RestartServerHandler {
    pub fn new(server: Arc<dyn CommandServerPort>) -> Self {
        Self { server }
    }

    pub async fn handle(&self, _command: RestartServer) -> Result<(), ApplicationError> {
        let was_running = self.server.stop().await;
        tracing::info!(was_running = was_running, "Restarting command server");
        self.server.ensure_running().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::process::FakeCommandServer;

    #[tokio::test]
    async fn test_start_then_stop() {
        let server = Arc::new(FakeCommandServer::new("http://localhost:8000"));
        let start = StartServerHandler::new(server.clone());
        let stop = StopServerHandler::new(server.clone());

        start.handle(StartServer).await.unwrap();
        assert!(server.is_running().await);

        assert!(stop.handle(StopServer).await);
        assert!(!stop.handle(StopServer).await);
    }

    #[tokio::test]
    async fn test_start_failure_is_external_service_error() {
        let server = Arc::new(FakeCommandServer::failing("http://localhost:8000"));
        let start = StartServerHandler::new(server);

        let err = start.handle(StartServer).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_restart_starts_again() {
        let server = Arc::new(FakeCommandServer::new("http://localhost:8000"));
        let restart = RestartServerHandler::new(server.clone());

        restart.handle(RestartServer).await.unwrap();
        restart.handle(RestartServer).await.unwrap();
        assert!(server.is_running().await);
        assert_eq!(server.start_count(), 2);
    }
}
