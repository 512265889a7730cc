//! Dashboard server lifecycle.
//!
//! Bind → spawn background task → return handle with shutdown
//! channel. `run()` in `lib.rs` uses the blocking variant; tests and
//! embedders use [`start_dashboard_server`] on an ephemeral port.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::dashboard_router;
use crate::api::types::ApiContext;

/// Handle to a running dashboard server.
pub struct DashboardServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl DashboardServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Dashboard server shutdown signal sent");
        }
    }
}

/// Start the dashboard server in a background task.
pub async fn start_dashboard_server(
    ctx: ApiContext,
    addr: SocketAddr,
) -> Result<DashboardServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind dashboard server: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    tracing::info!(%addr, "Dashboard server binding");

    let app = dashboard_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(e) = serve.await {
            tracing::error!(error = %e, "Dashboard server exited with error");
        }
    });

    Ok(DashboardServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Serve until the process is stopped. Used by `run()`.
pub async fn serve_forever(ctx: ApiContext, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Dashboard server listening");
    axum::serve(listener, dashboard_router(ctx)).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::BackendClient;
    use crate::registry::{DrugReference, RiskRegistry};

    fn test_ctx() -> ApiContext {
        ApiContext::new(
            Arc::new(RiskRegistry::new(DrugReference::load_test())),
            Arc::new(BackendClient::new("http://127.0.0.1:9", 2)),
        )
    }

    #[tokio::test]
    async fn server_starts_and_answers_health() {
        let mut server = start_dashboard_server(test_ctx(), "127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();

        let url = format!("http://{}/api/health", server.addr);
        let response = reqwest::get(&url).await.unwrap();
        assert!(response.status().is_success());
        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        server.shutdown();
    }

    #[tokio::test]
    async fn ephemeral_port_is_reported_in_handle() {
        let mut server = start_dashboard_server(test_ctx(), "127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        assert_ne!(server.addr.port(), 0);
        server.shutdown();
    }
}
