//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{body::Bytes, extract::State, http::HeaderMap, http::Uri, Router};
use edge_auth_proxy::{EdgeConfig, HttpServer, Shutdown};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// A request as seen by a mock backend.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Captured {
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub type Recorded = Arc<Mutex<Vec<Captured>>>;

/// Start a simple mock backend that returns a fixed response.
#[allow(dead_code)]
pub async fn start_mock_backend(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that records every request and answers with `response`.
pub async fn start_recording_backend(response: &'static str) -> (SocketAddr, Recorded) {
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));

    async fn record(
        State((recorded, response)): State<(Recorded, &'static str)>,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> &'static str {
        recorded.lock().unwrap().push(Captured { uri, headers, body });
        response
    }

    let app = Router::new()
        .fallback(record)
        .with_state((recorded.clone(), response));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, recorded)
}

/// Start the edge server on an ephemeral port.
pub async fn start_edge(server: HttpServer) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Config pointing the Frontend API and the application at local mocks.
pub fn local_config(frontend_api: SocketAddr, app: SocketAddr) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.frontend_api.scheme = "http".into();
    config.frontend_api.host = frontend_api.to_string();
    config.frontend_api.proxy_url = "https://app.example.com/__clerk".into();
    config.frontend_api.secret_key = "sk_test_integration".into();
    config.upstream.origin = format!("http://{}", app);
    config.observability.metrics_enabled = false;
    config
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
