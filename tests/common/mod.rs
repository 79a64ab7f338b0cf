#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use sql_gateway_client::prelude::*;

/// A request as the stub gateway saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Canned answer for one gateway route.
#[derive(Debug, Clone)]
pub struct Reply {
    pub path: &'static str,
    pub status: StatusCode,
    pub body: &'static str,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn ok(path: &'static str, body: &'static str) -> Self {
        Self {
            path,
            status: StatusCode::OK,
            body,
            delay: None,
        }
    }

    pub fn status(path: &'static str, status: StatusCode, body: &'static str) -> Self {
        Self {
            path,
            status,
            body,
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Seen = Arc<Mutex<Vec<SeenRequest>>>;

pub struct StubGateway {
    pub base_url: String,
    seen: Seen,
}

impl StubGateway {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn client(&self) -> GatewayClient {
        self.client_with_timeout(Duration::from_secs(5))
    }

    pub fn client_with_timeout(&self, timeout: Duration) -> GatewayClient {
        let config = GatewayConfig::builder()
            .base_url(&self.base_url)
            .timeout(timeout)
            .build()
            .unwrap();
        GatewayClient::new(config).unwrap()
    }
}

/// Start an in-process HTTP gateway answering `replies` on an ephemeral port.
pub async fn spawn_gateway(replies: Vec<Reply>) -> StubGateway {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let mut router = Router::<Seen>::new();

    for reply in replies {
        let path = reply.path;
        router = router.route(
            path,
            post(
                move |State(seen): State<Seen>, headers: HeaderMap, body: String| {
                    let reply = reply.clone();
                    async move {
                        seen.lock().unwrap().push(SeenRequest {
                            path: reply.path.to_string(),
                            content_type: headers
                                .get(CONTENT_TYPE)
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string),
                            body,
                        });
                        if let Some(delay) = reply.delay {
                            tokio::time::sleep(delay).await;
                        }
                        (reply.status, reply.body)
                    }
                },
            ),
        );
    }

    let app = router.with_state(Arc::clone(&seen));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubGateway {
        base_url: format!("http://{addr}"),
        seen,
    }
}
