//! Timeout-guarded request/response exchange shared by every backend.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::error::SqlGatewayError;

/// Status and full body text of one gateway response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can POST a text body and hand back the response.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// POST `body` as `text/plain` to `url`.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::Transport` when no response could be obtained.
    async fn post_text(&self, url: &str, body: &str) -> Result<RawResponse, SqlGatewayError>;
}

#[async_trait]
impl QueryTransport for reqwest::Client {
    async fn post_text(&self, url: &str, body: &str) -> Result<RawResponse, SqlGatewayError> {
        let response = self
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .body(body.to_owned())
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// Run `fut` with a deadline.
///
/// If `timeout` elapses first, `fut` is dropped (aborting whatever it was
/// awaiting) and `SqlGatewayError::Timeout` carrying `timeout` is returned.
/// The timer belongs to this call and is gone once it returns.
///
/// # Errors
///
/// Returns the error produced by `fut`, or `SqlGatewayError::Timeout`.
pub async fn with_timeout<F, T>(timeout: Duration, fut: F) -> Result<T, SqlGatewayError>
where
    F: Future<Output = Result<T, SqlGatewayError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_elapsed) => Err(SqlGatewayError::Timeout { timeout }),
    }
}

/// Issue one POST of `query` to `url` under `timeout`.
///
/// The deadline covers sending the request and reading the whole body.
///
/// # Errors
///
/// Returns `SqlGatewayError::Timeout` or `SqlGatewayError::Transport`. HTTP
/// error statuses are not errors at this level.
pub async fn post_with_timeout<T>(
    transport: &T,
    url: &str,
    query: &str,
    timeout: Duration,
) -> Result<RawResponse, SqlGatewayError>
where
    T: QueryTransport + ?Sized,
{
    with_timeout(timeout, transport.post_text(url, query)).await
}
