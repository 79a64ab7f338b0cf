use std::sync::Arc;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::error::SqlGatewayError;
use crate::request::{QueryTransport, post_with_timeout};
use crate::types::{Backend, Endpoint, RowSet, WriteResult};

/// Handle to the SQL gateway.
///
/// Cheap to clone; clones share the underlying HTTP client. Calls made through
/// the same handle are independent of one another.
///
/// ```no_run
/// use sql_gateway_client::prelude::*;
///
/// # async fn demo() -> Result<(), SqlGatewayError> {
/// let client = GatewayClient::new(GatewayConfig::from_env()?)?;
/// let rows = client.read(Backend::Mssql, "SELECT name FROM sys.tables").await?;
/// for row in &rows {
///     println!("{}", row.join(" | "));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GatewayClient {
    config: GatewayConfig,
    #[cfg_attr(not(any(feature = "mssql", feature = "oracle")), allow(dead_code))]
    transport: Arc<dyn QueryTransport>,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    /// Client backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::ConfigError` if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, SqlGatewayError> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            SqlGatewayError::ConfigError(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self::with_transport(config, http))
    }

    /// Client configured from `SQL_GATEWAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::ConfigError` on invalid variables.
    pub fn from_env() -> Result<Self, SqlGatewayError> {
        Self::new(GatewayConfig::from_env()?)
    }

    /// Client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport<T>(config: GatewayConfig, transport: T) -> Self
    where
        T: QueryTransport + 'static,
    {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    #[must_use]
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.config.base_url(), endpoint.path())
    }

    /// Run a read-only statement on `backend`.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::Unimplemented` if support for `backend` was
    /// compiled out, otherwise whatever the backend's read call returns.
    #[cfg_attr(not(all(feature = "mssql", feature = "oracle")), allow(unused_variables))]
    pub async fn read(&self, backend: Backend, query: &str) -> Result<RowSet, SqlGatewayError> {
        match backend {
            #[cfg(feature = "mssql")]
            Backend::Mssql => crate::mssql::execute_select(self, query).await,
            #[cfg(feature = "oracle")]
            Backend::Oracle => crate::oracle::execute_select(self, query).await,
            #[allow(unreachable_patterns)]
            other => Err(not_enabled(other)),
        }
    }

    /// Run a mutating statement on `backend`.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::Unimplemented` for backends without a write
    /// endpoint or whose support was compiled out, otherwise whatever the
    /// backend's write call returns.
    #[cfg_attr(not(feature = "mssql"), allow(unused_variables))]
    pub async fn write(
        &self,
        backend: Backend,
        query: &str,
    ) -> Result<WriteResult, SqlGatewayError> {
        if backend.write_endpoint().is_none() {
            return Err(SqlGatewayError::Unimplemented(format!(
                "the gateway exposes no write endpoint for {backend}"
            )));
        }
        match backend {
            #[cfg(feature = "mssql")]
            Backend::Mssql => crate::mssql::execute_dml(self, query).await,
            #[allow(unreachable_patterns)]
            other => Err(not_enabled(other)),
        }
    }

    /// POST `query` to `endpoint` and return the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::Timeout`, `SqlGatewayError::Transport`, or
    /// `SqlGatewayError::HttpStatus` whose message is the response body (or the
    /// endpoint's fallback text if the body is empty).
    #[cfg_attr(not(any(feature = "mssql", feature = "oracle")), allow(dead_code))]
    pub(crate) async fn exchange(
        &self,
        endpoint: Endpoint,
        query: &str,
    ) -> Result<String, SqlGatewayError> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%url, query_len = query.len(), "posting query to gateway");

        let started = tokio::time::Instant::now();
        let response =
            post_with_timeout(self.transport.as_ref(), &url, query, self.timeout()).await?;
        tracing::debug!(
            %url,
            status = response.status,
            body_len = response.body.len(),
            elapsed = ?started.elapsed(),
            "gateway responded"
        );

        if !response.is_success() {
            let message = if response.body.is_empty() {
                endpoint.fallback_error().to_string()
            } else {
                response.body
            };
            return Err(SqlGatewayError::HttpStatus {
                status: response.status,
                message,
            });
        }

        Ok(response.body)
    }
}

fn not_enabled(backend: Backend) -> SqlGatewayError {
    SqlGatewayError::Unimplemented(format!("{backend} support is not enabled"))
}
