use std::time::Duration;

use crate::error::SqlGatewayError;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5151";

/// Per-request deadline used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Environment variable holding the gateway base URL.
pub const BASE_URL_ENV: &str = "SQL_GATEWAY_BASE_URL";

/// Environment variable holding the per-request timeout in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "SQL_GATEWAY_TIMEOUT_MS";

/// Where the gateway lives and how long a single call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: String,
    timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::ConfigError` if the URL is not http(s) or the
    /// timeout is zero.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SqlGatewayError> {
        let base_url = normalize_base_url(base_url.into())?;
        if timeout.is_zero() {
            return Err(SqlGatewayError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(Self { base_url, timeout })
    }

    #[must_use]
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Read `SQL_GATEWAY_BASE_URL` and `SQL_GATEWAY_TIMEOUT_MS`, falling back to
    /// the defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, SqlGatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GatewayConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::ConfigError` if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SqlGatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(url) = lookup(BASE_URL_ENV) {
            builder = builder.base_url(url);
        }
        if let Some(raw) = lookup(TIMEOUT_MS_ENV) {
            let millis = raw.trim().parse::<u64>().map_err(|e| {
                SqlGatewayError::ConfigError(format!("invalid {TIMEOUT_MS_ENV} value {raw:?}: {e}"))
            })?;
            builder = builder.timeout(Duration::from_millis(millis));
        }
        builder.build()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Fluent builder for [`GatewayConfig`].
#[derive(Debug, Clone, Default)]
pub struct GatewayConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl GatewayConfigBuilder {
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn timeout_ms(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    /// Validate and produce the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError::ConfigError` if validation fails.
    pub fn build(self) -> Result<GatewayConfig, SqlGatewayError> {
        GatewayConfig::new(
            self.base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        )
    }
}

fn normalize_base_url(raw: String) -> Result<String, SqlGatewayError> {
    let trimmed = raw.trim();
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| {
            SqlGatewayError::ConfigError(format!(
                "base URL must start with http:// or https://, got {raw:?}"
            ))
        })?;
    if host.trim_end_matches('/').is_empty() {
        return Err(SqlGatewayError::ConfigError(format!(
            "base URL has no host: {raw:?}"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
