use std::time::Duration;

use thiserror::Error;

/// Every way a gateway call can fail.
///
/// Messages are kept close to what the gateway and the transport report so the
/// caller can show them as-is.
#[derive(Debug, Error)]
pub enum SqlGatewayError {
    /// The deadline elapsed before the gateway answered.
    #[error("Request timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    /// The request never produced a response (DNS, refused connection, reset, ...).
    #[error("Fetch error: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status. `message` is the body text.
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),

    #[error("Other gateway error: {0}")]
    Other(String),
}

impl SqlGatewayError {
    /// HTTP status reported by the gateway, if the failure came from one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            SqlGatewayError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, SqlGatewayError::Timeout { .. })
    }
}

impl From<reqwest::Error> for SqlGatewayError {
    fn from(err: reqwest::Error) -> Self {
        SqlGatewayError::Transport(error_chain(&err))
    }
}

/// `err` followed by each of its sources, joined with `": "`.
///
/// Levels whose message is already part of the text so far are skipped.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
