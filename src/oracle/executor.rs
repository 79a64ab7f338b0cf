use crate::client::GatewayClient;
use crate::decode::build_row_set;
use crate::error::SqlGatewayError;
use crate::types::{Backend, RowSet};

/// Execute a read-only Oracle statement.
///
/// Rows whose cells are all empty are dropped.
///
/// # Errors
///
/// Returns `SqlGatewayError::Timeout`, `SqlGatewayError::Transport`, or
/// `SqlGatewayError::HttpStatus` carrying the gateway's error text.
pub async fn execute_select(
    client: &GatewayClient,
    query: &str,
) -> Result<RowSet, SqlGatewayError> {
    let body = client
        .exchange(Backend::Oracle.read_endpoint(), query)
        .await
        .inspect_err(|e| tracing::error!(backend = %Backend::Oracle, error = %e, "Read query error"))?;

    let row_set = build_row_set(&body, Backend::Oracle.empty_row_policy());
    tracing::debug!(rows = row_set.len(), "decoded Oracle read response");
    Ok(row_set)
}
