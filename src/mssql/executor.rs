use crate::client::GatewayClient;
use crate::decode::{build_row_set, build_write_result};
use crate::error::SqlGatewayError;
use crate::types::{Backend, RowSet, WriteResult};

/// Execute a read-only T-SQL statement.
///
/// Rows are returned verbatim, including the blank row produced by a trailing
/// newline.
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
        .exchange(Backend::Mssql.read_endpoint(), query)
        .await
        .inspect_err(|e| tracing::error!(backend = %Backend::Mssql, error = %e, "Read query error"))?;

    let row_set = build_row_set(&body, Backend::Mssql.empty_row_policy());
    tracing::debug!(rows = row_set.len(), "decoded SQL Server read response");
    Ok(row_set)
}

/// Execute an INSERT, UPDATE, DELETE or other mutating T-SQL statement.
///
/// # Errors
///
/// Returns `SqlGatewayError::Timeout`, `SqlGatewayError::Transport`, or
/// `SqlGatewayError::HttpStatus` carrying the gateway's error text.
pub async fn execute_dml(
    client: &GatewayClient,
    query: &str,
) -> Result<WriteResult, SqlGatewayError> {
    let endpoint = Backend::Mssql.write_endpoint().ok_or_else(|| {
        SqlGatewayError::Unimplemented("no SQL Server write endpoint".to_string())
    })?;
    let body = client
        .exchange(endpoint, query)
        .await
        .inspect_err(|e| tracing::error!(backend = %Backend::Mssql, error = %e, "Write query error"))?;

    let result = build_write_result(&body);
    tracing::debug!(affected_rows = result.affected_rows, "decoded SQL Server write response");
    Ok(result)
}
