#![cfg(feature = "mssql")]

mod common;

use axum::http::StatusCode;
use common::{Reply, spawn_gateway};
use sql_gateway_client::mssql;
use sql_gateway_client::prelude::*;

#[tokio::test]
async fn read_keeps_trailing_blank_row() -> Result<(), Box<dyn std::error::Error>> {
    let gateway = spawn_gateway(vec![Reply::ok("/exec_query_mssql_RO", "1\n")]).await;
    let client = gateway.client();

    let rows = client.read(Backend::Mssql, "SELECT 1").await?;
    assert_eq!(rows.into_rows(), vec![vec!["1".to_string()], vec![String::new()]]);

    let seen = gateway.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/exec_query_mssql_RO");
    assert_eq!(seen[0].body, "SELECT 1");
    assert_eq!(seen[0].content_type.as_deref(), Some("text/plain"));
    Ok(())
}

#[tokio::test]
async fn read_splits_tabs_and_newlines() -> Result<(), Box<dyn std::error::Error>> {
    let gateway = spawn_gateway(vec![Reply::ok(
        "/exec_query_mssql_RO",
        "id\tname\n1\talice\n2\t",
    )])
    .await;

    let rows = mssql::execute_select(&gateway.client(), "SELECT id, name FROM users").await?;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.get(1, 1), Some("alice"));
    assert_eq!(rows.get(2, 1), Some(""));
    Ok(())
}

#[tokio::test]
async fn read_error_status_carries_body_text() {
    let gateway = spawn_gateway(vec![Reply::status(
        "/exec_query_mssql_RO",
        StatusCode::BAD_REQUEST,
        "Invalid object name 'nope'.",
    )])
    .await;

    let err = gateway
        .client()
        .read(Backend::Mssql, "SELECT * FROM nope")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Invalid object name 'nope'.");
}

#[tokio::test]
async fn read_error_status_with_empty_body_uses_fallback() {
    let gateway = spawn_gateway(vec![Reply::status(
        "/exec_query_mssql_RO",
        StatusCode::INTERNAL_SERVER_ERROR,
        "",
    )])
    .await;

    let err = gateway.client().read(Backend::Mssql, "SELECT 1").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Unknown SQL read error");
}

#[tokio::test]
async fn write_parses_affected_rows() -> Result<(), Box<dyn std::error::Error>> {
    let gateway = spawn_gateway(vec![Reply::ok(
        "/exec_query_mssql_RW",
        "Update OK affected_rows: 3",
    )])
    .await;

    let result = gateway
        .client()
        .write(Backend::Mssql, "UPDATE t SET a = 1")
        .await?;
    assert_eq!(
        result,
        WriteResult {
            message: "Update OK ".to_string(),
            affected_rows: 3,
        }
    );
    assert_eq!(gateway.requests()[0].path, "/exec_query_mssql_RW");
    Ok(())
}

#[tokio::test]
async fn write_without_marker_reports_zero_rows() -> Result<(), Box<dyn std::error::Error>> {
    let gateway = spawn_gateway(vec![Reply::ok("/exec_query_mssql_RW", "Update OK")]).await;

    let result = mssql::execute_dml(&gateway.client(), "UPDATE t SET a = 1").await?;
    assert_eq!(result.message, "Update OK");
    assert_eq!(result.affected_rows, 0);
    Ok(())
}

#[tokio::test]
async fn write_error_status_never_takes_success_path() {
    let gateway = spawn_gateway(vec![
        Reply::status(
            "/exec_query_mssql_RW",
            StatusCode::CONFLICT,
            "Violation of PRIMARY KEY constraint affected_rows: 0",
        ),
    ])
    .await;

    let err = gateway
        .client()
        .write(Backend::Mssql, "INSERT INTO t VALUES (1)")
        .await
        .unwrap_err();
    assert!(matches!(err, SqlGatewayError::HttpStatus { status: 409, .. }));
    assert_eq!(
        err.to_string(),
        "Violation of PRIMARY KEY constraint affected_rows: 0"
    );
}

#[tokio::test]
async fn write_error_status_with_empty_body_uses_fallback() {
    let gateway = spawn_gateway(vec![Reply::status(
        "/exec_query_mssql_RW",
        StatusCode::BAD_GATEWAY,
        "",
    )])
    .await;

    let err = gateway
        .client()
        .write(Backend::Mssql, "DELETE FROM t")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown SQL write error");
}

#[tokio::test]
async fn concurrent_reads_are_independent() -> Result<(), Box<dyn std::error::Error>> {
    let gateway = spawn_gateway(vec![Reply::ok("/exec_query_mssql_RO", "x\ty")]).await;
    let client = gateway.client();

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.read(Backend::Mssql, &format!("SELECT {i}")).await
        }));
    }
    for handle in handles {
        let rows = handle.await??;
        assert_eq!(rows.get(0, 1), Some("y"));
    }

    let mut bodies: Vec<String> = gateway.requests().into_iter().map(|r| r.body).collect();
    bodies.sort();
    assert_eq!(bodies, (0..8).map(|i| format!("SELECT {i}")).collect::<Vec<_>>());
    Ok(())
}
