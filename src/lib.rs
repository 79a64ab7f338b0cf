//! Async helpers that send raw SQL to an HTTP gateway fronting SQL Server and
//! Oracle.
//!
//! Every call POSTs the query text to one gateway route, waits at most the
//! configured timeout, and decodes the tab/newline text body:
//!
//! | Call | Route | Returns |
//! |---|---|---|
//! | [`GatewayClient::read`] with [`Backend::Mssql`] | `/exec_query_mssql_RO` | [`RowSet`] |
//! | [`GatewayClient::write`] with [`Backend::Mssql`] | `/exec_query_mssql_RW` | [`WriteResult`] |
//! | [`GatewayClient::read`] with [`Backend::Oracle`] | `/exec_query_oracle_RO` | [`RowSet`] |
//!
//! Failures come back as [`SqlGatewayError`]; nothing is retried, and how an
//! error is shown to a user is left to the caller.

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod prelude;
pub mod request;
pub mod types;

#[cfg(feature = "mssql")]
pub mod mssql;
#[cfg(feature = "oracle")]
pub mod oracle;

pub use client::GatewayClient;
pub use config::{GatewayConfig, GatewayConfigBuilder};
pub use error::SqlGatewayError;
pub use request::{QueryTransport, RawResponse};
pub use types::{Backend, EmptyRowPolicy, Endpoint, RowSet, WriteResult};
