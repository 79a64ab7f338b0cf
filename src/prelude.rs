//! Convenient imports for common functionality.

pub use crate::client::GatewayClient;
pub use crate::config::{GatewayConfig, GatewayConfigBuilder};
pub use crate::decode::{build_row_set, build_write_result};
pub use crate::error::SqlGatewayError;
pub use crate::request::{QueryTransport, RawResponse, post_with_timeout, with_timeout};
pub use crate::types::{Backend, EmptyRowPolicy, Endpoint, RowSet, WriteResult};
