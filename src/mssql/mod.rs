// SQL Server module - read and write calls against the gateway's T-SQL routes
//
// - executor: read (`exec_query_mssql_RO`) and write (`exec_query_mssql_RW`) calls

pub mod executor;

pub use executor::{execute_dml, execute_select};
