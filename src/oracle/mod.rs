// Oracle module - the gateway only exposes a read route (`exec_query_oracle_RO`)

pub mod executor;

pub use executor::execute_select;
