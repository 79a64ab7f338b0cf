use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The database engine sitting behind the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// SQL Server (T-SQL)
    Mssql,
    /// Oracle
    Oracle,
}

impl Backend {
    /// Endpoint that accepts read-only statements for this backend.
    #[must_use]
    pub fn read_endpoint(self) -> Endpoint {
        match self {
            Backend::Mssql => Endpoint::MssqlRead,
            Backend::Oracle => Endpoint::OracleRead,
        }
    }

    /// Endpoint that accepts mutating statements, if the gateway exposes one.
    #[must_use]
    pub fn write_endpoint(self) -> Option<Endpoint> {
        match self {
            Backend::Mssql => Some(Endpoint::MssqlWrite),
            Backend::Oracle => None,
        }
    }

    /// How blank rows in a read response are treated for this backend.
    ///
    /// SQL Server results are returned verbatim; Oracle results drop rows with
    /// no non-empty cell.
    #[must_use]
    pub fn empty_row_policy(self) -> EmptyRowPolicy {
        match self {
            Backend::Mssql => EmptyRowPolicy::Keep,
            Backend::Oracle => EmptyRowPolicy::Drop,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Mssql => f.write_str("mssql"),
            Backend::Oracle => f.write_str("oracle"),
        }
    }
}

/// Gateway routes. Every route takes a `text/plain` POST whose body is the raw query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    MssqlRead,
    MssqlWrite,
    OracleRead,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::MssqlRead => "/exec_query_mssql_RO",
            Endpoint::MssqlWrite => "/exec_query_mssql_RW",
            Endpoint::OracleRead => "/exec_query_oracle_RO",
        }
    }

    /// Fallback error text used when a failed response has an empty body.
    #[must_use]
    pub fn fallback_error(self) -> &'static str {
        match self {
            Endpoint::MssqlRead | Endpoint::OracleRead => "Unknown SQL read error",
            Endpoint::MssqlWrite => "Unknown SQL write error",
        }
    }
}

/// Whether rows whose cells are all empty survive decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyRowPolicy {
    /// Keep every newline-delimited segment, including a trailing blank one.
    Keep,
    /// Remove rows with no non-empty cell.
    Drop,
}

/// Rows returned by a read query.
///
/// Each row is the tab-split cells of one line of the gateway's response.
/// Cells stay as text; nothing is type-converted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSet {
    rows: Vec<Vec<String>>,
}

impl RowSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> RowSet {
        RowSet {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<String>> {
        self.rows.iter()
    }

    /// Cell at `row`, `col`, or `None` when either index is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Re-encode the rows in the gateway's wire format: cells joined by tabs,
    /// rows joined by newlines.
    #[must_use]
    pub fn to_delimited_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<Vec<String>>> for RowSet {
    fn from(rows: Vec<Vec<String>>) -> Self {
        RowSet { rows }
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Vec<String>;
    type IntoIter = std::slice::Iter<'a, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for RowSet {
    type Item = Vec<String>;
    type IntoIter = std::vec::IntoIter<Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    /// Text the gateway sent before the `affected_rows: ` marker.
    pub message: String,
    /// Row count parsed after the marker, `0` when missing.
    pub affected_rows: u64,
}

impl std::fmt::Display for WriteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}affected_rows: {}", self.message, self.affected_rows)
    }
}
