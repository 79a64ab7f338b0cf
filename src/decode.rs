//! Decoding of the gateway's text bodies.
//!
//! Read endpoints answer with one line per row and one tab per cell boundary.
//! The write endpoint answers with free text ending in `affected_rows: <n>`.

use crate::types::{EmptyRowPolicy, RowSet, WriteResult};

/// Marker separating the message from the row count in a write response.
pub const AFFECTED_ROWS_MARKER: &str = "affected_rows: ";

/// Build a row set from a read response body.
///
/// The body is split on `'\n'`, then each line on `'\t'`. With
/// [`EmptyRowPolicy::Keep`] every segment becomes a row, so a trailing newline
/// yields a trailing `[""]` row. With [`EmptyRowPolicy::Drop`] rows whose cells
/// are all empty are skipped.
#[must_use]
pub fn build_row_set(body: &str, policy: EmptyRowPolicy) -> RowSet {
    let mut row_set = RowSet::with_capacity(body.matches('\n').count() + 1);

    for line in body.split('\n') {
        let row: Vec<String> = line.split('\t').map(str::to_string).collect();
        if policy == EmptyRowPolicy::Drop && row.iter().all(String::is_empty) {
            continue;
        }
        row_set.push_row(row);
    }

    row_set
}

/// Build a write result from a write response body.
///
/// Text before the first marker is the message, kept untrimmed. The count is
/// read from the digits right after the marker; a missing marker or a tail with
/// no leading digits gives `0`.
#[must_use]
pub fn build_write_result(body: &str) -> WriteResult {
    match body.split_once(AFFECTED_ROWS_MARKER) {
        Some((message, tail)) => WriteResult {
            message: message.to_string(),
            affected_rows: parse_leading_count(tail),
        },
        None => WriteResult {
            message: body.to_string(),
            affected_rows: 0,
        },
    }
}

/// Leading unsigned integer of `text`, ignoring leading whitespace and an
/// optional `+`. Anything after the digits is ignored. Overflow saturates.
fn parse_leading_count(text: &str) -> u64 {
    let trimmed = text.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}
