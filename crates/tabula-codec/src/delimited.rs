//! Delimited-text parsing and serialization.
//!
//! Splitting is on the literal delimiter, never quote-aware: a quoted field
//! containing the delimiter is split apart. This matches the editors this
//! engine was built for and is an accepted limitation; the matching hazard on
//! the write side is that delimiter-containing cells are not escaped.

use tabula_model::{Delimiter, Result, Table, TabulaError};

fn split_line(line: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![line.to_string()];
    }
    line.split(delimiter).map(str::to_string).collect()
}

/// Parse delimited text into a table.
///
/// The first line supplies the headers; trailing empty header fields are
/// dropped while data rows keep trailing empty fields. Input with no lines at
/// all fails with [`TabulaError::EmptyFile`].
pub fn parse_delimited(text: &str, delimiter: &Delimiter) -> Result<Table> {
    let delim = delimiter.as_str();
    let mut lines = text.lines();
    let Some(header_line) = lines.next() else {
        return Err(TabulaError::EmptyFile);
    };

    let mut headers = split_line(header_line, delim);
    while headers.len() > 1 && headers.last().is_some_and(String::is_empty) {
        headers.pop();
    }

    let mut table = Table::new(headers);
    for line in lines {
        table.push_row(split_line(line, delim));
    }
    tracing::debug!(rows = table.row_count(), "parsed delimited text");
    Ok(table)
}

/// Serialize a table: header line, one line per row, cells joined with the
/// literal delimiter, `\n` line endings, trailing newline.
pub fn serialize_delimited(table: &Table, delimiter: &Delimiter) -> String {
    let delim = delimiter.as_str();
    let mut out = String::new();
    out.push_str(&table.headers.join(delim));
    out.push('\n');
    for row in &table.rows {
        out.push_str(&row.join(delim));
        out.push('\n');
    }
    out
}
