//! Query-authoring templates: display/copy-only text, never executed.

use tabula_model::{Row, Table};

use crate::emit::NO_DATA_COMMENT;
use crate::escape::escape_sql;

fn quoted(value: &str) -> String {
    format!("'{}'", escape_sql(value))
}

fn cell(row: &Row, index: usize) -> &str {
    row.get(index).map_or("", String::as_str)
}

/// SELECT over all columns plus a WHERE example on the first column.
pub fn emit_select(headers: &[String], table_name: &str) -> String {
    if headers.is_empty() {
        return NO_DATA_COMMENT.to_string();
    }
    format!(
        "SELECT {}\nFROM {};\n\n-- Example with WHERE:\nSELECT *\nFROM {}\nWHERE {} = 'value';",
        headers.join(", "),
        table_name,
        table_name,
        headers[0],
    )
}

/// Parameterized INSERT plus, when a first row exists, a literal example.
pub fn emit_insert_template(headers: &[String], first_row: Option<&Row>, table_name: &str) -> String {
    if headers.is_empty() {
        return NO_DATA_COMMENT.to_string();
    }
    let columns = headers.join(", ");
    let placeholders = vec!["?"; headers.len()].join(", ");
    let mut sql = format!("INSERT INTO {table_name} ({columns})\nVALUES ({placeholders});\n");
    if let Some(row) = first_row {
        let values: Vec<String> = (0..headers.len())
            .map(|index| quoted(cell(row, index)))
            .collect();
        sql.push_str(&format!(
            "\n-- Example with values:\nINSERT INTO {table_name} ({columns})\nVALUES ({});",
            values.join(", ")
        ));
    }
    sql
}

/// UPDATE of every column keyed on the first column: a `?` template followed
/// by a complete literal example for the selected row.
pub fn emit_update(row: &Row, headers: &[String], table_name: &str) -> String {
    if headers.is_empty() {
        return NO_DATA_COMMENT.to_string();
    }
    let assignments_template: Vec<String> =
        headers.iter().map(|header| format!("{header} = ?")).collect();
    let assignments_literal: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| format!("{header} = {}", quoted(cell(row, index))))
        .collect();
    let key = quoted(cell(row, 0));
    format!(
        "UPDATE {table_name}\nSET {}\nWHERE {} = {key};\n\n-- Complete example:\nUPDATE {table_name}\nSET {}\nWHERE {} = {key};",
        assignments_template.join(",\n    "),
        headers[0],
        assignments_literal.join(",\n    "),
        headers[0],
    )
}

/// DELETE keyed on the first column, plus a safer example that also matches
/// the second column when the table has one.
pub fn emit_delete(row: &Row, headers: &[String], table_name: &str) -> String {
    if headers.is_empty() {
        return NO_DATA_COMMENT.to_string();
    }
    let key = quoted(cell(row, 0));
    let mut sql = format!("DELETE FROM {table_name}\nWHERE {} = {key};", headers[0]);
    if headers.len() > 1 {
        sql.push_str(&format!(
            "\n\n-- Safer version:\nDELETE FROM {table_name}\nWHERE {} = {key}\nAND {} = {};",
            headers[0],
            headers[1],
            quoted(cell(row, 1)),
        ));
    }
    sql
}

/// Dispatch for the four template kinds; UPDATE and DELETE need a selected
/// row and explain themselves when none is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
}

pub fn emit_query(
    kind: QueryKind,
    table: &Table,
    selected_row: Option<usize>,
    table_name: &str,
) -> String {
    if table.headers.is_empty() {
        return NO_DATA_COMMENT.to_string();
    }
    let row = selected_row.and_then(|index| table.rows.get(index));
    match kind {
        QueryKind::Select => emit_select(&table.headers, table_name),
        QueryKind::Insert => emit_insert_template(&table.headers, table.rows.first(), table_name),
        QueryKind::Update => row.map_or_else(
            || "-- Select a row for UPDATE".to_string(),
            |row| emit_update(row, &table.headers, table_name),
        ),
        QueryKind::Delete => row.map_or_else(
            || "-- Select a row for DELETE".to_string(),
            |row| emit_delete(row, &table.headers, table_name),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["id".into(), "name".into(), "notes".into()]);
        table.push_row(vec!["1".into(), "O'Brien".into(), "x".into()]);
        table.push_row(vec!["2".into(), "Ada".into(), "".into()]);
        table
    }

    #[test]
    fn select_contains_required_fragments() {
        let sql = emit_select(&["id".to_string(), "name".to_string()], "t");
        assert!(sql.contains("SELECT id, name"));
        assert!(sql.contains("FROM t"));
        assert!(sql.contains("WHERE id = 'value'"));
    }

    #[test]
    fn select_snapshot() {
        insta::assert_snapshot!(
            emit_select(&sample().headers, "clients"),
            @r"
        SELECT id, name, notes
        FROM clients;

        -- Example with WHERE:
        SELECT *
        FROM clients
        WHERE id = 'value';
        "
        );
    }

    #[test]
    fn insert_template_with_example() {
        let table = sample();
        insta::assert_snapshot!(
            emit_insert_template(&table.headers, table.rows.first(), "clients"),
            @r"
        INSERT INTO clients (id, name, notes)
        VALUES (?, ?, ?);

        -- Example with values:
        INSERT INTO clients (id, name, notes)
        VALUES ('1', 'O''Brien', 'x');
        "
        );
    }

    #[test]
    fn insert_template_without_rows_has_no_example() {
        let sql = emit_insert_template(&sample().headers, None, "clients");
        assert!(sql.contains("VALUES (?, ?, ?);"));
        assert!(!sql.contains("Example"));
    }

    #[test]
    fn update_keys_on_first_column() {
        let table = sample();
        insta::assert_snapshot!(
            emit_update(&table.rows[0], &table.headers, "clients"),
            @r"
        UPDATE clients
        SET id = ?,
            name = ?,
            notes = ?
        WHERE id = '1';

        -- Complete example:
        UPDATE clients
        SET id = '1',
            name = 'O''Brien',
            notes = 'x'
        WHERE id = '1';
        "
        );
    }

    #[test]
    fn delete_adds_safer_example_with_second_column() {
        let table = sample();
        insta::assert_snapshot!(
            emit_delete(&table.rows[1], &table.headers, "clients"),
            @r"
        DELETE FROM clients
        WHERE id = '2';

        -- Safer version:
        DELETE FROM clients
        WHERE id = '2'
        AND name = 'Ada';
        "
        );
    }

    #[test]
    fn delete_on_single_column_table_skips_safer_example() {
        let sql = emit_delete(&vec!["7".to_string()], &["id".to_string()], "t");
        assert_eq!(sql, "DELETE FROM t\nWHERE id = '7';");
    }

    #[test]
    fn dispatch_requires_selection_for_row_queries() {
        let table = sample();
        assert_eq!(
            emit_query(QueryKind::Update, &table, None, "t"),
            "-- Select a row for UPDATE"
        );
        assert_eq!(
            emit_query(QueryKind::Delete, &table, Some(99), "t"),
            "-- Select a row for DELETE"
        );
        assert!(emit_query(QueryKind::Select, &table, None, "t").contains("SELECT"));
    }

    #[test]
    fn empty_headers_degrade_to_comment() {
        let empty = Table::default();
        assert_eq!(emit_query(QueryKind::Select, &empty, None, "t"), NO_DATA_COMMENT);
        assert_eq!(emit_select(&[], "t"), NO_DATA_COMMENT);
        assert_eq!(emit_update(&Vec::new(), &[], "t"), NO_DATA_COMMENT);
        assert_eq!(emit_delete(&Vec::new(), &[], "t"), NO_DATA_COMMENT);
        assert_eq!(emit_insert_template(&[], None, "t"), NO_DATA_COMMENT);
    }
}
