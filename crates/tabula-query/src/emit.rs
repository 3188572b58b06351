//! One-way SQL export: CREATE TABLE DDL and INSERT DML for a whole table.

use tabula_model::Table;

use crate::escape::escape_sql;

/// Comment emitted instead of statements when there is nothing to export.
pub const NO_DATA_COMMENT: &str = "-- No data loaded";

/// CREATE TABLE statement with one VARCHAR(255) column per header.
///
/// `include_id_column` adds a leading auto-increment `id` primary key; the
/// two historical export paths differed on this, so the choice is explicit.
pub fn emit_create_table(headers: &[String], table_name: &str, include_id_column: bool) -> String {
    if headers.is_empty() {
        return NO_DATA_COMMENT.to_string();
    }
    let mut sql = String::new();
    sql.push_str("CREATE TABLE IF NOT EXISTS ");
    sql.push_str(table_name);
    sql.push_str(" (\n");
    if include_id_column {
        sql.push_str("  id INT AUTO_INCREMENT PRIMARY KEY,\n");
    }
    for (index, header) in headers.iter().enumerate() {
        sql.push_str("  ");
        sql.push_str(header);
        sql.push_str(" VARCHAR(255)");
        if index < headers.len() - 1 {
            sql.push(',');
        }
        sql.push('\n');
    }
    sql.push_str(");\n");
    sql
}

/// One INSERT statement per row, values single-quoted and escaped.
pub fn emit_insert_all(table: &Table, table_name: &str) -> String {
    if table.headers.is_empty() || table.rows.is_empty() {
        return NO_DATA_COMMENT.to_string();
    }
    let columns = table.headers.join(", ");
    let mut sql = String::new();
    for (row_index, _) in table.rows.iter().enumerate() {
        sql.push_str("INSERT INTO ");
        sql.push_str(table_name);
        sql.push_str(" (");
        sql.push_str(&columns);
        sql.push_str(") VALUES (");
        for (column, _) in table.headers.iter().enumerate() {
            if column > 0 {
                sql.push_str(", ");
            }
            sql.push('\'');
            sql.push_str(&escape_sql(table.cell(row_index, column)));
            sql.push('\'');
        }
        sql.push_str(");\n");
    }
    sql
}

/// The combined export script: DDL section followed by the DML section.
pub fn emit_script(table: &Table, table_name: &str, include_id_column: bool) -> String {
    if table.headers.is_empty() {
        return NO_DATA_COMMENT.to_string();
    }
    format!(
        "-- CREATE TABLE\n{}\n-- INSERT statements\n{}",
        emit_create_table(&table.headers, table_name, include_id_column),
        emit_insert_all(table, table_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["id".into(), "name".into()]);
        table.push_row(vec!["1".into(), "O'Brien".into()]);
        table.push_row(vec!["2".into(), "".into()]);
        table
    }

    #[test]
    fn create_table_without_id_column() {
        insta::assert_snapshot!(
            emit_create_table(&sample().headers, "clients", false),
            @r"
        CREATE TABLE IF NOT EXISTS clients (
          id VARCHAR(255),
          name VARCHAR(255)
        );
        "
        );
    }

    #[test]
    fn create_table_with_id_column() {
        insta::assert_snapshot!(
            emit_create_table(&sample().headers, "clients", true),
            @r"
        CREATE TABLE IF NOT EXISTS clients (
          id INT AUTO_INCREMENT PRIMARY KEY,
          id VARCHAR(255),
          name VARCHAR(255)
        );
        "
        );
    }

    #[test]
    fn insert_all_escapes_values() {
        insta::assert_snapshot!(
            emit_insert_all(&sample(), "clients"),
            @r"
        INSERT INTO clients (id, name) VALUES ('1', 'O''Brien');
        INSERT INTO clients (id, name) VALUES ('2', '');
        "
        );
    }

    #[test]
    fn script_combines_sections() {
        let script = emit_script(&sample(), "clients", false);
        assert!(script.starts_with("-- CREATE TABLE\n"));
        assert!(script.contains("\n-- INSERT statements\n"));
    }

    #[test]
    fn empty_inputs_degrade_to_comment() {
        let empty = Table::default();
        assert_eq!(emit_create_table(&empty.headers, "t", false), NO_DATA_COMMENT);
        assert_eq!(emit_insert_all(&empty, "t"), NO_DATA_COMMENT);
        assert_eq!(emit_script(&empty, "t", true), NO_DATA_COMMENT);

        let headers_only = Table::new(vec!["a".into()]);
        assert_eq!(emit_insert_all(&headers_only, "t"), NO_DATA_COMMENT);
    }
}
