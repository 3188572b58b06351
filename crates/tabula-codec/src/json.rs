//! JSON parsing, serialization and the table projections.

use indexmap::IndexMap;

use tabula_model::{JsonValue, Result, Table, TabulaError};

/// Escape a string for embedding in JSON output.
///
/// Exactly the backslash set the output contract names: `\`, `"`, backspace,
/// formfeed, newline, carriage return, tab.
pub fn escape_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Parse JSON text into the tagged value model, object key order preserved.
pub fn parse_json(text: &str) -> Result<JsonValue> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(JsonValue::from(value))
}

/// Serialize a value. Pretty output is 2-space indented and deterministic;
/// key order is emitted exactly as stored.
pub fn serialize_json(value: &JsonValue, pretty: bool) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0, pretty);
    out
}

fn write_value(out: &mut String, value: &JsonValue, depth: usize, pretty: bool) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        JsonValue::Number(n) => out.push_str(&n.to_string()),
        JsonValue::String(s) => {
            out.push('"');
            out.push_str(&escape_json(s));
            out.push('"');
        }
        JsonValue::Object(entries) => {
            if entries.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (index, (key, entry)) in entries.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                separator(out, depth + 1, pretty);
                out.push('"');
                out.push_str(&escape_json(key));
                out.push_str(if pretty { "\": " } else { "\":" });
                write_value(out, entry, depth + 1, pretty);
            }
            separator(out, depth, pretty);
            out.push('}');
        }
        JsonValue::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                separator(out, depth + 1, pretty);
                write_value(out, item, depth + 1, pretty);
            }
            separator(out, depth, pretty);
            out.push(']');
        }
    }
}

fn separator(out: &mut String, depth: usize, pretty: bool) {
    if pretty {
        out.push('\n');
        for _ in 0..depth {
            out.push_str("  ");
        }
    }
}

/// Cell text for the table projection: scalars by their canonical text with
/// null as empty, composites as compact JSON.
fn cell_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        other => other
            .scalar_text()
            .unwrap_or_else(|| serialize_json(other, false)),
    }
}

fn projectable_array(value: &JsonValue) -> Option<&[JsonValue]> {
    let items = value.as_array()?;
    if !items.is_empty() && items.iter().all(|item| item.as_object().is_some()) {
        Some(items)
    } else {
        None
    }
}

/// Project a JSON document onto the flat table model.
///
/// The root must be an array of objects, or an object whose first qualifying
/// entry is one. The first element's keys define the headers; later elements
/// missing a key render the empty string and extra keys are dropped.
pub fn project_to_table(value: &JsonValue) -> Result<Table> {
    let items = match value {
        JsonValue::Array(_) => projectable_array(value),
        JsonValue::Object(entries) => entries.values().find_map(projectable_array),
        _ => None,
    }
    .ok_or(TabulaError::UnsupportedJsonShape)?;

    let first = items[0]
        .as_object()
        .ok_or(TabulaError::UnsupportedJsonShape)?;
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut table = Table::new(headers);
    for item in items {
        let entries = item
            .as_object()
            .ok_or(TabulaError::UnsupportedJsonShape)?;
        let row = table
            .headers
            .iter()
            .map(|header| entries.get(header).map(cell_text).unwrap_or_default())
            .collect();
        table.push_row(row);
    }
    tracing::debug!(rows = table.row_count(), "projected json array onto table");
    Ok(table)
}

/// Build the JSON view of a table: an array of objects, one per row, every
/// value a string, keys in header order.
pub fn table_to_json(table: &Table) -> JsonValue {
    let items = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, _)| {
            let entries: IndexMap<String, JsonValue> = table
                .headers
                .iter()
                .enumerate()
                .map(|(column, header)| {
                    (
                        header.clone(),
                        JsonValue::String(table.cell(row_index, column).to_string()),
                    )
                })
                .collect();
            JsonValue::Object(entries)
        })
        .collect();
    JsonValue::Array(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_json_literal_tokens() {
        assert_eq!(escape_json("a\"b\\c\n"), "a\\\"b\\\\c\\n");
        assert_eq!(escape_json("tab\there"), "tab\\there");
        assert_eq!(escape_json("plain"), "plain");
    }

    #[test]
    fn pretty_output_is_two_space_indented() {
        let value = parse_json(r#"{"a":1,"b":[true,null]}"#).unwrap();
        let text = serialize_json(&value, true);
        assert_eq!(
            text,
            "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn compact_output_keeps_key_order() {
        let value = parse_json(r#"{"z":1,"a":{"y":2,"b":3}}"#).unwrap();
        assert_eq!(serialize_json(&value, false), r#"{"z":1,"a":{"y":2,"b":3}}"#);
    }

    #[test]
    fn projection_uses_first_element_schema() {
        let value = parse_json(r#"[{"a":"1","b":"2"},{"a":"3"}]"#).unwrap();
        let table = project_to_table(&value).unwrap();
        assert_eq!(table.headers, ["a", "b"]);
        assert_eq!(
            table.rows,
            vec![vec!["1".to_string(), "2".into()], vec!["3".into(), "".into()]]
        );
    }

    #[test]
    fn projection_drops_extra_keys_and_blanks_null() {
        let value = parse_json(r#"[{"a":1.0,"b":true},{"a":null,"b":false,"c":"x"}]"#).unwrap();
        let table = project_to_table(&value).unwrap();
        assert_eq!(table.headers, ["a", "b"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["1.0".to_string(), "true".into()],
                vec!["".to_string(), "false".into()],
            ]
        );
    }

    #[test]
    fn projection_accepts_wrapping_object() {
        let value = parse_json(r#"{"meta":"x","records":[{"id":"1"}]}"#).unwrap();
        let table = project_to_table(&value).unwrap();
        assert_eq!(table.headers, ["id"]);
    }

    #[test]
    fn projection_rejects_other_shapes() {
        for text in [r#""scalar""#, "[1,2]", "[]", r#"{"a":"b"}"#] {
            let value = parse_json(text).unwrap();
            assert!(
                matches!(
                    project_to_table(&value),
                    Err(TabulaError::UnsupportedJsonShape)
                ),
                "expected shape error for {text}"
            );
        }
    }

    #[test]
    fn projection_stringifies_nested_values_compactly() {
        let value = parse_json(r#"[{"a":{"k":[1]}}]"#).unwrap();
        let table = project_to_table(&value).unwrap();
        assert_eq!(table.rows[0][0], r#"{"k":[1]}"#);
    }

    #[test]
    fn table_to_json_is_all_strings() {
        let mut table = Table::new(vec!["id".into(), "name".into()]);
        table.push_row(vec!["1".into(), "Ann".into()]);
        table.push_row(vec!["2".into()]);
        let value = table_to_json(&table);
        assert_eq!(
            serialize_json(&value, false),
            r#"[{"id":"1","name":"Ann"},{"id":"2","name":""}]"#
        );
    }
}
