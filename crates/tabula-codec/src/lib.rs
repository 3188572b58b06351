//! Codec layer: pure conversions between file text and the data models.

pub mod delimited;
pub mod json;
pub mod sheet;
pub mod xml;

pub use delimited::{parse_delimited, serialize_delimited};
pub use json::{escape_json, parse_json, project_to_table, serialize_json, table_to_json};
pub use sheet::{SheetSink, TextSheet, write_table_sheet};
pub use xml::{
    display_rows, element_to_json_like, normalize_quotes, parse_xml, sanitize, serialize_xml,
    table_to_xml,
};
