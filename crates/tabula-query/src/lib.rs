//! SQL text generation from the table model.
//!
//! Everything here emits display/copy-only text; nothing is ever executed
//! against a database or parsed back in. Emitters degrade to a comment string
//! when there is no data instead of returning errors.

pub mod emit;
pub mod escape;
pub mod templates;

pub use emit::{NO_DATA_COMMENT, emit_create_table, emit_insert_all, emit_script};
pub use escape::escape_sql;
pub use templates::{
    QueryKind, emit_delete, emit_insert_template, emit_query, emit_select, emit_update,
};
