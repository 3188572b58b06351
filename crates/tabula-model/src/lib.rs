//! Tabula data model: the flat table, the JSON value/tree pair, the XML
//! element tree, and the shared error taxonomy.

pub mod error;
pub mod json;
pub mod options;
pub mod table;
pub mod tree;
pub mod xml;

pub use error::{Result, TabulaError};
pub use json::JsonValue;
pub use options::{Delimiter, Session};
pub use table::{Row, Table};
pub use tree::{JsonTree, NodeId, NodeKind};
pub use xml::{XmlChild, XmlDocument, XmlElement};
