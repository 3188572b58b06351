//! Delimiter configuration and the per-editor session context.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Field delimiter for delimited-text parsing and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Pipe,
    Tab,
    /// Arbitrary literal, possibly multi-character.
    Custom(String),
}

impl Delimiter {
    pub fn as_str(&self) -> &str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Semicolon => ";",
            Delimiter::Pipe => "|",
            Delimiter::Tab => "\t",
            Delimiter::Custom(text) => text.as_str(),
        }
    }

    /// Parse a user-supplied delimiter choice; the names `tab` and `\t` mean
    /// a tab, anything else is taken literally.
    pub fn parse(text: &str) -> Self {
        match text {
            "," => Delimiter::Comma,
            ";" => Delimiter::Semicolon,
            "|" => Delimiter::Pipe,
            "\t" | "\\t" | "tab" | "TAB" => Delimiter::Tab,
            other => Delimiter::Custom(other.to_string()),
        }
    }
}

/// Explicit context for one editing session.
///
/// Replaces the source's global mutable fields (current file, table name);
/// every operation that needs cross-cutting state receives a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// File the working data was loaded from, if any.
    pub source: Option<PathBuf>,
    pub delimiter: Delimiter,
    /// Table name used by the SQL emitters.
    pub table_name: String,
}

impl Session {
    pub fn new() -> Self {
        Self {
            source: None,
            delimiter: Delimiter::default(),
            table_name: "my_table".to_string(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, path: PathBuf) -> Self {
        self.source = Some(path);
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }
}
