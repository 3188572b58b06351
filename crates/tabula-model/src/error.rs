use thiserror::Error;

/// Error taxonomy shared by every Tabula crate.
///
/// Model and codec operations never recover silently beyond the documented
/// defaults (a missing cell reads as the empty string); everything else fails
/// fast with one of these variants and is surfaced by the caller.
#[derive(Debug, Error)]
pub enum TabulaError {
    #[error("file has no header line")]
    EmptyFile,
    #[error("json root is neither an array of objects nor an object containing one")]
    UnsupportedJsonShape,
    #[error("target node is not an object or array")]
    InvalidTarget,
    #[error("object entries require a non-empty key")]
    EmptyKey,
    #[error("node is not a primitive value")]
    NotPrimitive,
    #[error("invalid number: {0:?}")]
    NumberFormat(String),
    #[error("cannot remove the root node")]
    CannotRemoveRoot,
    #[error("node not found: {0}")]
    NodeNotFound(String),
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("xml parse error: {0}")]
    XmlParse(String),
}

pub type Result<T> = std::result::Result<T, TabulaError>;
