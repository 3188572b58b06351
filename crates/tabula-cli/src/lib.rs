//! Shared pieces of the Tabula CLI.

pub mod logging;
