//! Row-level transforms over the table model: filtering, sorting and batch
//! find/replace.

pub mod batch;
pub mod filter;
pub mod sort;

pub use batch::{ReplaceMode, batch_replace};
pub use filter::{FilterOp, FilterSpec, apply_filter, filter_view};
pub use sort::{SortOrder, sort_rows};
