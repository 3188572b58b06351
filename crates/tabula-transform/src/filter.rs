//! Row filtering over one column.

use tabula_model::Table;

/// Filter operator; comparisons are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOp {
    /// Operator from its UI wording, e.g. `"starts with"` or `"is empty"`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().replace(' ', "_").as_str() {
            "contains" => Some(FilterOp::Contains),
            "equals" => Some(FilterOp::Equals),
            "starts_with" => Some(FilterOp::StartsWith),
            "ends_with" => Some(FilterOp::EndsWith),
            "is_empty" | "empty" => Some(FilterOp::IsEmpty),
            "is_not_empty" | "not_empty" => Some(FilterOp::IsNotEmpty),
            _ => None,
        }
    }
}

/// One filter: a column, an operator, and the comparison value.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub column: usize,
    pub op: FilterOp,
    pub value: String,
}

impl FilterSpec {
    pub fn new(column: usize, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            column,
            op,
            value: value.into(),
        }
    }

    /// Whether the row at `row_index` matches. Cell and value are lowercased
    /// before comparison; a missing cell in a ragged row reads as empty, so
    /// `IsEmpty` and `IsNotEmpty` stay exact complements on every row.
    pub fn matches(&self, table: &Table, row_index: usize) -> bool {
        let cell = table.cell(row_index, self.column).to_lowercase();
        let value = self.value.to_lowercase();
        match self.op {
            FilterOp::Contains => cell.contains(&value),
            FilterOp::Equals => cell == value,
            FilterOp::StartsWith => cell.starts_with(&value),
            FilterOp::EndsWith => cell.ends_with(&value),
            FilterOp::IsEmpty => cell.trim().is_empty(),
            FilterOp::IsNotEmpty => !cell.trim().is_empty(),
        }
    }
}

/// Non-destructive filter: indices of the rows that match, in order. This is
/// the default view-level behavior.
pub fn filter_view(table: &Table, spec: &FilterSpec) -> Vec<usize> {
    (0..table.row_count())
        .filter(|row_index| spec.matches(table, *row_index))
        .collect()
}

/// Destructive filter: replace the working row set with the matching rows.
/// Only for an explicit "apply filter permanently" action.
pub fn apply_filter(table: &mut Table, spec: &FilterSpec) -> usize {
    let kept = filter_view(table, spec);
    let mut rows = Vec::with_capacity(kept.len());
    for index in &kept {
        rows.push(table.rows[*index].clone());
    }
    let removed = table.row_count() - rows.len();
    table.rows = rows;
    tracing::debug!(kept = table.row_count(), removed, "applied filter permanently");
    removed
}
