//! Bulk find/replace over one column.

use regex::{NoExpand, Regex, RegexBuilder};

use tabula_model::{Result, Table, TabulaError};

/// How the search string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    /// Search string taken literally.
    Literal { case_insensitive: bool },
    /// Search string is a regular expression; the replacement may use
    /// capture-group references.
    Pattern { case_insensitive: bool },
}

/// Replace every occurrence of `search` in one column across all rows.
///
/// All-or-nothing: the pattern is validated once before any row is touched,
/// so an invalid pattern fails with [`TabulaError::InvalidPattern`] and
/// leaves every row unchanged. Returns the number of rows that changed.
pub fn batch_replace(
    table: &mut Table,
    column: usize,
    search: &str,
    replacement: &str,
    mode: ReplaceMode,
) -> Result<usize> {
    let regex = match mode {
        ReplaceMode::Literal {
            case_insensitive: false,
        } => None,
        ReplaceMode::Literal {
            case_insensitive: true,
        } => Some(build_regex(&regex::escape(search), true)?),
        ReplaceMode::Pattern { case_insensitive } => Some(build_regex(search, case_insensitive)?),
    };

    let mut changed = 0usize;
    for row in &mut table.rows {
        let Some(cell) = row.get_mut(column) else {
            continue;
        };
        let updated = match (&regex, mode) {
            (None, _) => cell.replace(search, replacement),
            (Some(regex), ReplaceMode::Literal { .. }) => {
                regex.replace_all(cell, NoExpand(replacement)).into_owned()
            }
            (Some(regex), ReplaceMode::Pattern { .. }) => {
                regex.replace_all(cell, replacement).into_owned()
            }
        };
        if updated != *cell {
            *cell = updated;
            changed += 1;
        }
    }
    tracing::debug!(changed, column, "batch replace done");
    Ok(changed)
}

fn build_regex(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|err| TabulaError::InvalidPattern(err.to_string()))
}
