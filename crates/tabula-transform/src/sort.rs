//! Stable single-key row ordering.

use tabula_model::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort rows by one column, lexicographically on the raw cell text (no
/// numeric coercion). The sort is stable: equal keys keep their relative
/// order. Missing cells in ragged rows compare as empty strings.
pub fn sort_rows(table: &mut Table, column: usize, order: SortOrder) {
    table.rows.sort_by(|left, right| {
        let left_key = left.get(column).map_or("", String::as_str);
        let right_key = right.get(column).map_or("", String::as_str);
        match order {
            SortOrder::Ascending => left_key.cmp(right_key),
            SortOrder::Descending => right_key.cmp(left_key),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["id".into(), "group".into()]);
        table.push_row(vec!["1".into(), "b".into()]);
        table.push_row(vec!["2".into(), "a".into()]);
        table.push_row(vec!["3".into(), "b".into()]);
        table.push_row(vec!["10".into(), "a".into()]);
        table
    }

    #[test]
    fn ascending_is_lexicographic_not_numeric() {
        let mut table = sample();
        sort_rows(&mut table, 0, SortOrder::Ascending);
        let ids: Vec<&str> = (0..4).map(|row| table.cell(row, 0)).collect();
        // "10" sorts before "2" on raw text
        assert_eq!(ids, ["1", "10", "2", "3"]);
    }

    #[test]
    fn descending_reverses_keys_but_keeps_equal_key_order() {
        let mut table = sample();
        sort_rows(&mut table, 1, SortOrder::Descending);
        let pairs: Vec<(&str, &str)> = (0..4)
            .map(|row| (table.cell(row, 1), table.cell(row, 0)))
            .collect();
        // within each group the original row order is preserved
        assert_eq!(pairs, [("b", "1"), ("b", "3"), ("a", "2"), ("a", "10")]);
    }

    #[test]
    fn missing_cells_sort_as_empty() {
        let mut table = Table::new(vec!["a".into(), "b".into()]);
        table.push_row(vec!["x".into(), "z".into()]);
        table.push_row(vec!["y".into()]);
        sort_rows(&mut table, 1, SortOrder::Ascending);
        assert_eq!(table.cell(0, 0), "y");
        assert_eq!(table.cell(1, 0), "x");
    }
}
