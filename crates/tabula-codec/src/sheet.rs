//! Sheet (spreadsheet-style) output.
//!
//! The binary spreadsheet container itself is an external collaborator: the
//! core only feeds an already-built table into a [`SheetSink`]. A plain-text
//! grid implementation ships for previews and text export; a real workbook
//! library can implement the trait without the core changing.

use tabula_model::{Result, Table};

/// Receiver for one sheet of tabular output.
pub trait SheetSink {
    /// Auto-fit column widths, computed before any row is written.
    fn set_column_widths(&mut self, widths: &[usize]) -> Result<()>;
    fn write_header(&mut self, cells: &[String]) -> Result<()>;
    fn write_row(&mut self, cells: &[String]) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Feed a table into a sink: widths first, then the header row, then every
/// data row in order. Width per column is the widest cell including the
/// header, measured in characters.
pub fn write_table_sheet(table: &Table, sink: &mut dyn SheetSink) -> Result<()> {
    let widths = column_widths(table);
    sink.set_column_widths(&widths)?;
    sink.write_header(&table.headers)?;
    for (row_index, _) in table.rows.iter().enumerate() {
        let cells: Vec<String> = (0..table.headers.len())
            .map(|column| table.cell(row_index, column).to_string())
            .collect();
        sink.write_row(&cells)?;
    }
    sink.finish()
}

fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table
        .headers
        .iter()
        .map(|header| header.chars().count())
        .collect();
    for (row_index, _) in table.rows.iter().enumerate() {
        for (column, width) in widths.iter_mut().enumerate() {
            let len = table.cell(row_index, column).chars().count();
            if len > *width {
                *width = len;
            }
        }
    }
    widths
}

/// Text-grid sink: space-padded columns, a rule under the header row.
#[derive(Debug, Default)]
pub struct TextSheet {
    widths: Vec<usize>,
    out: String,
}

impl TextSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_text(self) -> String {
        self.out
    }

    fn push_cells(&mut self, cells: &[String]) {
        for (column, cell) in cells.iter().enumerate() {
            if column > 0 {
                self.out.push_str("  ");
            }
            let width = self.widths.get(column).copied().unwrap_or(cell.len());
            self.out.push_str(cell);
            for _ in cell.chars().count()..width {
                self.out.push(' ');
            }
        }
        while self.out.ends_with(' ') {
            self.out.pop();
        }
        self.out.push('\n');
    }
}

impl SheetSink for TextSheet {
    fn set_column_widths(&mut self, widths: &[usize]) -> Result<()> {
        self.widths = widths.to_vec();
        Ok(())
    }

    fn write_header(&mut self, cells: &[String]) -> Result<()> {
        self.push_cells(cells);
        let rule_len = self.widths.iter().sum::<usize>() + 2 * self.widths.len().saturating_sub(1);
        self.out.push_str(&"-".repeat(rule_len));
        self.out.push('\n');
        Ok(())
    }

    fn write_row(&mut self, cells: &[String]) -> Result<()> {
        self.push_cells(cells);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["id".into(), "name".into()]);
        table.push_row(vec!["1".into(), "Alice".into()]);
        table.push_row(vec!["2".into()]);
        table
    }

    #[test]
    fn widths_cover_headers_and_cells() {
        assert_eq!(column_widths(&sample()), vec![2, 5]);
    }

    #[test]
    fn text_sheet_pads_and_rules() {
        let table = sample();
        let mut sheet = TextSheet::new();
        write_table_sheet(&table, &mut sheet).unwrap();
        let text = sheet.into_text();
        assert_eq!(text, "id  name\n---------\n1   Alice\n2\n");
    }

    /// Recording sink used to check the feeding order.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl SheetSink for Recorder {
        fn set_column_widths(&mut self, widths: &[usize]) -> Result<()> {
            self.calls.push(format!("widths {widths:?}"));
            Ok(())
        }
        fn write_header(&mut self, cells: &[String]) -> Result<()> {
            self.calls.push(format!("header {}", cells.join(",")));
            Ok(())
        }
        fn write_row(&mut self, cells: &[String]) -> Result<()> {
            self.calls.push(format!("row {}", cells.join(",")));
            Ok(())
        }
        fn finish(&mut self) -> Result<()> {
            self.calls.push("finish".to_string());
            Ok(())
        }
    }

    #[test]
    fn sink_receives_widths_header_rows_finish() {
        let mut recorder = Recorder::default();
        write_table_sheet(&sample(), &mut recorder).unwrap();
        assert_eq!(
            recorder.calls,
            vec![
                "widths [2, 5]",
                "header id,name",
                "row 1,Alice",
                // ragged row padded to the header count
                "row 2,",
                "finish",
            ]
        );
    }
}
