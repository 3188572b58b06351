//! Terminal table rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement};

use tabula_model::Table;

/// Render up to `limit` rows of a table for the terminal.
pub fn render_table(table: &Table, limit: usize) -> comfy_table::Table {
    let mut out = comfy_table::Table::new();
    out.load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    out.set_header(
        table
            .headers
            .iter()
            .map(|header| header_cell(header))
            .collect::<Vec<_>>(),
    );
    for (row_index, _) in table.rows.iter().take(limit).enumerate() {
        let cells: Vec<Cell> = (0..table.headers.len())
            .map(|column| Cell::new(table.cell(row_index, column)))
            .collect();
        out.add_row(cells);
    }
    out
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
