//! Missing localizations report.

use std::collections::BTreeMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell as TableCell, CellAlignment, Color, Table};

use crate::error::Error;

/// One table row: a spreadsheet row and the languages missing from it.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingRow<'a> {
    pub row: usize,
    pub key: &'a str,
    pub langs: Vec<&'a str>,
}

/// Group `LocalizationMissing` warnings by spreadsheet row, in row order.
/// Other warnings are ignored.
pub fn missing_by_row(warnings: &[Error]) -> Vec<MissingRow<'_>> {
    let mut rows: BTreeMap<usize, MissingRow<'_>> = BTreeMap::new();
    for warning in warnings {
        if let Error::LocalizationMissing { cell, key, lang } = warning {
            rows.entry(cell.row)
                .or_insert_with(|| MissingRow {
                    row: cell.row,
                    key,
                    langs: Vec::new(),
                })
                .langs
                .push(lang);
        }
    }
    rows.into_values().collect()
}

fn header_cell(label: &str) -> TableCell {
    TableCell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

pub fn missing_localizations_table(warnings: &[Error]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            header_cell("Row"),
            header_cell("Key"),
            header_cell("Missing localizations"),
        ]);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for row in missing_by_row(warnings) {
        table.add_row(vec![
            TableCell::new(row.row),
            TableCell::new(row.key),
            TableCell::new(row.langs.join(",")).fg(Color::Yellow),
        ]);
    }
    table
}

/// Print the report to stdout. Returns the number of missing localizations.
pub fn report_missing_localizations(warnings: &[Error]) -> usize {
    let count = warnings
        .iter()
        .filter(|warning| matches!(warning, Error::LocalizationMissing { .. }))
        .count();
    println!("{}", missing_localizations_table(warnings));
    count
}
