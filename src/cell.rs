use std::fmt;

/// Location of a single spreadsheet cell, used to address diagnostics.
///
/// Rows are 1-based (the header is row 1), columns are 0-based indices that
/// render as spreadsheet letters: `Cell::new("strings", 3, 1)` displays as
/// `strings!B3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub tab: String,
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub fn new(tab: &str, row: usize, column: usize) -> Self {
        Cell {
            tab: tab.to_owned(),
            row,
            column,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}{}", self.tab, column_name(self.column), self.row)
    }
}

/// Spreadsheet-style column name for a 0-based index: 0 → `A`, 25 → `Z`,
/// 26 → `AA`, 701 → `ZZ`, 702 → `AAA`.
pub fn column_name(index: usize) -> String {
    const LETTERS: usize = 26;
    let letter = (b'A' + (index % LETTERS) as u8) as char;
    if index < LETTERS {
        letter.to_string()
    } else {
        let mut name = column_name(index / LETTERS - 1);
        name.push(letter);
        name
    }
}
