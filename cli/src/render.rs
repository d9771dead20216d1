use std::fmt;

use minegrid_core::{Snapshot, VisibleCell};

/// Text form of a board: `*` for a mine, `O` for an empty cell, the digit for a counted cell, `-` for
/// anything still hidden.
pub struct TextBoard<'a>(pub &'a Snapshot);

fn cell_char(cell: VisibleCell) -> char {
    match cell {
        VisibleCell::Mine => '*',
        VisibleCell::Revealed(0) => 'O',
        VisibleCell::Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        VisibleCell::Hidden(_) => '-',
    }
}

impl fmt::Display for TextBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.cells.rows() {
            for &cell in row {
                write!(f, "{}", cell_char(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
