use serde::{Deserialize, Serialize};

/// Player annotation on a hidden cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellLabel {
    #[default]
    Unmarked,
    /// The player believes there is a mine here.
    Flag,
    Question,
}

impl CellLabel {
    pub const fn is_marked(self) -> bool {
        !matches!(self, Self::Unmarked)
    }
}

/// Canonical per-cell record stored by the grid.
///
/// A mine never carries a neighbor count and a counted cell is never a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    revealed: bool,
    label: CellLabel,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_hidden(&self) -> bool {
        !self.revealed
    }

    pub const fn label(&self) -> CellLabel {
        self.label
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn plant_mine(&mut self) {
        self.mine = true;
        self.adjacent_mines = 0;
    }

    pub(crate) fn add_adjacent_mine(&mut self) {
        if !self.mine {
            self.adjacent_mines += 1;
        }
    }

    pub(crate) fn reveal(&mut self) -> bool {
        !core::mem::replace(&mut self.revealed, true)
    }

    /// Returns whether the label actually changed.
    pub(crate) fn set_label(&mut self, label: CellLabel) -> bool {
        core::mem::replace(&mut self.label, label) != label
    }

    /// Hides the cell and drops its label, returning whether anything visible changed.
    pub(crate) fn close(&mut self) -> bool {
        let changed = self.revealed || self.label.is_marked();
        self.revealed = false;
        self.label = CellLabel::Unmarked;
        changed
    }
}
