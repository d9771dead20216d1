use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer is allowed to know about one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Hidden(CellLabel),
    Mine,
    Revealed(u8),
}

impl VisibleCell {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden(_))
    }
}

impl Default for VisibleCell {
    fn default() -> Self {
        Self::Hidden(CellLabel::Unmarked)
    }
}

/// Read-only copy of the player-visible board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub state: GameState,
    pub cells: Array2<VisibleCell>,
}

impl Snapshot {
    pub fn from_grid<G>(grid: &Grid<G>) -> Self {
        let cells = grid.cells().map(|cell| {
            if cell.is_hidden() {
                VisibleCell::Hidden(cell.label())
            } else if cell.is_mine() {
                VisibleCell::Mine
            } else {
                VisibleCell::Revealed(cell.adjacent_mines())
            }
        });

        Self {
            size: grid.size(),
            mine_count: grid.mine_count(),
            state: grid.state(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> VisibleCell {
        self.cells[coords.to_nd_index()]
    }

    pub fn hidden_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_hidden()).count() as CellCount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn corner_layout() -> MineLayout {
        let mines: Vec<Coord2> = (0..9).map(|column| (8, column)).chain([(7, 0)]).collect();
        MineLayout::from_mine_coords((9, 9), &mines).unwrap()
    }

    #[test]
    fn from_grid_maps_visible_state() {
        let mut grid = Grid::with_layout(RandomMinefieldGenerator::new(0), &corner_layout()).unwrap();
        grid.set_label((7, 0), CellLabel::Flag).unwrap();
        grid.open((6, 0)).unwrap();

        let snapshot = Snapshot::from_grid(&grid);

        assert_eq!(snapshot.size, (9, 9));
        assert_eq!(snapshot.mine_count, 10);
        assert_eq!(snapshot.state, GameState::Active);
        assert_eq!(snapshot.cell((6, 0)), VisibleCell::Revealed(1));
        assert_eq!(snapshot.cell((7, 0)), VisibleCell::Hidden(CellLabel::Flag));
        assert_eq!(snapshot.cell((0, 0)), VisibleCell::Hidden(CellLabel::Unmarked));
        assert_eq!(snapshot.hidden_count(), 80);
    }

    #[test]
    fn from_grid_shows_mines_after_loss() {
        let mut grid = Grid::with_layout(RandomMinefieldGenerator::new(0), &corner_layout()).unwrap();
        grid.open((8, 3)).unwrap();

        let snapshot = Snapshot::from_grid(&grid);

        assert_eq!(snapshot.state, GameState::Failure);
        assert_eq!(
            snapshot.cells.iter().filter(|&&cell| cell == VisibleCell::Mine).count(),
            10
        );
        assert_eq!(snapshot.hidden_count(), 71);
    }

    #[test]
    fn serializes_to_json() {
        let grid = Grid::with_layout(RandomMinefieldGenerator::new(0), &corner_layout()).unwrap();
        let snapshot = Snapshot::from_grid(&grid);

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot);
        assert!(json.contains("\"Active\""));
    }
}
