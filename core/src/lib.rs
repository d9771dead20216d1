#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod snapshot;
mod types;

pub const MIN_ROWS: Coord = 9;
pub const MAX_ROWS: Coord = 24;
pub const MIN_COLUMNS: Coord = 9;
pub const MAX_COLUMNS: Coord = 30;
pub const MIN_MINES: CellCount = 10;

/// Largest mine count accepted for a board, 93% of its cells rounded down.
pub const fn max_mines(rows: Coord, columns: Coord) -> CellCount {
    (mult(rows, columns) as u32 * 93 / 100) as CellCount
}

/// Board dimensions and mine count, always validated together.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 10);

    pub const fn new_unchecked(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(rows, columns, mines).validate()
    }

    pub fn validate(self) -> Result<Self> {
        let Self {
            rows,
            columns,
            mines,
        } = self;
        if (MIN_ROWS..=MAX_ROWS).contains(&rows)
            && (MIN_COLUMNS..=MAX_COLUMNS).contains(&columns)
            && (MIN_MINES..=max_mines(rows, columns)).contains(&mines)
        {
            Ok(self)
        } else {
            Err(GameError::InvalidConfiguration {
                rows,
                columns,
                mines,
            })
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.columns)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::BEGINNER
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &(row, column) in mine_coords {
            if row >= size.0 || column >= size.1 {
                return Err(GameError::OutOfRange { row, column });
            }
            mine_mask[(row, column).to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Configuration describing this layout, which may or may not be within the playable limits.
    pub fn game_config(&self) -> GameConfig {
        let (rows, columns) = self.size();
        GameConfig::new_unchecked(rows, columns, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.mine_mask.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            columns.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, column), _)| (row as Coord, column as Coord))
    }

    /// Counts mines around `coords` by looking at every neighbor.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Outcome of opening a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome could have changed anything on the board.
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

/// Merges outcomes of a multi-cell open.
impl BitOr for OpenOutcome {
    type Output = OpenOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use OpenOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_bounds_are_inclusive() {
        assert!(GameConfig::new(9, 9, 10).is_ok());
        assert!(GameConfig::new(24, 30, max_mines(24, 30)).is_ok());
        assert_eq!(max_mines(9, 9), 75);
        assert_eq!(max_mines(24, 30), 669);
    }

    #[test]
    fn config_rejects_out_of_range_values() {
        assert_eq!(
            GameConfig::new(8, 9, 10),
            Err(GameError::InvalidConfiguration {
                rows: 8,
                columns: 9,
                mines: 10
            })
        );
        assert!(GameConfig::new(25, 9, 10).is_err());
        assert!(GameConfig::new(9, 8, 10).is_err());
        assert!(GameConfig::new(9, 31, 10).is_err());
        assert!(GameConfig::new(9, 9, 9).is_err());
        assert!(GameConfig::new(9, 9, 76).is_err());
    }

    #[test]
    fn default_config_is_beginner() {
        let config = GameConfig::default();

        assert_eq!(config.size(), (9, 9));
        assert_eq!(config.mines, 10);
        assert_eq!(config.safe_cells(), 71);
    }

    #[test]
    fn layout_from_coords_counts_mines() {
        let layout = MineLayout::from_mine_coords((3, 4), &[(0, 0), (2, 3), (0, 0)]).unwrap();

        assert_eq!(layout.size(), (3, 4));
        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((2, 3)));
        assert_eq!(layout.adjacent_mine_count((1, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((1, 2)), 1);
    }

    #[test]
    fn layout_rejects_coords_outside_board() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::OutOfRange { row: 3, column: 0 })
        );
    }

    #[test]
    fn hit_mine_wins_outcome_merge() {
        use OpenOutcome::*;

        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
    }
}
