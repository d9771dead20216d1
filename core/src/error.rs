use thiserror::Error;

use crate::{CellCount, Coord};

/// A call that does not fit the current state of the board. These indicate a bug in the calling layer
/// rather than bad user input.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("cell is still hidden")]
    CellHidden,
    #[error("cell is already revealed")]
    CellRevealed,
    #[error("cell is a mine and has no neighbor count")]
    CellIsMine,
    #[error("game already ended, no new moves are accepted")]
    GameFinished,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(
        "Invalid configuration: {rows}x{columns} with {mines} mines (rows 9-24, columns 9-30, mines 10 to 93% of cells)"
    )]
    InvalidConfiguration {
        rows: Coord,
        columns: Coord,
        mines: CellCount,
    },
    #[error("Coordinates ({row}, {column}) are outside the board")]
    OutOfRange { row: Coord, column: Coord },
    #[error("Precondition violated: {0}")]
    PreconditionViolated(#[from] Violation),
}

pub type Result<T> = core::result::Result<T, GameError>;
