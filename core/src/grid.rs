use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Active -> Failure
/// - Active -> Success
///
/// Starting or restarting a game always returns to `Active`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Active,
    /// A mine was revealed
    Failure,
    /// Every safe cell was revealed
    Success,
}

impl GameState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Failure | Self::Success)
    }
}

/// A mine field and its player-visible state.
///
/// The grid owns every cell and is the only place cells are mutated; handles returned by
/// [`Grid::cell_at`] and [`Grid::cell_mut`] borrow it.
#[derive(Clone, Debug)]
pub struct Grid<G = RandomMinefieldGenerator> {
    config: GameConfig,
    cells: Array2<Cell>,
    state: GameState,
    opened_safe_count: CellCount,
    modified: HashSet<Coord2>,
    generator: G,
}

impl<G: MinefieldGenerator> Grid<G> {
    /// Starts a game with the default 9x9 board and 10 mines.
    pub fn new(generator: G) -> Result<Self> {
        Self::start(generator, GameConfig::default())
    }

    pub fn with_config(generator: G, config: GameConfig) -> Result<Self> {
        Self::start(generator, config.validate()?)
    }

    /// Starts a game on a known layout. Later calls to [`Grid::new_game`] go back to `generator`.
    pub fn with_layout(generator: G, layout: &MineLayout) -> Result<Self> {
        let config = layout.game_config().validate()?;
        let mut grid = Self::empty(generator, config);
        grid.place_mines(layout);
        Ok(grid)
    }

    fn start(mut generator: G, config: GameConfig) -> Result<Self> {
        let layout = generator.generate(config);
        Self::with_layout(generator, &layout)
    }

    fn empty(generator: G, config: GameConfig) -> Self {
        Self {
            config,
            cells: Array2::default(config.size().to_nd_index()),
            state: GameState::Active,
            opened_safe_count: 0,
            modified: HashSet::new(),
            generator,
        }
    }

    /// Validates and switches to a new configuration, then starts a fresh game with it.
    ///
    /// Nothing changes when the configuration is rejected.
    pub fn new_game_with(&mut self, rows: Coord, columns: Coord, mines: CellCount) -> Result<()> {
        let config = GameConfig::new(rows, columns, mines)?;
        self.regenerate(config)
    }

    /// Starts a fresh game with the last accepted configuration.
    pub fn new_game(&mut self) -> Result<()> {
        self.regenerate(self.config)
    }

    /// Nothing changes when the generator hands back a layout outside the playable limits.
    fn regenerate(&mut self, config: GameConfig) -> Result<()> {
        let layout = self.generator.generate(config);
        let layout_config = layout.game_config().validate()?;
        if layout_config != config {
            log::warn!(
                "Generator returned {:?} when asked for {:?}",
                layout_config,
                config
            );
        }

        self.reset();
        self.config = layout_config;
        self.cells = Array2::default(self.config.size().to_nd_index());
        self.place_mines(&layout);
        log::debug!(
            "New game {}x{} with {} mines",
            self.config.rows,
            self.config.columns,
            self.config.mines
        );
        Ok(())
    }
}

impl<G> Grid<G> {
    /// Replays the current mine field from the start.
    pub fn restart_game(&mut self) {
        self.reset();
        for ((row, column), cell) in self.cells.indexed_iter_mut() {
            if cell.close() {
                self.modified.insert((row as Coord, column as Coord));
            }
        }
        log::debug!("Restarted game, {} cells to redraw", self.modified.len());
    }

    fn reset(&mut self) {
        self.state = GameState::Active;
        self.opened_safe_count = 0;
        self.modified.clear();
    }

    fn place_mines(&mut self, layout: &MineLayout) {
        for coords in layout.iter_mines() {
            self.cells[coords.to_nd_index()].plant_mine();
            for pos in self.cells.iter_neighbors(coords) {
                self.cells[pos.to_nd_index()].add_adjacent_mine();
            }
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn columns(&self) -> Coord {
        self.config.columns
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn opened_safe_count(&self) -> CellCount {
        self.opened_safe_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.safe_cells()
    }

    /// Number of hidden cells labeled as a mine.
    pub fn flag_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_hidden() && cell.label() == CellLabel::Flag)
            .count() as CellCount
    }

    /// How many mines have not been flagged yet, negative when there are more flags than mines.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flag_count() as isize)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, columns) = self.size();
        let (row, column) = coords;
        if row < rows && column < columns {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange { row, column })
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellRef<'_>> {
        let coords = self.validate_coords(coords)?;
        Ok(CellRef {
            coords,
            cell: &self.cells[coords.to_nd_index()],
        })
    }

    pub fn cell_mut(&mut self, coords: Coord2) -> Result<CellMut<'_, G>> {
        let coords = self.validate_coords(coords)?;
        Ok(CellMut { grid: self, coords })
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Positions of cells changed since the previous call, in no particular order.
    pub fn drain_modified_cells(&mut self) -> Vec<Coord2> {
        self.modified.drain().collect()
    }

    pub fn set_label(&mut self, coords: Coord2, label: CellLabel) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.check_active()?;

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return Err(Violation::CellRevealed.into());
        }
        if cell.set_label(label) {
            log::trace!("Label at {:?} set to {:?}", coords, label);
            self.modified.insert(coords);
        }
        Ok(())
    }

    /// Opens a cell.
    ///
    /// - A labeled hidden cell is left alone.
    /// - A hidden cell is revealed, and when it has no adjacent mines the blank region around it is
    ///   revealed as well.
    /// - A revealed cell reveals its hidden neighbors when exactly as many of them are flagged as it
    ///   has adjacent mines, whether or not the flags are right.
    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_active()?;

        let cell = self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            let flagged = self.count_flagged_neighbors(coords);
            if flagged == cell.adjacent_mines() {
                log::debug!("Chord at {:?} with {} flagged neighbors", coords, flagged);
                Ok(self.open_neighbors(coords))
            } else {
                Ok(OpenOutcome::NoChange)
            }
        } else if cell.label().is_marked() {
            Ok(OpenOutcome::NoChange)
        } else {
            let outcome = self.reveal_hidden(coords);
            if outcome == OpenOutcome::Revealed && cell.adjacent_mines() == 0 {
                Ok(outcome | self.open_neighbors(coords))
            } else {
                Ok(outcome)
            }
        }
    }

    /// Flood fill starting from the neighbors of `origin`, stopping early when the game ends.
    fn open_neighbors(&mut self, origin: Coord2) -> OpenOutcome {
        let mut outcome = OpenOutcome::NoChange;
        let mut frontier = vec![origin];

        while let Some(current) = frontier.pop() {
            for pos in self.cells.iter_neighbors(current) {
                let cell = self.cells[pos.to_nd_index()];
                if cell.is_revealed() || cell.label().is_marked() {
                    continue;
                }

                outcome = outcome | self.reveal_hidden(pos);
                if outcome.is_final() {
                    log::trace!("Flood fill from {:?} stopped at {:?}", origin, pos);
                    return outcome;
                }

                if cell.adjacent_mines() == 0 {
                    frontier.push(pos);
                }
            }
        }

        outcome
    }

    /// Reveals a single hidden cell and settles the game state.
    fn reveal_hidden(&mut self, coords: Coord2) -> OpenOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.reveal();
        let is_mine = cell.is_mine();
        let adjacent_mines = cell.adjacent_mines();
        self.modified.insert(coords);

        if is_mine {
            log::debug!("Mine hit at {:?}", coords);
            self.reveal_mines();
            self.state = GameState::Failure;
            return OpenOutcome::HitMine;
        }

        self.opened_safe_count += 1;
        log::trace!("Revealed {:?}, adjacent mines: {}", coords, adjacent_mines);
        debug_assert!(self.opened_safe_count <= self.safe_cell_count());

        if self.opened_safe_count == self.safe_cell_count() {
            log::debug!("All {} safe cells revealed", self.opened_safe_count);
            self.state = GameState::Success;
            OpenOutcome::Won
        } else {
            OpenOutcome::Revealed
        }
    }

    fn reveal_mines(&mut self) {
        for ((row, column), cell) in self.cells.indexed_iter_mut() {
            if cell.is_mine() && cell.reveal() {
                self.modified.insert((row as Coord, column as Coord));
            }
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .map(|pos| self.cells[pos.to_nd_index()])
            .filter(|cell| cell.is_hidden() && cell.label() == CellLabel::Flag)
            .count() as u8
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(Violation::GameFinished.into())
        }
    }
}

/// Read-only view of one cell.
#[derive(Copy, Clone, Debug)]
pub struct CellRef<'a> {
    coords: Coord2,
    cell: &'a Cell,
}

impl CellRef<'_> {
    pub fn coords(&self) -> Coord2 {
        self.coords
    }

    pub fn is_revealed(&self) -> bool {
        self.cell.is_revealed()
    }

    pub fn label(&self) -> CellLabel {
        self.cell.label()
    }

    /// Only answered once the cell is revealed.
    pub fn is_mine(&self) -> Result<bool> {
        if self.cell.is_revealed() {
            Ok(self.cell.is_mine())
        } else {
            Err(Violation::CellHidden.into())
        }
    }

    /// Only answered for a revealed cell that is not a mine.
    pub fn adjacent_mine_count(&self) -> Result<u8> {
        if self.is_mine()? {
            Err(Violation::CellIsMine.into())
        } else {
            Ok(self.cell.adjacent_mines())
        }
    }
}

/// Handle to one cell that can also act on it through the grid.
#[derive(Debug)]
pub struct CellMut<'a, G> {
    grid: &'a mut Grid<G>,
    coords: Coord2,
}

impl<G> CellMut<'_, G> {
    pub fn view(&self) -> CellRef<'_> {
        CellRef {
            coords: self.coords,
            cell: &self.grid.cells[self.coords.to_nd_index()],
        }
    }

    pub fn coords(&self) -> Coord2 {
        self.coords
    }

    pub fn is_revealed(&self) -> bool {
        self.view().is_revealed()
    }

    pub fn label(&self) -> CellLabel {
        self.view().label()
    }

    pub fn is_mine(&self) -> Result<bool> {
        self.view().is_mine()
    }

    pub fn adjacent_mine_count(&self) -> Result<u8> {
        self.view().adjacent_mine_count()
    }

    pub fn set_label(&mut self, label: CellLabel) -> Result<()> {
        self.grid.set_label(self.coords, label)
    }

    pub fn open(&mut self) -> Result<OpenOutcome> {
        self.grid.open(self.coords)
    }
}
