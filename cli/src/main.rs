use anyhow::{Context, Result};
use clap::Parser;
use minegrid_core::{CellCount, Coord, GameConfig, Grid, RandomMinefieldGenerator, Snapshot};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::io::Write;

use render::TextBoard;

mod render;

/// Plays Minesweeper by opening random cells until the game is over.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board height, 9 to 24
    #[arg(long, requires_all = ["columns", "mines"])]
    rows: Option<Coord>,

    /// Board width, 9 to 30
    #[arg(long, requires_all = ["rows", "mines"])]
    columns: Option<Coord>,

    /// Number of mines, 10 to 93% of the cells
    #[arg(long, requires_all = ["rows", "columns"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the final board as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        match (self.rows, self.columns, self.mines) {
            (Some(rows), Some(columns), Some(mines)) => {
                GameConfig::new(rows, columns, mines).context("Could not configure the board")
            }
            _ => Ok(GameConfig::default()),
        }
    }
}

/// The requested seed, or a fresh one from the thread-local generator.
fn pick_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

/// Opens random cells until the game ends, drawing the board before the first move and after every
/// move. Returns the number of moves.
fn play<G, W: Write>(grid: &mut Grid<G>, picker: &mut StdRng, out: &mut W) -> Result<u32> {
    writeln!(out, "{}", TextBoard(&Snapshot::from_grid(grid)))?;

    let mut moves = 0u32;
    while grid.state().is_active() {
        let coords = (
            picker.random_range(0..grid.rows()),
            picker.random_range(0..grid.columns()),
        );
        let outcome = grid
            .open(coords)
            .with_context(|| format!("Could not open {:?}", coords))?;
        moves += 1;

        let modified = grid.drain_modified_cells();
        log::debug!(
            "Opened {:?}: {:?}, {} cells changed",
            coords,
            outcome,
            modified.len()
        );
        writeln!(out, "{}", TextBoard(&Snapshot::from_grid(grid)))?;
    }

    Ok(moves)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = pick_seed(args.seed);
    log::debug!("seed: {}", seed);

    let config = args.game_config()?;
    let mut grid = Grid::with_config(RandomMinefieldGenerator::new(seed), config)
        .context("Could not start the game")?;
    let mut picker = StdRng::seed_from_u64(seed.rotate_left(32));
    let moves = play(&mut grid, &mut picker, &mut std::io::stdout().lock())?;

    let snapshot = Snapshot::from_grid(&grid);
    log::info!(
        "Game ended with {:?} after {} moves, {} of {} safe cells opened",
        snapshot.state,
        moves,
        grid.opened_safe_count(),
        grid.safe_cell_count()
    );
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("Could not serialize the board")?
        );
    }

    Ok(())
}
