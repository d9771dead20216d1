use super::*;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Uniform placement: every draw picks any cell of the board and already mined cells are redrawn.
#[derive(Debug)]
pub struct RandomMinefieldGenerator {
    rng: StdRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> MineLayout {
        let total_cells = config.total_cells();
        let mut mines = config.mines;
        if mines > total_cells {
            log::warn!(
                "Minefield already full, requested {} but only fits {}",
                mines,
                total_cells
            );
            mines = total_cells;
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        let columns = CellCount::from(config.columns);
        let mut mines_placed = 0;
        let mut draws = 0u32;
        while mines_placed < mines {
            let place: CellCount = self.rng.random_range(0..total_cells);
            let coords = ((place / columns) as Coord, (place % columns) as Coord);
            draws += 1;
            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }
        log::debug!(
            "Placed {} mines on {}x{} in {} draws",
            mines_placed,
            config.rows,
            config.columns,
            draws
        );

        MineLayout::from_mine_mask(mine_mask)
    }
}
