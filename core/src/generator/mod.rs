use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts for new games.
///
/// Layouts should match the requested size and mine count. The grid adopts whatever layout it is handed
/// as long as it is within the playable limits, and rejects it with
/// [`GameError::InvalidConfiguration`] otherwise.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> MineLayout;
}

impl<F> MinefieldGenerator for F
where
    F: FnMut(GameConfig) -> MineLayout,
{
    fn generate(&mut self, config: GameConfig) -> MineLayout {
        self(config)
    }
}
