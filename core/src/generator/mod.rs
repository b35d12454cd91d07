use crate::*;
pub use random::*;

mod random;

/// Produces the mine layout for a game whose first reveal targets `start`.
pub trait MineGenerator {
    fn generate(self, config: GameConfig, start: Coord2) -> Result<MineLayout>;
}
