use alloc::vec::Vec;
use ndarray::Array2;
use rand::{SeedableRng, rngs::SmallRng, seq::IteratorRandom};
use serde::{Deserialize, Serialize};

use super::*;

/// Purely random placement that keeps the start cell and its neighbors free of mines, so
/// the first reveal is always safe and always lands on a zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig, start: Coord2) -> Result<MineLayout> {
        config.validate()?;
        if !in_bounds(start, config.size) {
            return Err(GameError::InvalidCoords);
        }

        let (rows, cols) = config.size;
        let safety_zone: Vec<Coord2> = iter_block(start, config.size).collect();
        let available = config.total_cells() - safety_zone.len() as CellCount;
        if config.mines > available {
            return Err(GameError::TooManyMines {
                mines: config.mines,
                max: available,
            });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mine_coords = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|coords| !safety_zone.contains(coords))
            .choose_multiple(&mut rng, config.mines.into());

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for coords in mine_coords {
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "Placed {} mines around start {:?} with seed {}",
            layout.mine_count(),
            start,
            self.seed
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Coord2, mines: CellCount) -> GameConfig {
        GameConfig::new(size, mines).unwrap()
    }

    #[test]
    fn same_seed_same_layout() {
        let a = RandomMineGenerator::new(42).generate(config((16, 16), 40), (3, 7));
        let b = RandomMineGenerator::new(42).generate(config((16, 16), 40), (3, 7));
        assert_eq!(a, b);
    }

    #[test]
    fn places_exact_count_outside_safety_zone() {
        for seed in 0..32 {
            for start in [(0, 0), (4, 4), (8, 0), (8, 8), (0, 5)] {
                let layout = RandomMineGenerator::new(seed)
                    .generate(config((9, 9), 72), start)
                    .unwrap();

                assert_eq!(layout.mine_count(), 72);
                for coords in iter_block(start, (9, 9)) {
                    assert!(!layout.contains_mine(coords), "mine in zone at {coords:?}");
                }
                assert_eq!(layout.adjacent_mine_count(start), 0);
            }
        }
    }

    #[test]
    fn corner_start_leaves_more_room() {
        let layout = RandomMineGenerator::new(1)
            .generate(config((4, 4), 7), (0, 0))
            .unwrap();
        assert_eq!(layout.mine_count(), 7);
    }

    #[test]
    fn rejects_start_outside_grid() {
        assert_eq!(
            RandomMineGenerator::new(0).generate(config((4, 4), 2), (4, 0)),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn rejects_unchecked_config_that_overflows_zone() {
        let config = GameConfig::new_unchecked((3, 3), 1);
        assert_eq!(
            RandomMineGenerator::new(0).generate(config, (1, 1)),
            Err(GameError::TooManyMines { mines: 1, max: 0 })
        );
    }
}
