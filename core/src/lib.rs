#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Grid shape and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a config whose mines are guaranteed to fit around any first reveal.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyGrid);
        }

        let max = Self::max_mines(self.size);
        if self.mines > max {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                max,
            });
        }

        Ok(())
    }

    /// Largest mine count that still leaves room for the biggest possible safety zone,
    /// a full 3x3 block clamped to the grid.
    pub const fn max_mines((rows, cols): Coord2) -> CellCount {
        let zone_rows = if rows < 3 { rows } else { 3 };
        let zone_cols = if cols < 3 { cols } else { 3 };
        mult(rows, cols) - mult(zone_rows, zone_cols)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl Default for GameConfig {
    /// 15x15 grid with 30 mines.
    fn default() -> Self {
        Self::new_unchecked((15, 15), 30)
    }
}

/// Fixed mine positions for a grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Callers guarantee the mask was shaped from a `Coord2` size.
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyGrid);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        iter_neighbors(coords, self.size())
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

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    /// The flag completed a correct flagging of every mine.
    Won,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Won => true,
        }
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_grid() {
        assert_eq!(GameConfig::new((0, 5), 0), Err(GameError::EmptyGrid));
        assert_eq!(GameConfig::new((5, 0), 0), Err(GameError::EmptyGrid));
    }

    #[test]
    fn config_leaves_room_for_safety_zone() {
        assert_eq!(GameConfig::max_mines((9, 9)), 72);
        assert_eq!(GameConfig::max_mines((3, 3)), 0);
        assert_eq!(GameConfig::max_mines((1, 5)), 2);
        assert_eq!(GameConfig::max_mines((1, 1)), 0);

        assert!(GameConfig::new((9, 9), 72).is_ok());
        assert_eq!(
            GameConfig::new((9, 9), 73),
            Err(GameError::TooManyMines { mines: 73, max: 72 })
        );
    }

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.total_cells(), 225);
        assert_eq!(config.safe_cells(), 195);
    }

    #[test]
    fn layout_counts_border_neighbors_in_bounds_only() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (0, 2), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 3);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
        assert!(layout.contains_mine((2, 2)));
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
