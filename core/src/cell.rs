use serde::{Deserialize, Serialize};

/// One grid square as stored by the board engine.
///
/// The engine is the only writer: mine state is fixed at placement, the hint count is
/// computed once right after, and the revealed/flagged pair is kept mutually exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mined: bool,
    revealed: bool,
    flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mined(self) -> bool {
        self.mined
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Count of mined cells among the up-to-8 neighbors, always in `0..=8`.
    pub const fn neighbor_mine_count(self) -> u8 {
        self.adjacent_mines
    }

    /// Neither revealed nor flagged, so a reveal would act on it.
    pub const fn is_hidden(self) -> bool {
        !self.revealed && !self.flagged
    }

    pub(crate) fn populate(&mut self, mined: bool, adjacent_mines: u8) {
        self.mined = mined;
        self.adjacent_mines = adjacent_mines;
    }

    pub(crate) fn reveal(&mut self) {
        debug_assert!(!self.flagged, "flagged cells are never revealed");
        self.revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        debug_assert!(!self.revealed, "revealed cells are never flagged");
        self.flagged = flagged;
    }
}

/// Player-visible state of a cell, safe to hand to a renderer: hidden mines never leak.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine uncovered when the game was lost.
    Mine,
    /// The mine whose reveal lost the game.
    TriggeredMine,
    /// Flag left on a safe cell once the game was lost.
    Misflagged,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_hidden_and_safe() {
        let cell = Cell::default();
        assert!(cell.is_hidden());
        assert!(!cell.is_mined());
        assert_eq!(cell.neighbor_mine_count(), 0);
    }

    #[test]
    fn flagged_cell_is_not_hidden() {
        let mut cell = Cell::default();
        cell.set_flagged(true);
        assert!(!cell.is_hidden());
        assert!(!cell.is_revealed());
    }

    #[test]
    fn view_serializes_as_externally_tagged_enum() {
        assert_eq!(
            serde_json::to_string(&CellView::Revealed(3)).unwrap(),
            r#"{"Revealed":3}"#
        );
        assert_eq!(serde_json::to_string(&CellView::Flagged).unwrap(), r#""Flagged""#);
    }
}
