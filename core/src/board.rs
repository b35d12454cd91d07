use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Game result as seen by the host. `Won` and `Lost` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Mines materialize lazily: a board starts `Empty` and turns `Populated` on its first
/// reveal, with the generator keeping that reveal's neighborhood clear.
#[derive(Clone, Debug, PartialEq)]
enum Minefield {
    Empty(RandomMineGenerator),
    Populated,
}

/// Grid of cells plus everything needed to play one game on it.
///
/// Hosts drive it with [`Board::reveal`] and [`Board::toggle_flag`] and poll the query
/// methods afterwards. Out-of-range coordinates are rejected with
/// [`GameError::InvalidCoords`]; every other command that cannot apply, including any
/// command after the game ended, is a silent `NoChange`.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    grid: Array2<Cell>,
    minefield: Minefield,
    outcome: Outcome,
    /// Safe cells revealed so far.
    revealed_count: CellCount,
    flagged_count: CellCount,
    /// Flags sitting on mined cells.
    correct_flag_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Creates an empty board; mines are placed on the first reveal using `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_minefield(
            config,
            Minefield::Empty(RandomMineGenerator::new(seed)),
        ))
    }

    /// Creates a board with mines already in place, so even the first reveal may hit one.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let size = layout.size();
        let total_cells = layout.total_cells();
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyGrid);
        }
        if layout.mine_count() >= total_cells {
            return Err(GameError::TooManyMines {
                mines: layout.mine_count(),
                max: total_cells - 1,
            });
        }

        let config = GameConfig::new_unchecked(size, layout.mine_count());
        let mut board = Self::with_minefield(config, Minefield::Populated);
        board.populate(&layout);
        Ok(board)
    }

    fn with_minefield(config: GameConfig, minefield: Minefield) -> Self {
        Self {
            config,
            grid: Array2::default(config.size.to_nd_index()),
            minefield,
            outcome: Default::default(),
            revealed_count: 0,
            flagged_count: 0,
            correct_flag_count: 0,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn mines_total(&self) -> CellCount {
        self.config.mines
    }

    /// Flags still available to place; never negative and never above the mine count.
    pub fn flags_remaining(&self) -> CellCount {
        self.config.mines - self.flagged_count
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn is_populated(&self) -> bool {
        matches!(self.minefield, Minefield::Populated)
    }

    /// Number of safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// The mine whose reveal lost the game, if any.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.config.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.grid[coords.to_nd_index()])
    }

    /// What a renderer may show for the cell: mines stay hidden until revealed.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let cell = *self.cell(coords)?;
        Ok(self.view_of(coords, cell))
    }

    /// Views of all cells in row-major order, the per-frame query for renderers.
    pub fn iter_views(&self) -> impl Iterator<Item = (Coord2, CellView)> {
        self.iter_cells()
            .map(|(coords, &cell)| (coords, self.view_of(coords, cell)))
    }

    fn view_of(&self, coords: Coord2, cell: Cell) -> CellView {
        use CellView::*;

        if cell.is_revealed() {
            match cell.is_mined() {
                true if self.triggered_mine == Some(coords) => TriggeredMine,
                true => Mine,
                false => Revealed(cell.neighbor_mine_count()),
            }
        } else if cell.is_flagged() {
            if self.outcome == Outcome::Lost && !cell.is_mined() {
                Misflagged
            } else {
                Flagged
            }
        } else {
            Hidden
        }
    }

    /// All cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.grid
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.outcome.is_finished() || !self.grid[coords.to_nd_index()].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if let Minefield::Empty(generator) = &self.minefield {
            let layout = generator.clone().generate(self.config, coords)?;
            self.populate(&layout);
            self.minefield = Minefield::Populated;
        }

        if self.grid[coords.to_nd_index()].is_mined() {
            self.explode(coords);
            return Ok(RevealOutcome::HitMine);
        }

        self.flood_reveal(coords);

        Ok(if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.outcome.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.grid[coords.to_nd_index()];
        if cell.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        if cell.is_flagged() {
            cell.set_flagged(false);
            self.flagged_count -= 1;
            if cell.is_mined() {
                self.correct_flag_count -= 1;
            }
        } else if self.flagged_count < self.config.mines {
            cell.set_flagged(true);
            self.flagged_count += 1;
            if cell.is_mined() {
                self.correct_flag_count += 1;
            }
        } else {
            log::debug!("No flags left, ignoring flag at {:?}", coords);
            return Ok(MarkOutcome::NoChange);
        }

        Ok(if self.check_win() {
            MarkOutcome::Won
        } else {
            MarkOutcome::Changed
        })
    }

    /// Writes mines and hint counts into the grid, then recounts flags placed before the
    /// mines existed.
    fn populate(&mut self, layout: &MineLayout) {
        for ((row, col), cell) in self.grid.indexed_iter_mut() {
            let coords = (row as Coord, col as Coord);
            cell.populate(
                layout.contains_mine(coords),
                layout.adjacent_mine_count(coords),
            );
        }

        self.correct_flag_count = self
            .grid
            .iter()
            .filter(|cell| cell.is_flagged() && cell.is_mined())
            .count() as CellCount;
    }

    /// Reveals `start` and cascades through zero-hint cells. Flagged cells stop the
    /// cascade, and `is_revealed` doubles as the visited set.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.grid[visit_coords.to_nd_index()];
            if !cell.is_hidden() {
                continue;
            }

            // zero-hint cells never border a mine, so the cascade only reaches safe cells
            debug_assert!(!cell.is_mined());
            cell.reveal();
            self.revealed_count += 1;

            let adjacent_mines = cell.neighbor_mine_count();
            log::trace!(
                "Revealed cell at {:?}, mine count: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                let grid = &self.grid;
                to_visit.extend(
                    iter_neighbors(visit_coords, self.config.size)
                        .filter(|&pos| grid[pos.to_nd_index()].is_hidden()),
                );
            }
        }
    }

    /// Loses the game and uncovers every mine. Flags on mines are lifted and refunded so
    /// no cell ends up both flagged and revealed.
    fn explode(&mut self, coords: Coord2) {
        self.triggered_mine = Some(coords);

        for cell in self.grid.iter_mut().filter(|cell| cell.is_mined()) {
            if cell.is_flagged() {
                cell.set_flagged(false);
                self.flagged_count -= 1;
                self.correct_flag_count -= 1;
            }
            cell.reveal();
        }

        self.finish(Outcome::Lost);
    }

    /// Wins when every flag is placed and each sits on a mine, or when every safe cell is
    /// revealed. A win uncovers the remaining safe cells and leaves mines untouched.
    fn check_win(&mut self) -> bool {
        if !self.is_populated() || self.outcome.is_finished() {
            return false;
        }

        let mines = self.config.mines;
        let all_mines_flagged = self.flagged_count == mines && self.correct_flag_count == mines;
        let all_safe_revealed = self.revealed_count == self.config.safe_cells();
        if !all_mines_flagged && !all_safe_revealed {
            return false;
        }

        // every flag is on a mine here, so no safe cell is flagged
        for cell in self
            .grid
            .iter_mut()
            .filter(|cell| !cell.is_mined() && !cell.is_revealed())
        {
            cell.reveal();
            self.revealed_count += 1;
        }

        self.finish(Outcome::Won);
        true
    }

    fn finish(&mut self, outcome: Outcome) {
        log::debug!(
            "Game ended: {:?}, revealed {} of {} safe cells",
            outcome,
            self.revealed_count,
            self.config.safe_cells()
        );
        self.outcome = outcome;
    }
}
