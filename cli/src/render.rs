use std::io::{self, Write};

use sweeper_core::{Board, CellView, Outcome};

fn glyph(view: CellView) -> char {
    use CellView::*;
    match view {
        Hidden => '#',
        Flagged => 'F',
        Revealed(0) => '.',
        Revealed(count) => char::from(b'0' + count),
        Mine => '*',
        TriggeredMine => 'X',
        Misflagged => 'x',
    }
}

/// Prints counters, the grid with row/column indices, and the game status.
pub fn draw(out: &mut impl Write, board: &Board) -> io::Result<()> {
    writeln!(
        out,
        "Mines: {}  Flags: {}",
        board.mines_total(),
        board.flags_remaining()
    )?;

    write!(out, "    ")?;
    for col in 0..board.cols() {
        write!(out, " {}", col % 10)?;
    }
    writeln!(out)?;

    for (coords, view) in board.iter_views() {
        if coords.1 == 0 {
            write!(out, "{:>4}", coords.0)?;
        }
        write!(out, " {}", glyph(view))?;
        if coords.1 + 1 == board.cols() {
            writeln!(out)?;
        }
    }

    match board.outcome() {
        Outcome::InProgress => Ok(()),
        Outcome::Won => writeln!(out, "YOU WIN, type n to play again"),
        Outcome::Lost => writeln!(out, "GAME OVER, type n to play again"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::MineLayout;

    fn render(board: &Board) -> String {
        let mut out = Vec::new();
        draw(&mut out, board).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn board(size: (u8, u8), mines: &[(u8, u8)]) -> Board {
        Board::from_layout(MineLayout::from_mine_coords(size, mines).unwrap()).unwrap()
    }

    #[test]
    fn draws_hidden_board() {
        let board = board((2, 3), &[(1, 2)]);
        assert_eq!(
            render(&board),
            "Mines: 1  Flags: 1\n     0 1 2\n   0 # # #\n   1 # # #\n"
        );
    }

    #[test]
    fn draws_hints_and_flags() {
        let mut board = board((2, 4), &[(0, 2), (1, 2)]);
        board.reveal((0, 0)).unwrap();
        board.toggle_flag((1, 2)).unwrap();
        assert_eq!(
            render(&board),
            "Mines: 2  Flags: 1\n     0 1 2 3\n   0 . 2 # #\n   1 . 2 F #\n"
        );
    }

    #[test]
    fn draws_lost_game() {
        let mut board = board((1, 3), &[(0, 0), (0, 2)]);
        board.reveal((0, 2)).unwrap();
        assert_eq!(
            render(&board),
            "Mines: 2  Flags: 2\n     0 1 2\n   0 * # X\nGAME OVER, type n to play again\n"
        );
    }

    #[test]
    fn draws_won_game() {
        let mut board = board((1, 2), &[(0, 1)]);
        board.reveal((0, 0)).unwrap();
        assert_eq!(
            render(&board),
            "Mines: 1  Flags: 1\n     0 1\n   0 1 #\nYOU WIN, type n to play again\n"
        );
    }
}
