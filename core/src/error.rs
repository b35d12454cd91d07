use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid must have at least one row and one column")]
    EmptyGrid,
    #[error("Too many mines: {mines} requested but at most {max} fit")]
    TooManyMines { mines: CellCount, max: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
