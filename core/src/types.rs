/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts, flag budgets and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, zero-based.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` falls inside a grid of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta((row, col): Coord2, (d_row, d_col): (i8, i8), size: Coord2) -> Option<Coord2> {
    let next = (row.checked_add_signed(d_row)?, col.checked_add_signed(d_col)?);
    in_bounds(next, size).then_some(next)
}

/// The up-to-8 grid-adjacent cells of `center` in row-major order, clamped to `size`.
pub fn iter_neighbors(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS
        .into_iter()
        .filter_map(move |delta| apply_delta(center, delta, size))
}

/// The cell itself followed by its in-bounds neighbors, i.e. every cell within
/// Chebyshev distance 1 of `center`.
pub fn iter_block(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    core::iter::once(center).chain(iter_neighbors(center, size))
}
