/// Single coordinate axis, used for row/column indices and board height/width.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, column)`.
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

/// The 3x3 area around `center` without `center` itself, clipped at the edges of a board of `bounds`, in
/// row-major order.
///
/// `center` must lie inside `bounds`.
pub fn neighbors((row, column): Coord2, (rows, columns): Coord2) -> impl Iterator<Item = Coord2> {
    let row_span = row.saturating_sub(1)..=row.saturating_add(1).min(rows - 1);
    let column_span = column.saturating_sub(1)..=column.saturating_add(1).min(columns - 1);

    row_span
        .flat_map(move |r| column_span.clone().map(move |c| (r, c)))
        .filter(move |&pos| pos != (row, column))
}
