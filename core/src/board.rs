use core::ops::Index;
use ndarray::Array2;

use crate::*;

/// Mine layout with the adjacency count of every safe cell.
///
/// A board is only written while it is being generated; afterwards every accessor is read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    values: Array2<CellValue>,
    mine_count: CellCount,
}

impl Board {
    pub(crate) fn empty(size: Coord2) -> Self {
        Self {
            values: Array2::from_elem(size.to_nd_index(), CellValue::Safe(0)),
            mine_count: 0,
        }
    }

    /// Marks `coords` as a mine and bumps the count of every non-mine neighbor.
    ///
    /// Returns `false` without touching the board when the cell already holds a mine.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        if self.values[coords.to_nd_index()].is_mine() {
            return false;
        }

        self.values[coords.to_nd_index()] = CellValue::Mine;
        for pos in neighbors(coords, self.size()) {
            if let CellValue::Safe(count) = &mut self.values[pos.to_nd_index()] {
                *count += 1;
            }
        }
        self.mine_count += 1;
        true
    }

    /// Generates a board with a freshly seeded [`RejectionSampler`].
    pub fn random(rows: i64, columns: i64, mines: i64) -> Result<Self> {
        let config = GameConfig::try_new(rows, columns, mines)?;
        Ok(Self::generate(config, RejectionSampler::new(rand::random())))
    }

    pub fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Self {
        let board = generator.generate(config);

        // double check mine count
        if board.mine_count != config.mines() {
            log::warn!(
                "Generated board count mismatch, actual: {}, requested: {}",
                board.mine_count,
                config.mines()
            );
        }
        board
    }

    /// Builds a board with mines at exactly the given coordinates; duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::empty(size);

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.place_mine(coords);
        }

        Ok(board)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.values.dim();
        (rows as Coord, columns as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows(), self.columns())
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellValue> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// Copy of the whole value grid, indexed by `[row, column]`.
    pub fn cells(&self) -> Array2<CellValue> {
        self.values.clone()
    }

    /// Row-major iteration over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, CellValue)> + '_ {
        self.values
            .indexed_iter()
            .map(|((row, column), &value)| ((row as Coord, column as Coord), value))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbors(coords, self.size())
    }
}

impl Index<Coord2> for Board {
    type Output = CellValue;

    fn index(&self, (row, column): Coord2) -> &Self::Output {
        &self.values[(row as usize, column as usize)]
    }
}

/// Row-major iteration over every coordinate of a board of `size`.
pub fn iter_coords((rows, columns): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
}
