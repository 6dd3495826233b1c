use super::*;

/// Fisher–Yates shuffle over every position, the first `mines` positions become mines.
///
/// Never retries, so the running time does not depend on how crowded the board is.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleSampler {
    seed: u64,
}

impl ShuffleSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for ShuffleSampler {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let mut board = Board::empty(config.size());
        let mut positions: Vec<Coord2> = iter_coords(config.size()).collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        positions.shuffle(&mut rng);

        for &coords in positions.iter().take(config.mines() as usize) {
            board.place_mine(coords);
        }

        log::debug!(
            "Shuffled {} mines onto {:?} board with seed {}",
            config.mines(),
            config.size(),
            self.seed
        );
        board
    }
}
