use super::*;

/// Picks a uniformly random cell, retrying whenever it already holds a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RejectionSampler {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let mut board = Board::empty(config.size());

        // optimize for full boards
        if config.mines() >= config.total_cells() {
            for coords in iter_coords(config.size()) {
                board.place_mine(coords);
            }
            log::debug!("Filled {:?} board with mines", config.size());
            return board;
        }

        let (rows, columns) = config.size();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut retries: u64 = 0;
        while board.mine_count() < config.mines() {
            let coords = (rng.random_range(0..rows), rng.random_range(0..columns));
            if !board.place_mine(coords) {
                retries += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {:?} board with seed {} after {} retries",
            config.mines(),
            config.size(),
            self.seed,
            retries
        );
        board
    }
}
