use crate::*;
pub use rejection::*;
pub use shuffle::*;

mod rejection;
mod shuffle;

/// Strategy that decides where the mines of a new board go.
///
/// Implementations place exactly `config.mines()` mines with every cell equally likely to receive one. Mines are
/// placed one at a time through `Board::place_mine`, which keeps the adjacency counts up to date.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Board;
}
