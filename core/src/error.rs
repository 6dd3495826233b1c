use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be between 0 and 65535")]
    InvalidDimension,
    #[error("Mine count must be between 0 and the number of cells")]
    InvalidMineCount,
    #[error("Coordinates are outside of the board")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
