use serde::{Deserialize, Serialize};

use crate::Coord2;

/// Immutable content of a board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    /// Number of mines in the surrounding 3x3 area, `0..=8`.
    Safe(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Safe(count) => Some(count),
        }
    }
}

/// `-1` for a mine, otherwise the adjacent mine count.
impl From<CellValue> for i8 {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Mine => -1,
            // at most 8
            CellValue::Safe(count) => count as i8,
        }
    }
}

/// Player-visible state of a cell, owned by the session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// What the front end should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayValue {
    Hidden,
    Flag,
    Open(u8),
    Mine,
    /// The mine that ended the game.
    Exploded,
    /// Flag left on a mine once the game is over.
    CorrectFlag,
    /// Flag left on a safe cell once the game is over.
    IncorrectFlag,
}

impl DisplayValue {
    /// Whether the cell is still drawn as a closed button
    pub const fn is_closed(self) -> bool {
        use DisplayValue::*;
        match self {
            Hidden => true,
            Flag => true,
            Open(_) => false,
            Mine => false,
            Exploded => false,
            CorrectFlag => true,
            IncorrectFlag => true,
        }
    }
}

/// A cell whose drawn state changed as the result of a player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord2,
    pub visibility: Visibility,
    pub display: DisplayValue,
}
