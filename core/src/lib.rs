//! Minesweeper engine.
//!
//! A [`Board`] holds the mine layout and adjacency counts and never changes once generated. A [`Session`] wraps a
//! board, tracks what the player has revealed or flagged, and reports which cells changed after every action so a
//! front end can redraw incrementally.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod generator;
mod session;
mod types;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    #[default]
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    #[default]
    NoChange,
    Continue,
    Won,
    Lost,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Continue => true,
            Won => true,
            Lost => true,
        }
    }
}

/// Result of a player action: its outcome and every cell that must be redrawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update<O> {
    pub outcome: O,
    pub changed: Vec<CellChange>,
}

impl<O: Default> Update<O> {
    pub fn unchanged() -> Self {
        Self {
            outcome: O::default(),
            changed: Vec::new(),
        }
    }
}

pub type MarkUpdate = Update<MarkOutcome>;

pub type RevealUpdate = Update<RevealOutcome>;
