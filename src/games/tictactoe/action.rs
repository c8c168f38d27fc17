//! First-class move type for tic-tac-toe.
//!
//! A move is a domain event: constructed once, validated, transmitted
//! verbatim, and replayed from history by the invariants.

use super::Mark;
use crate::games::GridPos;
use crate::session::WireMove;
use serde::{Deserialize, Serialize};

/// Event tag for tic-tac-toe moves.
pub const MOVE_TAG: u8 = 67;

/// A mark placed at a position.
///
/// Wire shape: `x: i32`, `y: i32`, `mark: u8`, little-endian, 9 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Target square.
    pub pos: GridPos,
    /// Mark being placed, which identifies the actor.
    pub mark: Mark,
}

impl Move {
    /// Creates a new move.
    pub fn new(pos: impl Into<GridPos>, mark: Mark) -> Self {
        Self {
            pos: pos.into(),
            mark,
        }
    }
}

impl WireMove for Move {
    const TAG: u8 = MOVE_TAG;
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {}", self.mark, self.pos)
    }
}
