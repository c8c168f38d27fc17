//! Line-drawing move for dots-and-boxes.

use super::{Edge, LineColor, Orientation};
use crate::games::GridPos;
use crate::session::WireMove;
use serde::{Deserialize, Serialize};

/// Event tag for dots-and-boxes moves.
pub const MOVE_TAG: u8 = 42;

/// A line drawn by one side.
///
/// Wire shape: `x: i32`, `y: i32`, `orientation: u8`, `color: u8`,
/// little-endian, 10 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Cell whose top or left edge is drawn.
    pub pos: GridPos,
    /// Which edge of the cell.
    pub orientation: Orientation,
    /// Colour of the drawing side.
    pub color: LineColor,
}

impl Move {
    /// Creates a new move.
    pub fn new(edge: Edge, color: LineColor) -> Self {
        Self {
            pos: edge.pos,
            orientation: edge.orientation,
            color,
        }
    }

    /// The edge this move draws.
    pub fn edge(&self) -> Edge {
        Edge::new(self.pos, self.orientation)
    }
}

impl WireMove for Move {
    const TAG: u8 = MOVE_TAG;
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {}", self.color, self.edge())
    }
}
