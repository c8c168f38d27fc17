//! Core domain types for tic-tac-toe.

use crate::games::{Grid, GridPos, Side};
use crate::{MoveError, WireError};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Symbol placed by a player.
///
/// Travels on the wire as one byte: 1 for the first mover, 2 for the second.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Mark {
    /// Circle (goes first, played by the host).
    Circle,
    /// Cross (goes second).
    Cross,
}

impl Mark {
    /// Single-character symbol for text rendering.
    pub fn symbol(self) -> char {
        match self {
            Mark::Circle => 'O',
            Mark::Cross => 'X',
        }
    }
}

impl Side for Mark {
    const FIRST_MOVER: Self = Mark::Circle;

    fn opponent(self) -> Self {
        match self {
            Mark::Circle => Mark::Cross,
            Mark::Cross => Mark::Circle,
        }
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Circle => 1,
            Mark::Cross => 2,
        }
    }
}

impl TryFrom<u8> for Mark {
    type Error = WireError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            1 => Ok(Mark::Circle),
            2 => Ok(Mark::Cross),
            other => Err(WireError::InvalidDiscriminant(other)),
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// Square N x N board. Squares only ever go from empty to occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: Grid<Square>,
}

impl Board {
    /// Creates an empty `size` x `size` board.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            squares: Grid::new(size, size, Square::Empty),
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.squares.width()
    }

    /// Places `mark` on an empty in-bounds square.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: GridPos, mark: Mark) -> Result<(), MoveError> {
        match self.squares.get(pos) {
            None => Err(MoveError::OutOfBounds(pos)),
            Some(Square::Occupied(_)) => Err(MoveError::AlreadyOccupied(pos)),
            Some(Square::Empty) => {
                self.squares.set(pos, Square::Occupied(mark));
                Ok(())
            }
        }
    }

    /// Reads the square at `pos`; `None` only when out of bounds.
    pub fn read(&self, pos: GridPos) -> Option<Square> {
        self.squares.get(pos)
    }

    /// True if `pos` is on the board.
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        self.squares.in_bounds(pos)
    }

    /// True if `pos` is on the board and empty.
    pub fn is_empty(&self, pos: GridPos) -> bool {
        self.read(pos) == Some(Square::Empty)
    }

    /// True if no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.cells().all(|s| s != Square::Empty)
    }

    /// Number of occupied squares.
    pub fn filled(&self) -> usize {
        self.squares.cells().filter(|s| *s != Square::Empty).count()
    }

    /// Coordinates of every empty square, row-major.
    pub fn empty_positions(&self) -> Vec<GridPos> {
        self.squares
            .positions()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let size = self.size() as i32;
        let mut rows = Vec::with_capacity(self.size());
        for y in 0..size {
            let row: Vec<String> = (0..size)
                .map(|x| match self.read(GridPos::new(x, y)) {
                    Some(Square::Occupied(mark)) => mark.symbol().to_string(),
                    _ => ".".to_string(),
                })
                .collect();
            rows.push(row.join("|"));
        }
        let divider = vec!["-"; self.size()].join("+");
        rows.join(&format!("\n{}\n", divider))
    }
}
