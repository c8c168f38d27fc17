//! Core domain types for dots-and-boxes.

use crate::games::{Grid, GridPos, Side};
use crate::{MoveError, WireError};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Colour of a player's lines and boxes.
///
/// Travels on the wire as one byte: 1 for red, 2 for blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[serde(into = "u8", try_from = "u8")]
pub enum LineColor {
    /// Red (goes first, played by the host).
    Red,
    /// Blue (goes second).
    Blue,
}

impl LineColor {
    /// Lower-case letter used for lines in text rendering.
    pub fn line_symbol(self) -> char {
        match self {
            LineColor::Red => 'r',
            LineColor::Blue => 'b',
        }
    }

    /// Upper-case letter used for owned boxes in text rendering.
    pub fn box_symbol(self) -> char {
        self.line_symbol().to_ascii_uppercase()
    }
}

impl Side for LineColor {
    const FIRST_MOVER: Self = LineColor::Red;

    fn opponent(self) -> Self {
        match self {
            LineColor::Red => LineColor::Blue,
            LineColor::Blue => LineColor::Red,
        }
    }
}

impl From<LineColor> for u8 {
    fn from(color: LineColor) -> Self {
        match color {
            LineColor::Red => 1,
            LineColor::Blue => 2,
        }
    }
}

impl TryFrom<u8> for LineColor {
    type Error = WireError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            1 => Ok(LineColor::Red),
            2 => Ok(LineColor::Blue),
            other => Err(WireError::InvalidDiscriminant(other)),
        }
    }
}

/// Which edge of a cell a line occupies.
///
/// Travels on the wire as one byte: 0 for top, 1 for left.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, derive_more::Display,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Orientation {
    /// Horizontal line along the top of cell `(x, y)`.
    #[display("top")]
    Top,
    /// Vertical line along the left of cell `(x, y)`.
    #[display("left")]
    Left,
}

impl From<Orientation> for u8 {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Top => 0,
            Orientation::Left => 1,
        }
    }
}

impl TryFrom<u8> for Orientation {
    type Error = WireError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(Orientation::Top),
            1 => Ok(Orientation::Left),
            other => Err(WireError::InvalidDiscriminant(other)),
        }
    }
}

/// An edge between two dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{} {}", orientation, pos)]
pub struct Edge {
    /// Cell whose top or left side this is.
    pub pos: GridPos,
    /// Which side.
    pub orientation: Orientation,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(pos: impl Into<GridPos>, orientation: Orientation) -> Self {
        Self {
            pos: pos.into(),
            orientation,
        }
    }

    /// Top edge of cell `(x, y)`; row `height` is the bottom border.
    pub fn top(x: i32, y: i32) -> Self {
        Self::new((x, y), Orientation::Top)
    }

    /// Left edge of cell `(x, y)`; column `width` is the right border.
    pub fn left(x: i32, y: i32) -> Self {
        Self::new((x, y), Orientation::Left)
    }
}

/// Lines and box owners of a `width` x `height` cell board.
///
/// Horizontal lines form a `width` x `height + 1` grid, vertical lines a
/// `width + 1` x `height` grid. Lines and owners are only ever set once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeBoard {
    horizontal: Grid<Option<LineColor>>,
    vertical: Grid<Option<LineColor>>,
    owners: Grid<Option<LineColor>>,
}

impl EdgeBoard {
    /// Creates an empty board of `width` x `height` cells.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            horizontal: Grid::new(width, height + 1, None),
            vertical: Grid::new(width + 1, height, None),
            owners: Grid::new(width, height, None),
        }
    }

    /// Number of cell columns.
    pub fn width(&self) -> usize {
        self.owners.width()
    }

    /// Number of cell rows.
    pub fn height(&self) -> usize {
        self.owners.height()
    }

    fn lines(&self, orientation: Orientation) -> &Grid<Option<LineColor>> {
        match orientation {
            Orientation::Top => &self.horizontal,
            Orientation::Left => &self.vertical,
        }
    }

    /// Draws a line on an empty in-bounds edge.
    #[instrument(skip(self))]
    pub fn place(&mut self, edge: Edge, color: LineColor) -> Result<(), MoveError> {
        let lines = match edge.orientation {
            Orientation::Top => &mut self.horizontal,
            Orientation::Left => &mut self.vertical,
        };
        match lines.get(edge.pos) {
            None => Err(MoveError::OutOfBounds(edge.pos)),
            Some(Some(_)) => Err(MoveError::AlreadyOccupied(edge.pos)),
            Some(None) => {
                lines.set(edge.pos, Some(color));
                Ok(())
            }
        }
    }

    /// Reads an edge; `None` only when out of bounds.
    pub fn read(&self, edge: Edge) -> Option<Option<LineColor>> {
        self.lines(edge.orientation).get(edge.pos)
    }

    /// True if the edge is in bounds and drawn.
    pub fn is_drawn(&self, edge: Edge) -> bool {
        matches!(self.read(edge), Some(Some(_)))
    }

    /// True iff all four edges around `cell` are drawn.
    pub fn check_box_completion(&self, cell: GridPos) -> bool {
        let GridPos { x, y } = cell;
        self.owners.in_bounds(cell)
            && self.is_drawn(Edge::top(x, y))
            && self.is_drawn(Edge::top(x, y + 1))
            && self.is_drawn(Edge::left(x, y))
            && self.is_drawn(Edge::left(x + 1, y))
    }

    /// Owner of `cell`, if claimed.
    pub fn owner(&self, cell: GridPos) -> Option<LineColor> {
        self.owners.get(cell).flatten()
    }

    /// Records `color` as the owner of an unclaimed cell.
    ///
    /// Returns false if the cell is out of bounds or already owned.
    pub fn claim(&mut self, cell: GridPos, color: LineColor) -> bool {
        match self.owners.get(cell) {
            Some(None) => self.owners.set(cell, Some(color)),
            _ => false,
        }
    }

    /// Number of cells owned by `color`.
    pub fn owned_by(&self, color: LineColor) -> usize {
        self.owners.cells().filter(|o| *o == Some(color)).count()
    }

    /// Coordinates of every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + use<> {
        self.owners.positions()
    }

    /// Number of drawn lines.
    pub fn filled_edges(&self) -> usize {
        let drawn = |grid: &Grid<Option<LineColor>>| grid.cells().filter(Option::is_some).count();
        drawn(&self.horizontal) + drawn(&self.vertical)
    }

    /// Number of lines on a full board.
    pub fn total_edges(&self) -> usize {
        self.horizontal.area() + self.vertical.area()
    }

    /// Every undrawn edge: horizontal lines row-major, then vertical lines.
    pub fn empty_edges(&self) -> Vec<Edge> {
        let horizontal = self
            .horizontal
            .positions()
            .map(|pos| Edge::new(pos, Orientation::Top));
        let vertical = self
            .vertical
            .positions()
            .map(|pos| Edge::new(pos, Orientation::Left));
        horizontal
            .chain(vertical)
            .filter(|edge| !self.is_drawn(*edge))
            .collect()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Lines show as `r`/`b`, owned boxes as `R`/`B`.
    pub fn display(&self) -> String {
        let (width, height) = (self.width() as i32, self.height() as i32);
        let mut out = Vec::new();
        for y in 0..=height {
            let mut dots = String::from("+");
            for x in 0..width {
                let line = match self.read(Edge::top(x, y)).flatten() {
                    Some(color) => color.line_symbol().to_string().repeat(3),
                    None => "   ".to_string(),
                };
                dots.push_str(&line);
                dots.push('+');
            }
            out.push(dots);

            if y == height {
                break;
            }
            let mut cells = String::new();
            for x in 0..=width {
                let wall = self
                    .read(Edge::left(x, y))
                    .flatten()
                    .map_or(' ', LineColor::line_symbol);
                cells.push(wall);
                if x < width {
                    let fill = self
                        .owner(GridPos::new(x, y))
                        .map_or(' ', LineColor::box_symbol);
                    cells.push(' ');
                    cells.push(fill);
                    cells.push(' ');
                }
            }
            out.push(cells);
        }
        out.join("\n")
    }
}
