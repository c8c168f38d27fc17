//! Box capture and scoring.

use super::{Edge, EdgeBoard, LineColor, Orientation};
use crate::games::{GridPos, Outcome};
use serde::Serialize;
use tracing::instrument;

/// Boxes owned per colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Scores {
    red: usize,
    blue: usize,
}

impl Scores {
    /// Score of one colour.
    pub fn get(&self, color: LineColor) -> usize {
        match color {
            LineColor::Red => self.red,
            LineColor::Blue => self.blue,
        }
    }

    /// Credits one box to `color`.
    pub fn award(&mut self, color: LineColor) {
        match color {
            LineColor::Red => self.red += 1,
            LineColor::Blue => self.blue += 1,
        }
    }

    /// Boxes owned by either colour.
    pub fn total(&self) -> usize {
        self.red + self.blue
    }
}

impl std::fmt::Display for Scores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Red {} - {} Blue", self.red, self.blue)
    }
}

/// The (up to) two cells an edge borders.
///
/// A top edge at `(x, y)` separates cells `(x, y - 1)` and `(x, y)`; a left
/// edge separates `(x - 1, y)` and `(x, y)`. Border edges yield one
/// off-board coordinate.
pub fn cells_touching(edge: Edge) -> [GridPos; 2] {
    let GridPos { x, y } = edge.pos;
    match edge.orientation {
        Orientation::Top => [GridPos::new(x, y - 1), GridPos::new(x, y)],
        Orientation::Left => [GridPos::new(x - 1, y), GridPos::new(x, y)],
    }
}

/// Claims every box that `edge` just closed for `color`.
///
/// Only the cells bordering the new edge are examined. Returns the claimed
/// cells.
#[instrument(skip(board))]
pub fn capture_boxes(board: &mut EdgeBoard, edge: Edge, color: LineColor) -> Vec<GridPos> {
    let mut claimed = Vec::new();
    for cell in cells_touching(edge) {
        if board.check_box_completion(cell) && board.claim(cell, color) {
            claimed.push(cell);
        }
    }
    claimed
}

/// Terminal check: once every edge is drawn, the higher score wins.
pub fn evaluate(board: &EdgeBoard, scores: &Scores) -> Option<Outcome<LineColor>> {
    if board.filled_edges() < board.total_edges() {
        return None;
    }
    let (red, blue) = (scores.get(LineColor::Red), scores.get(LineColor::Blue));
    Some(match red.cmp(&blue) {
        std::cmp::Ordering::Greater => Outcome::Winner(LineColor::Red),
        std::cmp::Ordering::Less => Outcome::Winner(LineColor::Blue),
        std::cmp::Ordering::Equal => Outcome::Draw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_touching() {
        assert_eq!(
            cells_touching(Edge::top(1, 0)),
            [GridPos::new(1, -1), GridPos::new(1, 0)]
        );
        assert_eq!(
            cells_touching(Edge::left(2, 1)),
            [GridPos::new(1, 1), GridPos::new(2, 1)]
        );
    }

    #[test]
    fn test_shared_edge_closes_two_boxes() {
        let mut board = EdgeBoard::new(2, 1);
        for edge in [
            Edge::top(0, 0),
            Edge::top(1, 0),
            Edge::top(0, 1),
            Edge::top(1, 1),
            Edge::left(0, 0),
            Edge::left(2, 0),
        ] {
            board.place(edge, LineColor::Red).unwrap();
        }
        let middle = Edge::left(1, 0);
        board.place(middle, LineColor::Blue).unwrap();

        let claimed = capture_boxes(&mut board, middle, LineColor::Blue);
        assert_eq!(claimed, vec![GridPos::new(0, 0), GridPos::new(1, 0)]);
        assert_eq!(board.owned_by(LineColor::Blue), 2);
    }

    #[test]
    fn test_no_capture_on_open_box() {
        let mut board = EdgeBoard::new(2, 2);
        let edge = Edge::top(0, 1);
        board.place(edge, LineColor::Red).unwrap();
        assert!(capture_boxes(&mut board, edge, LineColor::Red).is_empty());
    }

    #[test]
    fn test_evaluate_waits_for_full_board() {
        let mut board = EdgeBoard::new(1, 1);
        let mut scores = Scores::default();
        board.place(Edge::top(0, 0), LineColor::Red).unwrap();
        assert_eq!(evaluate(&board, &scores), None);

        for edge in [Edge::top(0, 1), Edge::left(0, 0), Edge::left(1, 0)] {
            board.place(edge, LineColor::Blue).unwrap();
        }
        scores.award(LineColor::Blue);
        assert_eq!(evaluate(&board, &scores), Some(Outcome::Winner(LineColor::Blue)));
    }

    #[test]
    fn test_equal_scores_draw() {
        let mut board = EdgeBoard::new(2, 1);
        for edge in board.empty_edges() {
            board.place(edge, LineColor::Red).unwrap();
        }
        let mut scores = Scores::default();
        scores.award(LineColor::Red);
        scores.award(LineColor::Blue);
        assert_eq!(evaluate(&board, &scores), Some(Outcome::Draw));
        assert_eq!(scores.to_string(), "Red 1 - 1 Blue");
    }
}
