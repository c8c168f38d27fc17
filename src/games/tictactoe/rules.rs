//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]; evaluation has no side effects and is
//! re-run after every successful placement.

use super::{Board, Mark, Square};
use crate::games::{GridPos, Outcome};
use tracing::instrument;

/// Evaluates the board: a winner, a draw, or `None` while play continues.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<Outcome<Mark>> {
    if let Some(winner) = check_winner(board) {
        return Some(Outcome::Winner(winner));
    }
    if board.is_full() {
        return Some(Outcome::Draw);
    }
    None
}

/// Returns the owner of the first complete line.
///
/// Lines are scanned in a fixed order: every row top to bottom, every column
/// left to right, the main diagonal, then the anti-diagonal.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    lines(board.size()).find_map(|line| line_owner(board, &line))
}

/// All winning lines of an N x N board in scan order.
pub fn lines(size: usize) -> impl Iterator<Item = Vec<GridPos>> {
    let n = size as i32;
    let rows = (0..n).map(move |y| (0..n).map(|x| GridPos::new(x, y)).collect::<Vec<_>>());
    let columns = (0..n).map(move |x| (0..n).map(|y| GridPos::new(x, y)).collect::<Vec<_>>());
    let diagonal = std::iter::once((0..n).map(|i| GridPos::new(i, i)).collect::<Vec<_>>());
    let anti_diagonal = std::iter::once((0..n).map(|i| GridPos::new(n - 1 - i, i)).collect::<Vec<_>>());
    rows.chain(columns).chain(diagonal).chain(anti_diagonal)
}

fn line_owner(board: &Board, line: &[GridPos]) -> Option<Mark> {
    let (first, rest) = line.split_first()?;
    match board.read(*first)? {
        Square::Occupied(mark) => rest
            .iter()
            .all(|pos| board.read(*pos) == Some(Square::Occupied(mark)))
            .then_some(mark),
        Square::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        let mut board = Board::new(rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let mark = match c {
                    'O' => Mark::Circle,
                    'X' => Mark::Cross,
                    _ => continue,
                };
                board.place(GridPos::new(x as i32, y as i32), mark).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(evaluate(&Board::new(3)), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_from(&["XXX", "OO.", "..."]);
        assert_eq!(evaluate(&board), Some(Outcome::Winner(Mark::Cross)));
    }

    #[test]
    fn test_winner_column() {
        let board = board_from(&[".O.", "XO.", "XO."]);
        assert_eq!(check_winner(&board), Some(Mark::Circle));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_from(&["XXO", ".O.", "O.."]);
        assert_eq!(check_winner(&board), Some(Mark::Circle));
    }

    #[test]
    fn test_draw_full_board() {
        let board = board_from(&["OXO", "OXX", "XOO"]);
        assert_eq!(evaluate(&board), Some(Outcome::Draw));
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        let board = board_from(&["OXO", "XOX", "XOO"]);
        assert_eq!(evaluate(&board), Some(Outcome::Winner(Mark::Circle)));
    }

    #[test]
    fn test_rows_scanned_top_down() {
        // Not reachable in play, but pins the scan order.
        let board = board_from(&["XXX", "OOO", "..."]);
        assert_eq!(check_winner(&board), Some(Mark::Cross));
        let board = board_from(&["...", "OOO", "XXX"]);
        assert_eq!(check_winner(&board), Some(Mark::Circle));
    }

    #[test]
    fn test_four_by_four() {
        let board = board_from(&["O...", ".O..", "..O.", "...O"]);
        assert_eq!(evaluate(&board), Some(Outcome::Winner(Mark::Circle)));
        let board = board_from(&["OOO.", "....", "....", "...."]);
        assert_eq!(evaluate(&board), None);
    }

    #[test]
    fn test_line_count() {
        assert_eq!(lines(3).count(), 8);
        assert_eq!(lines(4).count(), 10);
    }
}
