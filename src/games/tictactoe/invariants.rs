//! Tic-tac-toe invariants, checked after every applied move in debug builds.

use super::{Board, TicTacToe};
use crate::games::Invariant;

/// Invariant: squares are monotonic (never overwritten).
///
/// Replaying the move history onto an empty board must succeed without a
/// single occupied-square rejection and reproduce the current board.
pub struct MonotonicBoardInvariant;

impl Invariant<TicTacToe> for MonotonicBoardInvariant {
    fn holds(game: &TicTacToe) -> bool {
        let mut reconstructed = Board::new(game.board.size());
        for mov in &game.history {
            if reconstructed.place(mov.pos, mov.mark).is_err() {
                return false;
            }
        }
        reconstructed == game.board
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

/// Invariant: history length equals the number of occupied squares.
pub struct HistoryConsistentInvariant;

impl Invariant<TicTacToe> for HistoryConsistentInvariant {
    fn holds(game: &TicTacToe) -> bool {
        game.history.len() == game.board.filled()
    }

    fn description() -> &'static str {
        "History length matches number of occupied squares"
    }
}

/// All tic-tac-toe invariants as a composable set.
pub type TicTacToeInvariants = (MonotonicBoardInvariant, HistoryConsistentInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Move};
    use crate::games::{GridPos, InvariantSet};

    #[test]
    fn test_empty_game_holds() {
        let game = TicTacToe::new(3);
        assert!(TicTacToeInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_replayed_history_holds() {
        let mut game = TicTacToe::new(3);
        for mov in [
            Move::new((0, 0), Mark::Circle),
            Move::new((1, 1), Mark::Cross),
            Move::new((2, 0), Mark::Circle),
        ] {
            game.board.place(mov.pos, mov.mark).unwrap();
            game.history.push(mov);
        }
        assert!(TicTacToeInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_detects_unrecorded_square() {
        let mut game = TicTacToe::new(3);
        game.board.place(GridPos::new(0, 0), Mark::Circle).unwrap();

        let violations = TicTacToeInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_detects_overwritten_square() {
        let mut game = TicTacToe::new(3);
        game.board.place(GridPos::new(1, 1), Mark::Cross).unwrap();
        game.history.push(Move::new((1, 1), Mark::Circle));

        assert!(!MonotonicBoardInvariant::holds(&game));
        assert!(HistoryConsistentInvariant::holds(&game));
    }
}
