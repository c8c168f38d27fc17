//! Move legality for tic-tac-toe.
//!
//! Each precondition is a small checker; [`LegalMove`] composes them for
//! the local and the remote path.

use super::{Board, Mark, Move};
use crate::MoveError;
use crate::games::TurnState;
use tracing::instrument;

/// Precondition: the session is active.
pub struct SessionActive;

impl SessionActive {
    /// Fails with [`MoveError::SessionNotActive`] outside the active phase.
    pub fn check(turn: &TurnState<Mark>) -> Result<(), MoveError> {
        turn.check_active()
    }
}

/// Precondition: it is the local participant's turn.
pub struct LocalTurn;

impl LocalTurn {
    /// Fails with [`MoveError::NotYourTurn`] while the opponent is to move.
    pub fn check(turn: &TurnState<Mark>) -> Result<(), MoveError> {
        turn.check_local()
    }
}

/// Precondition: the target square is on the board.
pub struct InBounds;

impl InBounds {
    /// Fails with [`MoveError::OutOfBounds`] for coordinates off the grid.
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        if !board.in_bounds(mov.pos) {
            return Err(MoveError::OutOfBounds(mov.pos));
        }
        Ok(())
    }
}

/// Precondition: the target square is empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with [`MoveError::AlreadyOccupied`] for a filled square.
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        if !board.is_empty(mov.pos) {
            return Err(MoveError::AlreadyOccupied(mov.pos));
        }
        Ok(())
    }
}

/// Composite legality check.
pub struct LegalMove;

impl LegalMove {
    /// Validates a move produced locally.
    #[instrument(skip(turn, board))]
    pub fn check_local(mov: &Move, turn: &TurnState<Mark>, board: &Board) -> Result<(), MoveError> {
        LocalTurn::check(turn)?;
        InBounds::check(mov, board)?;
        SquareIsEmpty::check(mov, board)?;
        Ok(())
    }

    /// Validates a move received from the peer.
    ///
    /// Turn ownership and the claimed mark are trusted as sent.
    #[instrument(skip(turn, board))]
    pub fn check_remote(mov: &Move, turn: &TurnState<Mark>, board: &Board) -> Result<(), MoveError> {
        SessionActive::check(turn)?;
        InBounds::check(mov, board)?;
        SquareIsEmpty::check(mov, board)?;
        Ok(())
    }
}
