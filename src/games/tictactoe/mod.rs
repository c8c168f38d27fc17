//! Tic-tac-toe: N-in-a-row on an N x N board.

mod action;
mod contracts;
mod game;
mod invariants;
mod rules;
mod types;

pub use action::{MOVE_TAG, Move};
pub use contracts::{InBounds, LegalMove, LocalTurn, SessionActive, SquareIsEmpty};
pub use game::{GAME_ID, MAX_PLAYERS, TicTacToe, parse_position};
pub use invariants::{HistoryConsistentInvariant, MonotonicBoardInvariant, TicTacToeInvariants};
pub use rules::{check_winner, evaluate, lines};
pub use types::{Board, Mark, Square};
