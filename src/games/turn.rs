//! Turn coordination shared by the game variants.
//!
//! [`TurnState`] owns the per-participant session state: which side this
//! process plays, whose turn it is, the lifecycle [`Phase`] and the final
//! [`Outcome`]. Each variant composes one with its own board.

use crate::MoveError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// One of the two sides of a two-player game.
pub trait Side: Copy + Eq + std::fmt::Debug {
    /// The side that always moves first. The host plays it.
    const FIRST_MOVER: Self;

    /// Returns the other side.
    fn opponent(self) -> Self;
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// Waiting for the room to fill.
    #[default]
    #[display("not started")]
    NotStarted,
    /// Both participants present, moves accepted.
    #[display("active")]
    Active,
    /// Terminal state reached; the result stands.
    #[display("finished")]
    Finished,
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome<S> {
    /// A side won the game.
    Winner(S),
    /// Game ended in a draw.
    Draw,
}

impl<S: Copy> Outcome<S> {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<S> {
        match self {
            Outcome::Winner(side) => Some(*side),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl<S: std::fmt::Debug> std::fmt::Display for Outcome<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(side) => write!(f, "{:?} wins", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Whose turn it is, and where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState<S> {
    phase: Phase,
    local: Option<S>,
    local_turn: bool,
    outcome: Option<Outcome<S>>,
}

impl<S: Side> TurnState<S> {
    /// Creates a session that has not started.
    pub fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            local: None,
            local_turn: false,
            outcome: None,
        }
    }

    /// Enters the active phase and assigns the local side.
    ///
    /// The host always plays [`Side::FIRST_MOVER`]. Returns the assigned side.
    #[instrument(skip(self))]
    pub fn start(&mut self, is_host: bool) -> S {
        let local = if is_host {
            S::FIRST_MOVER
        } else {
            S::FIRST_MOVER.opponent()
        };
        self.phase = Phase::Active;
        self.local = Some(local);
        self.local_turn = local == S::FIRST_MOVER;
        self.outcome = None;
        info!(side = ?local, local_turn = self.local_turn, "Session active");
        local
    }

    /// Drops all session state and returns to [`Phase::NotStarted`].
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(phase = %self.phase, "Resetting session state");
        *self = Self::new();
    }

    /// Precondition for a local move: active phase and local turn.
    pub fn check_local(&self) -> Result<(), MoveError> {
        self.check_active()?;
        if !self.local_turn {
            return Err(MoveError::NotYourTurn);
        }
        Ok(())
    }

    /// Precondition for any move: the session is active.
    pub fn check_active(&self) -> Result<(), MoveError> {
        if self.phase != Phase::Active {
            return Err(MoveError::SessionNotActive);
        }
        Ok(())
    }

    /// Passes the turn to the other participant.
    pub fn flip(&mut self) {
        self.local_turn = !self.local_turn;
    }

    /// Moves from active to finished and records the outcome.
    #[instrument(skip(self))]
    pub fn finish(&mut self, outcome: Outcome<S>) {
        info!(%outcome, local = ?self.local, "Game finished");
        self.phase = Phase::Finished;
        self.outcome = Some(outcome);
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side controlled by this process, once assigned.
    pub fn local(&self) -> Option<S> {
        self.local
    }

    /// True if the local participant may move next.
    pub fn is_local_turn(&self) -> bool {
        self.local_turn
    }

    /// Final result, present only when finished.
    pub fn outcome(&self) -> Option<Outcome<S>> {
        self.outcome
    }

    /// Result from the local participant's point of view.
    pub fn result_label(&self) -> Option<&'static str> {
        let outcome = self.outcome?;
        Some(match outcome.winner() {
            None => "Draw",
            Some(side) if Some(side) == self.local => "You Win!",
            Some(_) => "You Lose",
        })
    }
}

impl<S: Side> Default for TurnState<S> {
    fn default() -> Self {
        Self::new()
    }
}
