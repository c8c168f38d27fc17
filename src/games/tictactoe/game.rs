//! Turn-synchronized tic-tac-toe session.
//!
//! Owns the board and the turn state. Local moves are validated, sent and
//! then applied; remote moves are validated against the board only and
//! applied, so a duplicated delivery is a no-op.

use super::contracts::LegalMove;
use super::invariants::TicTacToeInvariants;
use super::{Board, Mark, Move, MOVE_TAG, rules};
use crate::games::{DuelGame, GridPos, InvariantSet, Outcome, Phase, TurnState};
use crate::session::{LocalPlayer, PlayerId, RoomControl, WireMove};
use crate::{InputError, MoveError, PlayError};
use tracing::{debug, info, instrument, warn};

/// Game id, also used as the room tag.
pub const GAME_ID: &str = "TicTacToe";

/// Participants required to start.
pub const MAX_PLAYERS: usize = 2;

/// Tic-tac-toe on an N x N board between two relay participants.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    pub(super) board: Board,
    pub(super) history: Vec<Move>,
    turn: TurnState<Mark>,
    pending: Option<GridPos>,
}

impl TicTacToe {
    /// Creates a session for a `size` x `size` board, not yet started.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            history: Vec::new(),
            turn: TurnState::new(),
            pending: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the turn state.
    pub fn turn(&self) -> &TurnState<Mark> {
        &self.turn
    }

    /// Mark played by this process, once the game has started.
    pub fn local_mark(&self) -> Option<Mark> {
        self.turn.local()
    }

    /// Final result, present only when finished.
    pub fn outcome(&self) -> Option<Outcome<Mark>> {
        self.turn.outcome()
    }

    /// Local move waiting for the next update.
    pub fn pending(&self) -> Option<GridPos> {
        self.pending
    }

    /// Starts a new game with an empty board.
    ///
    /// The host plays [`Mark::Circle`] and moves first. A host also hides
    /// the room so nobody else wanders into a running game.
    #[instrument(skip(self, room))]
    pub fn start(&mut self, is_host: bool, room: &mut dyn RoomControl) -> Mark {
        if self.turn.phase() != Phase::NotStarted {
            self.reset();
        }
        let mark = self.turn.start(is_host);
        if is_host {
            room.set_room_visible(false);
        }
        info!(?mark, size = self.board.size(), "Tic-tac-toe started");
        mark
    }

    /// Buffers a local move to be attempted on the next update.
    pub fn select(&mut self, pos: GridPos) {
        self.pending = Some(pos);
    }

    /// Validates, transmits and applies a local move.
    ///
    /// Rejected moves are never sent.
    #[instrument(skip(self, room))]
    pub fn play_local(
        &mut self,
        pos: GridPos,
        room: &mut dyn RoomControl,
    ) -> Result<Option<Outcome<Mark>>, PlayError> {
        let mark = self.turn.local().ok_or(MoveError::SessionNotActive)?;
        let mov = Move::new(pos, mark);
        LegalMove::check_local(&mov, &self.turn, &self.board)?;

        let payload = mov.encode()?;
        room.send_event(Move::TAG, payload);
        Ok(self.apply(mov, room)?)
    }

    /// Applies a move received from the peer.
    ///
    /// The claimed mark and turn order are trusted as sent.
    #[instrument(skip(self, room))]
    pub fn receive_remote(
        &mut self,
        mov: Move,
        room: &mut dyn RoomControl,
    ) -> Result<Option<Outcome<Mark>>, MoveError> {
        LegalMove::check_remote(&mov, &self.turn, &self.board)?;
        self.apply(mov, room)
    }

    fn apply(&mut self, mov: Move, room: &mut dyn RoomControl) -> Result<Option<Outcome<Mark>>, MoveError> {
        self.board.place(mov.pos, mov.mark)?;
        self.history.push(mov);
        self.turn.flip();

        debug_assert!(
            TicTacToeInvariants::check_all(self).is_ok(),
            "Invariant violated after {}",
            mov
        );

        let outcome = rules::evaluate(&self.board);
        if let Some(outcome) = outcome {
            self.finish(outcome, room);
        }
        debug!(%mov, local_turn = self.turn.is_local_turn(), "Move applied");
        Ok(outcome)
    }

    fn finish(&mut self, outcome: Outcome<Mark>, room: &mut dyn RoomControl) {
        self.turn.finish(outcome);
        if room.is_host() {
            room.set_room_open(false);
            room.set_room_visible(false);
        }
    }

    /// Abandons the game and clears the board.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.size());
        self.history.clear();
        self.pending = None;
        self.turn.reset();
    }
}

/// Parses `"x y"` (or `"x,y"`) into a coordinate.
pub fn parse_position(line: &str) -> Result<GridPos, InputError> {
    let unparsable = || InputError::Unparsable(line.to_string());
    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    match parts.as_slice() {
        [x, y] => Ok(GridPos::new(
            x.parse().map_err(|_| unparsable())?,
            y.parse().map_err(|_| unparsable())?,
        )),
        _ => Err(unparsable()),
    }
}

impl DuelGame for TicTacToe {
    fn game_id(&self) -> &'static str {
        GAME_ID
    }

    fn max_players(&self) -> usize {
        MAX_PLAYERS
    }

    fn on_game_start(&mut self, players: &[LocalPlayer], is_host: bool, room: &mut dyn RoomControl) {
        debug!(players = players.len(), is_host, "Room full");
        self.start(is_host, room);
    }

    fn on_player_left(&mut self, player: PlayerId) {
        if self.turn.phase() == Phase::Finished {
            info!(player, "Opponent left after the game ended; result stands");
            return;
        }
        info!(player, "Opponent left; abandoning game");
        self.reset();
    }

    fn on_leave_room(&mut self) {
        info!("Left room; abandoning game");
        self.reset();
    }

    fn on_event_received(&mut self, sender: PlayerId, tag: u8, payload: &[u8], room: &mut dyn RoomControl) {
        if tag != MOVE_TAG {
            debug!(sender, tag, "Ignoring event for another schema");
            return;
        }
        let mov = match Move::decode(tag, payload) {
            Ok(mov) => mov,
            Err(error) => {
                warn!(sender, %error, "Dropping undecodable move");
                return;
            }
        };
        if let Err(error) = self.receive_remote(mov, room) {
            debug!(sender, %mov, %error, "Dropping remote move");
        }
    }

    fn queue_input(&mut self, line: &str) -> Result<(), InputError> {
        self.select(parse_position(line)?);
        Ok(())
    }

    fn legal_inputs(&self) -> Vec<String> {
        if self.turn.phase() != Phase::Active {
            return Vec::new();
        }
        self.board
            .empty_positions()
            .into_iter()
            .map(|pos| format!("{} {}", pos.x, pos.y))
            .collect()
    }

    fn update(&mut self, room: &mut dyn RoomControl) {
        let Some(pos) = self.pending.take() else {
            return;
        };
        if let Err(error) = self.play_local(pos, room) {
            debug!(%pos, %error, "Local move rejected");
        }
    }

    fn phase(&self) -> Phase {
        self.turn.phase()
    }

    fn is_local_turn(&self) -> bool {
        self.turn.is_local_turn()
    }

    fn result_label(&self) -> Option<&'static str> {
        self.turn.result_label()
    }

    fn render(&self) -> String {
        self.board.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("1 2"), Ok(GridPos::new(1, 2)));
        assert_eq!(parse_position(" 0,2 "), Ok(GridPos::new(0, 2)));
        assert!(parse_position("1").is_err());
        assert!(parse_position("a b").is_err());
        assert!(parse_position("1 2 3").is_err());
    }
}
