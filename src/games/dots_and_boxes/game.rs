//! Turn-synchronized dots-and-boxes session.
//!
//! A move that closes at least one box keeps the turn with its author;
//! otherwise the turn passes. The game ends when every edge is drawn.

use super::invariants::DotsAndBoxesInvariants;
use super::rules::{self, Scores};
use super::{Edge, EdgeBoard, LineColor, MOVE_TAG, Move, Orientation};
use crate::games::{DuelGame, GridPos, InvariantSet, Outcome, Phase, TurnState};
use crate::session::{LocalPlayer, PlayerId, RoomControl, WireMove};
use crate::{InputError, MoveError, PlayError};
use tracing::{debug, info, instrument, warn};

/// Game id, also used as the room tag.
pub const GAME_ID: &str = "DotsAndBoxes";

/// Participants required to start.
pub const MAX_PLAYERS: usize = 2;

/// Dots-and-boxes on a `width` x `height` cell board.
#[derive(Debug, Clone)]
pub struct DotsAndBoxes {
    pub(super) board: EdgeBoard,
    pub(super) scores: Scores,
    turn: TurnState<LineColor>,
    pending: Option<Edge>,
}

impl DotsAndBoxes {
    /// Creates a session for a `width` x `height` cell board, not yet started.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board: EdgeBoard::new(width, height),
            scores: Scores::default(),
            turn: TurnState::new(),
            pending: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &EdgeBoard {
        &self.board
    }

    /// Returns the box count per colour.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Returns the turn state.
    pub fn turn(&self) -> &TurnState<LineColor> {
        &self.turn
    }

    /// Colour played by this process, once the game has started.
    pub fn local_color(&self) -> Option<LineColor> {
        self.turn.local()
    }

    /// Final result, present only when finished.
    pub fn outcome(&self) -> Option<Outcome<LineColor>> {
        self.turn.outcome()
    }

    /// Local move waiting for the next update.
    pub fn pending(&self) -> Option<Edge> {
        self.pending
    }

    /// Starts a new game with an empty board. The host plays red.
    #[instrument(skip(self, room))]
    pub fn start(&mut self, is_host: bool, room: &mut dyn RoomControl) -> LineColor {
        if self.turn.phase() != Phase::NotStarted {
            self.reset();
        }
        let color = self.turn.start(is_host);
        if is_host {
            room.set_room_visible(false);
        }
        info!(
            ?color,
            width = self.board.width(),
            height = self.board.height(),
            "Dots and boxes started"
        );
        color
    }

    /// Buffers a local move to be attempted on the next update.
    pub fn select(&mut self, edge: Edge) {
        self.pending = Some(edge);
    }

    /// Validates, transmits and applies a local move.
    #[instrument(skip(self, room))]
    pub fn play_local(
        &mut self,
        edge: Edge,
        room: &mut dyn RoomControl,
    ) -> Result<Option<Outcome<LineColor>>, PlayError> {
        let color = self.turn.local().ok_or(MoveError::SessionNotActive)?;
        self.turn.check_local()?;
        self.check_edge(edge)?;

        let mov = Move::new(edge, color);
        room.send_event(Move::TAG, mov.encode()?);
        Ok(self.apply(mov, room)?)
    }

    /// Applies a move received from the peer.
    #[instrument(skip(self, room))]
    pub fn receive_remote(
        &mut self,
        mov: Move,
        room: &mut dyn RoomControl,
    ) -> Result<Option<Outcome<LineColor>>, MoveError> {
        self.turn.check_active()?;
        self.check_edge(mov.edge())?;
        self.apply(mov, room)
    }

    fn check_edge(&self, edge: Edge) -> Result<(), MoveError> {
        match self.board.read(edge) {
            None => Err(MoveError::OutOfBounds(edge.pos)),
            Some(Some(_)) => Err(MoveError::AlreadyOccupied(edge.pos)),
            Some(None) => Ok(()),
        }
    }

    fn apply(
        &mut self,
        mov: Move,
        room: &mut dyn RoomControl,
    ) -> Result<Option<Outcome<LineColor>>, MoveError> {
        let edge = mov.edge();
        self.board.place(edge, mov.color)?;

        let claimed = rules::capture_boxes(&mut self.board, edge, mov.color);
        for _ in &claimed {
            self.scores.award(mov.color);
        }
        if claimed.is_empty() {
            self.turn.flip();
        }

        debug_assert!(
            DotsAndBoxesInvariants::check_all(self).is_ok(),
            "Invariant violated after {}",
            mov
        );

        let outcome = rules::evaluate(&self.board, &self.scores);
        if let Some(outcome) = outcome {
            self.finish(outcome, room);
        }
        debug!(%mov, claimed = claimed.len(), scores = %self.scores, "Line drawn");
        Ok(outcome)
    }

    fn finish(&mut self, outcome: Outcome<LineColor>, room: &mut dyn RoomControl) {
        self.turn.finish(outcome);
        if room.is_host() {
            room.set_room_open(false);
            room.set_room_visible(false);
        }
    }

    /// Abandons the game and clears the board.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = EdgeBoard::new(self.board.width(), self.board.height());
        self.scores = Scores::default();
        self.pending = None;
        self.turn.reset();
    }
}

/// Parses `"top x y"` or `"left x y"` into an edge.
///
/// `t`/`h` and `l`/`v` are accepted as short forms; commas work as separators.
pub fn parse_edge(line: &str) -> Result<Edge, InputError> {
    let unparsable = || InputError::Unparsable(line.to_string());
    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    let [kind, x, y] = parts.as_slice() else {
        return Err(unparsable());
    };
    let orientation = match kind.to_ascii_lowercase().as_str() {
        "top" | "t" | "h" => Orientation::Top,
        "left" | "l" | "v" => Orientation::Left,
        _ => return Err(unparsable()),
    };
    let pos = GridPos::new(
        x.parse().map_err(|_| unparsable())?,
        y.parse().map_err(|_| unparsable())?,
    );
    Ok(Edge::new(pos, orientation))
}

impl DuelGame for DotsAndBoxes {
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
        match Move::decode(tag, payload) {
            Ok(mov) => {
                if let Err(error) = self.receive_remote(mov, room) {
                    debug!(sender, %mov, %error, "Dropping remote move");
                }
            }
            Err(error) => warn!(sender, %error, "Dropping undecodable move"),
        }
    }

    fn queue_input(&mut self, line: &str) -> Result<(), InputError> {
        self.select(parse_edge(line)?);
        Ok(())
    }

    fn legal_inputs(&self) -> Vec<String> {
        if self.turn.phase() != Phase::Active {
            return Vec::new();
        }
        self.board
            .empty_edges()
            .into_iter()
            .map(|edge| format!("{} {} {}", edge.orientation, edge.pos.x, edge.pos.y))
            .collect()
    }

    fn update(&mut self, room: &mut dyn RoomControl) {
        let Some(edge) = self.pending.take() else {
            return;
        };
        if let Err(error) = self.play_local(edge, room) {
            debug!(%edge, %error, "Local move rejected");
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
        format!("{}\n{}", self.board.display(), self.scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edge() {
        assert_eq!(parse_edge("top 1 2"), Ok(Edge::top(1, 2)));
        assert_eq!(parse_edge("L 0,3"), Ok(Edge::left(0, 3)));
        assert_eq!(parse_edge("v 6 0"), Ok(Edge::left(6, 0)));
        assert!(parse_edge("1 2").is_err());
        assert!(parse_edge("diag 1 2").is_err());
        assert!(parse_edge("top x 2").is_err());
    }

    #[test]
    fn test_legal_inputs_empty_before_start() {
        assert!(DotsAndBoxes::new(2, 2).legal_inputs().is_empty());
    }
}
