//! Game variants and the capability interface the lobby drives them through.

mod grid;
mod invariants;
mod turn;

pub mod dots_and_boxes;
pub mod tictactoe;

pub use grid::{Grid, GridPos};
pub use invariants::{Invariant, InvariantSet, InvariantViolation};
pub use turn::{Outcome, Phase, Side, TurnState};

use crate::session::{LocalPlayer, PlayerId, RoomControl};
use crate::{DuelConfig, InputError};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Capability interface implemented by every game variant.
///
/// The session adapter forwards relay callbacks here; the external driver
/// calls [`DuelGame::update`] once per frame. The room capability is lent
/// for the duration of a call and never retained.
pub trait DuelGame: std::fmt::Debug {
    /// Identifier used to tag rooms by game type.
    fn game_id(&self) -> &'static str;

    /// Number of participants required to start.
    fn max_players(&self) -> usize;

    /// Room occupancy reached [`DuelGame::max_players`].
    fn on_game_start(&mut self, players: &[LocalPlayer], is_host: bool, room: &mut dyn RoomControl);

    /// Another participant left the room.
    fn on_player_left(&mut self, player: PlayerId);

    /// The local participant left the room.
    fn on_leave_room(&mut self);

    /// A custom event arrived from another participant.
    fn on_event_received(
        &mut self,
        sender: PlayerId,
        tag: u8,
        payload: &[u8],
        room: &mut dyn RoomControl,
    );

    /// Buffers a textual local move to be attempted on the next update.
    fn queue_input(&mut self, line: &str) -> Result<(), InputError>;

    /// Textual inputs for every currently empty cell or edge.
    fn legal_inputs(&self) -> Vec<String>;

    /// Per-frame tick: attempts the pending local move, if any.
    fn update(&mut self, room: &mut dyn RoomControl);

    /// Current lifecycle phase.
    fn phase(&self) -> Phase;

    /// True if the local participant may move next.
    fn is_local_turn(&self) -> bool;

    /// Result from the local participant's point of view, once finished.
    fn result_label(&self) -> Option<&'static str>;

    /// Plain-text rendering of the board.
    fn render(&self) -> String;

    /// True once the game has started and until it is reset.
    fn is_started(&self) -> bool {
        self.phase() != Phase::NotStarted
    }

    /// True once a terminal state has been reached.
    fn is_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }
}

/// Builds a fresh game instance.
pub type GameFactory = Box<dyn Fn() -> Box<dyn DuelGame> + Send + Sync>;

/// Metadata about a registered game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMetadata {
    /// Game id, also the room tag.
    pub id: String,
    /// Required participant count.
    pub max_players: usize,
}

/// String-keyed table of game factories.
#[derive(Default)]
pub struct GameRegistry {
    factories: BTreeMap<String, GameFactory>,
}

impl GameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every built-in game, sized from `config`.
    #[instrument(skip(config))]
    pub fn from_config(config: &DuelConfig) -> Self {
        let mut registry = Self::new();

        let size = *config.tictactoe_size();
        registry.register(tictactoe::GAME_ID, move || {
            Box::new(tictactoe::TicTacToe::new(size)) as Box<dyn DuelGame>
        });

        let (width, height) = (*config.dots_width(), *config.dots_height());
        registry.register(dots_and_boxes::GAME_ID, move || {
            Box::new(dots_and_boxes::DotsAndBoxes::new(width, height)) as Box<dyn DuelGame>
        });

        registry
    }

    /// Registers a factory under `id`, replacing any previous one.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn DuelGame> + Send + Sync + 'static,
    {
        let id = id.into();
        debug!(game_id = %id, "Registering game");
        self.factories.insert(id, Box::new(factory));
    }

    /// Instantiates the game registered under `id`.
    #[instrument(skip(self))]
    pub fn create(&self, id: &str) -> Option<Box<dyn DuelGame>> {
        self.factories.get(id).map(|factory| factory())
    }

    /// True if a game is registered under `id`.
    pub fn has_game(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Lists all registered games, ordered by id.
    pub fn list_games(&self) -> Vec<GameMetadata> {
        self.factories
            .iter()
            .map(|(id, factory)| GameMetadata {
                id: id.clone(),
                max_players: factory().max_players(),
            })
            .collect()
    }
}

impl std::fmt::Debug for GameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRegistry")
            .field("games", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
