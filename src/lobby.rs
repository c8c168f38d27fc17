//! Room discovery and game selection.
//!
//! The lobby turns room names into games: creating a room tags its name with
//! the game id, and joining a room picks the factory from that tag. Once in a
//! room, relay events flow through the [`SessionAdapter`].

use crate::games::{DuelGame, GameRegistry};
use crate::session::{RoomInfo, RoomName, SessionAdapter, Transport};
use crate::{DuelConfig, LobbyError};
use tracing::{debug, info, instrument, warn};

/// One participant's lobby: a relay connection plus the game it is playing.
#[derive(Debug)]
pub struct Lobby<T> {
    config: DuelConfig,
    registry: GameRegistry,
    session: SessionAdapter<T>,
}

impl<T: Transport> Lobby<T> {
    /// Creates a lobby whose games are built from `config`.
    #[instrument(skip(transport))]
    pub fn new(transport: T, config: DuelConfig) -> Self {
        let registry = GameRegistry::from_config(&config);
        Self::with_registry(transport, config, registry)
    }

    /// Creates a lobby with a custom game registry.
    pub fn with_registry(transport: T, config: DuelConfig, registry: GameRegistry) -> Self {
        Self {
            config,
            registry,
            session: SessionAdapter::new(transport),
        }
    }

    /// Connects to the relay with the configured name and region.
    #[instrument(skip(self))]
    pub fn connect(&mut self) -> Result<(), LobbyError> {
        let (name, region) = (self.config.display_name(), self.config.region());
        self.session.transport_mut().connect(name, region)?;
        info!(%name, %region, "Lobby connected");
        Ok(())
    }

    /// Leaves any room and disconnects.
    #[instrument(skip(self))]
    pub fn disconnect(&mut self) {
        self.session.transport_mut().disconnect();
        self.session.pump_events();
        self.session.detach();
    }

    /// True while connected to the relay.
    pub fn is_connected(&self) -> bool {
        self.session.transport().is_connected()
    }

    /// Visible rooms, optionally only those tagged with `game_id`.
    #[instrument(skip(self))]
    pub fn list_rooms(&self, game_id: Option<&str>) -> Vec<RoomInfo> {
        let rooms = self.session.transport().list_rooms();
        match game_id {
            Some(id) => rooms
                .into_iter()
                .filter(|room| RoomName::parse(room.name()).is_game(id))
                .collect(),
            None => rooms,
        }
    }

    fn instantiate(&self, game_id: &str) -> Result<Box<dyn DuelGame>, LobbyError> {
        self.registry.create(game_id).ok_or_else(|| {
            warn!(game_id, "Unknown game type");
            LobbyError::UnknownGame(game_id.to_string())
        })
    }

    /// Creates a room for `game_id` and attaches a fresh game to it.
    ///
    /// Returns the full room name.
    #[instrument(skip(self))]
    pub fn create_room(&mut self, game_id: &str, title: &str) -> Result<String, LobbyError> {
        let game = self.instantiate(game_id)?;
        let name = RoomName::tagged(game_id, title).to_string();
        self.session
            .transport_mut()
            .create_room(&name, game.max_players())?;
        self.session.attach(game);
        info!(room = %name, "Room created");
        Ok(name)
    }

    /// Joins a room, choosing the game from the room's tag.
    #[instrument(skip(self))]
    pub fn join_room(&mut self, name: &str) -> Result<(), LobbyError> {
        let parsed = RoomName::parse(name);
        let game_id = parsed
            .game_id()
            .ok_or_else(|| LobbyError::MissingGameTag(name.to_string()))?;
        let game = self.instantiate(game_id)?;
        self.session.transport_mut().join_room(name)?;
        self.session.attach(game);
        info!(room = %name, "Joined room");
        Ok(())
    }

    /// Joins the first joinable room of `game_id`, or creates one named
    /// `"<display name>'s room-<hex>"`.
    ///
    /// Returns the room name.
    #[instrument(skip(self))]
    pub fn join_random_or_create(&mut self, game_id: &str) -> Result<String, LobbyError> {
        if !self.registry.has_game(game_id) {
            return Err(LobbyError::UnknownGame(game_id.to_string()));
        }
        let candidates = self.list_rooms(Some(game_id));
        for room in candidates.iter().filter(|room| room.is_joinable()) {
            match self.join_room(room.name()) {
                Ok(()) => return Ok(room.name().clone()),
                Err(error) => debug!(room = %room.name(), %error, "Join failed; trying next"),
            }
        }
        let title = format!(
            "{}'s room-{:x}",
            self.config.display_name(),
            rand::random::<u32>()
        );
        self.create_room(game_id, &title)
    }

    /// Leaves the current room, lets the game observe it, then drops the game.
    #[instrument(skip(self))]
    pub fn leave_room(&mut self) -> Result<(), LobbyError> {
        self.session.transport_mut().leave_room()?;
        self.session.pump_events();
        self.session.detach();
        info!("Left room");
        Ok(())
    }

    /// Per-frame tick: dispatches relay events, then runs the game update.
    pub fn update(&mut self) {
        self.session.update();
    }

    /// Name of the current room, if any.
    pub fn current_room(&self) -> Option<String> {
        self.session.transport().current_room()
    }

    /// The game being played, if any.
    pub fn game(&self) -> Option<&dyn DuelGame> {
        self.session.game()
    }

    /// The game being played, mutably.
    pub fn game_mut(&mut self) -> Option<&mut (dyn DuelGame + 'static)> {
        self.session.game_mut()
    }

    /// The game registry.
    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    /// The configuration this lobby was built from.
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// The session adapter.
    pub fn session(&self) -> &SessionAdapter<T> {
        &self.session
    }

    /// The session adapter, mutably.
    pub fn session_mut(&mut self) -> &mut SessionAdapter<T> {
        &mut self.session
    }
}
