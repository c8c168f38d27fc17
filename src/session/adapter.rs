//! Routes relay callbacks to the active game.

use super::{RoomEvent, Transport};
use crate::games::{DuelGame, Phase};
use tracing::{debug, info, instrument};

/// Owns a transport and the game currently being played in its room.
///
/// Events are drained from the transport once per [`SessionAdapter::update`]
/// and forwarded to the game before the game's own tick runs.
#[derive(Debug)]
pub struct SessionAdapter<T> {
    transport: T,
    game: Option<Box<dyn DuelGame>>,
}

impl<T: Transport> SessionAdapter<T> {
    /// Wraps a transport with no game attached.
    #[instrument(skip(transport))]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            game: None,
        }
    }

    /// Attaches the game to drive, replacing any previous one.
    #[instrument(skip(self, game), fields(game_id = game.game_id()))]
    pub fn attach(&mut self, game: Box<dyn DuelGame>) {
        info!("Attaching game");
        self.game = Some(game);
    }

    /// Detaches and returns the current game.
    pub fn detach(&mut self) -> Option<Box<dyn DuelGame>> {
        self.game.take()
    }

    /// The attached game, if any.
    pub fn game(&self) -> Option<&dyn DuelGame> {
        self.game.as_deref()
    }

    /// The attached game, mutably.
    pub fn game_mut(&mut self) -> Option<&mut (dyn DuelGame + 'static)> {
        self.game.as_deref_mut()
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The wrapped transport, mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Forwards one relay event to the attached game.
    ///
    /// A join starts the game only once the room holds exactly
    /// [`DuelGame::max_players`] participants and no game is running.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, event: RoomEvent) {
        let Some(game) = self.game.as_deref_mut() else {
            debug!("No game attached; dropping event");
            return;
        };
        match event {
            RoomEvent::Joined { player, is_self } => {
                let players = self.transport.local_players();
                debug!(joined = %player.user_name, is_self, occupancy = players.len(), "Participant joined");
                // Joins batched into one poll must not restart a running game.
                if players.len() == game.max_players() && game.phase() != Phase::Active {
                    let is_host = self.transport.is_host();
                    game.on_game_start(&players, is_host, &mut self.transport);
                }
            }
            RoomEvent::Left { player } => game.on_player_left(player),
            RoomEvent::SelfLeft => game.on_leave_room(),
            RoomEvent::Custom { sender, tag, payload } => {
                game.on_event_received(sender, tag, &payload, &mut self.transport);
            }
        }
    }

    /// Drains pending relay events and dispatches them. Returns how many
    /// were handled.
    pub fn pump_events(&mut self) -> usize {
        let events = self.transport.poll_events();
        let count = events.len();
        for event in events {
            self.dispatch(event);
        }
        count
    }

    /// Drains pending relay events, dispatches them, then ticks the game.
    #[instrument(skip(self))]
    pub fn update(&mut self) {
        self.pump_events();
        if let Some(game) = self.game.as_deref_mut() {
            game.update(&mut self.transport);
        }
    }

    /// Unwraps the adapter, returning the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
