//! Relay session plumbing.
//!
//! The relay itself (connection handshakes, matchmaking, NAT traversal) is an
//! external collaborator reached through the [`Transport`] trait. Games only
//! ever see the narrower [`RoomControl`] capability.

mod adapter;
mod loopback;
mod room_name;
mod wire;

pub use adapter::SessionAdapter;
pub use loopback::{LoopbackClient, LoopbackHub};
pub use room_name::RoomName;
pub use wire::WireMove;

use crate::TransportError;
use serde::{Deserialize, Serialize};

/// Room-local identifier of a participant.
pub type PlayerId = u32;

/// A participant in the current room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalPlayer {
    /// Room-local ID.
    pub id: PlayerId,
    /// Display name.
    pub user_name: String,
    /// Whether this participant hosts the room.
    pub is_host: bool,
}

/// Public description of a room, as returned by room discovery.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct RoomInfo {
    /// Full room name, including any game tag.
    name: String,
    /// Current occupancy.
    players: usize,
    /// Capacity.
    max_players: usize,
    /// Whether the room still accepts joiners.
    open: bool,
}

impl RoomInfo {
    /// Creates a room description.
    pub fn new(name: impl Into<String>, players: usize, max_players: usize, open: bool) -> Self {
        Self {
            name: name.into(),
            players,
            max_players,
            open,
        }
    }

    /// True if another participant could join right now.
    pub fn is_joinable(&self) -> bool {
        self.open && self.players < self.max_players
    }
}

/// Membership and custom events delivered by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Someone (possibly the local participant) joined the current room.
    Joined {
        /// The participant who joined.
        player: LocalPlayer,
        /// True if the local participant is the one who joined.
        is_self: bool,
    },
    /// Another participant left the current room.
    Left {
        /// The participant who left.
        player: PlayerId,
    },
    /// The local participant left the room.
    SelfLeft,
    /// A game event sent by another participant.
    Custom {
        /// Sender's room-local ID.
        sender: PlayerId,
        /// Event tag identifying the payload schema.
        tag: u8,
        /// Serialized payload.
        payload: Vec<u8>,
    },
}

/// The slice of the transport a game is allowed to touch.
///
/// Games receive it per call and never own it.
pub trait RoomControl {
    /// Broadcasts a tagged payload to the other participants of the room.
    fn send_event(&mut self, tag: u8, payload: Vec<u8>);

    /// Shows or hides the room in room discovery.
    fn set_room_visible(&mut self, visible: bool);

    /// Opens or closes the room to new joiners.
    fn set_room_open(&mut self, open: bool);

    /// True if the local participant hosts the current room.
    fn is_host(&self) -> bool;
}

/// A relay connection, as consumed by the lobby and the session adapter.
///
/// Membership changes and inbound custom events are queued by the
/// transport and drained once per tick through [`Transport::poll_events`].
pub trait Transport: RoomControl {
    /// Connects to the relay under the given display name.
    fn connect(&mut self, display_name: &str, region: &str) -> Result<(), TransportError>;

    /// Disconnects from the relay, leaving any room first.
    fn disconnect(&mut self);

    /// True while connected.
    fn is_connected(&self) -> bool;

    /// Display name given at connect time.
    fn user_name(&self) -> &str;

    /// Lists the visible rooms.
    fn list_rooms(&self) -> Vec<RoomInfo>;

    /// Creates a room and joins it as host.
    fn create_room(&mut self, name: &str, max_players: usize) -> Result<(), TransportError>;

    /// Joins an existing room.
    fn join_room(&mut self, name: &str) -> Result<(), TransportError>;

    /// Leaves the current room.
    fn leave_room(&mut self) -> Result<(), TransportError>;

    /// Name of the current room, if any.
    fn current_room(&self) -> Option<String>;

    /// Participants of the current room.
    fn local_players(&self) -> Vec<LocalPlayer>;

    /// Drains the inbound event queue.
    fn poll_events(&mut self) -> Vec<RoomEvent>;
}
