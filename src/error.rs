//! Error types shared by every game variant.

use crate::games::GridPos;

/// Error that can occur when validating or applying a move.
///
/// Every variant is recoverable by ignoring it: a rejected local move is
/// never transmitted, and a rejected remote move is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The coordinate lies outside the fixed grid.
    #[display("Position {} is out of bounds", _0)]
    OutOfBounds(GridPos),

    /// The target cell or edge has already been filled.
    #[display("Position {} is already occupied", _0)]
    AlreadyOccupied(GridPos),

    /// The local participant tried to move on the opponent's turn.
    #[display("It's not your turn")]
    NotYourTurn,

    /// A move was attempted outside the active phase.
    #[display("Session is not active")]
    SessionNotActive,
}

impl std::error::Error for MoveError {}

/// Error produced while encoding or decoding a move payload.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum WireError {
    /// The event tag does not belong to this payload schema.
    #[display("Expected event tag {}, found {}", expected, found)]
    UnexpectedTag {
        /// Tag this schema is registered under.
        expected: u8,
        /// Tag carried by the event.
        found: u8,
    },

    /// Serialization failed.
    #[display("Failed to encode payload: {}", _0)]
    Encode(String),

    /// Deserialization failed.
    #[display("Failed to decode payload: {}", _0)]
    Decode(String),

    /// A one-byte enum carried an unknown discriminant.
    #[display("Invalid discriminant {}", _0)]
    InvalidDiscriminant(u8),
}

impl std::error::Error for WireError {}

/// Error produced when textual local input cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InputError {
    /// The line did not match the variant's input grammar.
    #[display("Cannot parse input {:?}", _0)]
    Unparsable(String),
}

impl std::error::Error for InputError {}

/// Error reported by a relay transport.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TransportError {
    /// The operation needs a connection to the relay.
    #[display("Not connected to the relay")]
    NotConnected,

    /// The operation needs the local participant to be in a room.
    #[display("Not in a room")]
    NotInRoom,

    /// The local participant is already in a room.
    #[display("Already in room {:?}", _0)]
    AlreadyInRoom(String),

    /// A room with this name already exists.
    #[display("Room {:?} already exists", _0)]
    RoomExists(String),

    /// No room with this name exists.
    #[display("Room {:?} not found", _0)]
    RoomNotFound(String),

    /// The room is at capacity.
    #[display("Room {:?} is full", _0)]
    RoomFull(String),

    /// The room no longer accepts joiners.
    #[display("Room {:?} is closed", _0)]
    RoomClosed(String),
}

impl std::error::Error for TransportError {}

/// Error that can occur when a local move is played.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum PlayError {
    /// The move was rejected before transmission.
    #[display("Move rejected: {}", _0)]
    Move(MoveError),

    /// The move could not be encoded for transmission.
    #[display("Move not sent: {}", _0)]
    Wire(WireError),
}

impl std::error::Error for PlayError {}

/// Error raised by the lobby while creating or joining rooms.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum LobbyError {
    /// No factory is registered under this game id.
    #[display("Game {:?} not found in registry", _0)]
    #[from(ignore)]
    UnknownGame(String),

    /// The room name carries no game-type tag.
    #[display("Room {:?} has no game tag", _0)]
    #[from(ignore)]
    MissingGameTag(String),

    /// The relay rejected the request.
    #[display("Transport error: {}", _0)]
    Transport(TransportError),
}

impl std::error::Error for LobbyError {}
