//! Strictly Duel library - turn-synchronized two-player board games
//!
//! Two participants in a relay room each run their own copy of a game. Every
//! accepted local move is broadcast as a tagged event and replayed on the
//! peer, so both boards stay identical as long as the relay delivers events
//! in order.
//!
//! # Architecture
//!
//! - **Games**: board storage, rule engines and turn coordination for
//!   tic-tac-toe and dots-and-boxes, behind the [`DuelGame`] capability trait
//! - **Session**: the relay interface ([`Transport`], [`RoomControl`]), the
//!   move codec and the [`SessionAdapter`] that routes relay events to a game
//! - **Lobby**: room discovery, and game selection from tagged room names
//!
//! # Example
//!
//! ```
//! use strictly_duel::{DuelConfig, Lobby, LoopbackHub, tictactoe};
//!
//! # fn example() -> Result<(), strictly_duel::LobbyError> {
//! let hub = LoopbackHub::new();
//! let mut host = Lobby::new(hub.client(), DuelConfig::default().with_display_name("alice"));
//! let mut guest = Lobby::new(hub.client(), DuelConfig::default().with_display_name("bob"));
//! host.connect()?;
//! guest.connect()?;
//!
//! let room = host.create_room(tictactoe::GAME_ID, "alice's room")?;
//! guest.join_room(&room)?;
//! host.update();
//! guest.update();
//! assert!(host.game().is_some_and(|game| game.is_local_turn()));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod error;
mod games;
mod lobby;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, DuelConfig};

// Crate-level exports - Errors
pub use error::{InputError, LobbyError, MoveError, PlayError, TransportError, WireError};

// Crate-level exports - Games
pub use games::{
    DuelGame, GameFactory, GameMetadata, GameRegistry, Grid, GridPos, Invariant, InvariantSet,
    InvariantViolation, Outcome, Phase, Side, TurnState, dots_and_boxes, tictactoe,
};

// Crate-level exports - Session plumbing
pub use session::{
    LocalPlayer, LoopbackClient, LoopbackHub, PlayerId, RoomControl, RoomEvent, RoomInfo,
    RoomName, SessionAdapter, Transport, WireMove,
};

// Crate-level exports - Lobby
pub use lobby::Lobby;
