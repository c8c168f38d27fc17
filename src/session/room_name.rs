//! Room naming convention shared by the lobby and game selection.
//!
//! A room name may start with a bracketed game-type tag:
//!
//! ```text
//! [TicTacToe]Alice's room
//! ^^^^^^^^^^^--------------- tag "TicTacToe"
//!            ^^^^^^^^^^^^^^- title "Alice's room"
//! ```
//!
//! A name without a well-formed, non-empty tag has no game type and the whole
//! string is its title.

use tracing::instrument;

/// A room name split into its game tag and title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName {
    game_id: Option<String>,
    title: String,
}

impl RoomName {
    /// Creates a tagged room name.
    pub fn tagged(game_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            game_id: Some(game_id.into()),
            title: title.into(),
        }
    }

    /// Parses a raw room name.
    #[instrument]
    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix('[')
            && let Some((tag, title)) = rest.split_once(']')
            && !tag.is_empty()
            && !tag.contains('[')
        {
            return Self {
                game_id: Some(tag.to_string()),
                title: title.to_string(),
            };
        }
        Self {
            game_id: None,
            title: raw.to_string(),
        }
    }

    /// Game type carried by the tag, if any.
    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    /// Human-readable part of the name.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// True if the room is tagged with `game_id`.
    pub fn is_game(&self, game_id: &str) -> bool {
        self.game_id() == Some(game_id)
    }
}

impl std::fmt::Display for RoomName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.game_id {
            Some(tag) => write!(f, "[{}]{}", tag, self.title),
            None => write!(f, "{}", self.title),
        }
    }
}
