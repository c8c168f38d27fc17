//! Dots-and-boxes: claim boxes by drawing their fourth edge.

mod action;
mod game;
mod invariants;
mod rules;
mod types;

pub use action::{MOVE_TAG, Move};
pub use game::{DotsAndBoxes, GAME_ID, MAX_PLAYERS, parse_edge};
pub use invariants::{DotsAndBoxesInvariants, OwnedBoxesClosedInvariant, ScoresMatchOwnersInvariant};
pub use rules::{Scores, capture_boxes, cells_touching, evaluate};
pub use types::{Edge, EdgeBoard, LineColor, Orientation};
