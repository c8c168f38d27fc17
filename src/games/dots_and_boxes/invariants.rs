//! Dots-and-boxes invariants, checked after every applied move in debug builds.

use super::{DotsAndBoxes, LineColor};
use crate::games::Invariant;
use strum::IntoEnumIterator;

/// Invariant: each score equals the number of boxes owned by that colour.
pub struct ScoresMatchOwnersInvariant;

impl Invariant<DotsAndBoxes> for ScoresMatchOwnersInvariant {
    fn holds(game: &DotsAndBoxes) -> bool {
        LineColor::iter().all(|color| game.scores.get(color) == game.board.owned_by(color))
    }

    fn description() -> &'static str {
        "Scores match the number of owned boxes"
    }
}

/// Invariant: only fully enclosed boxes have an owner.
pub struct OwnedBoxesClosedInvariant;

impl Invariant<DotsAndBoxes> for OwnedBoxesClosedInvariant {
    fn holds(game: &DotsAndBoxes) -> bool {
        game.board
            .cells()
            .filter(|cell| game.board.owner(*cell).is_some())
            .all(|cell| game.board.check_box_completion(cell))
    }

    fn description() -> &'static str {
        "Every owned box is enclosed by four lines"
    }
}

/// All dots-and-boxes invariants as a composable set.
pub type DotsAndBoxesInvariants = (ScoresMatchOwnersInvariant, OwnedBoxesClosedInvariant);
