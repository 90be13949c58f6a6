//! Action legality and board mutation.
//!
//! - **Move** needs an in-bounds target that holds no agent (neither in the
//!   order snapshot nor on the acting player's agent layer), no pond, no wall
//!   of either player and no castle.
//! - **Change** needs an in-bounds target that is neither castle, pond nor
//!   agent (per the order snapshot). Under [`WallLeniency::Strict`] the target
//!   must also not already carry the acting player's wall.
//! - **Stay** is never valid.
//!
//! Applying an action always uses [`WallLeniency::Relaxed`], so an agent may
//! demolish its own wall even though the strict check (used for the action
//! mask handed to policies) reports that as invalid.

use crate::core::{Action, Board, Position};

use super::turn::TurnState;

/// How a Change onto the acting player's own wall is judged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum WallLeniency {
    /// Own walls are not valid Change targets.
    #[default]
    Strict,
    /// Own walls may be targeted (and thereby demolished).
    Relaxed,
}

/// What an applied action did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Effect {
    Moved { from: Position, to: Position },
    WallBuilt(Position),
    WallDemolished(Position),
}

impl Effect {
    /// Wall changes alter the flood fill and require rescoring; moves do not.
    #[must_use]
    pub fn is_structural(self) -> bool {
        !self.is_moved()
    }
}

/// Cell an action points at from the acting agent, if it lies on the board.
#[must_use]
pub fn target_of(board: &Board, turn: &TurnState, action: Action) -> Option<Position> {
    let direction = action.direction()?;
    turn.current_position()
        .offset(direction, board.height(), board.width())
}

/// Checks whether the acting agent may take `action`.
#[must_use]
pub fn is_valid_action(
    board: &Board,
    turn: &TurnState,
    action: Action,
    leniency: WallLeniency,
) -> bool {
    let Some(target) = target_of(board, turn, action) else {
        return false;
    };
    let player = turn.current_player();
    match action {
        Action::Move(_) => {
            !turn.is_ordered_agent_at(target)
                && !board.agents(player).get(target)
                && !board.ponds().get(target)
                && !board.is_walled(target)
                && !board.castles().get(target)
        }
        Action::Change(_) => {
            !board.castles().get(target)
                && !board.ponds().get(target)
                && !turn.is_ordered_agent_at(target)
                && (leniency.is_relaxed() || !board.walls(player).get(target))
        }
        Action::Stay => false,
    }
}

/// Validates `action` leniently and, if valid, applies it to `board`.
///
/// The turn pointer is left untouched.
pub(crate) fn resolve(board: &mut Board, turn: &TurnState, action: Action) -> Option<Effect> {
    if !is_valid_action(board, turn, action, WallLeniency::Relaxed) {
        return None;
    }
    let target = target_of(board, turn, action)?;
    let player = turn.current_player();
    let effect = match action {
        Action::Move(_) => {
            let from = turn.current_position();
            board.agents_mut(player).set(from, false);
            board.agents_mut(player).set(target, true);
            Effect::Moved { from, to: target }
        }
        Action::Change(_) if board.is_walled(target) => {
            for owner in crate::core::Player::ALL {
                board.walls_mut(owner).set(target, false);
            }
            Effect::WallDemolished(target)
        }
        Action::Change(_) => {
            board.walls_mut(player).set(target, true);
            Effect::WallBuilt(target)
        }
        Action::Stay => unreachable!("stay is never valid"),
    };
    Some(effect)
}
