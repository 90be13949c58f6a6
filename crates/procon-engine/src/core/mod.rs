//! Plain board data: coordinates, directions, actions and grid layers.
//!
//! Nothing in this module knows the rules of the game; see [`crate::engine`].

pub use self::{action::*, board::*, direction::*, layer::*, player::*, position::*};

pub(crate) mod action;
pub(crate) mod board;
pub(crate) mod direction;
pub(crate) mod layer;
pub(crate) mod player;
pub(crate) mod position;
