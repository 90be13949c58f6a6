//! Game rules on top of the [`crate::core`] data types.
//!
//! [`Episode`] is the entry point for playing: it generates maps
//! ([`map_generator`]), resolves actions ([`rules`]), rescores the board after
//! wall changes ([`scoring`]) and builds observations ([`observation`]).
//! [`GameState`] is the same state machine without map generation or reward
//! shaping, for lookahead and tests. [`symmetry`] is an offline transform over
//! recorded samples and takes no part in play.

pub use self::{
    config::*, episode::*, game_state::*, map_generator::GeneratedMap, observation::*, rules::*,
    scoring::*, seed::*, symmetry::*, turn::*,
};

pub(crate) mod config;
pub(crate) mod episode;
pub(crate) mod game_state;
pub mod map_generator;
pub(crate) mod observation;
pub(crate) mod rules;
pub(crate) mod scoring;
pub(crate) mod seed;
pub(crate) mod symmetry;
pub(crate) mod turn;
