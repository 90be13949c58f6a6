//! Grid state engine for a two-player territory-capture game.
//!
//! Players take turns moving agents around a rectangular grid, building and
//! demolishing walls, and scoring points for walls, enclosed territory and
//! enclosed castles. See [`engine`] for the game flow and [`core`] for the
//! board data types.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Raised when an action id lies outside `0..Action::COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("action id {index} outside 0..{}", Action::COUNT)]
pub struct ActionIndexError {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: usize,
        max: usize,
    },
    #[display("{name} must be at least 1")]
    Zero { name: &'static str },
    #[display("not enough free cells: {required} required, {available} available")]
    NotEnoughCells { required: usize, available: usize },
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum StepError {
    #[display("invalid action: {_0}")]
    #[from]
    InvalidActionIndex(ActionIndexError),
    #[display("episode already finished")]
    EpisodeFinished,
}
