//! Policies that pick an action for the acting agent from its observation.
//!
//! The engine is authoritative on legality: a policy may return any of the 13
//! action ids, and an illegal one simply passes the agent's turn.
//!
//! - [`RandomPolicy`] draws uniformly from all action ids.
//! - [`GreedyPolicy`] scores every valid action with a local wall-building
//!   heuristic and takes the best one.

use std::fmt;

use procon_engine::{Action, Observation};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

pub use self::{greedy::GreedyPolicy, random::RandomPolicy};

mod greedy;
mod random;

/// Chooses one action per call.
pub trait Policy: fmt::Debug + Send {
    /// Short identifier used in logs and match records.
    fn name(&self) -> &'static str;

    /// Picks an action for the agent described by `observation`.
    ///
    /// `epsilon` is the exploration rate; policies that do not explore ignore it.
    fn select_action(&mut self, observation: &Observation, epsilon: f32) -> Action;
}

/// Policies selectable by name.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr,
)]
pub enum PolicyKind {
    #[display("random")]
    Random,
    #[default]
    #[display("greedy")]
    Greedy,
}

impl PolicyKind {
    pub const ALL: [Self; 2] = [Self::Random, Self::Greedy];

    /// Creates the policy with its own generator seeded from `seed`.
    #[must_use]
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        let rng = Pcg32::seed_from_u64(seed);
        match self {
            Self::Random => Box::new(RandomPolicy::new(rng)),
            Self::Greedy => Box::new(GreedyPolicy::new(rng)),
        }
    }
}
