use procon_engine::{Action, Observation};
use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::Policy;

/// Picks any of the 13 action ids with equal probability, legal or not.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(rng: Pcg32) -> Self {
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_action(&mut self, _observation: &Observation, _epsilon: f32) -> Action {
        Action::ALL[self.rng.random_range(0..Action::COUNT)]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use procon_engine::{Board, GameState, ObservationMode, ScoreWeights, TurnState};
    use rand::SeedableRng as _;

    use super::*;

    #[test]
    fn test_covers_every_action_id() {
        let board = Board::from_ascii(
            r"
            a..
            ...
            ..b
            ",
        );
        let turn = TurnState::from_board(&board, 1);
        let state = GameState::new(board, turn, ScoreWeights::default(), 2);
        let observation = state.observe(ObservationMode::Full);

        let mut policy = RandomPolicy::new(Pcg32::seed_from_u64(5));
        let seen: HashSet<_> = (0..500)
            .map(|_| policy.select_action(&observation, 0.0))
            .collect();
        assert_eq!(seen.len(), Action::COUNT);
    }
}
