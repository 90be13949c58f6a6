use std::collections::HashMap;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, StepError,
    core::{Action, Player},
};

use super::{
    config::GameConfig,
    game_state::GameState,
    map_generator,
    observation::Observation,
    rules::Effect,
    seed::EpisodeSeed,
};

/// Result of a finished game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    #[display("{_0} wins")]
    Winner(Player),
    #[display("draw")]
    Draw,
}

/// What a single [`Episode::step`] produced.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Observation for the next acting agent.
    pub observation: Observation,
    /// Shaped reward for the agent that just acted.
    pub reward: f32,
    pub terminal: bool,
    /// What the action did, `None` if it was rejected.
    pub effect: Option<Effect>,
}

impl StepOutcome {
    #[must_use]
    pub fn applied(&self) -> bool {
        self.effect.is_some()
    }
}

/// A sequence of games on random maps, driven one action at a time.
///
/// All randomness comes from a generator seeded with [`EpisodeSeed`], so a
/// seed, a configuration and a list of actions reproduce the same games.
#[derive(Debug, Clone)]
pub struct Episode {
    config: GameConfig,
    seed: EpisodeSeed,
    rng: Pcg32,
    state: GameState,
    visits: HashMap<u64, usize>,
}

impl Episode {
    /// Validates `config` and generates the first map.
    pub fn new(config: GameConfig, seed: EpisodeSeed) -> Result<Self, ConfigError> {
        let mut rng = seed.rng();
        let state = GameState::from_map(map_generator::generate(&config, &mut rng)?, &config);
        let mut episode = Self {
            config,
            seed,
            rng,
            state,
            visits: HashMap::new(),
        };
        episode.record_visit();
        Ok(episode)
    }

    /// Starts a new game on a freshly generated map and returns player 0's
    /// first observation.
    pub fn reset(&mut self) -> Result<Observation, ConfigError> {
        let map = map_generator::generate(&self.config, &mut self.rng)?;
        self.state = GameState::from_map(map, &self.config);
        self.visits.clear();
        log::debug!("episode {} reset", self.seed);
        Ok(self.record_visit())
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> EpisodeSeed {
        self.seed
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A standalone copy of the current state, for lookahead.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn observation(&self) -> Observation {
        self.state.observe(self.config.observation)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// How often an observation with this hash has been handed out since the
    /// last reset.
    #[must_use]
    pub fn visit_count(&self, hash: u64) -> usize {
        self.visits.get(&hash).copied().unwrap_or(0)
    }

    /// Plays the action with id `action_index` for the acting agent.
    pub fn step(&mut self, action_index: usize) -> Result<StepOutcome, StepError> {
        let action = Action::from_index(action_index)?;
        self.step_action(action)
    }

    /// Plays `action` for the acting agent.
    ///
    /// Rejected actions still pass the turn on and are rewarded like any other.
    pub fn step_action(&mut self, action: Action) -> Result<StepOutcome, StepError> {
        if self.state.is_terminal() {
            return Err(StepError::EpisodeFinished);
        }
        let player = self.state.current_player();
        let position = self.state.current_position();
        let old_diff = self.state.score_differential(player);

        let effect = self.state.step_action(action);

        let new_diff = self.state.score_differential(player);
        let destination = match effect {
            Some(Effect::Moved { to, .. }) => to,
            _ => position,
        };
        let board = self.state.board();
        let reward = shaped_reward(
            old_diff,
            new_diff,
            board.territories(player).get(destination),
            destination.is_border(board.height(), board.width()),
        );

        Ok(StepOutcome {
            observation: self.record_visit(),
            reward,
            terminal: self.state.is_terminal(),
            effect,
        })
    }

    /// Compares the weighted scores; meaningful once the game is terminal.
    #[must_use]
    pub fn winner(&self) -> Outcome {
        let [first, second] = self.state.scores();
        if first > second {
            Outcome::Winner(Player::First)
        } else if second > first {
            Outcome::Winner(Player::Second)
        } else {
            Outcome::Draw
        }
    }

    fn record_visit(&mut self) -> Observation {
        let observation = self.observation();
        *self.visits.entry(observation.hash()).or_default() += 1;
        observation
    }
}

/// Reward for one step, from the acting player's score differential before
/// and after the step and the cell the agent ended up on.
fn shaped_reward(old_diff: f32, new_diff: f32, own_territory: bool, on_border: bool) -> f32 {
    let mut reward = if new_diff > old_diff { 0.25 } else { -0.5 };
    if new_diff > old_diff {
        reward += new_diff - old_diff;
    } else if new_diff < old_diff {
        reward -= old_diff - new_diff;
    } else {
        reward -= 0.1;
    }
    reward += if own_territory { -0.25 } else { 0.15 };
    if on_border {
        reward -= 0.2;
    }
    reward
}
