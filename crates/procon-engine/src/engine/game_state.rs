use crate::core::{Action, Board, Player, Position};

use super::{
    config::{GameConfig, ObservationMode, ScoreWeights},
    map_generator::GeneratedMap,
    observation::{self, Observation},
    rules::{self, Effect, WallLeniency},
    scoring::{self, ScoreState},
    turn::TurnState,
};

/// The complete state of a game in progress.
///
/// Board, turn pointer and scores are owned values; [`Clone`] produces a fully
/// independent copy suitable for lookahead or opponent-perspective views.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    turn: TurnState,
    scores: ScoreState,
    weights: ScoreWeights,
    obs_range: usize,
}

impl GameState {
    /// Creates a state and scores the board as given.
    #[must_use]
    pub fn new(mut board: Board, turn: TurnState, weights: ScoreWeights, obs_range: usize) -> Self {
        let scores = scoring::recompute_scores(&mut board);
        Self {
            board,
            turn,
            scores,
            weights,
            obs_range,
        }
    }

    /// Starts a game on a generated map, agents taking turns in placement order.
    #[must_use]
    pub fn from_map(map: GeneratedMap, config: &GameConfig) -> Self {
        let turn = TurnState::new(map.agent_order, map.num_turns);
        Self::new(map.board, turn, config.weights, config.obs_range)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn score_state(&self) -> &ScoreState {
        &self.scores
    }

    #[must_use]
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.turn.current_player()
    }

    /// Board coordinate of the acting agent as recorded in the turn order.
    #[must_use]
    pub fn current_position(&self) -> Position {
        self.turn.current_position()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.turn.is_terminal()
    }

    #[must_use]
    pub fn is_valid_action(&self, action: Action, leniency: WallLeniency) -> bool {
        rules::is_valid_action(&self.board, &self.turn, action, leniency)
    }

    /// Applies `action` for the acting agent and moves the turn pointer on.
    ///
    /// The pointer advances whether or not the action was accepted. Returns
    /// what the action did, or `None` if it was rejected.
    pub fn step_action(&mut self, action: Action) -> Option<Effect> {
        let player = self.turn.current_player();
        let agent = self.turn.current_agent();
        let effect = rules::resolve(&mut self.board, &self.turn, action);
        match effect {
            Some(effect) => {
                log::trace!("{player} agent {agent}: {action} -> {effect:?}");
                if effect.is_structural() {
                    self.scores = scoring::recompute_scores(&mut self.board);
                }
            }
            None => log::trace!("{player} agent {agent}: {action} rejected"),
        }
        self.turn.advance(&self.board);
        effect
    }

    /// Like [`Self::step_action`], reporting only whether the action applied.
    pub fn apply_action(&mut self, action: Action) -> bool {
        self.step_action(action).is_some()
    }

    #[must_use]
    pub fn observe(&self, mode: ObservationMode) -> Observation {
        observation::observe(&self.board, &self.turn, mode, self.obs_range)
    }

    /// Weighted score of both players, indexed by [`Player::index`].
    #[must_use]
    pub fn scores(&self) -> [f32; 2] {
        self.scores.weighted(&self.weights)
    }

    #[must_use]
    pub fn score_differential(&self, player: Player) -> f32 {
        self.scores.differential(player, &self.weights)
    }

    /// A copy in which the other player is to act, leaving the agent pointer
    /// where it is.
    #[must_use]
    pub fn to_opponent(&self) -> Self {
        let mut state = self.clone();
        state.turn.switch_perspective();
        state
    }

    #[must_use]
    pub fn transposition_hash(&self) -> u64 {
        observation::transposition_hash(&self.board, self.turn.current_player())
    }
}
