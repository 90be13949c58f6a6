use chrono::{DateTime, Utc};
use procon_engine::{EpisodeSeed, GameConfig, Outcome};
use serde::{Deserialize, Serialize};

/// Everything needed to replay a match: replaying `actions` on an episode
/// created from `seed` and `config` reproduces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub seed: EpisodeSeed,
    pub config: GameConfig,
    pub played_at: DateTime<Utc>,
    /// Policy names, player 0 first.
    pub policies: [String; 2],
    /// Action ids in the order they were played.
    pub actions: Vec<usize>,
    pub scores: [f32; 2],
    pub outcome: Outcome,
}
