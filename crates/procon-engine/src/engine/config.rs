use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Weights combining the score components into one number.
///
/// `score = alpha * walls + beta * castles + gamma * (open + closed territory)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 20.0,
            gamma: 5.0,
        }
    }
}

/// Shape of the observation handed to policies.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationMode {
    /// A `(2 * obs_range - 1)` square window centred on the acting agent, 9 channels.
    #[default]
    Partial,
    /// The whole board, 8 channels.
    Full,
}

/// Parameters of an episode, read once at reset.
///
/// Key names follow the JSON map files used by the match tooling
/// (`height-min`, `min-num-turns`, ...). Missing keys take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GameConfig {
    pub height_min: usize,
    pub height_max: usize,
    pub width_min: usize,
    pub width_max: usize,
    pub min_num_turns: usize,
    pub max_num_turns: usize,
    pub num_castles: usize,
    pub num_ponds: usize,
    pub min_num_agents: usize,
    pub max_num_agents: usize,
    #[serde(alias = "obs_range")]
    pub obs_range: usize,
    pub weights: ScoreWeights,
    pub observation: ObservationMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height_min: 11,
            height_max: 15,
            width_min: 11,
            width_max: 15,
            min_num_turns: 30,
            max_num_turns: 60,
            num_castles: 2,
            num_ponds: 4,
            min_num_agents: 2,
            max_num_agents: 4,
            obs_range: 5,
            weights: ScoreWeights::default(),
            observation: ObservationMode::default(),
        }
    }
}

impl GameConfig {
    /// Checks bounds and that the worst case (smallest board, most agents) still
    /// leaves enough free cells for every castle, pond and agent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("height", self.height_min, self.height_max),
            ("width", self.width_min, self.width_max),
            ("turns", self.min_num_turns, self.max_num_turns),
            ("agents", self.min_num_agents, self.max_num_agents),
        ];
        for (name, min, max) in ranges {
            if min == 0 {
                return Err(ConfigError::Zero { name });
            }
            if min > max {
                return Err(ConfigError::InvertedRange { name, min, max });
            }
        }
        if self.obs_range == 0 {
            return Err(ConfigError::Zero { name: "obs-range" });
        }

        let required = self.required_cells(self.max_num_agents);
        let available = free_cell_count(self.height_min, self.width_min);
        if required > available {
            return Err(ConfigError::NotEnoughCells {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Cells needed for castles, ponds and `num_agents` agents per player.
    #[must_use]
    pub fn required_cells(&self, num_agents: usize) -> usize {
        self.num_castles + self.num_ponds + 2 * num_agents
    }

    /// Side length of the partial observation window.
    #[must_use]
    pub fn window_size(&self) -> usize {
        2 * self.obs_range - 1
    }
}

/// Cells available for placement on a `height`×`width` board.
///
/// The exact centre cell (which only exists when both sides are odd) is kept free.
#[must_use]
pub fn free_cell_count(height: usize, width: usize) -> usize {
    let centre = usize::from(height % 2 == 1 && width % 2 == 1);
    height * width - centre
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        GameConfig::default().validate().unwrap();
        assert_eq!(ScoreWeights::default().beta, 20.0);
    }

    #[test]
    fn test_inverted_range() {
        let config = GameConfig {
            width_min: 9,
            width_max: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                name: "width",
                min: 9,
                max: 5
            })
        );
    }

    #[test]
    fn test_zero_values() {
        let config = GameConfig {
            min_num_agents: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Zero { name: "agents" })
        );

        let config = GameConfig {
            obs_range: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_capacity_checked_against_worst_case() {
        let config = GameConfig {
            height_min: 3,
            height_max: 10,
            width_min: 3,
            width_max: 10,
            num_castles: 2,
            num_ponds: 2,
            min_num_agents: 1,
            max_num_agents: 3,
            ..GameConfig::default()
        };
        // 3x3 board keeps its centre free: 8 cells, 2 + 2 + 6 needed
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotEnoughCells {
                required: 10,
                available: 8
            })
        );
    }

    #[test]
    fn test_free_cell_count() {
        assert_eq!(free_cell_count(5, 5), 24);
        assert_eq!(free_cell_count(4, 5), 20);
        assert_eq!(free_cell_count(4, 4), 16);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: GameConfig = serde_json::from_str(
            r#"{"height-min": 5, "height-max": 6, "obs-range": 3, "weights": {"beta": 10}}"#,
        )
        .unwrap();
        assert_eq!(config.height_min, 5);
        assert_eq!(config.height_max, 6);
        assert_eq!(config.obs_range, 3);
        assert_eq!(config.weights.beta, 10.0);
        assert_eq!(config.weights.alpha, 1.0);
        assert_eq!(config.num_castles, GameConfig::default().num_castles);
        assert_eq!(config.window_size(), 5);
    }

    #[test]
    fn test_obs_range_snake_case_key() {
        let config: GameConfig =
            serde_json::from_str(r#"{"obs_range": 4, "num-ponds": 1}"#).unwrap();
        assert_eq!(config.obs_range, 4);
        assert_eq!(config.num_ponds, 1);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"obs-range\":4"));
    }

    #[test]
    fn test_observation_mode_names() {
        let mode: ObservationMode = serde_json::from_str(r#""full""#).unwrap();
        assert!(mode.is_full());
    }
}
