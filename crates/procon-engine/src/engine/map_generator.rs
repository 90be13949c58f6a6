//! Random initial boards.
//!
//! Dimensions, turn budget and agent count are drawn uniformly from the
//! configured inclusive ranges. Castles, then ponds, then agents (alternating
//! player 0 / player 1) are placed on distinct cells sampled without
//! replacement. The exact centre cell of an odd×odd board is never used.
//!
//! Placement is not mirror-symmetric between the players.

use rand::{Rng, seq::SliceRandom as _};

use crate::{
    ConfigError,
    core::{Board, Player, Position},
};

use super::config::GameConfig;

/// A freshly generated board together with its episode parameters.
#[derive(Debug, Clone)]
pub struct GeneratedMap {
    pub board: Board,
    pub num_turns: usize,
    pub num_agents: usize,
    /// Agents of each player in placement order.
    pub agent_order: [Vec<Position>; 2],
}

/// Generates a random map from `config`.
///
/// Fails when `config` does not pass [`GameConfig::validate`], or with
/// [`ConfigError::NotEnoughCells`] when the drawn dimensions cannot hold the
/// requested castles, ponds and agents.
pub fn generate<R>(config: &GameConfig, rng: &mut R) -> Result<GeneratedMap, ConfigError>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let height = rng.random_range(config.height_min..=config.height_max);
    let width = rng.random_range(config.width_min..=config.width_max);
    let num_turns = rng.random_range(config.min_num_turns..=config.max_num_turns);
    let num_agents = rng.random_range(config.min_num_agents..=config.max_num_agents);

    let mut slots: Vec<Position> = (0..height)
        .flat_map(|row| (0..width).map(move |col| Position::new(row, col)))
        .filter(|pos| pos.row() != height - pos.row() - 1 || pos.col() != width - pos.col() - 1)
        .collect();

    let required = config.required_cells(num_agents);
    if required > slots.len() {
        return Err(ConfigError::NotEnoughCells {
            required,
            available: slots.len(),
        });
    }

    let (chosen, _) = slots.partial_shuffle(rng, required);
    let (castles, rest) = chosen.split_at(config.num_castles);
    let (ponds, agents) = rest.split_at(config.num_ponds);

    let mut board = Board::new(height, width);
    for &pos in castles {
        board.castles_mut().set(pos, true);
    }
    for &pos in ponds {
        board.ponds_mut().set(pos, true);
    }
    let mut agent_order = [Vec::with_capacity(num_agents), Vec::with_capacity(num_agents)];
    for pair in agents.chunks_exact(2) {
        for (player, &pos) in Player::ALL.into_iter().zip(pair) {
            board.agents_mut(player).set(pos, true);
            agent_order[player.index()].push(pos);
        }
    }

    log::debug!(
        "generated {height}x{width} map: {num_turns} turns, {num_agents} agents per player, {} castles, {} ponds",
        config.num_castles,
        config.num_ponds
    );

    Ok(GeneratedMap {
        board,
        num_turns,
        num_agents,
        agent_order,
    })
}
