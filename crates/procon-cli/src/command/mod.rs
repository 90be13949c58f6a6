use std::path::PathBuf;

use clap::{Parser, Subcommand};
use procon_engine::{Episode, EpisodeSeed, GameConfig, ObservationMode};
use procon_policy::Policy;
use rand::Rng as _;

use crate::util;

use self::{arena::ArenaArg, play::PlayArg, show_map::ShowMapArg};

mod arena;
mod play;
mod show_map;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play one match between two policies
    Play(#[clap(flatten)] PlayArg),
    /// Play many matches and report win rates
    Arena(#[clap(flatten)] ArenaArg),
    /// Generate a map and print it
    ShowMap(#[clap(flatten)] ShowMapArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Arena(arg) => arena::run(&arg)?,
        Mode::ShowMap(arg) => show_map::run(&arg)?,
    }
    Ok(())
}

/// Options shared by every command that sets up an episode.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    /// Game configuration file (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Episode seed as 32 hex digits; random when omitted
    #[arg(long)]
    seed: Option<EpisodeSeed>,
    /// Observe the whole board instead of a window around the agent
    #[arg(long, default_value_t = false)]
    full: bool,
}

impl GameArg {
    pub(crate) fn config(&self) -> anyhow::Result<GameConfig> {
        let mut config = util::load_config(self.config.as_deref())?;
        if self.full {
            config.observation = ObservationMode::Full;
        }
        Ok(config)
    }

    pub(crate) fn seed(&self) -> EpisodeSeed {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    pub(crate) fn episode(&self) -> anyhow::Result<Episode> {
        let config = self.config()?;
        let seed = self.seed();
        Ok(Episode::new(config, seed)?)
    }
}

/// Plays the current game of `episode` to the end, logging every step at
/// `level`, and returns the action ids played.
pub(crate) fn play_game(
    episode: &mut Episode,
    policies: &mut [Box<dyn Policy>; 2],
    epsilon: f32,
    level: log::Level,
) -> anyhow::Result<Vec<usize>> {
    let mut actions = vec![];
    let mut observation = episode.observation();
    while !episode.is_terminal() {
        let player = observation.player();
        let policy = &mut policies[player.index()];
        let action = policy.select_action(&observation, epsilon);
        let outcome = episode.step_action(action)?;
        log::log!(
            level,
            "[{:3}] {player} ({}) agent {}: {:<9} applied={:<5} reward={:+.2}",
            observation.remaining_turns(),
            policy.name(),
            observation.agent_index(),
            action.to_string(),
            outcome.applied(),
            outcome.reward,
        );
        actions.push(action.index());
        observation = outcome.observation;
    }
    Ok(actions)
}
