use std::path::PathBuf;

use chrono::Utc;
use procon_engine::Player;
use procon_policy::PolicyKind;
use rand::Rng as _;

use crate::{command::GameArg, record::MatchRecord, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    game: GameArg,
    /// Policy of player 0
    #[arg(long, default_value = "greedy")]
    first: PolicyKind,
    /// Policy of player 1
    #[arg(long, default_value = "random")]
    second: PolicyKind,
    /// Exploration rate passed to the policies
    #[arg(long, default_value_t = 0.0)]
    epsilon: f32,
    /// Save a match record (JSON) to this path
    #[arg(long)]
    record: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game,
        first,
        second,
        epsilon,
        record,
    } = arg;

    let mut episode = game.episode()?;
    let seed = episode.seed();
    let mut policy_seeds = seed.side_rng();
    let mut policies = [first, second].map(|kind| kind.build(policy_seeds.random()));

    eprintln!("Seed: {seed}");
    eprintln!("{}", episode.state().board());

    let actions = super::play_game(&mut episode, &mut policies, *epsilon, log::Level::Info)?;

    let scores = episode.state().scores();
    let outcome = episode.winner();
    eprintln!("{}", episode.state().board());
    for player in Player::ALL {
        let detail = episode.state().score_state().player(player);
        eprintln!(
            "{player} ({}): {:.1} (walls {}, castles {}, territory {} open / {} closed)",
            policies[player.index()].name(),
            scores[player.index()],
            detail.walls,
            detail.castles,
            detail.open_territory,
            detail.closed_territory,
        );
    }
    eprintln!("Result: {outcome}");

    if let Some(path) = record {
        let record = MatchRecord {
            seed,
            config: episode.config().clone(),
            played_at: Utc::now(),
            policies: policies.each_ref().map(|p| p.name().to_owned()),
            actions,
            scores,
            outcome,
        };
        Output::save_json(&record, Some(path.clone()))?;
        eprintln!("Match record saved to {}", path.display());
    }

    Ok(())
}
