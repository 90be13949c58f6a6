use procon_engine::{Outcome, Player};
use procon_policy::PolicyKind;
use rand::Rng as _;

use crate::command::GameArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ArenaArg {
    #[clap(flatten)]
    game: GameArg,
    /// Number of matches to play
    #[arg(long, default_value_t = 100)]
    episodes: usize,
    /// Policy of player 0
    #[arg(long, default_value = "greedy")]
    first: PolicyKind,
    /// Policy of player 1
    #[arg(long, default_value = "random")]
    second: PolicyKind,
    /// Exploration rate passed to the policies
    #[arg(long, default_value_t = 0.0)]
    epsilon: f32,
}

#[derive(Debug, Default)]
struct Tally {
    wins: [usize; 2],
    draws: usize,
    score_sums: [f32; 2],
}

pub(crate) fn run(arg: &ArenaArg) -> anyhow::Result<()> {
    let ArenaArg {
        game,
        episodes,
        first,
        second,
        epsilon,
    } = arg;

    let mut episode = game.episode()?;
    let mut policy_seeds = episode.seed().side_rng();
    let mut policies = [first, second].map(|kind| kind.build(policy_seeds.random()));
    eprintln!("Seed: {}", episode.seed());

    let mut tally = Tally::default();
    for n in 0..*episodes {
        if n > 0 {
            episode.reset()?;
        }
        super::play_game(&mut episode, &mut policies, *epsilon, log::Level::Debug)?;
        let scores = episode.state().scores();
        let outcome = episode.winner();
        match outcome {
            Outcome::Winner(player) => tally.wins[player.index()] += 1,
            Outcome::Draw => tally.draws += 1,
        }
        for player in Player::ALL {
            tally.score_sums[player.index()] += scores[player.index()];
        }
        log::info!(
            "match {:3}: {:.1} - {:.1}, {outcome}",
            n + 1,
            scores[0],
            scores[1]
        );
    }

    #[expect(clippy::cast_precision_loss)]
    let count = (*episodes).max(1) as f32;
    eprintln!("Matches: {episodes}");
    for player in Player::ALL {
        let i = player.index();
        eprintln!(
            "  {player} ({}): {} wins, mean score {:.2}",
            policies[i].name(),
            tally.wins[i],
            tally.score_sums[i] / count,
        );
    }
    eprintln!("  Draws: {}", tally.draws);

    Ok(())
}
