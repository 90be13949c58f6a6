use std::path::PathBuf;

use procon_engine::Player;

use crate::{command::GameArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowMapArg {
    #[clap(flatten)]
    game: GameArg,
    /// Also write the board layers as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

pub(crate) fn run(arg: &ShowMapArg) -> anyhow::Result<()> {
    let ShowMapArg { game, json } = arg;

    let episode = game.episode()?;
    let state = episode.state();
    let board = state.board();

    println!("{board}");
    eprintln!("Seed: {}", episode.seed());
    eprintln!("Size: {}x{}", board.height(), board.width());
    eprintln!("Turns: {}", state.turn().remaining_turns());
    eprintln!("Agents per player: {}", state.turn().num_agents());
    for player in Player::ALL {
        let order = state.turn().agent_order(player);
        let cells: Vec<_> = order
            .iter()
            .map(|pos| format!("({}, {})", pos.row(), pos.col()))
            .collect();
        eprintln!("  {player}: {}", cells.join(", "));
    }

    if let Some(path) = json {
        let path = (path.as_os_str() != "-").then(|| path.clone());
        Output::save_json(board, path)?;
    }

    Ok(())
}
