use serde::{Deserialize, Serialize};

use crate::core::{Board, Player, Position};

/// Whose move it is and how many rounds remain.
///
/// Each player moves all of its agents in order, then the other player does
/// the same. One turn is one such exchange; `remaining_turns` drops when play
/// comes back to player 0.
///
/// The agent order is a snapshot: agents that move during a player's half of
/// the round keep their old coordinate in the order until the half completes,
/// at which point both players' orders are rebuilt from the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    current_player: Player,
    current_agent: usize,
    num_agents: usize,
    agent_order: [Vec<Position>; 2],
    remaining_turns: usize,
}

impl TurnState {
    /// Starts at player 0's first agent.
    ///
    /// # Panics
    ///
    /// Panics if the players have different agent counts or no agents.
    #[must_use]
    pub fn new(agent_order: [Vec<Position>; 2], remaining_turns: usize) -> Self {
        let num_agents = agent_order[0].len();
        assert!(num_agents > 0, "players must have at least one agent");
        assert_eq!(
            num_agents,
            agent_order[1].len(),
            "players must have the same number of agents"
        );
        Self {
            current_player: Player::First,
            current_agent: 0,
            num_agents,
            agent_order,
            remaining_turns,
        }
    }

    /// Like [`Self::new`], ordering the agents row-major as found on `board`.
    #[must_use]
    pub fn from_board(board: &Board, remaining_turns: usize) -> Self {
        Self::new(
            Player::ALL.map(|player| live_agent_order(board, player)),
            remaining_turns,
        )
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    #[must_use]
    pub fn current_agent(&self) -> usize {
        self.current_agent
    }

    #[must_use]
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    #[must_use]
    pub fn remaining_turns(&self) -> usize {
        self.remaining_turns
    }

    #[must_use]
    pub fn agent_order(&self, player: Player) -> &[Position] {
        &self.agent_order[player.index()]
    }

    /// Coordinate of the acting agent as recorded in the order snapshot.
    #[must_use]
    pub fn current_position(&self) -> Position {
        self.agent_order[self.current_player.index()][self.current_agent]
    }

    /// Checks whether `pos` holds an agent of either player in the order snapshot.
    #[must_use]
    pub fn is_ordered_agent_at(&self, pos: Position) -> bool {
        self.agent_order.iter().flatten().any(|p| *p == pos)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.remaining_turns == 0
    }

    /// Moves on to the next agent, switching players and rebuilding the order
    /// snapshot after the last agent.
    pub(crate) fn advance(&mut self, board: &Board) {
        self.current_agent = (self.current_agent + 1) % self.num_agents;
        if self.current_agent != 0 {
            return;
        }
        self.current_player = self.current_player.opponent();
        self.agent_order = Player::ALL.map(|player| live_agent_order(board, player));
        if self.current_player.is_first() {
            self.remaining_turns = self.remaining_turns.saturating_sub(1);
        }
    }

    pub(crate) fn switch_perspective(&mut self) {
        self.current_player = self.current_player.opponent();
    }
}

fn live_agent_order(board: &Board, player: Player) -> Vec<Position> {
    board.agents(player).positions().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_cycles_agents_then_players() {
        let board = Board::from_ascii(
            r"
            a..b
            ....
            a..b
            ",
        );
        let mut turn = TurnState::from_board(&board, 2);
        let mut visited = vec![];
        while !turn.is_terminal() {
            visited.push((turn.current_player(), turn.current_agent(), turn.remaining_turns()));
            turn.advance(&board);
        }
        assert_eq!(
            visited,
            [
                (Player::First, 0, 2),
                (Player::First, 1, 2),
                (Player::Second, 0, 2),
                (Player::Second, 1, 2),
                (Player::First, 0, 1),
                (Player::First, 1, 1),
                (Player::Second, 0, 1),
                (Player::Second, 1, 1),
            ]
        );
    }

    #[test]
    fn test_order_rebuilt_on_wraparound_only() {
        let mut board = Board::from_ascii(
            r"
            a..
            ...
            ..b
            ",
        );
        let mut turn = TurnState::from_board(&board, 5);
        assert_eq!(turn.current_position(), Position::new(0, 0));

        board.agents_mut(Player::First).set(Position::new(0, 0), false);
        board.agents_mut(Player::First).set(Position::new(1, 1), true);
        assert_eq!(turn.agent_order(Player::First), [Position::new(0, 0)]);

        turn.advance(&board);
        assert_eq!(turn.current_player(), Player::Second);
        assert_eq!(turn.agent_order(Player::First), [Position::new(1, 1)]);
        assert_eq!(turn.current_position(), Position::new(2, 2));
        assert!(turn.is_ordered_agent_at(Position::new(1, 1)));
        assert!(!turn.is_ordered_agent_at(Position::new(0, 0)));
    }

    #[test]
    #[should_panic(expected = "same number of agents")]
    fn test_unbalanced_agents_panic() {
        let _ = TurnState::new([vec![Position::new(0, 0)], vec![]], 1);
    }
}
