//! Territory and score computation.
//!
//! For each player a flood fill starts from every border cell that is not one
//! of that player's walls and spreads orthogonally, blocked only by that
//! player's walls. Whatever the fill cannot reach, and is not the player's own
//! wall, is enclosed.
//!
//! Territory is sticky: enclosed cells are added to the player's territory
//! layer and stay there until the opponent builds a wall on them, even if the
//! enclosure is later broken. Territory that is no longer enclosed counts as
//! *open*, the rest as *closed*.
//!
//! The opponent's walls play no part in a player's fill.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Cardinal, Layer, Player, Position};

use super::config::ScoreWeights;

/// Score components of one player.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Number of the player's wall cells.
    pub walls: usize,
    /// Castles inside the current enclosure.
    pub castles: usize,
    /// Territory kept from earlier enclosures that is no longer enclosed.
    pub open_territory: usize,
    /// Cells inside the current enclosure.
    pub closed_territory: usize,
}

impl PlayerScore {
    #[must_use]
    pub fn territory(&self) -> usize {
        self.open_territory + self.closed_territory
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn weighted(&self, weights: &ScoreWeights) -> f32 {
        weights.alpha * self.walls as f32
            + weights.beta * self.castles as f32
            + weights.gamma * self.territory() as f32
    }
}

/// Score components of both players.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreState {
    players: [PlayerScore; 2],
}

impl ScoreState {
    #[must_use]
    pub fn player(&self, player: Player) -> &PlayerScore {
        &self.players[player.index()]
    }

    /// Weighted score of both players, indexed by [`Player::index`].
    #[must_use]
    pub fn weighted(&self, weights: &ScoreWeights) -> [f32; 2] {
        self.players.map(|s| s.weighted(weights))
    }

    /// `player`'s weighted score minus the opponent's.
    #[must_use]
    pub fn differential(&self, player: Player, weights: &ScoreWeights) -> f32 {
        let scores = self.weighted(weights);
        scores[player.index()] - scores[player.opponent().index()]
    }
}

/// Recomputes both players' scores against the same board, updating their
/// territory layers.
pub fn recompute_scores(board: &mut Board) -> ScoreState {
    let scores = ScoreState {
        players: Player::ALL.map(|player| score_player(board, player)),
    };
    log::trace!(
        "rescored: {:?} / {:?}",
        scores.player(Player::First),
        scores.player(Player::Second)
    );
    scores
}

/// Recomputes `player`'s score and extends its territory with the cells it
/// currently encloses.
pub fn score_player(board: &mut Board, player: Player) -> PlayerScore {
    let reachable = outside_reachable(board, player);
    let opponent = player.opponent();

    let walls = board.walls(player).count();
    let closed_territory = board.cell_count() - reachable.count() - walls;

    let mut castles = 0;
    for row in 0..board.height() {
        for col in 0..board.width() {
            let pos = Position::new(row, col);
            if board.walls(opponent).get(pos) && board.territories(player).get(pos) {
                board.territories_mut(player).set(pos, false);
            }
            if !reachable.get(pos) && !board.walls(player).get(pos) {
                board.territories_mut(player).set(pos, true);
                if board.castles().get(pos) {
                    castles += 1;
                }
            }
        }
    }

    let open_territory = board.territories(player).count() - closed_territory;

    PlayerScore {
        walls,
        castles,
        open_territory,
        closed_territory,
    }
}

/// Cells reachable from the border without crossing `player`'s walls.
#[must_use]
pub fn outside_reachable(board: &Board, player: Player) -> Layer {
    let (height, width) = (board.height(), board.width());
    let walls = board.walls(player);
    let mut visited = Layer::new(height, width);
    let mut stack = Vec::with_capacity(2 * (height + width));

    let border = (0..height)
        .flat_map(|row| [Position::new(row, 0), Position::new(row, width - 1)])
        .chain((0..width).flat_map(|col| [Position::new(0, col), Position::new(height - 1, col)]));
    for pos in border {
        if !walls.get(pos) && !visited.get(pos) {
            visited.set(pos, true);
            stack.push(pos);
        }
    }

    while let Some(pos) = stack.pop() {
        for dir in Cardinal::ALL {
            let Some(next) = pos.offset(dir.to_direction(), height, width) else {
                continue;
            };
            if !walls.get(next) && !visited.get(next) {
                visited.set(next, true);
                stack.push(next);
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_scores_zero() {
        let mut board = Board::from_ascii(
            r"
            a....
            .....
            ....b
            ",
        );
        let scores = recompute_scores(&mut board);
        assert_eq!(*scores.player(Player::First), PlayerScore::default());
        assert_eq!(*scores.player(Player::Second), PlayerScore::default());
    }

    #[test]
    fn test_ring_encloses_interior() {
        let mut board = Board::from_ascii(
            r"
            .....
            ..#..
            .#C#.
            ..#..
            .....
            ",
        );
        let score = score_player(&mut board, Player::First);
        assert_eq!(
            score,
            PlayerScore {
                walls: 4,
                castles: 1,
                open_territory: 0,
                closed_territory: 1,
            }
        );
        assert!(board.territories(Player::First).get(Position::new(2, 2)));
        assert_eq!(score.weighted(&ScoreWeights::default()), 4.0 + 20.0 + 5.0);
    }

    #[test]
    fn test_opponent_walls_do_not_block_fill() {
        let mut board = Board::from_ascii(
            r"
            .....
            ..=..
            .=.=.
            ..=..
            .....
            ",
        );
        let first = score_player(&mut board, Player::First);
        assert_eq!(first.closed_territory, 0);
        let second = score_player(&mut board, Player::Second);
        assert_eq!(second.closed_territory, 1);
        assert_eq!(second.walls, 4);
    }

    #[test]
    fn test_border_walls_enclose_corner() {
        let mut board = Board::from_ascii(
            r"
            .#...
            ##...
            .....
            ",
        );
        // (0, 0) is cut off by walls, but as a border cell it seeds the fill
        let score = score_player(&mut board, Player::First);
        assert_eq!(score.closed_territory, 0);
    }

    #[test]
    fn test_territory_is_sticky_until_opponent_walls() {
        let mut board = Board::from_ascii(
            r"
            .....
            ..#..
            .#.#.
            ..#..
            .....
            ",
        );
        score_player(&mut board, Player::First);
        assert!(board.territories(Player::First).get(Position::new(2, 2)));

        // break the ring: the cell stays owned but becomes open territory
        board.walls_mut(Player::First).set(Position::new(1, 2), false);
        let score = score_player(&mut board, Player::First);
        assert_eq!(score.closed_territory, 0);
        assert_eq!(score.open_territory, 1);
        assert!(board.territories(Player::First).get(Position::new(2, 2)));

        // an opponent wall on the cell clears it
        board.walls_mut(Player::Second).set(Position::new(2, 2), true);
        let score = score_player(&mut board, Player::First);
        assert_eq!(score.open_territory, 0);
        assert!(!board.territories(Player::First).get(Position::new(2, 2)));
    }

    #[test]
    fn test_rescoring_is_idempotent() {
        let mut board = Board::from_ascii(
            r"
            ..#...
            .#.#..
            .#C.#.
            ..##=.
            ....==
            ",
        );
        let first = recompute_scores(&mut board);
        let snapshot = board.clone();
        let second = recompute_scores(&mut board);
        assert_eq!(first, second);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_differential() {
        let mut board = Board::from_ascii(
            r"
            #....
            .....
            ....=
            ....=
            ",
        );
        let scores = recompute_scores(&mut board);
        let weights = ScoreWeights::default();
        assert_eq!(scores.weighted(&weights), [1.0, 2.0]);
        assert_eq!(scores.differential(Player::First, &weights), -1.0);
        assert_eq!(scores.differential(Player::Second, &weights), 1.0);
    }
}
