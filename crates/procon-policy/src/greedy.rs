//! A one-step heuristic that grows walls from the walls the player already has.
//!
//! Every valid action gets a score from the cells around its target, read off
//! the observation planes:
//!
//! - **Change** starts at `1.0` and gains `2.1` per own wall orthogonally next
//!   to the target and `2.9` per own wall diagonally next to it.
//! - **Move** onto own territory scores `-0.1`. A move onto a clear cell earns
//!   `0.5` per orthogonal own wall (unless the target is boxed in on all four
//!   sides), `0.5` per diagonal own wall and `0.1` for opponent territory, and
//!   loses `0.25` per neighbour on the edge of the view, `0.15` per pond and
//!   `0.05` per castle.
//! - **Stay** scores `-0.9`; invalid actions score `-1.0`.
//!
//! Ties are broken uniformly at random.

use arrayvec::ArrayVec;
use procon_engine::{Action, Cardinal, Channel, Direction, Observation, Planes, Position};
use rand::{Rng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

use crate::Policy;

const INVALID_SCORE: f32 = -1.0;
const STAY_SCORE: f32 = -0.9;

const DIAGONALS: [Direction; 4] = [
    Direction::UpLeft,
    Direction::UpRight,
    Direction::DownLeft,
    Direction::DownRight,
];

/// Greedy wall builder; with probability `epsilon` it plays a random valid action instead.
#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    rng: Pcg32,
}

impl GreedyPolicy {
    #[must_use]
    pub fn new(rng: Pcg32) -> Self {
        Self { rng }
    }

    /// Heuristic score of every action id.
    #[must_use]
    pub fn action_scores(observation: &Observation) -> [f32; Action::COUNT] {
        let planes = observation.planes();
        let focus = observation.focus();
        let mut scores = [INVALID_SCORE; Action::COUNT];
        for action in observation.valid_actions().iter_valid() {
            let target = action
                .direction()
                .and_then(|dir| focus.offset(dir, planes.height(), planes.width()));
            let Some(target) = target else {
                continue;
            };
            scores[action.index()] = match action {
                Action::Move(_) => move_score(planes, target),
                Action::Change(_) => change_score(planes, target),
                Action::Stay => continue,
            };
        }
        scores[Action::Stay.index()] = STAY_SCORE;
        scores
    }
}

impl Policy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select_action(&mut self, observation: &Observation, epsilon: f32) -> Action {
        if epsilon > 0.0 && self.rng.random_bool(f64::from(epsilon.min(1.0))) {
            let valid: ArrayVec<Action, { Action::COUNT }> =
                observation.valid_actions().iter_valid().collect();
            if let Some(action) = valid.choose(&mut self.rng) {
                return *action;
            }
        }

        let scores = Self::action_scores(observation);
        let best = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let candidates: ArrayVec<Action, { Action::COUNT }> = Action::ALL
            .into_iter()
            .filter(|a| scores[a.index()].total_cmp(&best).is_eq())
            .collect();
        candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Action::Stay)
    }
}

fn is_set(planes: &Planes, channel: Channel, pos: Position) -> bool {
    planes.get(channel, pos.row(), pos.col()) == 1
}

fn is_on_board(planes: &Planes, pos: Position) -> bool {
    !planes.has_channel(Channel::OnBoard) || is_set(planes, Channel::OnBoard, pos)
}

fn neighbours(
    planes: &Planes,
    pos: Position,
    directions: impl IntoIterator<Item = Direction>,
) -> impl Iterator<Item = Position> {
    let (height, width) = (planes.height(), planes.width());
    directions
        .into_iter()
        .filter_map(move |dir| pos.offset(dir, height, width))
}

fn count_own_walls(
    planes: &Planes,
    pos: Position,
    directions: impl IntoIterator<Item = Direction>,
) -> usize {
    neighbours(planes, pos, directions)
        .filter(|n| is_set(planes, Channel::OwnWalls, *n))
        .count()
}

fn orthogonal() -> impl Iterator<Item = Direction> {
    Cardinal::ALL.into_iter().map(Cardinal::to_direction)
}

#[expect(clippy::cast_precision_loss)]
fn move_score(planes: &Planes, target: Position) -> f32 {
    if is_set(planes, Channel::OwnTerritory, target) {
        return -0.1;
    }
    let blocked = [
        Channel::OwnWalls,
        Channel::OpponentWalls,
        Channel::Ponds,
        Channel::Castles,
    ]
    .into_iter()
    .any(|ch| is_set(planes, ch, target));
    if blocked || !is_on_board(planes, target) {
        return 0.0;
    }

    let (mut walls, mut edges, mut ponds, mut castles) = (0, 0, 0, 0);
    for n in neighbours(planes, target, orthogonal()) {
        walls += usize::from(is_set(planes, Channel::OwnWalls, n));
        edges += usize::from(n.is_border(planes.height(), planes.width()));
        ponds += usize::from(is_set(planes, Channel::Ponds, n));
        castles += usize::from(is_set(planes, Channel::Castles, n));
    }
    let mut score = 0.0;
    if walls + edges + ponds + castles < 4 {
        score += walls as f32 * 0.5;
    }
    score -= edges as f32 * 0.25 + ponds as f32 * 0.15 + castles as f32 * 0.05;
    score += count_own_walls(planes, target, DIAGONALS) as f32 * 0.5;
    if is_set(planes, Channel::OpponentTerritory, target) {
        score += 0.1;
    }
    score
}

#[expect(clippy::cast_precision_loss)]
fn change_score(planes: &Planes, target: Position) -> f32 {
    1.0 + count_own_walls(planes, target, orthogonal()) as f32 * 2.1
        + count_own_walls(planes, target, DIAGONALS) as f32 * 2.9
}

#[cfg(test)]
mod tests {
    use procon_engine::{Board, GameState, ObservationMode, ScoreWeights, TurnState};
    use rand::SeedableRng as _;

    use super::*;

    fn observe(art: &str, mode: ObservationMode) -> Observation {
        let board = Board::from_ascii(art);
        let turn = TurnState::from_board(&board, 1);
        GameState::new(board, turn, ScoreWeights::default(), 3).observe(mode)
    }

    #[test]
    fn test_extends_own_walls() {
        let art = r"
            .....
            .....
            ..a..
            ...#.
            ....b
        ";
        for mode in [ObservationMode::Partial, ObservationMode::Full] {
            let observation = observe(art, mode);
            let scores = GreedyPolicy::action_scores(&observation);
            assert!((scores[Action::Change(Cardinal::Down).index()] - 3.1).abs() < 1e-5);
            assert!((scores[Action::Change(Cardinal::Right).index()] - 3.1).abs() < 1e-5);
            assert!((scores[Action::Change(Cardinal::Up).index()] - 1.0).abs() < 1e-5);
            assert_eq!(scores[Action::Move(Direction::DownRight).index()], INVALID_SCORE);

            let mut policy = GreedyPolicy::new(Pcg32::seed_from_u64(1));
            for _ in 0..20 {
                let action = policy.select_action(&observation, 0.0);
                assert!(
                    action == Action::Change(Cardinal::Down)
                        || action == Action::Change(Cardinal::Right),
                    "{action}"
                );
            }
        }
    }

    #[test]
    fn test_stays_when_nothing_is_valid() {
        let observation = observe(
            r"
            ~~~
            ~a~
            ~~b
            ",
            ObservationMode::Partial,
        );
        assert_eq!(observation.valid_actions().count(), 0);
        let mut policy = GreedyPolicy::new(Pcg32::seed_from_u64(2));
        assert_eq!(policy.select_action(&observation, 0.0), Action::Stay);
        assert_eq!(policy.select_action(&observation, 1.0), Action::Stay);
    }

    #[test]
    fn test_exploration_stays_within_mask() {
        let observation = observe(
            r"
            ~....
            .a...
            ...C.
            ....b
            ",
            ObservationMode::Full,
        );
        let mut policy = GreedyPolicy::new(Pcg32::seed_from_u64(3));
        for _ in 0..50 {
            let action = policy.select_action(&observation, 1.0);
            assert!(observation.valid_actions().get(action), "{action}");
        }
    }

    #[test]
    fn test_own_territory_is_avoided() {
        let observation = observe(
            r"
            .....
            .+a..
            .....
            ....b
            ",
            ObservationMode::Full,
        );
        let scores = GreedyPolicy::action_scores(&observation);
        assert!((scores[Action::Move(Direction::Left).index()] + 0.1).abs() < 1e-5);
    }
}
