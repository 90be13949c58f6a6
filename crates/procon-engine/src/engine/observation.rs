//! Views of the board handed to policies.
//!
//! Layers are ordered from the acting player's perspective (own layers first,
//! then the opponent's, then castles and ponds). A partial view crops a
//! `(2 * obs_range - 1)` square window centred on the acting agent; cells of
//! the window that fall off the board hold [`SENTINEL`] in every channel and
//! `0` in the trailing [`Channel::OnBoard`] mask.

use std::hash::{DefaultHasher, Hash as _, Hasher as _};

use crate::core::{Action, Board, Player, Position};

use super::{
    config::ObservationMode,
    rules::{self, WallLeniency},
    turn::TurnState,
};

/// Value of every channel at window cells outside the board.
pub const SENTINEL: i8 = -1;

/// Channels of [`Planes`], in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    OwnAgents,
    OwnWalls,
    OwnTerritory,
    OpponentAgents,
    OpponentWalls,
    OpponentTerritory,
    Castles,
    Ponds,
    /// `1` on real board cells, `0` on sentinel cells. Partial views only.
    OnBoard,
}

impl Channel {
    /// Channels present in every view.
    pub const BOARD: [Self; 8] = [
        Self::OwnAgents,
        Self::OwnWalls,
        Self::OwnTerritory,
        Self::OpponentAgents,
        Self::OpponentWalls,
        Self::OpponentTerritory,
        Self::Castles,
        Self::Ponds,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A `channels`×`height`×`width` tensor of small integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Planes {
    channels: usize,
    height: usize,
    width: usize,
    data: Vec<i8>,
}

impl Planes {
    #[must_use]
    pub fn new(channels: usize, height: usize, width: usize) -> Self {
        Self {
            channels,
            height,
            width,
            data: vec![0; channels * height * width],
        }
    }

    #[must_use]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn offset(&self, channel: usize, row: usize, col: usize) -> usize {
        assert!(
            channel < self.channels && row < self.height && col < self.width,
            "({channel}, {row}, {col}) outside {}x{}x{} planes",
            self.channels,
            self.height,
            self.width
        );
        (channel * self.height + row) * self.width + col
    }

    #[must_use]
    pub fn has_channel(&self, channel: Channel) -> bool {
        channel.index() < self.channels
    }

    #[inline]
    #[must_use]
    pub fn get(&self, channel: Channel, row: usize, col: usize) -> i8 {
        self.data[self.offset(channel.index(), row, col)]
    }

    #[inline]
    pub fn set(&mut self, channel: Channel, row: usize, col: usize, value: i8) {
        let i = self.offset(channel.index(), row, col);
        self.data[i] = value;
    }

    /// Row-major cells of one channel.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> &[i8] {
        let len = self.height * self.width;
        let start = channel.index() * len;
        &self.data[start..start + len]
    }

    /// All values, channel-major then row-major.
    #[must_use]
    pub fn as_slice(&self) -> &[i8] {
        &self.data
    }

    /// Rotates every channel `quarter_turns` times counter-clockwise.
    ///
    /// A cell `(r, c)` lands on `(width - 1 - c, r)`, and height and width swap.
    #[must_use]
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        let mut planes = self.clone();
        for _ in 0..quarter_turns % 4 {
            planes = planes.rotated_once();
        }
        planes
    }

    fn rotated_once(&self) -> Self {
        let mut out = Self::new(self.channels, self.width, self.height);
        for ch in 0..self.channels {
            for row in 0..self.height {
                for col in 0..self.width {
                    let dst = out.offset(ch, self.width - 1 - col, row);
                    out.data[dst] = self.data[self.offset(ch, row, col)];
                }
            }
        }
        out
    }

    /// Flips every channel left to right.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mut out = self.clone();
        for line in out.data.chunks_exact_mut(self.width.max(1)) {
            line.reverse();
        }
        out
    }
}

/// Which of the 13 action ids are currently legal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionMask([bool; Action::COUNT]);

impl ActionMask {
    #[must_use]
    pub fn get(&self, action: Action) -> bool {
        self.0[action.index()]
    }

    pub fn set(&mut self, action: Action, valid: bool) {
        self.0[action.index()] = valid;
    }

    pub fn iter_valid(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.get(*a))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|v| **v).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    #[must_use]
    pub fn as_array(&self) -> &[bool; Action::COUNT] {
        &self.0
    }
}

/// Everything a policy sees when choosing the acting agent's action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    player: Player,
    agent_index: usize,
    agent_position: Position,
    remaining_turns: usize,
    planes: Planes,
    valid_actions: ActionMask,
    hash: u64,
}

impl Observation {
    #[must_use]
    pub fn player(&self) -> Player {
        self.player
    }

    #[must_use]
    pub fn agent_index(&self) -> usize {
        self.agent_index
    }

    /// Board coordinate of the acting agent.
    #[must_use]
    pub fn agent_position(&self) -> Position {
        self.agent_position
    }

    #[must_use]
    pub fn remaining_turns(&self) -> usize {
        self.remaining_turns
    }

    #[must_use]
    pub fn planes(&self) -> &Planes {
        &self.planes
    }

    #[must_use]
    pub fn valid_actions(&self) -> &ActionMask {
        &self.valid_actions
    }

    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Whether the planes are a cropped window rather than the whole board.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.planes.has_channel(Channel::OnBoard)
    }

    /// Plane coordinate of the acting agent: the window centre for partial
    /// views, the board coordinate otherwise.
    #[must_use]
    pub fn focus(&self) -> Position {
        if self.is_partial() {
            Position::new(self.planes.height() / 2, self.planes.width() / 2)
        } else {
            self.agent_position
        }
    }
}

/// Builds the acting agent's observation.
#[must_use]
pub fn observe(
    board: &Board,
    turn: &TurnState,
    mode: ObservationMode,
    obs_range: usize,
) -> Observation {
    let player = turn.current_player();
    let full = board_planes(board, player);
    let planes = match mode {
        ObservationMode::Full => full,
        ObservationMode::Partial => crop(&full, turn.current_position(), obs_range),
    };
    Observation {
        player,
        agent_index: turn.current_agent(),
        agent_position: turn.current_position(),
        remaining_turns: turn.remaining_turns(),
        planes,
        valid_actions: valid_actions(board, turn),
        hash: transposition_hash(board, player),
    }
}

/// Valid actions under the strict rule, or under the relaxed rule if the
/// strict one leaves nothing.
#[must_use]
pub fn valid_actions(board: &Board, turn: &TurnState) -> ActionMask {
    let mask_for = |leniency| {
        let mut mask = ActionMask::default();
        for action in Action::ALL {
            mask.set(action, rules::is_valid_action(board, turn, action, leniency));
        }
        mask
    };
    let strict = mask_for(WallLeniency::Strict);
    if strict.is_empty() {
        log::trace!("no strictly valid action, relaxing own-wall rule");
        return mask_for(WallLeniency::Relaxed);
    }
    strict
}

/// Hash of the agent, wall, castle and territory layers as seen by `player`.
///
/// Boards that look the same from the acting player's side hash the same.
#[must_use]
pub fn transposition_hash(board: &Board, player: Player) -> u64 {
    let players = [player, player.opponent()];
    let mut hasher = DefaultHasher::new();
    board.height().hash(&mut hasher);
    board.width().hash(&mut hasher);
    for p in players {
        board.agents(p).cells().hash(&mut hasher);
    }
    for p in players {
        board.walls(p).cells().hash(&mut hasher);
    }
    board.castles().cells().hash(&mut hasher);
    for p in players {
        board.territories(p).cells().hash(&mut hasher);
    }
    hasher.finish()
}

fn board_planes(board: &Board, player: Player) -> Planes {
    let opponent = player.opponent();
    let layers = [
        board.agents(player),
        board.walls(player),
        board.territories(player),
        board.agents(opponent),
        board.walls(opponent),
        board.territories(opponent),
        board.castles(),
        board.ponds(),
    ];
    let mut planes = Planes::new(layers.len(), board.height(), board.width());
    for (channel, layer) in Channel::BOARD.into_iter().zip(layers) {
        for pos in layer.positions() {
            planes.set(channel, pos.row(), pos.col(), 1);
        }
    }
    planes
}

fn crop(full: &Planes, centre: Position, obs_range: usize) -> Planes {
    let size = 2 * obs_range - 1;
    let half = obs_range - 1;
    let mut window = Planes::new(Channel::BOARD.len() + 1, size, size);
    for row in 0..size {
        let src_row = (row + centre.row())
            .checked_sub(half)
            .filter(|r| *r < full.height());
        for col in 0..size {
            let src_col = (col + centre.col())
                .checked_sub(half)
                .filter(|c| *c < full.width());
            match src_row.zip(src_col) {
                Some((r, c)) => {
                    for channel in Channel::BOARD {
                        window.set(channel, row, col, full.get(channel, r, c));
                    }
                    window.set(Channel::OnBoard, row, col, 1);
                }
                None => {
                    for channel in Channel::BOARD {
                        window.set(channel, row, col, SENTINEL);
                    }
                }
            }
        }
    }
    window
}
