use serde::{Deserialize, Serialize};

use crate::ActionIndexError;

use super::direction::{Cardinal, Direction};

/// An action taken by the acting agent.
///
/// The numeric ids are a stable contract shared with policies:
///
/// | ids     | action                                      |
/// |---------|---------------------------------------------|
/// | `0..8`  | `Move` in `U, D, L, R, UL, UR, DL, DR` order |
/// | `8..12` | `Change` (build/demolish) in `U, D, L, R`   |
/// | `12`    | `Stay`                                      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Action {
    #[display("Move({_0})")]
    Move(Direction),
    #[display("Change({_0})")]
    Change(Cardinal),
    #[display("Stay")]
    Stay,
}

impl Action {
    pub const COUNT: usize = Direction::LEN + Cardinal::LEN + 1;
    const CHANGE_OFFSET: usize = Direction::LEN;
    const STAY_INDEX: usize = Self::CHANGE_OFFSET + Cardinal::LEN;

    pub const ALL: [Self; Self::COUNT] = {
        let mut all = [Self::Stay; Self::COUNT];
        let mut i = 0;
        while i < Direction::LEN {
            all[i] = Self::Move(Direction::ALL[i]);
            i += 1;
        }
        let mut j = 0;
        while j < Cardinal::LEN {
            all[Self::CHANGE_OFFSET + j] = Self::Change(Cardinal::ALL[j]);
            j += 1;
        }
        all
    };

    pub fn from_index(index: usize) -> Result<Self, ActionIndexError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ActionIndexError { index })
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Move(dir) => dir.index(),
            Self::Change(dir) => Self::CHANGE_OFFSET + dir.index(),
            Self::Stay => Self::STAY_INDEX,
        }
    }

    /// Direction the action points at, `None` for `Stay`.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Move(dir) => Some(dir),
            Self::Change(dir) => Some(dir.to_direction()),
            Self::Stay => None,
        }
    }

    /// The same action seen on a board rotated `quarter_turns` times counter-clockwise.
    #[must_use]
    pub const fn rotated(self, quarter_turns: u8) -> Self {
        let mut action = self;
        let mut k = quarter_turns % 4;
        while k > 0 {
            action = match action {
                Self::Move(dir) => Self::Move(dir.rotated()),
                Self::Change(dir) => Self::Change(dir.rotated()),
                Self::Stay => Self::Stay,
            };
            k -= 1;
        }
        action
    }

    /// The same action seen on a board flipped left to right.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Move(dir) => Self::Move(dir.mirrored()),
            Self::Change(dir) => Self::Change(dir.mirrored()),
            Self::Stay => Self::Stay,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = ActionIndexError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for i in 0..Action::COUNT {
            let action = Action::from_index(i).unwrap();
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_stable_ids() {
        assert_eq!(Action::from_index(0).unwrap(), Action::Move(Direction::Up));
        assert_eq!(Action::from_index(7).unwrap(), Action::Move(Direction::DownRight));
        assert_eq!(Action::from_index(8).unwrap(), Action::Change(Cardinal::Up));
        assert_eq!(Action::from_index(11).unwrap(), Action::Change(Cardinal::Right));
        assert_eq!(Action::from_index(12).unwrap(), Action::Stay);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let err = Action::from_index(13).unwrap_err();
        assert_eq!(err.index, 13);
        assert!(Action::try_from(usize::MAX).is_err());
    }

    #[test]
    fn test_rotation_cycle() {
        let mut action = Action::Change(Cardinal::Left);
        let mut seen = vec![];
        for _ in 0..4 {
            seen.push(action);
            action = action.rotated(1);
        }
        assert_eq!(
            seen,
            [
                Action::Change(Cardinal::Left),
                Action::Change(Cardinal::Down),
                Action::Change(Cardinal::Right),
                Action::Change(Cardinal::Up),
            ]
        );
        assert_eq!(action, Action::Change(Cardinal::Left));
    }

    #[test]
    fn test_rotation_inverse() {
        for action in Action::ALL {
            for k in 0..4 {
                assert_eq!(action.rotated(k).rotated((4 - k) % 4), action);
            }
        }
    }

    #[test]
    fn test_stay_is_fixed_point() {
        assert_eq!(Action::Stay.rotated(1), Action::Stay);
        assert_eq!(Action::Stay.mirrored(), Action::Stay);
        assert_eq!(Action::Stay.direction(), None);
    }
}
