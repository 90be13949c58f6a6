use serde::{Deserialize, Serialize};

/// One of the eight compass directions an agent can move in.
///
/// The declaration order is the order of the move action ids (`0..8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Direction {
    #[display("U")]
    Up,
    #[display("D")]
    Down,
    #[display("L")]
    Left,
    #[display("R")]
    Right,
    #[display("UL")]
    UpLeft,
    #[display("UR")]
    UpRight,
    #[display("DL")]
    DownLeft,
    #[display("DR")]
    DownRight,
}

impl Direction {
    pub const LEN: usize = 8;
    pub const ALL: [Self; Self::LEN] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];

    /// Returns `(row, col)` displacement.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
            Self::DownLeft => (1, -1),
            Self::DownRight => (1, 1),
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction after rotating the board a quarter turn counter-clockwise.
    ///
    /// A cell `(r, c)` of an `h`×`w` grid lands on `(w - 1 - c, r)`, so a
    /// displacement `(dr, dc)` becomes `(-dc, dr)`: `L -> D -> R -> U -> L`.
    #[must_use]
    pub const fn rotated(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
            Self::UpLeft => Self::DownLeft,
            Self::DownLeft => Self::DownRight,
            Self::DownRight => Self::UpRight,
            Self::UpRight => Self::UpLeft,
        }
    }

    /// Direction after flipping the board left to right.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Up => Self::Up,
            Self::Down => Self::Down,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::UpLeft => Self::UpRight,
            Self::UpRight => Self::UpLeft,
            Self::DownLeft => Self::DownRight,
            Self::DownRight => Self::DownLeft,
        }
    }
}

/// One of the four orthogonal directions a wall can be built or demolished in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Cardinal {
    #[display("U")]
    Up,
    #[display("D")]
    Down,
    #[display("L")]
    Left,
    #[display("R")]
    Right,
}

impl Cardinal {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn to_direction(self) -> Direction {
        match self {
            Self::Up => Direction::Up,
            Self::Down => Direction::Down,
            Self::Left => Direction::Left,
            Self::Right => Direction::Right,
        }
    }

    /// See [`Direction::rotated`].
    #[must_use]
    pub const fn rotated(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    /// See [`Direction::mirrored`].
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Up => Self::Up,
            Self::Down => Self::Down,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_matches_delta_transform() {
        for dir in Direction::ALL {
            let (dr, dc) = dir.delta();
            assert_eq!(dir.rotated().delta(), (-dc, dr), "{dir}");
        }
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for dir in Direction::ALL {
            assert_eq!(dir.rotated().rotated().rotated().rotated(), dir);
        }
        for dir in Cardinal::ALL {
            assert_eq!(dir.rotated().rotated().rotated().rotated(), dir);
        }
    }

    #[test]
    fn test_mirror_negates_column() {
        for dir in Direction::ALL {
            let (dr, dc) = dir.delta();
            assert_eq!(dir.mirrored().delta(), (dr, -dc), "{dir}");
        }
        for dir in Cardinal::ALL {
            assert_eq!(dir.mirrored().to_direction(), dir.to_direction().mirrored());
            assert_eq!(dir.rotated().to_direction(), dir.to_direction().rotated());
        }
    }

    #[test]
    fn test_index_follows_action_order() {
        for (i, dir) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
        for (i, dir) in Cardinal::ALL.into_iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }
}
