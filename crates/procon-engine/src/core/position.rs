use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell coordinate on the board, `row` counted from the top and `col` from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the neighbouring cell in `direction`, or `None` if it would leave
    /// a `height`×`width` board.
    #[must_use]
    pub fn offset(self, direction: Direction, height: usize, width: usize) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < height && col < width).then_some(Self { row, col })
    }

    /// Checks whether the cell lies on the outermost ring of a `height`×`width` board.
    #[must_use]
    pub const fn is_border(self, height: usize, width: usize) -> bool {
        self.row == 0 || self.col == 0 || self.row + 1 == height || self.col + 1 == width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_in_bounds() {
        let pos = Position::new(0, 0);
        assert_eq!(pos.offset(Direction::Up, 3, 3), None);
        assert_eq!(pos.offset(Direction::Left, 3, 3), None);
        assert_eq!(pos.offset(Direction::DownRight, 3, 3), Some(Position::new(1, 1)));

        let corner = Position::new(2, 2);
        assert_eq!(corner.offset(Direction::Down, 3, 3), None);
        assert_eq!(corner.offset(Direction::UpLeft, 3, 3), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_is_border() {
        assert!(Position::new(0, 2).is_border(5, 5));
        assert!(Position::new(4, 2).is_border(5, 5));
        assert!(Position::new(2, 4).is_border(5, 5));
        assert!(!Position::new(2, 2).is_border(5, 5));
        // every cell of a single row board is on the border
        assert!(Position::new(0, 3).is_border(1, 7));
    }
}
