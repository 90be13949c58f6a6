use std::fmt;

use serde::{Deserialize, Serialize};

use super::{layer::Layer, player::Player, position::Position};

/// The playing field: a set of equally sized [`Layer`]s.
///
/// Per-player layers are indexed by [`Player::index`].
///
/// - `agents` - at most one agent per cell across both players
/// - `walls` - a cell is walled by at most one player
/// - `territories` - cells a player has claimed; persists until the opponent walls it
/// - `castles`, `ponds` - fixed terrain, never changes after generation
///
/// # ASCII representation
///
/// [`Board::from_ascii`] and the [`Display`](fmt::Display) impl share one legend:
///
/// ```text
/// .  empty        a  agent of player 0   #  wall of player 0   +  territory of player 0
/// C  castle       b  agent of player 1   =  wall of player 1   -  territory of player 1
/// ~  pond                                                       *  territory of both
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    height: usize,
    width: usize,
    agents: [Layer; 2],
    walls: [Layer; 2],
    territories: [Layer; 2],
    castles: Layer,
    ponds: Layer,
}

impl Board {
    /// Creates an empty `height`×`width` board.
    #[must_use]
    pub fn new(height: usize, width: usize) -> Self {
        let layer = Layer::new(height, width);
        Self {
            height,
            width,
            agents: [layer.clone(), layer.clone()],
            walls: [layer.clone(), layer.clone()],
            territories: [layer.clone(), layer.clone()],
            castles: layer.clone(),
            ponds: layer,
        }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row() < self.height && pos.col() < self.width
    }

    #[must_use]
    pub fn agents(&self, player: Player) -> &Layer {
        &self.agents[player.index()]
    }

    #[must_use]
    pub fn walls(&self, player: Player) -> &Layer {
        &self.walls[player.index()]
    }

    #[must_use]
    pub fn territories(&self, player: Player) -> &Layer {
        &self.territories[player.index()]
    }

    #[must_use]
    pub fn castles(&self) -> &Layer {
        &self.castles
    }

    #[must_use]
    pub fn ponds(&self) -> &Layer {
        &self.ponds
    }

    pub(crate) fn agents_mut(&mut self, player: Player) -> &mut Layer {
        &mut self.agents[player.index()]
    }

    pub(crate) fn walls_mut(&mut self, player: Player) -> &mut Layer {
        &mut self.walls[player.index()]
    }

    pub(crate) fn territories_mut(&mut self, player: Player) -> &mut Layer {
        &mut self.territories[player.index()]
    }

    pub(crate) fn castles_mut(&mut self) -> &mut Layer {
        &mut self.castles
    }

    pub(crate) fn ponds_mut(&mut self) -> &mut Layer {
        &mut self.ponds
    }

    /// Checks whether either player has a wall at `pos`.
    #[must_use]
    pub fn is_walled(&self, pos: Position) -> bool {
        self.walls.iter().any(|w| w.get(pos))
    }

    /// Checks whether either player has an agent at `pos`.
    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.agents.iter().any(|a| a.get(pos))
    }

    /// Creates a board from ASCII art (see the type-level legend).
    ///
    /// Whitespace is ignored, so the art can be indented.
    ///
    /// # Panics
    ///
    /// Panics on unknown characters or ragged rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<Vec<char>> = art
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut board = Self::new(height, width);

        for (y, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {y}",
                row.len()
            );
            for (x, &ch) in row.iter().enumerate() {
                let pos = Position::new(y, x);
                match ch {
                    '.' => {}
                    'a' => board.agents[0].set(pos, true),
                    'b' => board.agents[1].set(pos, true),
                    '#' => board.walls[0].set(pos, true),
                    '=' => board.walls[1].set(pos, true),
                    '+' => board.territories[0].set(pos, true),
                    '-' => board.territories[1].set(pos, true),
                    '*' => {
                        board.territories[0].set(pos, true);
                        board.territories[1].set(pos, true);
                    }
                    'C' => board.castles.set(pos, true),
                    '~' => board.ponds.set(pos, true),
                    _ => panic!("unknown board cell {ch:?} at ({y}, {x})"),
                }
            }
        }
        board
    }

    fn cell_char(&self, pos: Position) -> char {
        if self.agents[0].get(pos) {
            'a'
        } else if self.agents[1].get(pos) {
            'b'
        } else if self.walls[0].get(pos) {
            '#'
        } else if self.walls[1].get(pos) {
            '='
        } else if self.castles.get(pos) {
            'C'
        } else if self.ponds.get(pos) {
            '~'
        } else {
            match (self.territories[0].get(pos), self.territories[1].get(pos)) {
                (true, true) => '*',
                (true, false) => '+',
                (false, true) => '-',
                (false, false) => '.',
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            let line: String = (0..self.width)
                .map(|col| self.cell_char(Position::new(row, col)))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii_layers() {
        let board = Board::from_ascii(
            r"
            a.#C
            ~=.b
            +-*.
            ",
        );
        assert_eq!(board.height(), 3);
        assert_eq!(board.width(), 4);
        assert!(board.agents(Player::First).get(Position::new(0, 0)));
        assert!(board.agents(Player::Second).get(Position::new(1, 3)));
        assert!(board.walls(Player::First).get(Position::new(0, 2)));
        assert!(board.walls(Player::Second).get(Position::new(1, 1)));
        assert!(board.castles().get(Position::new(0, 3)));
        assert!(board.ponds().get(Position::new(1, 0)));
        assert!(board.territories(Player::First).get(Position::new(2, 0)));
        assert!(board.territories(Player::Second).get(Position::new(2, 1)));
        assert!(board.territories(Player::First).get(Position::new(2, 2)));
        assert!(board.territories(Player::Second).get(Position::new(2, 2)));
        assert!(board.is_walled(Position::new(1, 1)));
        assert!(board.is_occupied(Position::new(1, 3)));
        assert!(!board.is_occupied(Position::new(1, 2)));
    }

    #[test]
    fn test_display_matches_ascii() {
        let art = "a.#C\n~=.b\n+-*.\n";
        let board = Board::from_ascii(art);
        assert_eq!(board.to_string(), art);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::from_ascii("a..\n...\n..b");
        let mut copy = board.clone();
        copy.walls_mut(Player::First).set(Position::new(1, 1), true);
        assert!(!board.is_walled(Position::new(1, 1)));
        assert!(copy.is_walled(Position::new(1, 1)));
    }

    #[test]
    #[should_panic(expected = "unknown board cell")]
    fn test_from_ascii_rejects_unknown_cells() {
        let _ = Board::from_ascii("a?b");
    }
}
