use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::position::Position;

/// A `height`×`width` grid of flags, stored row-major.
///
/// Every board layer (agents, walls, territories, castles, ponds) is one `Layer`.
/// All layers of a board share the same dimensions; indexing a layer with a
/// position outside those dimensions is a programming error and panics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layer {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Layer {
    #[must_use]
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![false; height * width],
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

    #[inline]
    fn index(&self, pos: Position) -> usize {
        assert!(
            pos.row() < self.height && pos.col() < self.width,
            "position {pos:?} outside {}x{} layer",
            self.height,
            self.width
        );
        pos.row() * self.width + pos.col()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, pos: Position) -> bool {
        self.cells[self.index(pos)]
    }

    #[inline]
    pub fn set(&mut self, pos: Position, value: bool) {
        let i = self.index(pos);
        self.cells[i] = value;
    }

    /// Number of set cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Iterates over the set cells in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(move |(i, _)| Position::new(i / width, i % width))
    }

    /// Row-major view of all cells.
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Creates a layer from ASCII art: `#` is a set cell, `.` is a clear one.
    ///
    /// Blank lines and other characters are ignored, so art can be indented freely.
    ///
    /// # Panics
    ///
    /// Panics if rows have different lengths.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<Vec<bool>> = art
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|c| *c == '#' || *c == '.')
                    .map(|c| c == '#')
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();
        Self::from_rows(rows).unwrap_or_else(|e| panic!("{e}"))
    }

    fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, String> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(height * width);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                ));
            }
            cells.extend(row);
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }
}

impl Serialize for Layer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: ["#..#", ".##.", ...] one string per row
        let rows: Vec<String> = self
            .cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().map(|c| if *c { '#' } else { '.' }).collect())
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Layer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        let rows = rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.chars()
                    .map(|c| match c {
                        '#' => Ok(true),
                        '.' => Ok(false),
                        _ => Err(serde::de::Error::custom(format!(
                            "invalid cell {c:?} at row {y}"
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_count() {
        let mut layer = Layer::new(3, 4);
        assert_eq!(layer.count(), 0);
        layer.set(Position::new(1, 2), true);
        layer.set(Position::new(2, 3), true);
        assert!(layer.get(Position::new(1, 2)));
        assert!(!layer.get(Position::new(2, 2)));
        assert_eq!(layer.count(), 2);
        assert_eq!(
            layer.positions().collect::<Vec<_>>(),
            [Position::new(1, 2), Position::new(2, 3)]
        );
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_panics() {
        let layer = Layer::new(2, 2);
        let _ = layer.get(Position::new(2, 0));
    }

    #[test]
    fn test_from_ascii() {
        let layer = Layer::from_ascii(
            r"
            #..
            .#.
            ",
        );
        assert_eq!(layer.height(), 2);
        assert_eq!(layer.width(), 3);
        assert!(layer.get(Position::new(0, 0)));
        assert!(layer.get(Position::new(1, 1)));
        assert_eq!(layer.count(), 2);
    }

    #[test]
    fn test_serialization_format() {
        let layer = Layer::from_ascii(
            r"
            #.
            .#
            ..
            ",
        );
        let json = serde_json::to_string(&layer).unwrap();
        assert_eq!(json, r##"["#.",".#",".."]"##);
        let back: Layer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layer);
    }

    #[test]
    fn test_deserialize_rejects_ragged_rows() {
        let result: Result<Layer, _> = serde_json::from_str(r##"["#.", "#"]"##);
        assert!(result.unwrap_err().to_string().contains("row 1"));

        let result: Result<Layer, _> = serde_json::from_str(r#"["x."]"#);
        assert!(result.unwrap_err().to_string().contains("invalid cell"));
    }
}
