//! Tile-grid collision map
//!
//! A rectangular grid of [`SolidEdges`], one entry per tile. This is the
//! standard [`CollisionOracle`] for tile-based levels. Cells outside the grid
//! are treated as open space.

use std::fmt;

use tilestep_math::{Rect, Vector};

use crate::body::BoundingBox;
use crate::collision::{CollisionOracle, SolidEdges};

/// Grid of per-tile collision edges
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileCollisionMap {
    width: usize,
    height: usize,
    /// Row-major: index = y * width + x
    tiles: Vec<SolidEdges>,
}

impl TileCollisionMap {
    /// Create an empty (fully open) map
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![SolidEdges::empty(); width * height],
        }
    }

    /// Build a map from ASCII rows
    ///
    /// - `.` or space: open
    /// - `#`: solid block
    /// - `=`: one-way platform (solid top only)
    /// - `|`: thin wall (solid left and right only)
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, TileMapError> {
        let width = rows
            .first()
            .map(|row| row.as_ref().chars().count())
            .ok_or(TileMapError::Empty)?;
        if width == 0 {
            return Err(TileMapError::Empty);
        }

        let mut map = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(TileMapError::RaggedRow { row: y, expected: width, found });
            }

            for (x, glyph) in row.chars().enumerate() {
                let edges = edges_for_glyph(glyph)
                    .ok_or(TileMapError::UnknownGlyph { row: y, column: x, glyph })?;
                map.tiles[y * width + x] = edges;
            }
        }

        Ok(map)
    }

    /// Width in tiles
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Collision edges of the tile at (x, y). Open outside the map.
    pub fn edges_at(&self, x: i32, y: i32) -> SolidEdges {
        self.index(x, y)
            .map(|i| self.tiles[i])
            .unwrap_or_else(SolidEdges::empty)
    }

    /// Set the collision edges of a tile
    ///
    /// Returns false (and changes nothing) if the tile is outside the map.
    pub fn set_edges(&mut self, x: i32, y: i32, edges: SolidEdges) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = edges;
                true
            }
            None => false,
        }
    }

    /// Set every tile covered by `area` (clipped to the map)
    pub fn fill_rect(&mut self, area: &Rect, edges: SolidEdges) {
        for y in area.top()..=area.bottom() {
            for x in area.left()..=area.right() {
                self.set_edges(x, y, edges);
            }
        }
    }

    /// Render the map back into ASCII rows. Edge combinations without a glyph become `#`.
    pub fn to_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|edges| glyph_for_edges(*edges)).collect())
            .collect()
    }

    fn any_in_row(&self, y: i32, left: i32, right: i32, edge: SolidEdges) -> bool {
        (left..=right).any(|x| self.edges_at(x, y).contains(edge))
    }

    fn any_in_column(&self, x: i32, top: i32, bottom: i32, edge: SolidEdges) -> bool {
        (top..=bottom).any(|y| self.edges_at(x, y).contains(edge))
    }

    /// Check whether any tile overlapped by `bbox` blocks from any side
    pub fn overlaps_solid(&self, bbox: &BoundingBox) -> bool {
        (bbox.top()..=bbox.bottom()).any(|y| {
            (bbox.left()..=bbox.right()).any(|x| !self.edges_at(x, y).is_empty())
        })
    }

    /// Bounds of the map as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(
            Vector::ZERO,
            tilestep_math::Size::new(self.width as i32, self.height as i32),
        )
    }
}

impl CollisionOracle for TileCollisionMap {
    fn is_touching_left_wall(&self, bbox: &BoundingBox) -> bool {
        self.any_in_column(bbox.left() - 1, bbox.top(), bbox.bottom(), SolidEdges::RIGHT)
    }

    fn is_touching_right_wall(&self, bbox: &BoundingBox) -> bool {
        self.any_in_column(bbox.right() + 1, bbox.top(), bbox.bottom(), SolidEdges::LEFT)
    }

    fn is_touching_ceiling(&self, bbox: &BoundingBox) -> bool {
        self.any_in_row(bbox.top() - 1, bbox.left(), bbox.right(), SolidEdges::BOTTOM)
    }

    fn is_on_solid_ground(&self, bbox: &BoundingBox) -> bool {
        self.any_in_row(bbox.bottom() + 1, bbox.left(), bbox.right(), SolidEdges::TOP)
    }
}

fn edges_for_glyph(glyph: char) -> Option<SolidEdges> {
    match glyph {
        '.' | ' ' => Some(SolidEdges::empty()),
        '#' => Some(SolidEdges::FULL),
        '=' => Some(SolidEdges::TOP),
        '|' => Some(SolidEdges::LEFT | SolidEdges::RIGHT),
        _ => None,
    }
}

fn glyph_for_edges(edges: SolidEdges) -> char {
    if edges.is_empty() {
        '.'
    } else if edges == SolidEdges::TOP {
        '='
    } else if edges == SolidEdges::LEFT | SolidEdges::RIGHT {
        '|'
    } else {
        '#'
    }
}

/// Error building a tile map from ASCII rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileMapError {
    /// No rows, or rows with no tiles
    Empty,
    /// A row's length differs from the first row's
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A character that does not name a tile
    UnknownGlyph { row: usize, column: usize, glyph: char },
}

impl fmt::Display for TileMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileMapError::Empty => write!(f, "Tile map has no tiles"),
            TileMapError::RaggedRow { row, expected, found } => write!(
                f,
                "Tile map row {} has {} tiles, expected {}",
                row, found, expected
            ),
            TileMapError::UnknownGlyph { row, column, glyph } => write!(
                f,
                "Unknown tile '{}' at row {}, column {}",
                glyph, row, column
            ),
        }
    }
}

impl std::error::Error for TileMapError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tilestep_math::Size;

    fn unit_box(x: i32, y: i32) -> BoundingBox {
        BoundingBox::new(Vector::new(x, y), Size::new(1, 1))
    }

    #[test]
    fn test_from_rows() {
        let map = TileCollisionMap::from_rows(&["..#", ".=|"]).unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.edges_at(0, 0), SolidEdges::empty());
        assert_eq!(map.edges_at(2, 0), SolidEdges::FULL);
        assert_eq!(map.edges_at(1, 1), SolidEdges::TOP);
        assert_eq!(map.edges_at(2, 1), SolidEdges::LEFT | SolidEdges::RIGHT);
    }

    #[test]
    fn test_out_of_bounds_is_open() {
        let map = TileCollisionMap::from_rows(&["##", "##"]).unwrap();
        assert!(map.edges_at(-1, 0).is_empty());
        assert!(map.edges_at(0, 2).is_empty());
        assert!(map.edges_at(2, 0).is_empty());
    }

    #[test]
    fn test_empty_rows_rejected() {
        let rows: [&str; 0] = [];
        assert_eq!(TileCollisionMap::from_rows(&rows), Err(TileMapError::Empty));
        assert_eq!(TileCollisionMap::from_rows(&[""]), Err(TileMapError::Empty));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = TileCollisionMap::from_rows(&["...", ".."]).unwrap_err();
        assert_eq!(err, TileMapError::RaggedRow { row: 1, expected: 3, found: 2 });
    }

    #[test]
    fn test_unknown_glyph_rejected() {
        let err = TileCollisionMap::from_rows(&["..x"]).unwrap_err();
        assert_eq!(err, TileMapError::UnknownGlyph { row: 0, column: 2, glyph: 'x' });
        assert!(format!("{}", err).contains("'x'"));
    }

    #[test]
    fn test_set_and_fill() {
        let mut map = TileCollisionMap::new(4, 4);
        assert!(map.set_edges(1, 1, SolidEdges::TOP));
        assert!(!map.set_edges(4, 0, SolidEdges::TOP));

        map.fill_rect(&Rect::new(Vector::new(2, 2), Size::new(5, 5)), SolidEdges::FULL);
        assert_eq!(map.edges_at(3, 3), SolidEdges::FULL);
        assert_eq!(map.edges_at(1, 1), SolidEdges::TOP);
        assert_eq!(map.to_rows(), vec!["....", ".=..", "..##", "..##"]);
    }

    #[test]
    fn test_ground_and_ceiling() {
        let map = TileCollisionMap::from_rows(&[
            "###",
            "...",
            "...",
            "=.#",
        ]).unwrap();

        assert!(map.is_on_solid_ground(&unit_box(0, 2)));
        assert!(!map.is_on_solid_ground(&unit_box(1, 2)));
        assert!(map.is_on_solid_ground(&unit_box(2, 2)));
        assert!(!map.is_on_solid_ground(&unit_box(0, 1)));

        assert!(map.is_touching_ceiling(&unit_box(1, 1)));
        assert!(!map.is_touching_ceiling(&unit_box(1, 2)));
    }

    #[test]
    fn test_wide_box_checks_every_column() {
        let map = TileCollisionMap::from_rows(&["...", "..#"]).unwrap();
        let wide = BoundingBox::new(Vector::new(0, 0), Size::new(3, 1));
        assert!(map.is_on_solid_ground(&wide));
    }

    #[test]
    fn test_walls() {
        let map = TileCollisionMap::from_rows(&["#..#"]).unwrap();
        assert!(map.is_touching_left_wall(&unit_box(1, 0)));
        assert!(!map.is_touching_right_wall(&unit_box(1, 0)));
        assert!(map.is_touching_right_wall(&unit_box(2, 0)));
        assert!(!map.is_touching_left_wall(&unit_box(2, 0)));
    }

    #[test]
    fn test_tall_box_checks_every_row() {
        let map = TileCollisionMap::from_rows(&["..", "..", ".#"]).unwrap();
        let tall = BoundingBox::new(Vector::new(0, 0), Size::new(1, 3));
        assert!(map.is_touching_right_wall(&tall));
    }

    #[test]
    fn test_one_way_platform_only_blocks_from_above() {
        let map = TileCollisionMap::from_rows(&["...", ".=.", "..."]).unwrap();
        assert!(map.is_on_solid_ground(&unit_box(1, 0)));
        assert!(!map.is_touching_ceiling(&unit_box(1, 2)));
        assert!(!map.is_touching_right_wall(&unit_box(0, 1)));
        assert!(!map.is_touching_left_wall(&unit_box(2, 1)));
    }

    #[test]
    fn test_thin_wall_has_no_footing() {
        let map = TileCollisionMap::from_rows(&["...", ".|."]).unwrap();
        assert!(map.is_touching_right_wall(&unit_box(0, 1)));
        assert!(!map.is_on_solid_ground(&unit_box(1, 0)));
    }

    #[test]
    fn test_overlaps_solid() {
        let map = TileCollisionMap::from_rows(&["..", ".="]).unwrap();
        assert!(!map.overlaps_solid(&unit_box(0, 0)));
        assert!(map.overlaps_solid(&BoundingBox::new(Vector::ZERO, Size::new(2, 2))));
    }

    #[test]
    fn test_bounds() {
        let map = TileCollisionMap::new(5, 3);
        assert_eq!(map.bounds().right(), 4);
        assert_eq!(map.bounds().bottom(), 2);
    }
}
