//! The binary tile grid a cave is carved into.
//!
//! [`Tile`] is a newtype over `u8` holding either [`Tile::FLOOR`] (0) or
//! [`Tile::WALL`] (1). [`Grid`] owns a row-major buffer of tiles with a
//! fixed size; row 0 is the bottom edge and `height - 1` the top edge.

use std::fmt;

use grotto_core::{Point, Range};

/// A single cave tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile(u8);

impl Tile {
    /// Open space.
    pub const FLOOR: Tile = Tile(0);
    /// Solid rock.
    pub const WALL: Tile = Tile(1);

    /// The raw value, 0 for floor and 1 for wall.
    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_wall(self) -> bool {
        self.0 == Self::WALL.0
    }

    pub const fn is_floor(self) -> bool {
        self.0 == Self::FLOOR.0
    }

    /// Floor for wall and wall for floor.
    pub const fn opposite(self) -> Tile {
        if self.is_wall() { Self::FLOOR } else { Self::WALL }
    }

    /// Character representation: `#` for walls, `.` for floor.
    pub const fn rune(self) -> char {
        if self.is_wall() { '#' } else { '.' }
    }
}

impl From<bool> for Tile {
    /// `true` is a wall.
    fn from(wall: bool) -> Self {
        if wall { Self::WALL } else { Self::FLOOR }
    }
}

impl From<Tile> for u8 {
    fn from(t: Tile) -> Self {
        t.0
    }
}

/// A fixed-size 2D grid of [`Tile`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    tiles: Vec<Tile>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid filled with floor.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            tiles: vec![Tile::FLOOR; bounds.len()],
            bounds,
        }
    }

    /// Returns the bounding range of the grid.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Returns the size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether the grid contains the given point.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Whether `p` is on the outer edge of the grid.
    pub fn is_border(&self, p: Point) -> bool {
        self.bounds.on_edge(p)
    }

    /// Get the tile at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// Set the tile at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
        }
    }

    /// Fill the entire grid with the given tile.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Count how many tiles equal the given tile.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }

    /// The raw row-major tile buffer (index `y * width + x`).
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The row-major buffer as 0/1 values.
    pub fn values(&self) -> Vec<u8> {
        self.tiles.iter().map(|t| t.value()).collect()
    }

    /// ASCII rows, top edge first.
    pub fn rows(&self) -> Vec<String> {
        let w = self.width().max(0) as usize;
        if w == 0 {
            return Vec::new();
        }
        self.tiles
            .chunks(w)
            .rev()
            .map(|row| row.iter().map(|t| t.rune()).collect())
            .collect()
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows().join("\n"))
    }
}
