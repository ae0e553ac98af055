//! Border openings ("exits") on the four sides of a cave.
//!
//! Each side of an [`Exit`] is in one of three states:
//!
//! - [`ExitSide::Disabled`]: no opening, e.g. the edge of a tiled map.
//! - [`ExitSide::Free`]: openings are generated from the run's RNG.
//! - [`ExitSide::Fixed`]: exactly these along-edge offsets must be open,
//!   typically copied from a neighboring cave.
//!
//! Offsets run along the edge: `x` for [`Side::Top`] and [`Side::Bottom`],
//! `y` for [`Side::Left`] and [`Side::Right`].

use std::fmt;

use grotto_core::Point;

/// One of the four grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides, in resolution order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The facing side of the neighboring cell.
    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Number of tiles along this edge of a `width` x `height` grid.
    pub const fn edge_len(self, width: i32, height: i32) -> i32 {
        match self {
            Side::Top | Side::Bottom => width,
            Side::Left | Side::Right => height,
        }
    }

    /// The border tile at `offset` along this edge.
    pub const fn tile(self, offset: i32, width: i32, height: i32) -> Point {
        match self {
            Side::Top => Point::new(offset, height - 1),
            Side::Right => Point::new(width - 1, offset),
            Side::Bottom => Point::new(offset, 0),
            Side::Left => Point::new(0, offset),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        };
        f.write_str(name)
    }
}

/// Constraint on the openings of one side.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitSide {
    /// No openings on this side.
    Disabled,
    /// Generate openings on this side.
    #[default]
    Free,
    /// Open exactly these offsets.
    Fixed(Vec<i32>),
}

impl ExitSide {
    /// Constrain a side to `offsets`; an empty list leaves the side free.
    pub fn from_offsets(offsets: Vec<i32>) -> Self {
        if offsets.is_empty() {
            Self::Free
        } else {
            Self::Fixed(offsets)
        }
    }

    /// The open offsets, empty unless the side is fixed.
    pub fn offsets(&self) -> &[i32] {
        match self {
            Self::Fixed(v) => v,
            Self::Disabled | Self::Free => &[],
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}

impl From<Option<Vec<i32>>> for ExitSide {
    /// `None` disables the side; `Some` behaves like [`ExitSide::from_offsets`].
    fn from(offsets: Option<Vec<i32>>) -> Self {
        match offsets {
            None => Self::Disabled,
            Some(v) => Self::from_offsets(v),
        }
    }
}

/// Openings on all four sides of a cave.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exit {
    pub top: ExitSide,
    pub right: ExitSide,
    pub bottom: ExitSide,
    pub left: ExitSide,
}

impl Exit {
    /// Every side free.
    pub fn free() -> Self {
        Self::default()
    }

    /// Every side disabled.
    pub fn disabled() -> Self {
        Self {
            top: ExitSide::Disabled,
            right: ExitSide::Disabled,
            bottom: ExitSide::Disabled,
            left: ExitSide::Disabled,
        }
    }

    pub fn side(&self, side: Side) -> &ExitSide {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut ExitSide {
        match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        }
    }

    /// Shorthand for `self.side(side).offsets()`.
    pub fn offsets(&self, side: Side) -> &[i32] {
        self.side(side).offsets()
    }

    /// Border tiles of every fixed offset that fall inside a
    /// `width` x `height` grid.
    pub fn tiles(&self, width: i32, height: i32) -> Vec<Point> {
        let mut tiles = Vec::new();
        for side in Side::ALL {
            let len = side.edge_len(width, height);
            for &offset in self.offsets(side) {
                if (0..len).contains(&offset) {
                    tiles.push(side.tile(offset, width, height));
                }
            }
        }
        tiles
    }
}
