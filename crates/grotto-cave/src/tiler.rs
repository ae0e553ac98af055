//! Tiled maps of interlocking caves.
//!
//! A [`CaveMap`] is a grid of caves. Cells are generated in row-major order
//! starting at the bottom-left, and each cell copies the exits of the
//! neighbors already generated (left and below) onto its facing sides, so
//! openings line up across cell edges.

use grotto_core::Point;
use rand::{Rng, RngExt};

use crate::cave::Cave;
use crate::config::CaveConfig;
use crate::error::ConfigError;
use crate::exit::{Exit, ExitSide, Side};
use crate::grid::Grid;
use crate::rng::{Seed, resolve_seed};

/// A `width` x `height` map of caves, `(0, 0)` at the bottom-left.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaveMap {
    width: i32,
    height: i32,
    cells: Vec<Cave>,
}

impl CaveMap {
    /// Generate a map, picking a preset from `presets` for every cell.
    ///
    /// The map size, the pool and every preset are validated before any
    /// cell is generated. Presets are picked uniformly from a generator
    /// seeded by `seed`, which also hands out one sub-seed per cell.
    pub fn generate(
        width: i32,
        height: i32,
        presets: &[CaveConfig],
        seed: Option<&Seed>,
    ) -> Result<CaveMap, ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::EmptyMap { width, height });
        }
        let Some(cells) = width.checked_mul(height) else {
            return Err(ConfigError::MapTooLarge { width, height });
        };
        if presets.is_empty() {
            return Err(ConfigError::EmptyPresetPool);
        }
        for (index, preset) in presets.iter().enumerate() {
            preset.validate().map_err(|e| ConfigError::InvalidPreset {
                index,
                source: Box::new(e),
            })?;
        }

        let mut rng = Seed::Number(resolve_seed(&[seed])).rng();
        let mut map = CaveMap {
            width,
            height,
            cells: Vec::with_capacity(cells as usize),
        };
        for y in 0..height {
            for x in 0..width {
                let index = rng.random_range(0..presets.len());
                let sub_seed = Seed::Number(rng.next_u64());
                log::debug!("cell ({x}, {y}): preset {index}, seed {sub_seed}");
                let exits = map.constraints(x, y);
                let cave = presets[index].generate(Some(&sub_seed), Some(exits))?;
                map.cells.push(cave);
            }
        }
        Ok(map)
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The cave at column `x`, row `y`.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cave> {
        self.index(x, y).and_then(|i| self.cells.get(i))
    }

    /// Iterate over `((x, y), cave)` in generation order.
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &Cave)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cave)| (((i as i32) % w, (i as i32) / w), cave))
    }

    /// Compose every cell into a single grid.
    ///
    /// Returns `None` unless all caves have the same size and the composed
    /// grid fits in `i32` coordinates.
    pub fn stitch(&self) -> Option<Grid> {
        let size = self.cells.first()?.size();
        if self.cells.iter().any(|c| c.size() != size) {
            return None;
        }
        let width = size.x.checked_mul(self.width)?;
        let height = size.y.checked_mul(self.height)?;
        let mut grid = Grid::new(width, height);
        for ((x, y), cave) in self.iter() {
            let offset = Point::new(x * size.x, y * size.y);
            for (p, tile) in cave.grid().iter() {
                grid.set(p + offset, tile);
            }
        }
        Some(grid)
    }

    /// Rebuild the cave at `(x, y)` from `preset`.
    ///
    /// Every existing neighbor's facing exits become fixed constraints, so
    /// the new cave still interlocks with all four neighbors.
    pub fn regenerate(
        &mut self,
        x: i32,
        y: i32,
        preset: &CaveConfig,
        seed: Option<&Seed>,
    ) -> Result<&Cave, ConfigError> {
        let index = self.index(x, y).ok_or(ConfigError::CellOutOfMap { x, y })?;
        preset.validate()?;
        let exits = self.constraints(x, y);
        log::debug!("regenerate cell ({x}, {y}) with {exits:?}");
        let cave = preset.generate(seed, Some(exits))?;
        self.cells[index] = cave;
        Ok(&self.cells[index])
    }

    /// Exit constraints for the cell at `(x, y)` given the cells generated
    /// so far: neighbors' facing offsets are fixed, map edges are disabled
    /// and the rest is free.
    fn constraints(&self, x: i32, y: i32) -> Exit {
        let mut exits = Exit::free();
        for side in Side::ALL {
            let (nx, ny) = match side {
                Side::Top => (x, y + 1),
                Side::Right => (x + 1, y),
                Side::Bottom => (x, y - 1),
                Side::Left => (x - 1, y),
            };
            let constraint = match (self.index(nx, ny), self.get(nx, ny)) {
                (None, _) => ExitSide::Disabled,
                (Some(_), Some(cave)) => {
                    ExitSide::from_offsets(cave.exits().offsets(side.opposite()).to_vec())
                }
                (Some(_), None) => ExitSide::Free,
            };
            *exits.side_mut(side) = constraint;
        }
        exits
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !(0..self.width).contains(&x) || !(0..self.height).contains(&y) {
            return None;
        }
        Some((y * self.width + x) as usize)
    }
}
