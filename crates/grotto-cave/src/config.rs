//! Generation parameters for a single cave.

use crate::error::ConfigError;
use crate::rng::Seed;

/// Smallest allowed width and height: a one-tile border on each side plus
/// an interior wide enough for a three-tile exit.
pub const MIN_SIZE: i32 = 5;

/// Template for generating caves.
///
/// Fields are read-only for the duration of a generation run; call
/// [`validate`](Self::validate) (or any `generate` method, which validates
/// first) to check the documented ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaveConfig {
    /// Width of the grid in tiles.
    pub width: i32,
    /// Height of the grid in tiles.
    pub height: i32,
    /// Seed used when `generate` is called without one.
    pub seed: Option<Seed>,
    /// Percent chance (0–100) that an interior tile starts as wall.
    pub fill_threshold: u8,
    /// Total number of smoothing passes.
    pub smoothing_iterations: u32,
    /// Wall-neighbor count (1–8) at which a tile is left unchanged.
    ///
    /// More walls than this turns the tile into wall, fewer turns it into
    /// floor.
    pub smoothing_threshold: u8,
    /// Regions smaller than this are filled in, unless they touch the border.
    pub region_threshold: usize,
    /// Radius of the brush that carves corridors between regions.
    pub path_radius: u32,
    /// Count diagonal wall contact when collecting a region's border tiles.
    pub diagonal_borders: bool,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            seed: None,
            fill_threshold: 45,
            smoothing_iterations: 5,
            smoothing_threshold: 4,
            region_threshold: 10,
            path_radius: 1,
            diagonal_borders: false,
        }
    }
}

impl CaveConfig {
    /// Create a config of the given size with default parameters.
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every parameter against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_SIZE || self.height < MIN_SIZE {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_threshold > 100 {
            return Err(ConfigError::FillThresholdOutOfRange(self.fill_threshold));
        }
        if self.smoothing_iterations == 0 {
            return Err(ConfigError::NoSmoothingIterations);
        }
        if !(1..=8).contains(&self.smoothing_threshold) {
            return Err(ConfigError::SmoothingThresholdOutOfRange(
                self.smoothing_threshold,
            ));
        }
        Ok(())
    }
}
