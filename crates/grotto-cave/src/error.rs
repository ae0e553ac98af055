//! Configuration errors.

use std::fmt;

use crate::config::MIN_SIZE;

/// Errors reported before generation starts.
///
/// Generation itself cannot fail: every configuration that passes
/// validation produces a cave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height leaves no interior inside the one-tile border.
    GridTooSmall { width: i32, height: i32 },
    /// Fill threshold above 100 percent.
    FillThresholdOutOfRange(u8),
    /// At least one smoothing pass is required.
    NoSmoothingIterations,
    /// Smoothing threshold outside `1..=8`.
    SmoothingThresholdOutOfRange(u8),
    /// A tiled map needs at least one preset.
    EmptyPresetPool,
    /// A tiled map with no columns or no rows.
    EmptyMap { width: i32, height: i32 },
    /// A tiled map with more cells than can be indexed.
    MapTooLarge { width: i32, height: i32 },
    /// A preset in the pool failed validation.
    InvalidPreset { index: usize, source: Box<ConfigError> },
    /// A cell coordinate outside the tiled map.
    CellOutOfMap { x: i32, y: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { width, height } => write!(
                f,
                "cave size {width}x{height} is too small, both sides must be at least {MIN_SIZE}"
            ),
            Self::FillThresholdOutOfRange(v) => {
                write!(f, "fill threshold {v} is out of range 0..=100")
            }
            Self::NoSmoothingIterations => write!(f, "smoothing iterations must be at least 1"),
            Self::SmoothingThresholdOutOfRange(v) => {
                write!(f, "smoothing threshold {v} is out of range 1..=8")
            }
            Self::EmptyPresetPool => write!(f, "cave map needs at least one preset"),
            Self::EmptyMap { width, height } => {
                write!(f, "cave map size {width}x{height} has no cells")
            }
            Self::MapTooLarge { width, height } => {
                write!(f, "cave map size {width}x{height} has too many cells")
            }
            Self::InvalidPreset { index, source } => write!(f, "preset {index}: {source}"),
            Self::CellOutOfMap { x, y } => write!(f, "cell ({x}, {y}) is outside the cave map"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPreset { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
