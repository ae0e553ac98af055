//! **grotto-cave** — seeded cellular-automaton caves with interlocking exits.
//!
//! A cave is a [`Grid`] of floor and wall [`Tile`]s surrounded by a wall
//! border, broken only by the openings recorded in its [`Exit`]. Generation
//! is a pure function of a [`CaveConfig`], a [`Seed`] and the exit
//! constraints:
//!
//! ```
//! use grotto_cave::{CaveConfig, Seed};
//!
//! let config = CaveConfig::with_size(30, 20);
//! let cave = config.generate(Some(&Seed::from("demo")), None).unwrap();
//! assert_eq!(cave.grid().width(), 30);
//! println!("{}", cave.grid());
//! ```
//!
//! Larger maps are built with [`CaveMap`], which generates a grid of caves
//! and passes each cave's exits on to its neighbors so their openings meet.
//!
//! The library logs through the [`log`] facade and never installs a logger.

mod cave;
mod config;
mod error;
mod exit;
mod generator;
mod grid;
mod rng;
mod tiler;

pub use cave::Cave;
pub use config::{CaveConfig, MIN_SIZE};
pub use error::ConfigError;
pub use exit::{Exit, ExitSide, Side};
pub use generator::{CaveGen, generate};
pub use grid::{Grid, Tile};
pub use rng::Seed;
pub use tiler::CaveMap;
