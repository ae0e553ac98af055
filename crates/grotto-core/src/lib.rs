//! **grotto-core** — geometry primitives shared by the *grotto* crates.
//!
//! Provides [`Point`] and the half-open rectangle [`Range`] with its
//! row-major iterator. Scan order matters for seeded generation, so every
//! crate in the workspace walks grids through [`Range::iter`].

pub mod geom;

pub use geom::{Point, Range, RangeIter};
