//! Grid search helpers for cave generation.
//!
//! This crate is agnostic of what a grid stores. Connectivity is supplied
//! through the [`Pather`] trait and everything else is plain geometry:
//!
//! - **Region extraction** by breadth-first flood fill ([`RegionFinder::regions`],
//!   [`RegionFinder::flood`])
//! - **Line rasterization** between two cells ([`line`])
//! - **Distances** ([`chebyshev`], [`euclidean_squared`])
//!
//! [`RegionFinder`] owns its claim buffer and work queue, so repeated
//! extractions over one grid rectangle allocate only their results.

mod distance;
mod line;
mod regions;
mod traits;

pub use distance::{chebyshev, euclidean_squared};
pub use line::line;
pub use regions::{Region, RegionFinder};
pub use traits::Pather;
