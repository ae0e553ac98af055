use grotto_core::Point;

/// Minimal search interface: provides neighbor enumeration.
///
/// A pather decides which cells are connected. Region extraction over a
/// single tile type is a pather that only yields same-typed neighbors.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}
