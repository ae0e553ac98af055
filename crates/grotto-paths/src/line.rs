//! Integer line rasterization.

use grotto_core::Point;

use crate::distance::chebyshev;

/// Rasterize the straight segment from `start` to `end`.
///
/// The dominant axis advances every step; the minor axis advances once the
/// error accumulator (seeded with half the dominant length) reaches the
/// dominant length. The result is 8-connected, contains both endpoints and
/// has `chebyshev(start, end) + 1` points.
pub fn line(start: Point, end: Point) -> Vec<Point> {
    let d = end - start;
    let mut step = Point::new(d.x.signum(), 0);
    let mut minor_step = Point::new(0, d.y.signum());
    let mut longest = d.x.abs();
    let mut shortest = d.y.abs();

    if longest < shortest {
        std::mem::swap(&mut longest, &mut shortest);
        step = Point::new(0, d.y.signum());
        minor_step = Point::new(d.x.signum(), 0);
    }

    let mut path = Vec::with_capacity(chebyshev(start, end) as usize + 1);
    let mut p = start;
    let mut acc = longest / 2;

    path.push(p);
    for _ in 0..longest {
        p = p + step;
        acc += shortest;
        if acc >= longest {
            p = p + minor_step;
            acc -= longest;
        }
        path.push(p);
    }

    path
}
