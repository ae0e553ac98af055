use grotto_core::Point;

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn euclidean_squared(a: Point, b: Point) -> i32 {
    let d = a - b;
    d.x * d.x + d.y * d.y
}
