//! Flood fill and connected-region extraction.

use std::collections::VecDeque;

use grotto_core::{Point, Range};

use crate::traits::Pather;

/// A connected set of points, in flood-fill discovery order.
pub type Region = Vec<Point>;

/// Reusable flood-fill state for one grid rectangle.
///
/// `RegionFinder` owns the claim buffer, the work queue and the neighbor
/// scratch buffer, so repeated extractions on the same rectangle do not
/// reallocate after the first call.
pub struct RegionFinder {
    rng: Range,
    width: usize,
    claimed: Vec<bool>,
    queue: VecDeque<usize>,
    nbuf: Vec<Point>,
}

impl RegionFinder {
    /// Create a finder for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            claimed: vec![false; rng.len()],
            queue: VecDeque::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Extract every region whose cells satisfy `include`.
    ///
    /// Cells are scanned in row-major order; each unclaimed cell accepted by
    /// `include` seeds a flood fill through `pather`, and every cell reached
    /// is claimed. Claims are reset at the start of each call. Regions are
    /// returned in discovery order.
    pub fn regions<P: Pather>(
        &mut self,
        pather: &P,
        mut include: impl FnMut(Point) -> bool,
    ) -> Vec<Region> {
        self.reset();
        let mut regions = Vec::new();
        for p in self.rng.iter() {
            let Some(i) = self.idx(p) else {
                continue;
            };
            if self.claimed[i] || !include(p) {
                continue;
            }
            regions.push(self.fill_from(pather, i));
        }
        regions
    }

    /// Flood-fill from a single point and return the connected cells.
    ///
    /// Returns an empty region if `p` is outside the range.
    pub fn flood<P: Pather>(&mut self, pather: &P, p: Point) -> Region {
        self.reset();
        match self.idx(p) {
            Some(i) => self.fill_from(pather, i),
            None => Vec::new(),
        }
    }

    /// Number of regions whose cells satisfy `include`.
    pub fn count<P: Pather>(&mut self, pather: &P, include: impl FnMut(Point) -> bool) -> usize {
        self.regions(pather, include).len()
    }

    fn reset(&mut self) {
        for c in self.claimed.iter_mut() {
            *c = false;
        }
        self.queue.clear();
    }

    /// Breadth-first fill from index `start`, claiming every reached cell.
    fn fill_from<P: Pather>(&mut self, pather: &P, start: usize) -> Region {
        let mut region = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.claimed[start] = true;
        self.queue.push_back(start);

        while let Some(ci) = self.queue.pop_front() {
            let cp = self.point(ci);
            region.push(cp);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.claimed[ni] {
                    continue;
                }
                self.claimed[ni] = true;
                self.queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;
        region
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}
