//! Single-cave generation.
//!
//! A [`CaveGen`] is one generation session. It owns the grid, the region
//! finder and the random generator, and runs a fixed pipeline:
//!
//! 1. Fill the interior with random walls, the border with walls.
//! 2. Resolve free exits and open every exit tile.
//! 3. Smooth once with a flood-ordered cellular automaton pass.
//! 4. Fill in small wall regions, then small floor regions.
//! 5. Carve a corridor between every pair of surviving floor regions.
//! 6. Fill in wall specks left by the corridors.
//! 7. Smooth the remaining `smoothing_iterations - 1` times.
//!
//! The pipeline has no retries: given the same configuration, exits and
//! generator state it always yields the same cave.

use grotto_core::Point;
use grotto_paths::{Pather, Region, RegionFinder, euclidean_squared, line};
use rand::{Rng, RngExt};

use crate::cave::Cave;
use crate::config::CaveConfig;
use crate::error::ConfigError;
use crate::exit::{Exit, ExitSide, Side};
use crate::grid::{Grid, Tile};
use crate::rng::{Seed, resolve_seed};

/// Minimum length of a generated opening.
const MIN_EXIT_LEN: i32 = 3;

/// Orthogonal neighbors sharing the tile of the query point.
struct SameTile<'a> {
    grid: &'a Grid,
    tile: Tile,
}

impl Pather for SameTile<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if self.grid.at(p) != Some(self.tile) {
            return;
        }
        for n in p.neighbors_4() {
            if self.grid.at(n) == Some(self.tile) {
                buf.push(n);
            }
        }
    }
}

/// Orthogonal neighbors that are not on the grid border.
struct Interior<'a> {
    grid: &'a Grid,
}

impl Pather for Interior<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.grid.contains(n) && !self.grid.is_border(n) {
                buf.push(n);
            }
        }
    }
}

/// Cellular automaton rule: more walls than `threshold` makes a wall, fewer
/// makes floor, exactly `threshold` keeps the tile.
fn next_tile(tile: Tile, walls: u8, threshold: u8) -> Tile {
    match walls.cmp(&threshold) {
        std::cmp::Ordering::Greater => Tile::WALL,
        std::cmp::Ordering::Less => Tile::FLOOR,
        std::cmp::Ordering::Equal => tile,
    }
}

/// A single cave generation session.
pub struct CaveGen<'a, R: Rng> {
    config: &'a CaveConfig,
    rng: R,
    grid: Grid,
    finder: RegionFinder,
}

impl<'a, R: Rng> CaveGen<'a, R> {
    /// Start a session with a validated configuration.
    pub fn new(config: &'a CaveConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_grid(config, Grid::new(config.width, config.height), rng))
    }

    /// Start a session on an existing grid.
    ///
    /// The grid's size takes precedence over the configured size; the
    /// remaining parameters are used as they are, without validation.
    pub fn with_grid(config: &'a CaveConfig, grid: Grid, rng: R) -> Self {
        let finder = RegionFinder::new(grid.bounds());
        Self {
            config,
            rng,
            grid,
            finder,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Run the whole pipeline and return the grid with its resolved exits.
    pub fn run(mut self, exits: Exit) -> (Grid, Exit) {
        self.fill();

        let exits = self.resolve_exits(exits);
        self.apply_exits(&exits);

        self.smooth();

        self.filter_regions(Tile::WALL, Tile::FLOOR);
        let rooms = self.filter_regions(Tile::FLOOR, Tile::WALL);
        self.connect_regions(&rooms);
        self.filter_regions(Tile::WALL, Tile::FLOOR);

        for _ in 1..self.config.smoothing_iterations {
            self.smooth();
        }

        self.apply_exits(&exits);
        (self.grid, exits)
    }

    /// Walls on the border, random walls inside.
    ///
    /// Interior tiles become walls with `fill_threshold` percent chance,
    /// drawn in row-major order.
    pub fn fill(&mut self) {
        let bounds = self.grid.bounds();
        let threshold = u32::from(self.config.fill_threshold);
        for p in bounds.iter() {
            let tile = if self.grid.is_border(p) {
                Tile::WALL
            } else {
                Tile::from(self.rng.random_range(0..100u32) < threshold)
            };
            self.grid.set(p, tile);
        }
        log::debug!(
            "fill: {} walls in {}x{}",
            self.grid.count(Tile::WALL),
            self.grid.width(),
            self.grid.height()
        );
    }

    /// One smoothing pass.
    ///
    /// Starts at a random tile in the middle third of the grid and visits
    /// every interior tile reachable from it in breadth-first order. Each
    /// visited tile is updated from its 8-neighborhood right away, so tiles
    /// later in the pass see the updated values.
    pub fn smooth(&mut self) {
        let w = self.grid.width();
        let h = self.grid.height();
        let min = Point::new(w / 3, h / 3);
        let x = self.rng.random_range(min.x..(min.x * 2).max(min.x + 1));
        let y = self.rng.random_range(min.y..(min.y * 2).max(min.y + 1));
        let start = Point::new(x, y);

        let order = self.finder.flood(&Interior { grid: &self.grid }, start);
        let threshold = self.config.smoothing_threshold;
        let mut changed = 0usize;
        for p in order {
            let Some(tile) = self.grid.at(p) else {
                continue;
            };
            let next = next_tile(tile, self.wall_count(p), threshold);
            if next != tile {
                self.grid.set(p, next);
                changed += 1;
            }
        }
        log::debug!("smooth from {start}: {changed} tiles changed");
    }

    /// Number of walls among the 8 neighbors of `p`; off-grid counts as wall.
    pub fn wall_count(&self, p: Point) -> u8 {
        p.neighbors_8()
            .into_iter()
            .filter(|&n| self.grid.at(n).is_none_or(Tile::is_wall))
            .count() as u8
    }

    /// All regions of `tile`, in row-major discovery order.
    pub fn regions(&mut self, tile: Tile) -> Vec<Region> {
        let grid = &self.grid;
        self.finder
            .regions(&SameTile { grid, tile }, |p| grid.at(p) == Some(tile))
    }

    /// Rewrite small regions of `original` as `replacement`.
    ///
    /// A region survives when it has at least `region_threshold` tiles or
    /// touches the border. Returns the survivors.
    pub fn filter_regions(&mut self, original: Tile, replacement: Tile) -> Vec<Region> {
        let regions = self.regions(original);
        let total = regions.len();
        let threshold = self.config.region_threshold;

        let mut survivors = Vec::with_capacity(total);
        for region in regions {
            let touches_border = region.iter().any(|&p| self.grid.is_border(p));
            if region.len() >= threshold || touches_border {
                survivors.push(region);
                continue;
            }
            for &p in region.iter() {
                self.grid.set(p, replacement);
            }
        }

        log::debug!(
            "filter {} regions: {} of {} kept",
            original.rune(),
            survivors.len(),
            total
        );
        survivors
    }

    /// Carve a corridor between every pair of `regions`.
    ///
    /// Each pair is joined at its closest pair of border tiles. All
    /// connections are chosen before any corridor is carved. Returns the
    /// number of corridors.
    pub fn connect_regions(&mut self, regions: &[Region]) -> usize {
        if regions.len() < 2 {
            log::debug!("connect: {} floor region(s), nothing to join", regions.len());
            return 0;
        }

        let borders: Vec<Vec<Point>> = regions.iter().map(|r| self.region_border(r)).collect();
        let mut connections = Vec::new();
        for (i, a) in borders.iter().enumerate() {
            for b in borders.iter().skip(i + 1) {
                if let Some((from, to, dist)) = closest_pair(a, b) {
                    log::trace!("corridor {from} -> {to} (distance² {dist})");
                    connections.push((from, to));
                }
            }
        }

        for &(from, to) in connections.iter() {
            self.carve_path(&line(from, to));
        }
        log::debug!(
            "connect: {} corridors between {} regions",
            connections.len(),
            regions.len()
        );
        connections.len()
    }

    /// Floor tiles of `region` touching a wall, in region order.
    fn region_border(&self, region: &[Point]) -> Vec<Point> {
        let touches_wall = |n: Point| self.grid.at(n).is_some_and(Tile::is_wall);
        region
            .iter()
            .copied()
            .filter(|&p| {
                if self.config.diagonal_borders {
                    p.neighbors_8().into_iter().any(touches_wall)
                } else {
                    p.neighbors_4().into_iter().any(touches_wall)
                }
            })
            .collect()
    }

    /// Stamp the corridor brush on every tile of `path`.
    ///
    /// The brush is a disk of radius `path_radius`; covered tiles that are
    /// inside the grid and off the border become floor. Only the part of
    /// the disk overlapping the grid interior is visited.
    pub fn carve_path(&mut self, path: &[Point]) {
        let w = i64::from(self.grid.width());
        let h = i64::from(self.grid.height());
        // A disk wider than the grid already covers all of it.
        let r = i64::from(self.config.path_radius).min(w + h);
        let r2 = r * r;
        for &tile in path {
            let (tx, ty) = (i64::from(tile.x), i64::from(tile.y));
            for y in (ty - r).max(1)..=(ty + r).min(h - 2) {
                for x in (tx - r).max(1)..=(tx + r).min(w - 2) {
                    let (dx, dy) = (x - tx, y - ty);
                    if dx * dx + dy * dy <= r2 {
                        self.grid.set(Point::new(x as i32, y as i32), Tile::FLOOR);
                    }
                }
            }
        }
    }

    /// Replace every free side with generated openings.
    ///
    /// Sides are resolved in [`Side::ALL`] order. Fixed and disabled sides
    /// are returned unchanged.
    pub fn resolve_exits(&mut self, mut exits: Exit) -> Exit {
        for side in Side::ALL {
            if exits.side(side).is_free() {
                let offsets = self.random_openings(side);
                log::debug!("exit {side}: generated {offsets:?}");
                *exits.side_mut(side) = ExitSide::Fixed(offsets);
            }
        }
        exits
    }

    /// One or two openings of at least [`MIN_EXIT_LEN`] tiles within the
    /// interior span of `side`, as sorted distinct offsets.
    fn random_openings(&mut self, side: Side) -> Vec<i32> {
        // Last interior offset along the edge.
        let max = side.edge_len(self.grid.width(), self.grid.height()) - 2;
        let count = self.rng.random_range(1..3);

        let mut offsets = Vec::new();
        for _ in 0..count {
            // Clamped so small edges still get a valid range.
            let start = self.rng.random_range(1..(max - MIN_EXIT_LEN).max(2));
            let length = self.rng.random_range(MIN_EXIT_LEN..max.max(MIN_EXIT_LEN + 1));
            let end = (start + length).min(max);
            offsets.extend(start..=end);
        }
        offsets.sort_unstable();
        offsets.dedup();
        offsets
    }

    /// Open the border tile of every exit offset. Out-of-range offsets are
    /// skipped.
    pub fn apply_exits(&mut self, exits: &Exit) {
        for p in exits.tiles(self.grid.width(), self.grid.height()) {
            self.grid.set(p, Tile::FLOOR);
        }
    }
}

/// The closest pair of points between `a` and `b` and their squared
/// distance; the first pair found wins ties.
fn closest_pair(a: &[Point], b: &[Point]) -> Option<(Point, Point, i32)> {
    let mut best: Option<(Point, Point, i32)> = None;
    for &pa in a {
        for &pb in b {
            let dist = euclidean_squared(pa, pb);
            if best.is_none_or(|(_, _, d)| dist < d) {
                best = Some((pa, pb, dist));
            }
        }
    }
    best
}

impl CaveConfig {
    /// Generate a cave.
    ///
    /// The seed is taken from `seed`, then from [`CaveConfig::seed`]; empty
    /// text seeds are ignored. Without either, a clock-derived seed is used
    /// and logged. `None` exits leave all four sides free.
    pub fn generate(&self, seed: Option<&Seed>, exits: Option<Exit>) -> Result<Cave, ConfigError> {
        self.validate()?;
        let value = resolve_seed(&[seed, self.seed.as_ref()]);
        let cave = self.generate_with_rng(Seed::Number(value).rng(), exits)?;
        let (grid, exits) = cave.into_parts();
        Ok(Cave::new(grid, exits, Some(value)))
    }

    /// Generate a cave from an injected generator.
    pub fn generate_with_rng<R: Rng>(&self, rng: R, exits: Option<Exit>) -> Result<Cave, ConfigError> {
        let session = CaveGen::new(self, rng)?;
        let (grid, exits) = session.run(exits.unwrap_or_default());
        Ok(Cave::new(grid, exits, None))
    }
}

/// Generate a cave; see [`CaveConfig::generate`].
pub fn generate(
    config: &CaveConfig,
    seed: Option<&Seed>,
    exits: Option<Exit>,
) -> Result<Cave, ConfigError> {
    config.generate(seed, exits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grotto_core::Range;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Build a grid from ASCII rows, top row first.
    fn grid_from_rows(rows: &[&str]) -> Grid {
        let h = rows.len() as i32;
        let w = rows[0].len() as i32;
        let mut g = Grid::new(w, h);
        for (i, row) in rows.iter().enumerate() {
            let y = h - 1 - i as i32;
            for (x, ch) in row.chars().enumerate() {
                g.set(Point::new(x as i32, y), Tile::from(ch == '#'));
            }
        }
        g
    }

    fn session<'a>(config: &'a CaveConfig, grid: Grid) -> CaveGen<'a, StdRng> {
        CaveGen::with_grid(config, grid, StdRng::seed_from_u64(1))
    }

    fn floor_regions(grid: &Grid) -> usize {
        let mut rf = RegionFinder::new(grid.bounds());
        rf.count(&SameTile { grid, tile: Tile::FLOOR }, |p| {
            grid.at(p) == Some(Tile::FLOOR)
        })
    }

    const TWO_ROOMS: [&str; 5] = [
        "#########",
        "#...#...#",
        "#...#.#.#",
        "#...#...#",
        "#########",
    ];

    #[test]
    fn smoothing_rule() {
        assert_eq!(next_tile(Tile::FLOOR, 5, 4), Tile::WALL);
        assert_eq!(next_tile(Tile::WALL, 3, 4), Tile::FLOOR);
        assert_eq!(next_tile(Tile::WALL, 4, 4), Tile::WALL);
        assert_eq!(next_tile(Tile::FLOOR, 4, 4), Tile::FLOOR);
    }

    #[test]
    fn wall_count_treats_off_grid_as_wall() {
        let config = CaveConfig::default();
        let cg = session(&config, Grid::new(5, 5));
        assert_eq!(cg.wall_count(Point::new(2, 2)), 0);
        assert_eq!(cg.wall_count(Point::new(0, 0)), 5);
        assert_eq!(cg.wall_count(Point::new(2, 0)), 3);

        let cg = session(&config, grid_from_rows(&TWO_ROOMS));
        assert_eq!(cg.wall_count(Point::new(6, 1)), 4);
        assert_eq!(cg.wall_count(Point::new(2, 2)), 0);
    }

    #[test]
    fn fill_walls_border_and_respects_threshold() {
        let config = CaveConfig {
            fill_threshold: 0,
            ..CaveConfig::with_size(12, 9)
        };
        let mut cg = CaveGen::new(&config, StdRng::seed_from_u64(3)).unwrap();
        cg.fill();
        for (p, t) in cg.grid().iter() {
            assert_eq!(t.is_wall(), cg.grid().is_border(p), "{p}");
        }

        let config = CaveConfig {
            fill_threshold: 100,
            ..CaveConfig::with_size(12, 9)
        };
        let mut cg = CaveGen::new(&config, StdRng::seed_from_u64(3)).unwrap();
        cg.fill();
        assert_eq!(cg.grid().count(Tile::WALL), 12 * 9);
    }

    #[test]
    fn smooth_keeps_border_and_solid_rock() {
        let config = CaveConfig::with_size(15, 15);
        let mut grid = Grid::new(15, 15);
        grid.fill(Tile::WALL);
        let mut cg = session(&config, grid);
        cg.smooth();
        assert_eq!(cg.grid().count(Tile::WALL), 15 * 15);

        let mut grid = Grid::new(15, 15);
        for p in grid.bounds().iter().collect::<Vec<_>>() {
            if grid.is_border(p) {
                grid.set(p, Tile::WALL);
            }
        }
        let mut cg = session(&config, grid);
        cg.smooth();
        let g = cg.grid();
        assert!(g.bounds().iter().filter(|&p| g.is_border(p)).all(|p| g.at(p) == Some(Tile::WALL)));
        assert_eq!(g.at(Point::new(7, 7)), Some(Tile::FLOOR));
        // Inner corners have five walls around them.
        assert_eq!(g.at(Point::new(1, 1)), Some(Tile::WALL));
    }

    #[test]
    fn regions_are_orthogonal() {
        let config = CaveConfig::default();
        let mut cg = session(&config, grid_from_rows(&["#####", "#.#.#", "##.##", "#####", "#####"]));
        let floors = cg.regions(Tile::FLOOR);
        assert_eq!(floors.len(), 3);
        assert!(floors.iter().all(|r| r.len() == 1));
        assert_eq!(floors[0], vec![Point::new(2, 2)]);
    }

    #[test]
    fn filter_absorbs_wall_specks() {
        let config = CaveConfig {
            region_threshold: 5,
            ..CaveConfig::default()
        };
        let mut cg = session(&config, grid_from_rows(&TWO_ROOMS));
        let walls = cg.filter_regions(Tile::WALL, Tile::FLOOR);
        assert_eq!(walls.len(), 1);
        assert_eq!(cg.grid().at(Point::new(6, 2)), Some(Tile::FLOOR));

        let floors = cg.filter_regions(Tile::FLOOR, Tile::WALL);
        assert_eq!(floors.len(), 2);
        assert!(floors.iter().all(|r| r.len() == 9));
    }

    #[test]
    fn filter_fills_small_isolated_floor() {
        let config = CaveConfig {
            region_threshold: 9,
            ..CaveConfig::default()
        };
        let mut cg = session(&config, grid_from_rows(&TWO_ROOMS));
        let floors = cg.filter_regions(Tile::FLOOR, Tile::WALL);
        assert_eq!(floors.len(), 1);
        assert_eq!(floors[0].len(), 9);
        assert_eq!(cg.grid().count(Tile::FLOOR), 9);
    }

    #[test]
    fn filter_keeps_small_border_regions() {
        let config = CaveConfig {
            region_threshold: 50,
            ..CaveConfig::default()
        };
        let mut grid = grid_from_rows(&TWO_ROOMS);
        grid.set(Point::new(0, 2), Tile::FLOOR);
        let mut cg = session(&config, grid);
        let floors = cg.filter_regions(Tile::FLOOR, Tile::WALL);
        assert_eq!(floors.len(), 1);
        assert!(floors[0].contains(&Point::new(0, 2)));
        assert_eq!(cg.grid().count(Tile::FLOOR), 10);
    }

    #[test]
    fn region_border_orthogonal_and_diagonal() {
        let mut grid = Grid::new(7, 7);
        for p in grid.bounds().iter().collect::<Vec<_>>() {
            if grid.is_border(p) {
                grid.set(p, Tile::WALL);
            }
        }
        grid.set(Point::new(4, 4), Tile::WALL);

        let config = CaveConfig::default();
        let mut cg = session(&config, grid.clone());
        let room = cg.regions(Tile::FLOOR).remove(0);
        assert_eq!(room.len(), 24);
        let border = cg.region_border(&room);
        assert_eq!(border.len(), 18);
        assert!(!border.contains(&Point::new(3, 3)));

        let config = CaveConfig {
            diagonal_borders: true,
            ..CaveConfig::default()
        };
        let cg = session(&config, grid);
        let border = cg.region_border(&room);
        assert_eq!(border.len(), 19);
        assert!(border.contains(&Point::new(3, 3)));
    }

    #[test]
    fn closest_pair_prefers_first_found() {
        let a = [Point::new(0, 0), Point::new(5, 0)];
        let b = [Point::new(2, 0), Point::new(3, 0)];
        assert_eq!(closest_pair(&a, &b), Some((Point::new(0, 0), Point::new(2, 0), 4)));
        assert_eq!(closest_pair(&a, &[]), None);
    }

    #[test]
    fn connect_joins_rooms() {
        let config = CaveConfig {
            path_radius: 0,
            region_threshold: 1,
            ..CaveConfig::default()
        };
        let mut cg = session(&config, grid_from_rows(&TWO_ROOMS));
        let rooms = cg.filter_regions(Tile::FLOOR, Tile::WALL);
        assert_eq!(floor_regions(cg.grid()), 2);
        assert_eq!(cg.connect_regions(&rooms), 1);
        assert_eq!(floor_regions(cg.grid()), 1);
        assert_eq!(cg.grid().count(Tile::FLOOR), 18);
    }

    #[test]
    fn connect_skips_degenerate_sets() {
        let config = CaveConfig::default();
        let mut cg = session(&config, grid_from_rows(&TWO_ROOMS));
        let before = cg.grid().clone();
        assert_eq!(cg.connect_regions(&[]), 0);
        let one = cg.regions(Tile::FLOOR).remove(0);
        assert_eq!(cg.connect_regions(&[one]), 0);
        assert_eq!(cg.grid(), &before);
    }

    #[test]
    fn brush_is_a_disk_that_spares_the_border() {
        let mut grid = Grid::new(11, 11);
        grid.fill(Tile::WALL);
        let config = CaveConfig {
            path_radius: 2,
            ..CaveConfig::default()
        };
        let mut cg = session(&config, grid.clone());
        cg.carve_path(&[Point::new(5, 5)]);
        assert_eq!(cg.grid().count(Tile::FLOOR), 13);

        let config = CaveConfig {
            path_radius: 1,
            ..CaveConfig::default()
        };
        let mut cg = session(&config, grid);
        cg.carve_path(&[Point::new(1, 1), Point::new(20, 20)]);
        assert_eq!(cg.grid().count(Tile::FLOOR), 3);
        assert_eq!(cg.grid().at(Point::new(0, 1)), Some(Tile::WALL));
    }

    #[test]
    fn oversized_brush_clears_the_interior() {
        let mut grid = Grid::new(20, 20);
        grid.fill(Tile::WALL);
        for path_radius in [50_000, u32::MAX] {
            let config = CaveConfig {
                path_radius,
                ..CaveConfig::with_size(20, 20)
            };
            assert_eq!(config.validate(), Ok(()));
            let mut cg = session(&config, grid.clone());
            cg.carve_path(&[Point::new(5, 5)]);
            assert_eq!(cg.grid().count(Tile::FLOOR), 18 * 18);
            assert_eq!(cg.grid().at(Point::new(0, 5)), Some(Tile::WALL));
        }
    }

    #[test]
    fn huge_radius_still_generates() {
        let config = CaveConfig {
            path_radius: 50_000,
            smoothing_iterations: 1,
            ..CaveConfig::with_size(40, 30)
        };
        for n in 0..5u64 {
            let cave = config.generate(Some(&Seed::from(n)), None).unwrap();
            let g = cave.grid();
            let exits = cave.exits().tiles(g.width(), g.height());
            for (p, t) in g.iter() {
                if g.is_border(p) {
                    assert_eq!(t.is_floor(), exits.contains(&p), "seed {n} at {p}");
                }
            }
            assert_eq!(floor_regions(g), 1);
        }
    }

    #[test]
    fn resolve_exits_fills_free_sides_only() {
        let config = CaveConfig::with_size(20, 12);
        let mut cg = CaveGen::new(&config, StdRng::seed_from_u64(11)).unwrap();
        let exits = Exit {
            top: ExitSide::Free,
            right: ExitSide::Fixed(vec![4, 5, 6]),
            bottom: ExitSide::Disabled,
            left: ExitSide::Free,
        };
        let resolved = cg.resolve_exits(exits);
        assert_eq!(resolved.right, ExitSide::Fixed(vec![4, 5, 6]));
        assert_eq!(resolved.bottom, ExitSide::Disabled);
        for (side, max) in [(Side::Top, 18), (Side::Left, 10)] {
            let offsets = resolved.offsets(side);
            assert!(offsets.len() >= 3, "{side}: {offsets:?}");
            assert!(offsets.iter().all(|&o| (1..=max).contains(&o)), "{side}: {offsets:?}");
            assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn openings_fit_the_smallest_grid() {
        let config = CaveConfig::with_size(5, 5);
        for seed in 0..50 {
            let mut cg = CaveGen::new(&config, StdRng::seed_from_u64(seed)).unwrap();
            let resolved = cg.resolve_exits(Exit::free());
            for side in Side::ALL {
                assert_eq!(resolved.offsets(side), &[1, 2, 3]);
            }
        }
    }

    #[test]
    fn apply_exits_opens_border_tiles() {
        let config = CaveConfig::with_size(8, 6);
        let mut grid = Grid::new(8, 6);
        grid.fill(Tile::WALL);
        let mut cg = session(&config, grid);
        let mut exits = Exit::disabled();
        exits.top = ExitSide::Fixed(vec![2, 3, 99]);
        exits.right = ExitSide::Fixed(vec![1]);
        cg.apply_exits(&exits);
        assert_eq!(cg.grid().count(Tile::FLOOR), 3);
        assert_eq!(cg.grid().at(Point::new(2, 5)), Some(Tile::FLOOR));
        assert_eq!(cg.grid().at(Point::new(7, 1)), Some(Tile::FLOOR));
    }

    #[test]
    fn interior_pather_skips_border() {
        let grid = Grid::new(5, 5);
        let mut buf = Vec::new();
        Interior { grid: &grid }.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf, vec![Point::new(2, 1), Point::new(1, 2)]);
        let mut rf = RegionFinder::new(Range::new(0, 0, 5, 5));
        assert_eq!(rf.flood(&Interior { grid: &grid }, Point::new(2, 2)).len(), 9);
    }

    fn wall_regions_below(grid: &Grid, threshold: usize) -> usize {
        let mut rf = RegionFinder::new(grid.bounds());
        rf.regions(&SameTile { grid, tile: Tile::WALL }, |p| {
            grid.at(p) == Some(Tile::WALL)
        })
        .iter()
        .filter(|r| r.len() < threshold && !r.iter().any(|&p| grid.is_border(p)))
        .count()
    }

    #[test]
    fn same_seed_same_cave() {
        let config = CaveConfig::with_size(40, 30);
        let seed = Seed::from("repeat");
        let a = config.generate(Some(&seed), None).unwrap();
        let b = config.generate(Some(&seed), None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed(), Some(seed.value()));
        let c = config.generate(Some(&Seed::from("other")), None).unwrap();
        assert_ne!(a.grid(), c.grid());
    }

    #[test]
    fn injected_rng_matches_seed() {
        let config = CaveConfig::with_size(24, 18);
        let seeded = config.generate(Some(&Seed::from(99u64)), None).unwrap();
        let injected = config
            .generate_with_rng(StdRng::seed_from_u64(99), None)
            .unwrap();
        assert_eq!(injected.grid(), seeded.grid());
        assert_eq!(injected.exits(), seeded.exits());
        assert_eq!(injected.seed(), None);
    }

    #[test]
    fn border_is_wall_except_exits() {
        let config = CaveConfig::with_size(32, 24);
        for n in 0..10u64 {
            let cave = config.generate(Some(&Seed::from(n)), None).unwrap();
            let g = cave.grid();
            let exits = cave.exits().tiles(g.width(), g.height());
            for (p, t) in g.iter() {
                if g.is_border(p) {
                    assert_eq!(t.is_floor(), exits.contains(&p), "seed {n} at {p}");
                }
            }
        }
    }

    #[test]
    fn floor_is_connected() {
        let config = CaveConfig {
            smoothing_iterations: 1,
            ..CaveConfig::with_size(40, 30)
        };
        for n in 0..10u64 {
            let cave = config.generate(Some(&Seed::from(n)), None).unwrap();
            assert_eq!(floor_regions(cave.grid()), 1, "seed {n}\n{}", cave.grid());
        }
    }

    #[test]
    fn no_small_isolated_walls() {
        for region_threshold in [0, 10, 25] {
            let config = CaveConfig {
                smoothing_iterations: 1,
                region_threshold,
                ..CaveConfig::with_size(40, 30)
            };
            let cave = config.generate(Some(&Seed::from("specks")), None).unwrap();
            assert_eq!(wall_regions_below(cave.grid(), region_threshold), 0);
        }
    }

    #[test]
    fn exits_conform_to_constraints() {
        let config = CaveConfig::with_size(30, 20);
        let exits = Exit {
            top: ExitSide::Fixed(vec![5, 6, 7, 20]),
            right: ExitSide::Disabled,
            bottom: ExitSide::Free,
            left: ExitSide::Fixed(vec![2, 3]),
        };
        for n in 0..5u64 {
            let cave = config.generate(Some(&Seed::from(n)), Some(exits.clone())).unwrap();
            let g = cave.grid();
            assert_eq!(cave.exits().top, exits.top);
            assert_eq!(cave.exits().left, exits.left);
            assert!(cave.exits().right.is_disabled());
            for x in [5, 6, 7, 20] {
                assert_eq!(g.at(Point::new(x, 19)), Some(Tile::FLOOR));
            }
            for y in 1..19 {
                assert_eq!(g.at(Point::new(29, y)), Some(Tile::WALL));
            }

            let bottom = cave.exits().offsets(Side::Bottom);
            let longest = bottom
                .windows(2)
                .fold((1usize, 1usize), |(run, best), w| {
                    let run = if w[1] == w[0] + 1 { run + 1 } else { 1 };
                    (run, best.max(run))
                })
                .1;
            assert!(longest >= 3, "seed {n}: {bottom:?}");
            for &x in bottom {
                assert_eq!(g.at(Point::new(x, 0)), Some(Tile::FLOOR));
            }
        }
    }

    #[test]
    fn degenerate_fills() {
        let open = CaveConfig {
            fill_threshold: 0,
            ..CaveConfig::with_size(12, 12)
        };
        let cave = open.generate(Some(&Seed::from(1u64)), Some(Exit::disabled())).unwrap();
        assert_eq!(floor_regions(cave.grid()), 1);

        let solid = CaveConfig {
            fill_threshold: 100,
            ..CaveConfig::with_size(12, 12)
        };
        let cave = solid.generate(Some(&Seed::from(1u64)), Some(Exit::disabled())).unwrap();
        assert_eq!(cave.grid().count(Tile::FLOOR), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CaveConfig::with_size(4, 4);
        assert_eq!(
            generate(&config, Some(&Seed::from(1u64)), None),
            Err(ConfigError::GridTooSmall { width: 4, height: 4 })
        );
        let config = CaveConfig {
            smoothing_iterations: 0,
            ..CaveConfig::default()
        };
        assert!(config.generate_with_rng(StdRng::seed_from_u64(0), None).is_err());
    }
}
