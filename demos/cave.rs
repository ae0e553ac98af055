//! Generate a cave, or a tiled map of caves, and print it as ASCII.
//!
//! Run: cargo run --bin cave -- --seed test --width 60 --height 30

use clap::Parser;
use grotto_cave::{CaveConfig, CaveMap, Seed};
use grotto_demos::{MapSize, describe_cave};

#[derive(Parser, Debug)]
#[command(name = "cave")]
#[command(about = "Generate seeded cellular-automaton caves")]
struct Args {
    /// Width of each cave in tiles
    #[arg(short = 'W', long, default_value = "50")]
    width: i32,

    /// Height of each cave in tiles
    #[arg(short = 'H', long, default_value = "50")]
    height: i32,

    /// Seed, text or number (uses a clock-derived seed if not specified)
    #[arg(short, long)]
    seed: Option<String>,

    /// Percent chance that an interior tile starts as wall
    #[arg(long, default_value = "45")]
    fill: u8,

    /// Number of smoothing passes
    #[arg(long, default_value = "5")]
    iterations: u32,

    /// Wall-neighbor count that leaves a tile unchanged
    #[arg(long, default_value = "4")]
    smoothing_threshold: u8,

    /// Regions smaller than this are filled in
    #[arg(long, default_value = "10")]
    region_threshold: usize,

    /// Corridor brush radius
    #[arg(long, default_value = "1")]
    radius: u32,

    /// Count diagonal wall contact for region borders
    #[arg(long)]
    diagonal_borders: bool,

    /// Generate a tiled map of <COLS>x<ROWS> caves instead of a single one
    #[arg(long)]
    map: Option<MapSize>,
}

impl Args {
    fn config(&self) -> CaveConfig {
        CaveConfig {
            width: self.width,
            height: self.height,
            seed: None,
            fill_threshold: self.fill,
            smoothing_iterations: self.iterations,
            smoothing_threshold: self.smoothing_threshold,
            region_threshold: self.region_threshold,
            path_radius: self.radius,
            diagonal_borders: self.diagonal_borders,
        }
    }

    /// Numeric seeds stay numbers, so `--seed 42` matches `Seed::Number(42)`.
    fn seed(&self) -> Option<Seed> {
        self.seed.as_deref().map(|s| match s.parse::<u64>() {
            Ok(n) => Seed::Number(n),
            Err(_) => Seed::from(s),
        })
    }
}

fn run(args: &Args) -> Result<String, grotto_cave::ConfigError> {
    let config = args.config();
    let seed = args.seed();
    match args.map {
        None => {
            let cave = config.generate(seed.as_ref(), None)?;
            Ok(describe_cave(&cave))
        }
        Some(size) => {
            let map = CaveMap::generate(size.cols, size.rows, &[config], seed.as_ref())?;
            match map.stitch() {
                Some(grid) => Ok(format!("{grid}\n")),
                None => Ok(map
                    .iter()
                    .map(|((x, y), cave)| format!("cell ({x}, {y})\n{}", describe_cave(cave)))
                    .collect()),
            }
        }
    }
}

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
