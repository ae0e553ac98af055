//! Shared pieces of the demo binaries: flag parsing helpers and text
//! output for caves and tiled maps.

use std::fmt;
use std::str::FromStr;

use grotto_cave::{Cave, Side};

/// Size of a tiled map, written `<COLS>x<ROWS>` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSize {
    pub cols: i32,
    pub rows: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMapSizeError(String);

impl fmt::Display for ParseMapSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid map size {:?}, expected <COLS>x<ROWS>", self.0)
    }
}

impl std::error::Error for ParseMapSizeError {}

impl FromStr for MapSize {
    type Err = ParseMapSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMapSizeError(s.to_string());
        let (cols, rows) = s.split_once(['x', 'X']).ok_or_else(err)?;
        Ok(MapSize {
            cols: cols.trim().parse().map_err(|_| err())?,
            rows: rows.trim().parse().map_err(|_| err())?,
        })
    }
}

/// The cave as ASCII followed by one line of exit offsets per side.
pub fn describe_cave(cave: &Cave) -> String {
    let mut out = cave.grid().to_string();
    out.push('\n');
    if let Some(seed) = cave.seed() {
        out.push_str(&format!("seed: {seed}\n"));
    }
    for side in Side::ALL {
        let exit = cave.exits().side(side);
        if exit.is_disabled() {
            out.push_str(&format!("{side}: none\n"));
        } else {
            out.push_str(&format!("{side}: {:?}\n", exit.offsets()));
        }
    }
    out
}
