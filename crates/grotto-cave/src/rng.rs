//! Seeds and the deterministic random source.
//!
//! Every stochastic decision of a generation run is drawn from one
//! sequential generator. Text seeds are reduced to a `u64` with 64-bit
//! FNV-1a over their UTF-8 bytes; the number then seeds
//! [`StdRng::seed_from_u64`]. Equal seeds therefore give equal caves for a
//! given `rand` release.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::rngs::StdRng;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A generation seed, either free text or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    /// The numeric value the generator is seeded with.
    pub fn value(&self) -> u64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => fnv1a(s.as_bytes()),
        }
    }

    /// Whether the seed carries no information (an empty text seed).
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// A fresh generator for this seed.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.value())
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// 64-bit FNV-1a hash.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Pick the first non-empty seed, falling back to the system clock.
///
/// The clock fallback makes the run non-reproducible unless the returned
/// value is recorded, so it is reported at `warn` level.
pub(crate) fn resolve_seed(candidates: &[Option<&Seed>]) -> u64 {
    if let Some(seed) = candidates.iter().flatten().find(|s| !s.is_empty()) {
        return seed.value();
    }
    let value = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    log::warn!("no seed supplied, using clock-derived seed {value}; output is not reproducible");
    value
}
