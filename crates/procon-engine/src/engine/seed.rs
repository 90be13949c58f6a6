use std::fmt;

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 128-bit seed of an episode's random number generator.
///
/// The same seed and configuration reproduce the same maps, and with the same
/// actions the same trajectory. Serialized as a 32 character hex string.
///
/// # Example
///
/// ```
/// use procon_engine::EpisodeSeed;
/// use rand::Rng as _;
///
/// let seed: EpisodeSeed = rand::rng().random();
/// let text = seed.to_string();
/// assert_eq!(text.parse::<EpisodeSeed>().unwrap(), seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpisodeSeed([u8; 16]);

impl EpisodeSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Expands a small integer into a seed, handy for tests and command lines.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }

    /// Generator for the episode's maps.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        use rand::SeedableRng as _;
        Pcg32::from_seed(self.0)
    }

    /// Generator on a stream disjoint from [`rng`](Self::rng), for players and
    /// other consumers that must not replay the map draws.
    #[must_use]
    pub fn side_rng(self) -> Pcg32 {
        let mut state = [0; 8];
        let mut stream = [0; 8];
        state.copy_from_slice(&self.0[..8]);
        stream.copy_from_slice(&self.0[8..]);
        Pcg32::new(u64::from_le_bytes(state), !u64::from_le_bytes(stream))
    }
}

impl fmt::Display for EpisodeSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {text:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    text: String,
}

impl std::str::FromStr for EpisodeSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError { text: s.to_owned() };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for EpisodeSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EpisodeSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<EpisodeSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> EpisodeSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        EpisodeSeed(seed)
    }
}
