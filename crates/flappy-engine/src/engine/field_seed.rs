use std::fmt::{self, Write as _};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic obstacle generation.
///
/// A 128-bit seed for the obstacle field's random number generator. Two fields
/// built from the same seed produce the same sequence of gap heights, which
/// keeps training runs reproducible.
///
/// Serializes as a 32-character lowercase hex string.
///
/// ```
/// use flappy_engine::FieldSeed;
///
/// let seed: FieldSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// assert_eq!(seed.to_string(), "000102030405060708090a0b0c0d0e0f");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSeed(pub(crate) [u8; 16]);

/// Error returned when parsing a [`FieldSeed`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseFieldSeedError {
    #[display("invalid seed: expected 32 hex characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid seed: {_0:?} is not a hex number")]
    InvalidHex(#[error(not(source))] String),
}

impl FieldSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Derives a seed from a small integer, for tests and CLI convenience.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl fmt::Display for FieldSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl std::str::FromStr for FieldSeed {
    type Err = ParseFieldSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseFieldSeedError::InvalidLength(s.len()));
        }
        let num =
            u128::from_str_radix(s, 16).map_err(|_| ParseFieldSeedError::InvalidHex(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for FieldSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(32);
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for FieldSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<FieldSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FieldSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        FieldSeed(seed)
    }
}
