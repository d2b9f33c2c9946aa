//! User-facing spin settings.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// How long the reel spins before settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpinDuration {
    Short,
    #[default]
    Medium,
    Long,
}

/// How hard the reel brakes into its final position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Deceleration {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpinDuration {
    pub const ALL: [SpinDuration; 3] =
        [SpinDuration::Short, SpinDuration::Medium, SpinDuration::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpinDuration::Short => "short",
            SpinDuration::Medium => "medium",
            SpinDuration::Long => "long",
        }
    }
}

impl Deceleration {
    pub const ALL: [Deceleration; 3] =
        [Deceleration::Slow, Deceleration::Medium, Deceleration::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Deceleration::Slow => "slow",
            Deceleration::Medium => "medium",
            Deceleration::Fast => "fast",
        }
    }
}

impl Display for SpinDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Deceleration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpinDuration {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(SpinDuration::Short),
            "medium" => Ok(SpinDuration::Medium),
            "long" => Ok(SpinDuration::Long),
            _ => Err(ModelError::UnknownDuration(s.to_owned())),
        }
    }
}

impl FromStr for Deceleration {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Deceleration::Slow),
            "medium" => Ok(Deceleration::Medium),
            "fast" => Ok(Deceleration::Fast),
            _ => Err(ModelError::UnknownDeceleration(s.to_owned())),
        }
    }
}
