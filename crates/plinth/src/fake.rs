//! Strategies for generating synthetic placeholder data.
//!
//! [`Strategy`] is a closed, string-backed set: every variant has a
//! canonical snake_case name that round-trips through [`Display`],
//! [`FromStr`], and serde. Parsing rejects unknown names with an error
//! listing the full valid set.
//!
//! [`Display`]: std::fmt::Display
//! [`FromStr`]: std::str::FromStr

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown [`Strategy`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{name} is not a valid strategy, try [{}]", Strategy::names().join(", "))]
pub struct ParseStrategyError {
    name: String,
}

impl ParseStrategyError {
    /// The rejected input.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// How synthetic values are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// No strategy chosen (default).
    #[default]
    Unspecified,
    /// Uniformly random values.
    Random,
    /// Random values within a configured range.
    RandomRange,
    /// Random values matching a pattern.
    RandomPattern,
    /// Random selection from a fixed set.
    RandomSelect,
    /// Values drawn from a normal distribution.
    DistributionNormal,
    /// Values drawn from a uniform distribution.
    DistributionUniform,
    /// Values derived from previously generated state.
    Stateful,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Strategy; 8] = [
        Strategy::Unspecified,
        Strategy::Random,
        Strategy::RandomRange,
        Strategy::RandomPattern,
        Strategy::RandomSelect,
        Strategy::DistributionNormal,
        Strategy::DistributionUniform,
        Strategy::Stateful,
    ];

    /// The canonical name of the strategy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Unspecified => "unspecified",
            Strategy::Random => "random",
            Strategy::RandomRange => "random_range",
            Strategy::RandomPattern => "random_pattern",
            Strategy::RandomSelect => "random_select",
            Strategy::DistributionNormal => "distribution_normal",
            Strategy::DistributionUniform => "distribution_uniform",
            Strategy::Stateful => "stateful",
        }
    }

    /// The canonical names of every strategy, in declaration order.
    pub fn names() -> [&'static str; 8] {
        Self::ALL.map(Strategy::as_str)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ParseStrategyError { name: s.to_string() })
    }
}
