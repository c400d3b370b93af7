use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumString;

/// Ranking preference applied to already-scored actions.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum Scenario {
    /// Highest threat first, safety breaks ties. Stored as "A" by the web page.
    #[strum(serialize = "aggressive", serialize = "a")]
    Aggressive,
    /// Lowest lose probability first, threat breaks ties. Stored as "B".
    #[default]
    #[strum(serialize = "safety-first", serialize = "safetyfirst", serialize = "safety", serialize = "b")]
    SafetyFirst,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Scenario::Aggressive => "Aggressive",
            Scenario::SafetyFirst => "Safety first",
        };
        write!(f, "{}", display_name)
    }
}

impl Scenario {
    /// Parses a scenario name or legacy storage code; anything unrecognized
    /// falls back to the default.
    pub fn parse_or_default(value: &str) -> Scenario {
        Scenario::from_str(value.trim()).unwrap_or_default()
    }
}
