use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The slice of a species' dex entry the advisor needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    /// Normalized id, e.g. "garchomp"
    pub id: String,
    pub name: String,
    /// One or two types; empty only when every listed type was unrecognized.
    pub types: Vec<PokemonType>,
}

impl fmt::Display for SpeciesEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_names: Vec<&str> = self.types.iter().map(|t| t.name()).collect();
        write!(f, "{} [{}]", self.name, type_names.join(" / "))
    }
}
