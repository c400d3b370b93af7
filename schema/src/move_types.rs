use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base power assumed for a damaging move whose power is unknown (stored as 0).
pub const DEFAULT_BASE_POWER: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

impl MoveCategory {
    pub fn from_name(name: &str) -> Option<MoveCategory> {
        match name.trim().to_ascii_lowercase().as_str() {
            "physical" => Some(MoveCategory::Physical),
            "special" => Some(MoveCategory::Special),
            "status" => Some(MoveCategory::Status),
            _ => None,
        }
    }

    pub fn is_damaging(self) -> bool {
        self != MoveCategory::Status
    }
}

/// A move as the advisor sees it: type, category and base power only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDescriptor {
    /// Normalized id, e.g. "flamethrower"
    pub id: String,
    /// Display name, e.g. "Flamethrower"
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// 0 means unknown
    pub base_power: u16,
}

impl MoveDescriptor {
    /// Base power with the unknown-power fallback applied.
    pub fn effective_base_power(&self) -> u16 {
        if self.base_power > 0 {
            self.base_power
        } else {
            DEFAULT_BASE_POWER
        }
    }
}

impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} / {}", self.name, self.move_type, self.category)?;
        if self.category.is_damaging() {
            if self.base_power > 0 {
                write!(f, " / {} BP", self.base_power)?;
            } else {
                write!(f, " / variable BP")?;
            }
        }
        write!(f, ")")
    }
}
