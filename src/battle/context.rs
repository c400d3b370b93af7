//! The immutable battle snapshot the advisor reasons about.

use crate::dex::Dex;
use schema::{PokemonType, Scenario};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known moves per combatant.
pub const MAX_MOVES: usize = 4;
/// Slots per roster.
pub const ROSTER_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Own,
    Opponent,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Own => write!(f, "your side"),
            Side::Opponent => write!(f, "the opponent's side"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantState {
    /// Species id; blank when the slot has not been filled in yet.
    pub species: String,
    /// Empty when the species is unknown to the dex.
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub ability: String,
    /// Move slots in declaration order; blank ids are empty slots.
    #[serde(default)]
    pub moves: Vec<String>,
    /// Remaining health in percent, 0..=100.
    pub health: f32,
}

impl CombatantState {
    /// A full-health combatant with no ability or moves recorded.
    pub fn new(species: impl Into<String>, types: Vec<PokemonType>) -> Self {
        Self {
            species: species.into(),
            types,
            ability: String::new(),
            moves: Vec::new(),
            health: 100.0,
        }
    }

    /// Same as [`CombatantState::new`], with types looked up in the dex.
    pub fn from_dex(dex: &Dex, species: &str) -> Self {
        Self::new(species, dex.species_types(species))
    }

    pub fn with_moves<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moves = moves.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = ability.into();
        self
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = clamp_health(health);
        self
    }

    pub fn has_species(&self) -> bool {
        !self.species.trim().is_empty()
    }

    pub fn is_healthy(&self) -> bool {
        self.health > 0.0
    }

    /// Non-blank move ids among the first four slots.
    pub fn known_moves(&self) -> impl Iterator<Item = &str> + '_ {
        self.moves
            .iter()
            .take(MAX_MOVES)
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
    }
}

/// Clamp a health input to 0..=100; NaN counts as full health.
pub fn clamp_health(health: f32) -> f32 {
    if health.is_nan() {
        100.0
    } else {
        health.clamp(0.0, 100.0)
    }
}

/// Up to six slots, any of which may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    slots: Vec<Option<CombatantState>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(mut slots: Vec<Option<CombatantState>>) -> Self {
        slots.truncate(ROSTER_SIZE);
        Self { slots }
    }

    /// Builder form of [`Roster::set_slot`].
    pub fn with_slot(mut self, index: usize, combatant: CombatantState) -> Self {
        self.set_slot(index, Some(combatant));
        self
    }

    /// Fill or clear a slot. Indices past the sixth slot are ignored.
    pub fn set_slot(&mut self, index: usize, combatant: Option<CombatantState>) {
        if index >= ROSTER_SIZE {
            return;
        }
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = combatant;
    }

    /// The combatant in a slot, if the slot holds a species.
    pub fn slot(&self, index: usize) -> Option<&CombatantState> {
        self.slots
            .get(index)
            .and_then(|slot| slot.as_ref())
            .filter(|combatant| combatant.has_species())
    }

    /// Species-bearing slots with their indices, in slot order.
    pub fn members(&self) -> impl Iterator<Item = (usize, &CombatantState)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .filter(|combatant| combatant.has_species())
                .map(|combatant| (index, combatant))
        })
    }
}

/// User-set switches that shape the risk model and the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFlags {
    pub consider_setup: bool,
    pub consider_no_switch: bool,
    pub scenario: Scenario,
}

impl Default for PolicyFlags {
    fn default() -> Self {
        Self {
            consider_setup: true,
            consider_no_switch: true,
            scenario: Scenario::default(),
        }
    }
}

/// Everything the advisor needs for one decision. Rebuilt on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleContext {
    pub roster: Roster,
    /// Roster slot currently in the exchange.
    pub active: usize,
    pub opponent: Option<CombatantState>,
    pub flags: PolicyFlags,
}

impl BattleContext {
    pub fn new(roster: Roster, active: usize, opponent: CombatantState) -> Self {
        Self {
            roster,
            active,
            opponent: Some(opponent),
            flags: PolicyFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: PolicyFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn active_self(&self) -> Option<&CombatantState> {
        self.roster.slot(self.active)
    }

    pub fn active_opponent(&self) -> Option<&CombatantState> {
        self.opponent.as_ref().filter(|combatant| combatant.has_species())
    }
}
