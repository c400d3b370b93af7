//! The team hand-off written by the pick page.
//!
//! The payload is either `{ savedAt, app: { teams, ui } }` or the bare `app`
//! object. Teams are six-slot arrays per side (`left` is ours, `right` the
//! opponent's); a slot is `null` or an entry that may still lack a species.

use crate::battle::context::{
    clamp_health, BattleContext, CombatantState, PolicyFlags, Roster, Side, ROSTER_SIZE,
};
use crate::dex::Dex;
use crate::errors::{SnapshotError, SnapshotResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Slots brought to battle when nothing is picked.
pub const DEFAULT_BROUGHT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamEntry {
    pub species_id: String,
    pub pick: bool,
    /// Move slots as entered; `null` and "" are empty slots.
    pub moves: Vec<Option<String>>,
    pub ability: Option<String>,
    pub item: Option<String>,
    pub tera_type: Option<String>,
    pub evs: Option<EvSpread>,
}

/// Effort values as entered on the pick page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvSpread {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl EvSpread {
    /// Compact "H252 A4 S252" form; zero stats are left out, an all-zero
    /// spread is "0".
    pub fn short(&self) -> String {
        let parts: Vec<String> = [
            ('H', self.hp),
            ('A', self.atk),
            ('B', self.def),
            ('C', self.spa),
            ('D', self.spd),
            ('S', self.spe),
        ]
        .iter()
        .filter(|(_, value)| *value > 0)
        .map(|(stat, value)| format!("{}{}", stat, value))
        .collect();

        if parts.is_empty() {
            "0".to_string()
        } else {
            parts.join(" ")
        }
    }
}

impl TeamEntry {
    pub fn has_species(&self) -> bool {
        !self.species_id.trim().is_empty()
    }

    /// Move slots with empty ones kept as blanks, so slot positions survive.
    pub fn move_slots(&self) -> Vec<String> {
        self.moves
            .iter()
            .map(|slot| slot.clone().unwrap_or_default())
            .collect()
    }

    pub fn to_combatant(&self, dex: &Dex, health: f32) -> CombatantState {
        CombatantState::from_dex(dex, self.species_id.trim())
            .with_moves(self.move_slots())
            .with_ability(self.ability.clone().unwrap_or_default())
            .with_health(health)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Teams {
    pub left: Vec<Option<TeamEntry>>,
    pub right: Vec<Option<TeamEntry>>,
}

/// Page toggles carried along with the teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiSettings {
    /// The opponent's picks and sets are not to be revealed.
    pub hide_right_picks: bool,
    pub normal_rules: bool,
    pub no_legends: bool,
    /// A regulation's species restrictions were applied while picking.
    pub reg_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub teams: Teams,
    pub ui: UiSettings,
}

/// Which slots are in the exchange and how healthy everyone is. Anything
/// left unset falls back to the page's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Defaults to the first slot of our pool.
    pub own_active: Option<usize>,
    /// Defaults to the first slot of the opponent's pool.
    pub opponent_active: Option<usize>,
    /// Health of our active mon; defaults to its entry in `ally_health`.
    pub own_health: Option<f32>,
    pub opponent_health: Option<f32>,
    /// Per-slot health of the brought mons, 100 when absent.
    pub ally_health: BTreeMap<usize, f32>,
    pub flags: PolicyFlags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub saved_at: Option<String>,
    pub app: AppState,
}

impl Snapshot {
    pub fn load(path: &Path) -> SnapshotResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| SnapshotError::Io {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        let snapshot = Self::from_json(&text)?;
        tracing::info!(
            own = snapshot.pool(Side::Own).len(),
            opponent = snapshot.pool(Side::Opponent).len(),
            "loaded snapshot from {}",
            path.display()
        );
        Ok(snapshot)
    }

    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        let mut value: Value = serde_json::from_str(json)
            .map_err(|e| SnapshotError::MalformedPayload(e.to_string()))?;
        if !value.is_object() {
            return Err(SnapshotError::MalformedPayload(
                "expected a JSON object".to_string(),
            ));
        }

        let saved_at = value
            .get("savedAt")
            .and_then(Value::as_str)
            .map(str::to_string);
        let app = match value.get_mut("app").map(Value::take) {
            Some(app @ Value::Object(_)) => app,
            _ => value,
        };
        let app: AppState = serde_json::from_value(app)
            .map_err(|e| SnapshotError::MalformedPayload(e.to_string()))?;

        Ok(Self { saved_at, app })
    }

    pub fn team(&self, side: Side) -> &[Option<TeamEntry>] {
        match side {
            Side::Own => &self.app.teams.left,
            Side::Opponent => &self.app.teams.right,
        }
    }

    /// The entry in a slot, if it holds a species.
    pub fn entry(&self, side: Side, index: usize) -> Option<&TeamEntry> {
        self.team(side)
            .get(index)
            .and_then(|slot| slot.as_ref())
            .filter(|entry| entry.has_species())
    }

    fn filled_slots(&self, side: Side) -> impl Iterator<Item = (usize, &TeamEntry)> + '_ {
        self.team(side)
            .iter()
            .take(ROSTER_SIZE)
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_ref()
                    .filter(|entry| entry.has_species())
                    .map(|entry| (index, entry))
            })
    }

    pub fn picked(&self, side: Side) -> Vec<usize> {
        self.filled_slots(side)
            .filter(|(_, entry)| entry.pick)
            .map(|(index, _)| index)
            .collect()
    }

    /// Picked slots, or every filled slot when nothing is picked.
    pub fn pool(&self, side: Side) -> Vec<usize> {
        let picked = self.picked(side);
        if !picked.is_empty() {
            return picked;
        }
        self.filled_slots(side).map(|(index, _)| index).collect()
    }

    /// Our slots taken into battle: the picks, or the first three of the pool.
    pub fn brought(&self) -> Vec<usize> {
        let picked = self.picked(Side::Own);
        if !picked.is_empty() {
            return picked;
        }
        self.pool(Side::Own).into_iter().take(DEFAULT_BROUGHT).collect()
    }

    /// Build the engine input for one selection.
    ///
    /// Our roster holds the brought slots plus the active one. A side with
    /// no filled slot at all yields a context without that combatant, which
    /// the advisor reports as missing.
    pub fn context(&self, dex: &Dex, selection: &Selection) -> SnapshotResult<BattleContext> {
        let own_active = self.resolve_active(Side::Own, selection.own_active)?;
        let opponent_active = self.resolve_active(Side::Opponent, selection.opponent_active)?;

        let ally_health = |index: usize| {
            selection
                .ally_health
                .get(&index)
                .copied()
                .map(clamp_health)
                .unwrap_or(100.0)
        };

        let mut roster = Roster::new();
        for index in self.brought() {
            if let Some(entry) = self.entry(Side::Own, index) {
                roster.set_slot(index, Some(entry.to_combatant(dex, ally_health(index))));
            }
        }

        if let Some(index) = own_active {
            if let Some(entry) = self.entry(Side::Own, index) {
                let health = selection
                    .own_health
                    .map(clamp_health)
                    .unwrap_or_else(|| ally_health(index));
                roster.set_slot(index, Some(entry.to_combatant(dex, health)));
            }
        }

        let opponent = opponent_active
            .and_then(|index| self.entry(Side::Opponent, index))
            .map(|entry| {
                let health = selection.opponent_health.map(clamp_health).unwrap_or(100.0);
                entry.to_combatant(dex, health)
            });

        Ok(BattleContext {
            roster,
            active: own_active.unwrap_or(0),
            opponent,
            flags: selection.flags,
        })
    }

    fn resolve_active(&self, side: Side, requested: Option<usize>) -> SnapshotResult<Option<usize>> {
        match requested {
            Some(index) if index >= ROSTER_SIZE => Err(SnapshotError::InvalidSlot(index)),
            Some(index) if self.entry(side, index).is_none() => Err(SnapshotError::EmptySlot(index)),
            Some(index) => Ok(Some(index)),
            None => Ok(self.pool(side).first().copied()),
        }
    }
}
