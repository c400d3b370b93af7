//! Heuristic damage estimate and the threat probe built on it.
//!
//! This is not the game's damage formula. It scales base power by STAB and
//! type effectiveness and maps the result linearly onto a 0-100 "percent of
//! the target's health" scale. Good enough to rank options, not to predict
//! rolls.

use crate::battle::context::CombatantState;
use crate::battle::effectiveness::effectiveness;
use crate::dex::Dex;
use schema::MoveDescriptor;
use serde::{Deserialize, Serialize};

/// Same-type attack bonus.
pub const STAB_MULTIPLIER: f32 = 1.5;

/// Raw power units per percent of health. Tunable: at 2.0 a neutral,
/// non-STAB 120 BP move lands at 60%.
pub const DAMAGE_DIVISOR: f32 = 2.0;

/// Expected damage of `mv` from `attacker` into `defender`, in percent.
pub fn predict_damage_percent(
    attacker: &CombatantState,
    mv: &MoveDescriptor,
    defender: &CombatantState,
) -> f32 {
    if !mv.category.is_damaging() {
        return 0.0;
    }

    let base_power = mv.effective_base_power() as f32;
    let stab = if attacker.types.contains(&mv.move_type) {
        STAB_MULTIPLIER
    } else {
        1.0
    };
    let eff = effectiveness(mv.move_type, &defender.types);

    let raw = base_power * stab * eff;
    (raw / DAMAGE_DIVISOR).clamp(0.0, 100.0)
}

/// [`predict_damage_percent`] by move id; a move missing from the dex deals 0.
pub fn predict_move_damage(
    dex: &Dex,
    attacker: &CombatantState,
    move_id: &str,
    defender: &CombatantState,
) -> f32 {
    dex.move_descriptor(move_id)
        .map(|mv| predict_damage_percent(attacker, mv, defender))
        .unwrap_or(0.0)
}

/// The most damaging known move of a combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub percent: f32,
    pub move_id: Option<String>,
}

impl Threat {
    pub fn none() -> Self {
        Self {
            percent: 0.0,
            move_id: None,
        }
    }
}

/// Best damage `mon` can deal to `opponent` with its known moves.
///
/// Moves are tried in slot order and only a strictly greater estimate
/// replaces the current best, so ties go to the earlier slot. Status moves
/// and moves missing from the dex never count.
pub fn best_threat(dex: &Dex, mon: &CombatantState, opponent: &CombatantState) -> Threat {
    let mut best = Threat::none();
    for move_id in mon.known_moves() {
        let percent = predict_move_damage(dex, mon, move_id, opponent);
        if percent > best.percent {
            best = Threat {
                percent,
                move_id: Some(move_id.to_string()),
            };
        }
    }
    best
}
