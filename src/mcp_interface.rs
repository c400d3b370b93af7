//! Plain-text reports shared by the CLI and the MCP server.
//!
//! Everything here only formats; the numbers come from the engine.

use crate::battle::ai::{Advice, Ranking, ScoredAction};
use crate::battle::context::{BattleContext, Side};
use crate::battle::effectiveness::effectiveness;
use crate::dex::Dex;
use crate::errors::{AdvisorError, AdvisorResult};
use crate::snapshot::{Snapshot, TeamEntry};
use schema::PokemonType;

const HIDDEN: &str = "(hidden)";

fn percent(probability: f32) -> u32 {
    (probability.clamp(0.0, 1.0) * 100.0).round() as u32
}

fn type_list(types: &[PokemonType]) -> String {
    if types.is_empty() {
        return "unknown types".to_string();
    }
    types
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// One line per exchange: who is facing whom, at what health.
pub fn display_matchup_header(dex: &Dex, ctx: &BattleContext) -> String {
    let describe = |species: &str, health: f32| {
        format!(
            "{} [{}] {:.0}%",
            dex.species_name(species),
            type_list(&dex.species_types(species)),
            health
        )
    };

    let own = ctx
        .active_self()
        .map(|mon| describe(&mon.species, mon.health))
        .unwrap_or_else(|| "(none)".to_string());
    let opponent = ctx
        .active_opponent()
        .map(|mon| describe(&mon.species, mon.health))
        .unwrap_or_else(|| "(none)".to_string());

    format!("{} vs {}\n", own, opponent)
}

/// A recommended action with its notes.
pub fn display_scored_action(rank: usize, action: &ScoredAction) -> String {
    let badge = if action.is_rejected() {
        "DANGEROUS"
    } else {
        "recommended"
    };
    let mut output = format!(
        "{}. {} [{}] lose risk {}%\n",
        rank,
        action.label,
        badge,
        percent(action.lose_probability)
    );
    output.push_str(&format!(
        "   risk: setup {}% / no-switch {}% / exposure {}% / punish {}%\n",
        percent(action.risk.setup),
        percent(action.risk.no_switch),
        percent(action.risk.exposure),
        percent(action.risk.punish)
    ));
    for note in &action.notes {
        output.push_str(&format!("   - {}\n", note));
    }
    output
}

/// The dangerous list: one line per action with its reasons.
pub fn display_rejected(rejected: &[ScoredAction]) -> String {
    let mut output = String::from("Dangerous options:\n");
    if rejected.is_empty() {
        output.push_str("  (none)\n");
        return output;
    }
    for action in rejected {
        let reasons: Vec<String> = action
            .rejection_reasons
            .iter()
            .map(|reason| reason.to_string())
            .collect();
        output.push_str(&format!(
            "  - {}: lose risk {}% ({})\n",
            action.label,
            percent(action.lose_probability),
            reasons.join("; ")
        ));
    }
    output
}

pub fn display_ranking(ranking: &Ranking) -> String {
    let mut output = format!("Scenario: {}\n", ranking.scenario);
    if !ranking.setup_kinds.is_empty() {
        output.push_str(&format!(
            "Opponent may set up: {}\n",
            ranking.setup_kinds.join("/")
        ));
    }
    if ranking.degraded {
        output.push_str(
            "No safe option found; listing the least dangerous ones instead.\n",
        );
    }

    output.push_str("\nRecommendations:\n");
    for (i, action) in ranking.recommendations.iter().enumerate() {
        output.push_str(&display_scored_action(i + 1, action));
    }
    output.push('\n');
    output.push_str(&display_rejected(&ranking.rejected));
    output
}

/// Full report for one advisor call.
pub fn display_advice(advice: &Advice) -> String {
    match advice {
        Advice::MissingCombatant(Side::Own) => {
            "Cannot advise: no species in your active slot.\n".to_string()
        }
        Advice::MissingCombatant(Side::Opponent) => {
            "Cannot advise: no species in the opponent's active slot.\n".to_string()
        }
        Advice::NoActions => {
            "No actions available: enter your active mon's moves or keep a healthy switch-in.\n"
                .to_string()
        }
        Advice::Ranked(ranking) => display_ranking(ranking),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

fn or_dash(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// When the hand-off was written, the page's rule toggles and both sides' picks.
pub fn display_summary(dex: &Dex, snapshot: &Snapshot) -> String {
    let ui = &snapshot.app.ui;
    let mut output = format!(
        "Saved at: {}\n",
        snapshot.saved_at.as_deref().unwrap_or("(unknown)")
    );
    output.push_str(&format!(
        "Rules: normal rules {} / no legends {} / regulation {}\n",
        on_off(ui.normal_rules),
        on_off(ui.no_legends),
        on_off(ui.reg_enabled)
    ));

    let pick_names = |side: Side| -> Vec<String> {
        snapshot
            .picked(side)
            .into_iter()
            .filter_map(|index| snapshot.entry(side, index))
            .map(|entry| dex.species_name(&entry.species_id))
            .collect()
    };

    let own = pick_names(Side::Own);
    if own.is_empty() {
        output.push_str("Your picks: (none; pick three on the main page for sharper advice)\n");
    } else {
        output.push_str(&format!("Your picks: {}\n", own.join(", ")));
    }

    if ui.hide_right_picks {
        output.push_str("Opponent picks: (hidden; team data is still kept)\n");
    } else {
        let opponent = pick_names(Side::Opponent);
        if opponent.is_empty() {
            output.push_str("Opponent picks: (none)\n");
        } else {
            output.push_str(&format!("Opponent picks: {}\n", opponent.join(", ")));
        }
    }
    output
}

/// Item, tera type, EV spread and moves of one entry.
fn entry_details(dex: &Dex, entry: &TeamEntry, hide_details: bool) -> String {
    if hide_details {
        return format!(
            "item: {} | tera: {} | EVs: {} | moves: {}",
            HIDDEN, HIDDEN, HIDDEN, HIDDEN
        );
    }

    let item = entry.item.clone().unwrap_or_default();
    let tera = entry
        .tera_type
        .as_deref()
        .map(|name| match PokemonType::from_name(name) {
            Some(tera) => tera.name().to_string(),
            None => name.trim().to_string(),
        })
        .unwrap_or_default();
    let evs = entry.evs.map(|evs| evs.short()).unwrap_or_default();
    let moves: Vec<String> = entry
        .move_slots()
        .iter()
        .filter(|id| !id.trim().is_empty())
        .map(|id| dex.move_name(id.trim()))
        .collect();

    format!(
        "item: {} | tera: {} | EVs: {} | moves: {}",
        or_dash(item),
        or_dash(tera),
        or_dash(evs),
        or_dash(moves.join(", "))
    )
}

/// A side's pool as a numbered table, picked slots starred. `hide_details`
/// keeps items, tera types, EVs and moves private.
pub fn display_pool(dex: &Dex, snapshot: &Snapshot, side: Side, hide_details: bool) -> String {
    let title = match side {
        Side::Own => "Your team",
        Side::Opponent => "Opponent's team",
    };
    let picked = snapshot.picked(side);
    let pool = snapshot.pool(side);

    let mut output = format!("{} ({} in pool):\n", title, pool.len());
    if hide_details {
        output.push_str("  (details hidden)\n");
    }
    if pool.is_empty() {
        output.push_str("  (empty)\n");
        return output;
    }

    for index in pool {
        let Some(entry) = snapshot.entry(side, index) else {
            continue;
        };
        let marker = if picked.contains(&index) { "*" } else { " " };
        let types = dex.species_types(&entry.species_id);
        output.push_str(&format!(
            " {}{}. {} [{}]\n      {}\n",
            marker,
            index + 1,
            dex.species_name(&entry.species_id),
            type_list(&types),
            entry_details(dex, entry, hide_details)
        ));
    }
    output
}

/// Case-insensitive type name, rejecting anything the chart does not know.
pub fn parse_type(name: &str) -> AdvisorResult<PokemonType> {
    PokemonType::from_name(name)
        .ok_or_else(|| AdvisorError::InvalidInput(format!("unknown type {:?}", name)))
}

/// Machine-readable form of one advisor call.
pub fn advice_json(advice: &Advice) -> AdvisorResult<String> {
    serde_json::to_string_pretty(advice).map_err(|e| AdvisorError::Output(e.to_string()))
}

/// Multiplier of one attacking type against a defender, with a verdict.
pub fn display_type_matchup(attack: PokemonType, defender: &[PokemonType]) -> String {
    let multiplier = effectiveness(attack, defender);
    let verdict = match multiplier {
        m if m == 0.0 => "no effect",
        m if m >= 2.0 => "super effective",
        m if m < 1.0 => "not very effective",
        _ => "neutral",
    };
    format!(
        "{} into {}: x{} ({})\n",
        attack.name(),
        type_list(defender),
        multiplier,
        verdict
    )
}

/// How every elemental type hits a species, grouped by multiplier.
pub fn display_defensive_profile(dex: &Dex, species: &str) -> String {
    let types = dex.species_types(species);
    let mut output = format!(
        "{} [{}]\n",
        dex.species_name(species),
        type_list(&types)
    );

    for (label, bucket) in [
        ("x4", 4.0),
        ("x2", 2.0),
        ("x0.5", 0.5),
        ("x0.25", 0.25),
        ("x0", 0.0),
    ] {
        let hits: Vec<&str> = PokemonType::elemental()
            .filter(|attack| effectiveness(*attack, &types) == bucket)
            .map(|attack| attack.name())
            .collect();
        if !hits.is_empty() {
            output.push_str(&format!("  {}: {}\n", label, hits.join(", ")));
        }
    }
    output
}

pub fn display_move(dex: &Dex, move_id: &str) -> String {
    match dex.move_descriptor(move_id) {
        Some(descriptor) => format!("{}\n", descriptor),
        None => format!("Unknown move: {}\n", move_id),
    }
}
