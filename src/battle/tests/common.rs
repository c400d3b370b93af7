use crate::battle::ai::{Advice, Advisor, Ranking, ScoredAction};
use crate::battle::context::{BattleContext, CombatantState, PolicyFlags, Roster};
use crate::config::AdvisorConfig;
use crate::dex::Dex;
use schema::{MoveCategory, MoveDescriptor, PokemonType, Scenario, SpeciesEntry};

const SPECIES: &[(&str, &str, &[PokemonType])] = &[
    ("snorlax", "Snorlax", &[PokemonType::Normal]),
    ("charizard", "Charizard", &[PokemonType::Fire, PokemonType::Flying]),
    ("venusaur", "Venusaur", &[PokemonType::Grass, PokemonType::Poison]),
    ("blastoise", "Blastoise", &[PokemonType::Water]),
    ("gyarados", "Gyarados", &[PokemonType::Water, PokemonType::Flying]),
    ("garchomp", "Garchomp", &[PokemonType::Dragon, PokemonType::Ground]),
    ("clefable", "Clefable", &[PokemonType::Fairy]),
    ("ferrothorn", "Ferrothorn", &[PokemonType::Grass, PokemonType::Steel]),
    ("abomasnow", "Abomasnow", &[PokemonType::Grass, PokemonType::Ice]),
    ("machamp", "Machamp", &[PokemonType::Fighting]),
    ("tyranitar", "Tyranitar", &[PokemonType::Rock, PokemonType::Dark]),
    ("quagsire", "Quagsire", &[PokemonType::Water, PokemonType::Ground]),
];

const MOVES: &[(&str, &str, PokemonType, MoveCategory, u16)] = &[
    ("tackle", "Tackle", PokemonType::Normal, MoveCategory::Physical, 40),
    ("bodyslam", "Body Slam", PokemonType::Normal, MoveCategory::Physical, 85),
    ("firelash", "Fire Lash", PokemonType::Fire, MoveCategory::Physical, 80),
    ("flamethrower", "Flamethrower", PokemonType::Fire, MoveCategory::Special, 90),
    ("surf", "Surf", PokemonType::Water, MoveCategory::Special, 90),
    ("waterfall", "Waterfall", PokemonType::Water, MoveCategory::Physical, 80),
    ("crunch", "Crunch", PokemonType::Dark, MoveCategory::Physical, 80),
    ("earthquake", "Earthquake", PokemonType::Ground, MoveCategory::Physical, 100),
    ("outrage", "Outrage", PokemonType::Dragon, MoveCategory::Physical, 120),
    ("icebeam", "Ice Beam", PokemonType::Ice, MoveCategory::Special, 90),
    ("moonblast", "Moonblast", PokemonType::Fairy, MoveCategory::Special, 95),
    ("closecombat", "Close Combat", PokemonType::Fighting, MoveCategory::Physical, 120),
    ("lowkick", "Low Kick", PokemonType::Fighting, MoveCategory::Physical, 0),
    ("swordsdance", "Swords Dance", PokemonType::Normal, MoveCategory::Status, 0),
    ("dragondance", "Dragon Dance", PokemonType::Dragon, MoveCategory::Status, 0),
    ("taunt", "Taunt", PokemonType::Dark, MoveCategory::Status, 0),
    ("roar", "Roar", PokemonType::Normal, MoveCategory::Status, 0),
];

/// A small dex covering every species and move the battle tests use.
pub fn test_dex() -> Dex {
    let mut dex = Dex::new();
    for (id, name, types) in SPECIES {
        dex.insert_species(SpeciesEntry {
            id: id.to_string(),
            name: name.to_string(),
            types: types.to_vec(),
        });
    }
    for (id, name, move_type, category, base_power) in MOVES {
        dex.insert_move(MoveDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            move_type: *move_type,
            category: *category,
            base_power: *base_power,
        });
    }
    dex
}

/// A combatant at full health with its dex types and the given moves.
pub fn mon(dex: &Dex, species: &str, moves: &[&str]) -> CombatantState {
    CombatantState::from_dex(dex, species).with_moves(moves.iter().copied())
}

/// Own roster filled from slot 0, with `active` in the exchange.
pub fn create_test_context(
    own: Vec<CombatantState>,
    active: usize,
    opponent: CombatantState,
) -> BattleContext {
    let roster = Roster::from_slots(own.into_iter().map(Some).collect());
    BattleContext::new(roster, active, opponent)
}

pub fn flags(consider_setup: bool, consider_no_switch: bool, scenario: Scenario) -> PolicyFlags {
    PolicyFlags {
        consider_setup,
        consider_no_switch,
        scenario,
    }
}

/// Every candidate of `ctx` scored with the default config.
pub fn score_with_defaults(dex: &Dex, ctx: &BattleContext) -> Vec<ScoredAction> {
    let config = AdvisorConfig::default();
    Advisor::new(dex, &config).scored_actions(ctx)
}

pub fn advise_with_defaults(dex: &Dex, ctx: &BattleContext) -> Advice {
    let config = AdvisorConfig::default();
    Advisor::new(dex, &config).advise(ctx)
}

/// Unwraps a ranked result, failing the test on a degenerate one.
pub fn expect_ranking(advice: Advice) -> Ranking {
    match advice {
        Advice::Ranked(ranking) => ranking,
        other => panic!("Expected a ranking but got {:?}", other),
    }
}

/// The scored action with the given label.
pub fn find_action<'a>(actions: &'a [ScoredAction], label: &str) -> &'a ScoredAction {
    match actions.iter().find(|action| action.label == label) {
        Some(action) => action,
        None => panic!(
            "No action labelled {:?} among {:?}",
            label,
            actions.iter().map(|a| a.label.as_str()).collect::<Vec<_>>()
        ),
    }
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "Expected {} but got {}",
        expected,
        actual
    );
}

pub fn labels(actions: &[ScoredAction]) -> Vec<&str> {
    actions.iter().map(|action| action.label.as_str()).collect()
}
