//! Type matchups on top of the schema's type chart.

use schema::PokemonType;

/// Multiplier of `attack` against a defender with `defender_types`.
///
/// One of {0, 0.25, 0.5, 1, 2, 4}; an untyped defender takes neutral damage.
pub fn effectiveness(attack: PokemonType, defender_types: &[PokemonType]) -> f32 {
    attack.effectiveness_against(defender_types)
}

/// The largest multiplier any of `attacking_types` deals to the defender,
/// used as "how exposed is this mon". Neutral when nothing is attacking.
pub fn worst_case_multiplier(defender_types: &[PokemonType], attacking_types: &[PokemonType]) -> f32 {
    attacking_types
        .iter()
        .map(|attack| effectiveness(*attack, defender_types))
        .reduce(f32::max)
        .unwrap_or(1.0)
}
