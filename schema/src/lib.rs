// Pick Lab Schema - Shared type definitions
// This crate holds the static vocabulary (types, the type chart, move and
// species descriptors, scenario policies) shared by the advisor library and
// its binaries, all serializable with serde.

// Re-export the main types
pub use battle_data::*;
pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod move_types;
pub mod pokemon_types;
pub mod species_data;
