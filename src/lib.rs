// In: src/lib.rs

//! Pick Lab Action Advisor
//!
//! A lightweight, explainable battle advisor: given the two active
//! combatants, the rosters behind them and a few policy flags, it scores
//! every action available this turn by a coarse risk of losing the exchange
//! and returns a ranked recommendation list plus the dangerous options.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod dex;
pub mod errors;
pub mod mcp_interface;
pub mod snapshot;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{MoveCategory, MoveDescriptor, PokemonType, Scenario, SpeciesEntry};

// --- From this crate's modules (`src/`) ---

// The engine and its input/output values.
pub use battle::ai::{ActionCandidate, Advice, Advisor, Ranking, ScoredAction};
pub use battle::context::{BattleContext, CombatantState, PolicyFlags, Roster, Side};
pub use battle::risk::{Note, RejectionReason, RiskComponents};

// Reference data, configuration and hand-off.
pub use config::AdvisorConfig;
pub use dex::{normalize_id, Dex};
pub use snapshot::{Selection, Snapshot};

// Crate-specific error and result types.
pub use errors::{
    AdvisorError, AdvisorResult, ConfigError, ConfigResult, DataError, DataResult, SnapshotError,
    SnapshotResult,
};
