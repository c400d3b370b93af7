//! Game content the advisor is told about rather than hard-coding: which
//! moves set up, which moves stop setup, which abilities ignore boosts, and
//! which species are known to carry a setup move.

use crate::dex::normalize_id;
use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "advisor.ron";
pub const SETUP_INDEX_FILE: &str = "setup_index.json";

const DEFAULT_SETUP_MOVES: [&str; 2] = ["dragondance", "swordsdance"];

const DEFAULT_STOP_MOVES: [&str; 9] = [
    "taunt",
    "encore",
    "roar",
    "whirlwind",
    "haze",
    "clearsmog",
    "dragontail",
    "circlethrow",
    "spectralthief",
];

const DEFAULT_ANSWER_ABILITIES: [&str; 1] = ["unaware"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Moves that boost the user and snowball if left alone.
    pub setup_moves: BTreeSet<String>,
    /// Moves that deny or undo setup (taunt, encore, phazing, stat resets).
    pub stop_moves: BTreeSet<String>,
    /// Abilities that make an opponent's boosts irrelevant.
    pub answer_abilities: BTreeSet<String>,
    /// Setup move -> species known to run it, for sets that are not revealed yet.
    pub setup_species: BTreeMap<String, BTreeSet<String>>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            setup_moves: DEFAULT_SETUP_MOVES.iter().map(|s| s.to_string()).collect(),
            stop_moves: DEFAULT_STOP_MOVES.iter().map(|s| s.to_string()).collect(),
            answer_abilities: DEFAULT_ANSWER_ABILITIES.iter().map(|s| s.to_string()).collect(),
            setup_species: BTreeMap::new(),
        }
    }
}

impl AdvisorConfig {
    /// Parse a RON document. Missing fields keep their defaults.
    pub fn from_ron(text: &str) -> ConfigResult<Self> {
        let config: AdvisorConfig =
            ron::from_str(text).map_err(|e| ConfigError::MalformedRon(e.to_string()))?;
        Ok(config.normalized())
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = read_file(path)?;
        Self::from_ron(&text)
    }

    /// `advisor.ron` and `setup_index.json` from a data directory, each
    /// optional.
    pub fn load_from_dir(data_path: &Path) -> ConfigResult<Self> {
        let config_path = data_path.join(CONFIG_FILE);
        let mut config = if config_path.exists() {
            Self::load(&config_path)?
        } else {
            Self::default()
        };

        let index_path = data_path.join(SETUP_INDEX_FILE);
        if index_path.exists() {
            let text = read_file(&index_path)?;
            config.merge_setup_index_json(&text)?;
        }

        tracing::info!(
            setup_moves = config.setup_moves.len(),
            stop_moves = config.stop_moves.len(),
            indexed_setup_moves = config.setup_species.len(),
            "advisor config ready"
        );
        Ok(config)
    }

    /// Merge a `{ "<setup move>": ["<species>", ...] }` index. Every key also
    /// becomes a setup move.
    pub fn merge_setup_index_json(&mut self, json: &str) -> ConfigResult<()> {
        let index: BTreeMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| ConfigError::MalformedSetupIndex(e.to_string()))?;

        for (setup_move, species) in index {
            let setup_move = normalize_id(&setup_move);
            self.setup_moves.insert(setup_move.clone());
            self.setup_species
                .entry(setup_move)
                .or_default()
                .extend(species.iter().map(|s| normalize_id(s)));
        }
        Ok(())
    }

    pub fn is_setup_move(&self, move_id: &str) -> bool {
        self.setup_moves.contains(&normalize_id(move_id))
    }

    pub fn is_stop_move(&self, move_id: &str) -> bool {
        self.stop_moves.contains(&normalize_id(move_id))
    }

    pub fn is_answer_ability(&self, ability: &str) -> bool {
        self.answer_abilities.contains(&normalize_id(ability))
    }

    /// Setup moves this species may be carrying, either revealed in
    /// `known_moves` or listed for the species in the index. Sorted by id.
    pub fn setup_kinds<'a, I>(&self, species_id: &str, known_moves: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let species_id = normalize_id(species_id);
        let revealed: BTreeSet<String> = known_moves.into_iter().map(normalize_id).collect();

        self.setup_moves
            .iter()
            .filter(|setup_move| {
                revealed.contains(*setup_move)
                    || self
                        .setup_species
                        .get(*setup_move)
                        .is_some_and(|species| species.contains(&species_id))
            })
            .cloned()
            .collect()
    }

    fn normalized(self) -> Self {
        let normalize_set =
            |set: BTreeSet<String>| set.iter().map(|s| normalize_id(s)).collect::<BTreeSet<_>>();
        Self {
            setup_moves: normalize_set(self.setup_moves),
            stop_moves: normalize_set(self.stop_moves),
            answer_abilities: normalize_set(self.answer_abilities),
            setup_species: self
                .setup_species
                .into_iter()
                .map(|(setup_move, species)| (normalize_id(&setup_move), normalize_set(species)))
                .collect(),
        }
    }
}

fn read_file(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::default();
        assert!(config.is_setup_move("Dragon Dance"));
        assert!(config.is_stop_move("taunt"));
        assert!(config.is_stop_move("Clear Smog"));
        assert!(!config.is_stop_move("tackle"));
        assert!(config.is_answer_ability("Unaware"));
        assert!(!config.is_answer_ability("Intimidate"));
    }

    #[test]
    fn test_ron_overrides_and_keeps_defaults() {
        let config = AdvisorConfig::from_ron(
            r#"(
                stop_moves: ["Taunt", "Yawn"],
                answer_abilities: ["Unaware", "Clear Body"],
            )"#,
        )
        .expect("valid RON");

        assert!(config.is_stop_move("yawn"));
        assert!(!config.is_stop_move("encore"));
        assert!(config.is_answer_ability("clearbody"));
        assert!(config.is_setup_move("swordsdance"));
    }

    #[test]
    fn test_malformed_ron() {
        let result = AdvisorConfig::from_ron("(stop_moves: [");
        assert!(matches!(result, Err(ConfigError::MalformedRon(_))));
    }

    #[test]
    fn test_setup_index_merge_and_kinds() {
        let mut config = AdvisorConfig::default();
        config
            .merge_setup_index_json(
                r#"{"dragondance": ["Gyarados", "dragonite"], "nastyplot": ["Togekiss"]}"#,
            )
            .expect("valid index");

        assert!(config.is_setup_move("nastyplot"));
        assert_eq!(config.setup_kinds("gyarados", Vec::<&str>::new()), vec!["dragondance".to_string()]);
        assert_eq!(
            config.setup_kinds("scizor", ["Swords Dance", "bulletpunch"]),
            vec!["swordsdance".to_string()]
        );
        assert_eq!(
            config.setup_kinds("dragonite", ["swordsdance"]),
            vec!["dragondance".to_string(), "swordsdance".to_string()]
        );
        assert!(config.setup_kinds("blissey", ["softboiled"]).is_empty());
    }

    #[test]
    fn test_malformed_setup_index() {
        let mut config = AdvisorConfig::default();
        let result = config.merge_setup_index_json(r#"{"dragondance": "gyarados"}"#);
        assert!(matches!(result, Err(ConfigError::MalformedSetupIndex(_))));
    }
}
