//! Species and move reference data.
//!
//! The advisor only needs a species' types and a move's type, category and
//! base power. Data comes from Showdown-style JSON dumps (`pokedex.json`,
//! `moves.json`) or from a postcard blob produced by [`Dex::save_compiled`].
//! Lookups never fail: a missing species has no types, a missing move has
//! no descriptor, and callers fall back to neutral values.

use crate::errors::{DataError, DataResult};
use schema::{MoveCategory, MoveDescriptor, PokemonType, SpeciesEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const POKEDEX_FILE: &str = "pokedex.json";
pub const MOVES_FILE: &str = "moves.json";
pub const COMPILED_FILE: &str = "dex.bin";

/// Lowercases and strips everything outside `[a-z0-9]`, so "Dragon Dance",
/// "dragon-dance" and "dragondance" all name the same move.
pub fn normalize_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dex {
    species: HashMap<String, SpeciesEntry>,
    moves: HashMap<String, MoveDescriptor>,
}

// Raw Showdown shapes. Everything we don't read is ignored.
#[derive(Debug, Deserialize)]
struct RawSpecies {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMove {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    move_type: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    base_power: u16,
}

impl Dex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `pokedex.json` and `moves.json`, or `dex.bin` when the JSON dumps
    /// are absent.
    pub fn load(data_path: &Path) -> DataResult<Self> {
        let pokedex_path = data_path.join(POKEDEX_FILE);
        let moves_path = data_path.join(MOVES_FILE);
        let compiled_path = data_path.join(COMPILED_FILE);

        if !pokedex_path.exists() && compiled_path.exists() {
            return Self::load_compiled(&compiled_path);
        }

        let pokedex = read_file(&pokedex_path)?;
        let moves = read_file(&moves_path)?;

        let mut dex = Dex::new();
        for entry in parse_pokedex(&pokedex, &pokedex_path.display().to_string())? {
            dex.insert_species(entry);
        }
        for descriptor in parse_moves(&moves, &moves_path.display().to_string())? {
            dex.insert_move(descriptor);
        }

        tracing::info!(
            species = dex.species_count(),
            moves = dex.move_count(),
            "loaded dex from {}",
            data_path.display()
        );
        Ok(dex)
    }

    /// Build a dex straight from the two JSON documents.
    pub fn from_showdown_json(pokedex: &str, moves: &str) -> DataResult<Self> {
        let mut dex = Dex::new();
        for entry in parse_pokedex(pokedex, POKEDEX_FILE)? {
            dex.insert_species(entry);
        }
        for descriptor in parse_moves(moves, MOVES_FILE)? {
            dex.insert_move(descriptor);
        }
        Ok(dex)
    }

    pub fn insert_species(&mut self, mut entry: SpeciesEntry) {
        entry.id = normalize_id(&entry.id);
        self.species.insert(entry.id.clone(), entry);
    }

    pub fn insert_move(&mut self, mut descriptor: MoveDescriptor) {
        descriptor.id = normalize_id(&descriptor.id);
        self.moves.insert(descriptor.id.clone(), descriptor);
    }

    pub fn species(&self, species_id: &str) -> Option<&SpeciesEntry> {
        self.species.get(&normalize_id(species_id))
    }

    /// Types of a species; empty when the species is unknown.
    pub fn species_types(&self, species_id: &str) -> Vec<PokemonType> {
        self.species(species_id)
            .map(|entry| entry.types.clone())
            .unwrap_or_default()
    }

    /// Display name of a species, falling back to the raw id.
    pub fn species_name(&self, species_id: &str) -> String {
        self.species(species_id)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| species_id.to_string())
    }

    pub fn move_descriptor(&self, move_id: &str) -> Option<&MoveDescriptor> {
        self.moves.get(&normalize_id(move_id))
    }

    /// Display name of a move, falling back to the raw id.
    pub fn move_name(&self, move_id: &str) -> String {
        self.move_descriptor(move_id)
            .map(|descriptor| descriptor.name.clone())
            .unwrap_or_else(|| move_id.to_string())
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    // --- Compiled cache ---

    pub fn to_compiled_bytes(&self) -> DataResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|e| DataError::Compiled(e.to_string()))
    }

    pub fn from_compiled_bytes(bytes: &[u8]) -> DataResult<Self> {
        postcard::from_bytes(bytes).map_err(|e| DataError::Compiled(e.to_string()))
    }

    pub fn save_compiled(&self, path: &Path) -> DataResult<()> {
        let bytes = self.to_compiled_bytes()?;
        fs::write(path, bytes).map_err(|e| DataError::Io {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }

    pub fn load_compiled(path: &Path) -> DataResult<Self> {
        let bytes = fs::read(path).map_err(|e| DataError::Io {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        let dex = Self::from_compiled_bytes(&bytes)?;
        tracing::info!(
            species = dex.species_count(),
            moves = dex.move_count(),
            "loaded compiled dex from {}",
            path.display()
        );
        Ok(dex)
    }
}

fn read_file(path: &Path) -> DataResult<String> {
    fs::read_to_string(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

fn parse_pokedex(json: &str, source: &str) -> DataResult<Vec<SpeciesEntry>> {
    let raw: HashMap<String, RawSpecies> =
        serde_json::from_str(json).map_err(|e| DataError::MalformedJson {
            path: source.to_string(),
            details: e.to_string(),
        })?;

    let mut entries = Vec::with_capacity(raw.len());
    for (key, species) in raw {
        let types: Vec<PokemonType> = species
            .types
            .iter()
            .filter_map(|name| {
                let parsed = PokemonType::from_name(name);
                if parsed.is_none() {
                    tracing::warn!("species {}: dropping unknown type {:?}", key, name);
                }
                parsed
            })
            .take(2)
            .collect();

        entries.push(SpeciesEntry {
            name: species.name.unwrap_or_else(|| key.clone()),
            id: key,
            types,
        });
    }
    Ok(entries)
}

fn parse_moves(json: &str, source: &str) -> DataResult<Vec<MoveDescriptor>> {
    let raw: HashMap<String, RawMove> =
        serde_json::from_str(json).map_err(|e| DataError::MalformedJson {
            path: source.to_string(),
            details: e.to_string(),
        })?;

    let mut descriptors = Vec::with_capacity(raw.len());
    for (key, mv) in raw {
        let category = match mv.category.as_deref().and_then(MoveCategory::from_name) {
            Some(category) => category,
            None => {
                tracing::warn!("move {}: skipping entry with category {:?}", key, mv.category);
                continue;
            }
        };
        let move_type = mv
            .move_type
            .as_deref()
            .and_then(PokemonType::from_name)
            .unwrap_or(PokemonType::Typeless);

        descriptors.push(MoveDescriptor {
            name: mv.name.unwrap_or_else(|| key.clone()),
            id: key,
            move_type,
            category,
            base_power: mv.base_power,
        });
    }
    Ok(descriptors)
}
