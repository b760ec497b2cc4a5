//! Equipment catalog loading
//!
//! Thin TOML deserialization into the engine's value types. The engine
//! does no schema validation beyond what the types themselves enforce;
//! sourcing and vetting stat data is the caller's responsibility.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::model::equipment::{AmmoType, Armor, Grenade, Weapon};

/// A set of externally supplied equipment definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub ammo: Vec<AmmoType>,
    #[serde(default)]
    pub armor: Vec<Armor>,
    #[serde(default)]
    pub grenades: Vec<Grenade>,
}

impl Catalog {
    pub fn weapon(&self, name: &str) -> Result<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| EngineError::Catalog(format!("no weapon named {name:?}")))
    }

    pub fn ammo(&self, name: &str) -> Result<&AmmoType> {
        self.ammo
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| EngineError::Catalog(format!("no ammunition named {name:?}")))
    }

    pub fn armor(&self, name: &str) -> Result<&Armor> {
        self.armor
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| EngineError::Catalog(format!("no armor named {name:?}")))
    }

    pub fn grenade(&self, name: &str) -> Result<&Grenade> {
        self.grenades
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| EngineError::Catalog(format!("no grenade named {name:?}")))
    }
}

/// Parse a catalog from TOML text.
pub fn parse_catalog(text: &str) -> Result<Catalog> {
    Ok(toml::from_str(text)?)
}

/// Load a catalog from a TOML file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}
