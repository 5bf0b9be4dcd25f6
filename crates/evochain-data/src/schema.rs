//! Serde structs for dex data files.
//!
//! These define the on-disk format for species and evolutions. They are
//! deserialized from RON, JSON, or TOML and then resolved into engine types
//! by the loader. Species are referenced by `name` throughout.

use evochain_core::requirement::{EvolutionMethod, Requirement};
use serde::Deserialize;

// ===========================================================================
// Species
// ===========================================================================

/// A species entry in `species.{ron,json,toml}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesData {
    /// Unique reference key, e.g. `"bulbasaur"`.
    pub name: String,
    /// National dex number. Also used as the species id.
    pub number: u32,
    /// Name shown on screen. Defaults to `name`.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Explicit chain root, for datasets that record it.
    #[serde(default)]
    pub root: Option<String>,
}

impl SpeciesData {
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

// ===========================================================================
// Evolutions
// ===========================================================================

/// An evolution entry in `evolutions.{ron,json,toml}`.
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionData {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub method: EvolutionMethod,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub item: Option<String>,
}

impl EvolutionData {
    pub fn requirement(&self) -> Requirement {
        Requirement {
            method: self.method,
            level: self.level,
            item: self.item.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_defaults() {
        let s: SpeciesData = ron::from_str(r#"(name: "eevee", number: 133)"#).unwrap();
        assert_eq!(s.shown_name(), "eevee");
        assert!(s.root.is_none());
    }

    #[test]
    fn evolution_from_ron() {
        let e: EvolutionData =
            ron::from_str(r#"(from: "eevee", to: "jolteon", method: item, item: Some("Thunder Stone"))"#)
                .unwrap();
        assert_eq!(e.requirement(), Requirement::item("Thunder Stone"));
    }

    #[test]
    fn evolution_from_json_upper_case_method() {
        let e: EvolutionData =
            serde_json::from_str(r#"{"from": "bulbasaur", "to": "ivysaur", "method": "LEVEL", "level": 16}"#)
                .unwrap();
        assert_eq!(e.requirement(), Requirement::level(16));
    }

    #[test]
    fn evolution_without_method_is_unknown() {
        let e: EvolutionData = serde_json::from_str(r#"{"from": "a", "to": "b"}"#).unwrap();
        assert_eq!(e.method, EvolutionMethod::Unknown);
    }
}
