//! A loaded dex: species metadata and evolution edges keyed by [`SpeciesId`].

use crate::loader::{
    DataLoadError, check_duplicate, deserialize_list, find_data_file, require_data_file,
    resolve_name,
};
use crate::schema::{EvolutionData, SpeciesData};
use evochain_core::chain::EvolutionEdge;
use evochain_core::id::{SpeciesId, SpeciesInfo};
use evochain_core::provider::{EdgeProvider, component_edges};
use log::debug;
use std::collections::HashMap;
use std::path::Path;

/// Species and evolutions resolved from data files. Species ids are dex numbers.
#[derive(Debug, Clone, Default)]
pub struct DexCatalog {
    species: HashMap<SpeciesId, SpeciesInfo>,
    names: HashMap<String, SpeciesId>,
    edges: Vec<EvolutionEdge>,
    roots: HashMap<SpeciesId, SpeciesId>,
}

impl DexCatalog {
    pub fn species_by_name(&self, name: &str) -> Option<SpeciesId> {
        self.names.get(name).copied()
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn edges(&self) -> &[EvolutionEdge] {
        &self.edges
    }
}

impl EdgeProvider for DexCatalog {
    fn edges_for(&self, species: SpeciesId) -> Vec<EvolutionEdge> {
        component_edges(species, &self.edges)
    }

    fn species_info(&self, species: SpeciesId) -> Option<SpeciesInfo> {
        self.species.get(&species).cloned()
    }

    fn root_hint(&self, species: SpeciesId) -> Option<SpeciesId> {
        self.roots.get(&species).copied()
    }
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load a dex from `dir`.
///
/// `species.{ron,json,toml}` is required; `evolutions.{ron,json,toml}` is
/// optional (a dex without it has no evolutions). Species names must be
/// unique, dex numbers must be unique, and every evolution and root
/// reference must name a known species.
pub fn load_dex(dir: &Path) -> Result<DexCatalog, DataLoadError> {
    let species_path = require_data_file(dir, "species")?;
    let species_list: Vec<SpeciesData> = deserialize_list(&species_path, "species")?;

    let mut catalog = DexCatalog::default();
    for entry in &species_list {
        check_duplicate(&catalog.names, &entry.name, &species_path)?;
        let id = SpeciesId(entry.number);
        if catalog.species.contains_key(&id) {
            return Err(DataLoadError::DuplicateNumber {
                file: species_path.clone(),
                number: entry.number,
            });
        }
        catalog.names.insert(entry.name.clone(), id);
        catalog
            .species
            .insert(id, SpeciesInfo::new(entry.shown_name(), entry.number));
    }

    for entry in &species_list {
        if let Some(root) = &entry.root {
            let root_id = *resolve_name(&catalog.names, root, &species_path, "species")?;
            catalog.roots.insert(SpeciesId(entry.number), root_id);
        }
    }

    if let Some(evolutions_path) = find_data_file(dir, "evolutions")? {
        let evolutions: Vec<EvolutionData> = deserialize_list(&evolutions_path, "evolutions")?;
        for entry in &evolutions {
            let from = *resolve_name(&catalog.names, &entry.from, &evolutions_path, "species")?;
            let to = *resolve_name(&catalog.names, &entry.to, &evolutions_path, "species")?;
            catalog
                .edges
                .push(EvolutionEdge::new(from, to, entry.requirement()));
        }
    }

    debug!(
        "loaded dex from {}: {} species, {} evolutions",
        dir.display(),
        catalog.species.len(),
        catalog.edges.len()
    );
    Ok(catalog)
}
