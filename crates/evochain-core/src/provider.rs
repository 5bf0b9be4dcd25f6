//! The boundary to the species record store.
//!
//! The engine only needs the evolution edges around one species and, when
//! available, display metadata and an explicit chain root. [`EdgeProvider`]
//! captures exactly that. [`MemoryEdgeProvider`] is a simple in-process
//! implementation used by tests and by small static datasets.

use crate::chain::EvolutionEdge;
use crate::id::{SpeciesId, SpeciesInfo};
use crate::requirement::Requirement;
use std::collections::{HashMap, HashSet, VecDeque};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Supplies evolution edges for the engine.
pub trait EdgeProvider {
    /// Every edge in the connected evolution component containing `species`.
    /// Empty for species without evolutions. Must not include edges from an
    /// unrelated component.
    fn edges_for(&self, species: SpeciesId) -> Vec<EvolutionEdge>;

    /// Display metadata for `species`.
    fn species_info(&self, _species: SpeciesId) -> Option<SpeciesInfo> {
        None
    }

    /// The chain root for `species`, for data sources that store it
    /// explicitly. The resolver still walks predecessors when this is `None`
    /// or the hint does not hold up.
    fn root_hint(&self, _species: SpeciesId) -> Option<SpeciesId> {
        None
    }
}

impl<P: EdgeProvider + ?Sized> EdgeProvider for &P {
    fn edges_for(&self, species: SpeciesId) -> Vec<EvolutionEdge> {
        (**self).edges_for(species)
    }

    fn species_info(&self, species: SpeciesId) -> Option<SpeciesInfo> {
        (**self).species_info(species)
    }

    fn root_hint(&self, species: SpeciesId) -> Option<SpeciesId> {
        (**self).root_hint(species)
    }
}

impl<P: EdgeProvider + ?Sized> EdgeProvider for Box<P> {
    fn edges_for(&self, species: SpeciesId) -> Vec<EvolutionEdge> {
        (**self).edges_for(species)
    }

    fn species_info(&self, species: SpeciesId) -> Option<SpeciesInfo> {
        (**self).species_info(species)
    }

    fn root_hint(&self, species: SpeciesId) -> Option<SpeciesId> {
        (**self).root_hint(species)
    }
}

// ---------------------------------------------------------------------------
// Component extraction
// ---------------------------------------------------------------------------

/// The edges of the component containing `start`, treating edges as
/// undirected for reachability. Order follows `edges`.
pub fn component_edges(start: SpeciesId, edges: &[EvolutionEdge]) -> Vec<EvolutionEdge> {
    let mut neighbours: HashMap<SpeciesId, Vec<SpeciesId>> = HashMap::new();
    for edge in edges {
        neighbours.entry(edge.from).or_default().push(edge.to);
        neighbours.entry(edge.to).or_default().push(edge.from);
    }

    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);
    while let Some(id) = queue.pop_front() {
        for &next in neighbours.get(&id).into_iter().flatten() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    edges
        .iter()
        .filter(|e| seen.contains(&e.from))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// In-memory provider
// ---------------------------------------------------------------------------

/// An [`EdgeProvider`] backed by in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryEdgeProvider {
    species: HashMap<SpeciesId, SpeciesInfo>,
    edges: Vec<EvolutionEdge>,
    roots: HashMap<SpeciesId, SpeciesId>,
}

impl MemoryEdgeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register display metadata. Re-registering replaces the entry.
    pub fn add_species(&mut self, id: SpeciesId, name: impl Into<String>, number: u32) -> &mut Self {
        self.species.insert(id, SpeciesInfo::new(name, number));
        self
    }

    pub fn add_edge(&mut self, from: SpeciesId, to: SpeciesId, requirement: Requirement) -> &mut Self {
        self.edges.push(EvolutionEdge::new(from, to, requirement));
        self
    }

    /// Record an explicit chain root for `species`.
    pub fn set_root_hint(&mut self, species: SpeciesId, root: SpeciesId) -> &mut Self {
        self.roots.insert(species, root);
        self
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

impl EdgeProvider for MemoryEdgeProvider {
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
