//! The resolved evolution chain: nodes in breadth-first order plus the edges
//! actually traversed from the root.

use crate::classify;
use crate::error::ChainError;
use crate::id::{SpeciesId, SpeciesInfo};
use crate::requirement::Requirement;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// A directed "evolves into" relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvolutionEdge {
    pub from: SpeciesId,
    pub to: SpeciesId,
    #[serde(default)]
    pub requirement: Requirement,
}

impl EvolutionEdge {
    pub fn new(from: SpeciesId, to: SpeciesId, requirement: Requirement) -> Self {
        Self {
            from,
            to,
            requirement,
        }
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Rendering classification of a chain member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HighlightState {
    #[default]
    Normal,
    /// The chain root, when it is not the current species.
    Root,
    /// The species the detail view is showing.
    Current,
}

/// A species placed in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainNode {
    pub species_id: SpeciesId,
    pub display_name: String,
    pub display_number: u32,
    /// Breadth-first distance from the root.
    pub stage_index: u32,
    pub highlight: HighlightState,
}

impl ChainNode {
    pub fn new(species_id: SpeciesId, info: SpeciesInfo, stage_index: u32) -> Self {
        Self {
            species_id,
            display_name: info.name,
            display_number: info.number,
            stage_index,
            highlight: HighlightState::Normal,
        }
    }
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// How the layout engine arranges a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Every node has at most one successor: a single row.
    Linear,
    /// Some node has several successors: one column per stage.
    Branching,
}

/// A resolved evolution chain. Built fresh per detail view and never mutated
/// once the engine hands it to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub root_id: SpeciesId,
    /// Members in breadth-first order from the root. Species ids are unique.
    pub nodes: Vec<ChainNode>,
    /// Edges in traversal order.
    pub edges: Vec<EvolutionEdge>,
    pub is_branching: bool,
}

impl Chain {
    /// A chain holding only `species`, used for species without evolutions
    /// and as the fallback when the evolution data is inconsistent.
    pub fn single(species: SpeciesId, info: SpeciesInfo) -> Self {
        Self {
            root_id: species,
            nodes: vec![ChainNode::new(species, info, 0)],
            edges: Vec::new(),
            is_branching: false,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: SpeciesId) -> Option<&ChainNode> {
        self.nodes.iter().find(|n| n.species_id == id)
    }

    pub fn contains(&self, id: SpeciesId) -> bool {
        self.node(id).is_some()
    }

    pub fn root(&self) -> Option<&ChainNode> {
        self.node(self.root_id)
    }

    /// The node marked [`HighlightState::Current`], if any.
    pub fn current(&self) -> Option<&ChainNode> {
        self.nodes
            .iter()
            .find(|n| n.highlight == HighlightState::Current)
    }

    /// Number of distinct stages (1 for a single-node chain).
    pub fn stage_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.stage_index as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Nodes at the given stage, in breadth-first order.
    pub fn nodes_at_stage(&self, stage: u32) -> Vec<&ChainNode> {
        self.nodes
            .iter()
            .filter(|n| n.stage_index == stage)
            .collect()
    }

    /// Outgoing edges of `id`, in traversal order.
    pub fn children_of(&self, id: SpeciesId) -> impl Iterator<Item = &EvolutionEdge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    pub fn layout_mode(&self) -> LayoutMode {
        if self.is_branching {
            LayoutMode::Branching
        } else {
            LayoutMode::Linear
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check the structural invariants of a chain: unique members, a single root
/// with no incoming edge, no cycles, stage indices equal to the shortest
/// distance from the root, and a branching flag that agrees with the edges.
///
/// A member may be the target of more than one edge. Highlight states are
/// not checked; a chain may legitimately have no current member.
pub fn validate_chain(chain: &Chain) -> Result<(), ChainError> {
    let mut members = HashSet::with_capacity(chain.nodes.len());
    for node in &chain.nodes {
        if !members.insert(node.species_id) {
            return Err(ChainError::DuplicateNode(node.species_id));
        }
    }

    let mut in_degree: HashMap<SpeciesId, usize> =
        chain.nodes.iter().map(|n| (n.species_id, 0)).collect();
    for edge in &chain.edges {
        if !members.contains(&edge.from) || !members.contains(&edge.to) {
            return Err(ChainError::DanglingEdge {
                from: edge.from,
                to: edge.to,
            });
        }
        *in_degree.entry(edge.to).or_insert(0) += 1;
    }

    let roots: Vec<SpeciesId> = chain
        .nodes
        .iter()
        .map(|n| n.species_id)
        .filter(|id| in_degree[id] == 0)
        .collect();
    match roots.len() {
        0 => return Err(ChainError::CycleDetected { at: chain.root_id }),
        1 => {}
        count => return Err(ChainError::MultipleRoots { count }),
    }
    if roots[0] != chain.root_id {
        return Err(ChainError::RootMismatch(chain.root_id));
    }

    // Kahn's algorithm: whatever keeps a positive in-degree sits on a cycle.
    let mut remaining = in_degree;
    let mut queue: VecDeque<SpeciesId> = roots.into_iter().collect();
    let mut processed = 0;
    while let Some(id) = queue.pop_front() {
        processed += 1;
        for edge in chain.children_of(id) {
            if let Some(degree) = remaining.get_mut(&edge.to) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(edge.to);
                }
            }
        }
    }
    if processed < chain.nodes.len() {
        let at = chain
            .nodes
            .iter()
            .map(|n| n.species_id)
            .find(|id| remaining[id] > 0)
            .unwrap_or(chain.root_id);
        return Err(ChainError::CycleDetected { at });
    }

    let mut depth: HashMap<SpeciesId, u32> = HashMap::new();
    let mut queue = VecDeque::new();
    depth.insert(chain.root_id, 0);
    queue.push_back(chain.root_id);
    while let Some(id) = queue.pop_front() {
        let d = depth[&id];
        for edge in chain.children_of(id) {
            if !depth.contains_key(&edge.to) {
                depth.insert(edge.to, d + 1);
                queue.push_back(edge.to);
            }
        }
    }

    for node in &chain.nodes {
        let expected = depth.get(&node.species_id).copied().unwrap_or(u32::MAX);
        if expected != node.stage_index {
            return Err(ChainError::StageMismatch {
                species: node.species_id,
                expected,
                found: node.stage_index,
            });
        }
    }

    let expected = classify::is_branching(&chain.edges);
    if expected != chain.is_branching {
        return Err(ChainError::BranchingFlagMismatch {
            expected,
            found: chain.is_branching,
        });
    }

    Ok(())
}
