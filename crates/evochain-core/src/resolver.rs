//! Chain resolution: locate the root of a species' evolution family, then
//! walk forward breadth-first to collect members, stages, and edges.

use crate::chain::{Chain, ChainNode, EvolutionEdge};
use crate::config::EngineConfig;
use crate::error::ChainError;
use crate::id::{SpeciesId, SpeciesInfo};
use crate::provider::EdgeProvider;
use log::{debug, warn};
use std::collections::{HashMap, HashSet, VecDeque};

// ---------------------------------------------------------------------------
// Root search
// ---------------------------------------------------------------------------

/// Walk "evolves from" edges back from `species` until a species without a
/// predecessor is found. When a species has several predecessors the first
/// edge in `edges` wins.
///
/// Fails if the walk revisits a species or still has a predecessor after
/// `max_hops` steps.
pub fn find_root(
    species: SpeciesId,
    edges: &[EvolutionEdge],
    max_hops: usize,
) -> Result<SpeciesId, ChainError> {
    let predecessor = |id: SpeciesId| edges.iter().find(|e| e.to == id).map(|e| e.from);

    let mut visited = HashSet::new();
    visited.insert(species);
    let mut current = species;

    for _ in 0..max_hops {
        let Some(prev) = predecessor(current) else {
            return Ok(current);
        };
        if !visited.insert(prev) {
            return Err(ChainError::CycleDetected { at: prev });
        }
        current = prev;
    }

    match predecessor(current) {
        None => Ok(current),
        Some(_) => Err(ChainError::HopLimitExceeded {
            start: species,
            limit: max_hops,
        }),
    }
}

/// Whether `hint` can serve as the root of the component described by `edges`.
fn hint_is_root(hint: SpeciesId, species: SpeciesId, edges: &[EvolutionEdge]) -> bool {
    let member = hint == species || edges.iter().any(|e| e.from == hint || e.to == hint);
    member && !edges.iter().any(|e| e.to == hint)
}

// ---------------------------------------------------------------------------
// Forward traversal
// ---------------------------------------------------------------------------

/// True if `ancestor` is `id` or lies on the parent path from `id` to the root.
fn is_ancestor(
    ancestor: SpeciesId,
    mut id: SpeciesId,
    parents: &HashMap<SpeciesId, SpeciesId>,
) -> bool {
    loop {
        if id == ancestor {
            return true;
        }
        match parents.get(&id) {
            Some(&parent) => id = parent,
            None => return false,
        }
    }
}

/// Breadth-first traversal from `root` along `edges`. Children are visited
/// in edge order, which fixes the order of branches.
///
/// An edge into a species that is already placed is not traversed: each
/// member keeps the stage of its first (shortest) path. Such an edge is a
/// cycle when its target is an ancestor of its source.
///
/// The returned chain has every node at [`crate::chain::HighlightState::Normal`]
/// and `is_branching = false`; classification happens afterwards.
pub fn build_chain<P: EdgeProvider + ?Sized>(
    root: SpeciesId,
    edges: &[EvolutionEdge],
    provider: &P,
) -> Result<Chain, ChainError> {
    let info = |id: SpeciesId| provider.species_info(id).unwrap_or_else(|| SpeciesInfo::unknown(id));

    let mut nodes = vec![ChainNode::new(root, info(root), 0)];
    let mut stages: HashMap<SpeciesId, u32> = HashMap::new();
    let mut parents: HashMap<SpeciesId, SpeciesId> = HashMap::new();
    let mut traversed: Vec<EvolutionEdge> = Vec::new();
    let mut used = vec![false; edges.len()];
    let mut queue = VecDeque::new();

    stages.insert(root, 0);
    queue.push_back(root);

    while let Some(id) = queue.pop_front() {
        let stage = stages[&id];
        for (index, edge) in edges.iter().enumerate() {
            if edge.from != id {
                continue;
            }
            used[index] = true;

            if let Some(&seen_at) = stages.get(&edge.to) {
                if is_ancestor(edge.to, id, &parents) {
                    return Err(ChainError::CycleDetected { at: edge.to });
                }
                if traversed.iter().any(|t| t.from == edge.from && t.to == edge.to) {
                    warn!(
                        "skipping repeated evolution edge {:?} -> {:?}",
                        edge.from, edge.to
                    );
                } else {
                    warn!(
                        "skipping evolution edge {:?} -> {:?}: target already reached at stage {}",
                        edge.from, edge.to, seen_at
                    );
                }
                continue;
            }

            stages.insert(edge.to, stage + 1);
            parents.insert(edge.to, id);
            nodes.push(ChainNode::new(edge.to, info(edge.to), stage + 1));
            traversed.push(edge.clone());
            queue.push_back(edge.to);
        }
    }

    let ignored = used.iter().filter(|u| !**u).count();
    if ignored > 0 {
        warn!(
            "ignoring {} evolution edge(s) not reachable from root {:?}",
            ignored, root
        );
    }

    Ok(Chain {
        root_id: root,
        nodes,
        edges: traversed,
        is_branching: false,
    })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Resolve the evolution chain containing `species`.
///
/// An explicit root from [`EdgeProvider::root_hint`] is used when it is
/// consistent with the edges; otherwise the root is found by walking
/// predecessors.
pub fn resolve_chain<P: EdgeProvider + ?Sized>(
    species: SpeciesId,
    provider: &P,
    config: &EngineConfig,
) -> Result<Chain, ChainError> {
    let edges = provider.edges_for(species);

    if let Some(hint) = provider.root_hint(species) {
        if hint_is_root(hint, species, &edges) {
            let chain = build_chain(hint, &edges, provider)?;
            if chain.contains(species) {
                debug!(
                    "resolved chain for {:?} from root hint {:?}: {} nodes",
                    species,
                    hint,
                    chain.len()
                );
                return Ok(chain);
            }
        }
        warn!(
            "root hint {:?} for species {:?} is inconsistent with its edges; walking predecessors",
            hint, species
        );
    }

    let root = find_root(species, &edges, config.max_root_hops)?;
    let chain = build_chain(root, &edges, provider)?;
    debug!(
        "resolved chain for {:?}: root {:?}, {} nodes, {} edges",
        species,
        root,
        chain.len(),
        chain.edges.len()
    );
    Ok(chain)
}
