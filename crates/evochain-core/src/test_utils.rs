//! Shared fixtures for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::chain::Chain;
use crate::classify::classify_branching;
use crate::id::{SpeciesId, SpeciesInfo};
use crate::provider::{EdgeProvider, MemoryEdgeProvider};
use crate::requirement::Requirement;
use crate::resolver::build_chain;

// ===========================================================================
// Chain builders
// ===========================================================================

pub fn single_chain(id: u32) -> Chain {
    Chain::single(SpeciesId(id), SpeciesInfo::unknown(SpeciesId(id)))
}

/// Resolve a chain rooted at `root` from `(from, to)` pairs. Each edge
/// requires `Level {from}`.
pub fn chain_from_edges(root: u32, edges: &[(u32, u32)]) -> Chain {
    let mut provider = MemoryEdgeProvider::new();
    for &(from, to) in edges {
        provider.add_edge(SpeciesId(from), SpeciesId(to), Requirement::level(from));
    }
    let all = provider.edges_for(SpeciesId(root));
    let mut chain = match build_chain(SpeciesId(root), &all, &provider) {
        Ok(chain) => chain,
        Err(e) => panic!("fixture edges do not form a chain: {e}"),
    };
    classify_branching(&mut chain);
    chain
}

/// `ids[0] -> ids[1] -> ...`
pub fn linear_chain(ids: &[u32]) -> Chain {
    let edges: Vec<(u32, u32)> = ids.windows(2).map(|w| (w[0], w[1])).collect();
    chain_from_edges(ids[0], &edges)
}

/// `root` evolving directly into each of `branches`, in order.
pub fn branching_chain(root: u32, branches: &[u32]) -> Chain {
    let edges: Vec<(u32, u32)> = branches.iter().map(|&b| (root, b)).collect();
    chain_from_edges(root, &edges)
}

// ===========================================================================
// Sample dex
// ===========================================================================

pub const BULBASAUR: SpeciesId = SpeciesId(1);
pub const IVYSAUR: SpeciesId = SpeciesId(2);
pub const VENUSAUR: SpeciesId = SpeciesId(3);
pub const ODDISH: SpeciesId = SpeciesId(43);
pub const GLOOM: SpeciesId = SpeciesId(44);
pub const VILEPLUME: SpeciesId = SpeciesId(45);
pub const HAUNTER: SpeciesId = SpeciesId(93);
pub const GENGAR: SpeciesId = SpeciesId(94);
pub const GASTLY: SpeciesId = SpeciesId(92);
pub const DITTO: SpeciesId = SpeciesId(132);
pub const EEVEE: SpeciesId = SpeciesId(133);
pub const VAPOREON: SpeciesId = SpeciesId(134);
pub const JOLTEON: SpeciesId = SpeciesId(135);
pub const FLAREON: SpeciesId = SpeciesId(136);
pub const BELLOSSOM: SpeciesId = SpeciesId(182);
pub const ESPEON: SpeciesId = SpeciesId(196);
pub const UMBREON: SpeciesId = SpeciesId(197);

/// A small dex covering linear, branching, multi-stage branching, and
/// evolution-less species, with every requirement method.
pub fn sample_provider() -> MemoryEdgeProvider {
    let mut p = MemoryEdgeProvider::new();
    for (id, name) in [
        (BULBASAUR, "Bulbasaur"),
        (IVYSAUR, "Ivysaur"),
        (VENUSAUR, "Venusaur"),
        (ODDISH, "Oddish"),
        (GLOOM, "Gloom"),
        (VILEPLUME, "Vileplume"),
        (GASTLY, "Gastly"),
        (HAUNTER, "Haunter"),
        (GENGAR, "Gengar"),
        (DITTO, "Ditto"),
        (EEVEE, "Eevee"),
        (VAPOREON, "Vaporeon"),
        (JOLTEON, "Jolteon"),
        (FLAREON, "Flareon"),
        (BELLOSSOM, "Bellossom"),
        (ESPEON, "Espeon"),
        (UMBREON, "Umbreon"),
    ] {
        p.add_species(id, name, id.0);
    }

    p.add_edge(BULBASAUR, IVYSAUR, Requirement::level(16))
        .add_edge(IVYSAUR, VENUSAUR, Requirement::level(32))
        .add_edge(ODDISH, GLOOM, Requirement::level(21))
        .add_edge(GLOOM, VILEPLUME, Requirement::item("Leaf Stone"))
        .add_edge(GLOOM, BELLOSSOM, Requirement::item("Sun Stone"))
        .add_edge(GASTLY, HAUNTER, Requirement::level(25))
        .add_edge(HAUNTER, GENGAR, Requirement::trade())
        .add_edge(EEVEE, VAPOREON, Requirement::item("Water Stone"))
        .add_edge(EEVEE, JOLTEON, Requirement::item("Thunder Stone"))
        .add_edge(EEVEE, FLAREON, Requirement::item("Fire Stone"))
        .add_edge(EEVEE, ESPEON, Requirement::happiness_day())
        .add_edge(EEVEE, UMBREON, Requirement::happiness_night());
    p
}
