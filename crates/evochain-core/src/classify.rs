use crate::chain::{Chain, EvolutionEdge};
use std::collections::HashMap;

/// Whether any species in `edges` evolves into more than one species.
pub fn is_branching(edges: &[EvolutionEdge]) -> bool {
    let mut out_degree: HashMap<_, usize> = HashMap::with_capacity(edges.len());
    for edge in edges {
        let degree = out_degree.entry(edge.from).or_insert(0);
        *degree += 1;
        if *degree > 1 {
            return true;
        }
    }
    false
}

/// Set `chain.is_branching` from its traversed edges.
pub fn classify_branching(chain: &mut Chain) {
    chain.is_branching = is_branching(&chain.edges);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SpeciesId;
    use crate::requirement::Requirement;

    fn edge(from: u32, to: u32) -> EvolutionEdge {
        EvolutionEdge::new(SpeciesId(from), SpeciesId(to), Requirement::trade())
    }

    #[test]
    fn empty_is_linear() {
        assert!(!is_branching(&[]));
    }

    #[test]
    fn linear_chain_is_not_branching() {
        assert!(!is_branching(&[edge(1, 2), edge(2, 3)]));
    }

    #[test]
    fn two_children_is_branching() {
        assert!(is_branching(&[edge(133, 134), edge(133, 135)]));
    }

    #[test]
    fn branch_below_root_is_branching() {
        assert!(is_branching(&[edge(43, 44), edge(44, 45), edge(44, 182)]));
    }
}
