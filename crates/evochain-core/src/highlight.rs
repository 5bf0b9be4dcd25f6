use crate::chain::{Chain, HighlightState};
use crate::id::SpeciesId;
use log::warn;

/// Result of marking the current species in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightOutcome {
    /// Exactly one node is now [`HighlightState::Current`].
    Resolved,
    /// `current` is not a chain member; no node is marked current.
    Unresolved,
}

/// Classify every node: `Current` for `current`, `Root` for the chain root
/// (unless it is current), `Normal` otherwise.
pub fn apply_highlights(chain: &mut Chain, current: SpeciesId) -> HighlightOutcome {
    let root = chain.root_id;
    let mut found = false;
    for node in &mut chain.nodes {
        node.highlight = if node.species_id == current {
            found = true;
            HighlightState::Current
        } else if node.species_id == root {
            HighlightState::Root
        } else {
            HighlightState::Normal
        };
    }

    if found {
        HighlightOutcome::Resolved
    } else {
        warn!(
            "current species {:?} is not part of the chain rooted at {:?}; rendering without highlight",
            current, root
        );
        HighlightOutcome::Unresolved
    }
}
