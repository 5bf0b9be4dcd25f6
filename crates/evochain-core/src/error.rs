use crate::id::SpeciesId;

/// Errors raised while resolving or validating an evolution chain.
///
/// Every variant except [`ChainError::InvalidConfig`] is a data integrity
/// problem: the engine recovers from them by falling back to a one-node chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("evolution cycle detected at species {at:?}")]
    CycleDetected { at: SpeciesId },

    #[error("root search from {start:?} exceeded {limit} hops")]
    HopLimitExceeded { start: SpeciesId, limit: usize },

    #[error("chain has {count} nodes without a predecessor")]
    MultipleRoots { count: usize },

    #[error("declared root {0:?} is not the chain's root")]
    RootMismatch(SpeciesId),

    #[error("species {0:?} appears more than once in the chain")]
    DuplicateNode(SpeciesId),

    #[error("species {species:?} has stage {found}, expected {expected}")]
    StageMismatch {
        species: SpeciesId,
        expected: u32,
        found: u32,
    },

    #[error("edge {from:?} -> {to:?} references a species outside the chain")]
    DanglingEdge { from: SpeciesId, to: SpeciesId },

    #[error("branching flag is {found} but edges say {expected}")]
    BranchingFlagMismatch { expected: bool, found: bool },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ChainError {
    /// Whether this error describes inconsistent evolution data.
    pub fn is_data_integrity(&self) -> bool {
        !matches!(self, ChainError::InvalidConfig(_))
    }
}
