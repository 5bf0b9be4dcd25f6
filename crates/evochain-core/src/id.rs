use serde::{Deserialize, Serialize};

/// Identifies a species in the dex. Opaque to the engine; cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesId(pub u32);

/// Display metadata for a species, supplied by the edge provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    pub name: String,
    pub number: u32,
}

impl SpeciesInfo {
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }

    /// Placeholder metadata used when the provider knows nothing about a species.
    pub fn unknown(id: SpeciesId) -> Self {
        Self {
            name: "Unknown".to_string(),
            number: id.0,
        }
    }
}
