//! Evolution requirements and their short display labels.
//!
//! A [`Requirement`] is the raw condition attached to an evolution edge. The
//! renderer only ever sees the string produced by [`format_requirement`],
//! which never fails: incomplete records map to a `"???"` placeholder.

use log::warn;
use serde::{Deserialize, Serialize};

/// Placeholder label for requirements that cannot be described.
pub const UNKNOWN_LABEL: &str = "???";

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// How an evolution is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionMethod {
    /// Reaching a minimum level. Expects [`Requirement::level`].
    #[serde(alias = "LEVEL")]
    Level,
    /// Using or holding an item. Expects [`Requirement::item`].
    #[serde(alias = "ITEM")]
    Item,
    #[serde(alias = "TRADE")]
    Trade,
    /// High friendship during the day.
    #[serde(alias = "HAPPINESS_DAY")]
    HappinessDay,
    /// High friendship at night.
    #[serde(alias = "HAPPINESS_NIGHT")]
    HappinessNight,
    #[default]
    #[serde(alias = "UNKNOWN")]
    Unknown,
}

// ---------------------------------------------------------------------------
// Requirement record
// ---------------------------------------------------------------------------

/// The condition attached to an evolution edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub method: EvolutionMethod,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub item: Option<String>,
}

impl Requirement {
    pub fn level(level: u32) -> Self {
        Self {
            method: EvolutionMethod::Level,
            level: Some(level),
            item: None,
        }
    }

    pub fn item(name: impl Into<String>) -> Self {
        Self {
            method: EvolutionMethod::Item,
            level: None,
            item: Some(name.into()),
        }
    }

    pub fn trade() -> Self {
        Self::with_method(EvolutionMethod::Trade)
    }

    pub fn happiness_day() -> Self {
        Self::with_method(EvolutionMethod::HappinessDay)
    }

    pub fn happiness_night() -> Self {
        Self::with_method(EvolutionMethod::HappinessNight)
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    fn with_method(method: EvolutionMethod) -> Self {
        Self {
            method,
            level: None,
            item: None,
        }
    }

    /// Whether the record carries everything its method needs to be labelled.
    pub fn is_complete(&self) -> bool {
        describe(self).is_some()
    }

    /// Short display label. See [`format_requirement`].
    pub fn label(&self) -> String {
        format_requirement(self)
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

fn describe(req: &Requirement) -> Option<String> {
    match req.method {
        EvolutionMethod::Level => req.level.map(|n| format!("Level {n}")),
        EvolutionMethod::Item => req
            .item
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        EvolutionMethod::Trade => Some("Trade".to_string()),
        EvolutionMethod::HappinessDay => Some("Happiness (Day)".to_string()),
        EvolutionMethod::HappinessNight => Some("Happiness (Night)".to_string()),
        EvolutionMethod::Unknown => None,
    }
}

/// Turn a requirement into a short label such as `"Level 16"` or `"Trade"`.
///
/// Unknown methods and records missing their level or item name produce
/// [`UNKNOWN_LABEL`] and a warning.
pub fn format_requirement(req: &Requirement) -> String {
    match describe(req) {
        Some(label) => label,
        None => {
            warn!(
                "missing requirement data (method {:?}, level {:?}, item {:?}); using placeholder",
                req.method, req.level, req.item
            );
            UNKNOWN_LABEL.to_string()
        }
    }
}
