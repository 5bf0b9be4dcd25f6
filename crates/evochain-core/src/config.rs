//! Engine tuning. Every field has a default, so a config file only needs to
//! name the values it overrides.

use crate::error::ChainError;
use serde::{Deserialize, Serialize};

/// Default bound on predecessor hops while searching for a chain root.
pub const DEFAULT_MAX_ROOT_HOPS: usize = 10;

/// Geometry constants for the chain panel, in panel pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Side length of the square node box before any shrinking. The default
    /// leaves five branches unshrunk in a 150 px tall panel; larger panels
    /// can afford a bigger box.
    pub box_size: f32,
    /// Margin kept clear on every side of the panel.
    pub padding: f32,
    /// Horizontal position of the last column in branching layouts, as a
    /// fraction of panel width.
    pub branch_x_fraction: f32,
    /// Distance of a connector label from its line.
    pub label_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_size: 16.0,
            padding: 20.0,
            branch_x_fraction: 0.75,
            label_offset: 10.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ChainError> {
        if !(self.box_size.is_finite() && self.box_size > 0.0) {
            return Err(ChainError::InvalidConfig(format!(
                "box_size must be positive, got {}",
                self.box_size
            )));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(ChainError::InvalidConfig(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        if !(self.branch_x_fraction > 0.0 && self.branch_x_fraction < 1.0) {
            return Err(ChainError::InvalidConfig(format!(
                "branch_x_fraction must lie in (0, 1), got {}",
                self.branch_x_fraction
            )));
        }
        if !(self.label_offset.is_finite() && self.label_offset >= 0.0) {
            return Err(ChainError::InvalidConfig(format!(
                "label_offset must be non-negative, got {}",
                self.label_offset
            )));
        }
        Ok(())
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_root_hops: usize,
    pub layout: LayoutConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_root_hops: DEFAULT_MAX_ROOT_HOPS,
            layout: LayoutConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.max_root_hops == 0 {
            return Err(ChainError::InvalidConfig(
                "max_root_hops must be at least 1".to_string(),
            ));
        }
        self.layout.validate()
    }
}
