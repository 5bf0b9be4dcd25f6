//! The engine entry point: edges in, render plan out.
//!
//! [`ChainEngine::resolve_and_layout`] runs the whole pipeline
//! (resolve, classify, highlight, layout) and never fails. Conditions the
//! renderer can live with are reported as [`Diagnostic`]s on the plan and
//! logged.

use crate::chain::{Chain, EvolutionEdge};
use crate::classify::classify_branching;
use crate::config::EngineConfig;
use crate::highlight::{HighlightOutcome, apply_highlights};
use crate::id::{SpeciesId, SpeciesInfo};
use crate::layout::{Connector, LayoutNode, layout_chain};
use crate::provider::EdgeProvider;
use crate::resolver::resolve_chain;
use log::error;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// A non-fatal condition met while building a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Diagnostic {
    /// The evolution data around `species` was inconsistent; the plan holds
    /// a one-node chain.
    DataIntegrity { species: SpeciesId, reason: String },
    /// The requirement on `from -> to` could not be described; its label is `"???"`.
    MissingRequirementData { from: SpeciesId, to: SpeciesId },
    /// Boxes were shrunk so the chain fits the panel.
    LayoutOverflow { requested_box: f32, effective_box: f32 },
    /// The current species is not a chain member; nothing is highlighted.
    UnresolvedCurrent { species: SpeciesId },
}

// ---------------------------------------------------------------------------
// Render plan
// ---------------------------------------------------------------------------

/// Everything the renderer needs to draw an evolution chain panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub chain: Chain,
    /// In chain node order.
    pub layout_nodes: Vec<LayoutNode>,
    /// In chain edge order.
    pub connectors: Vec<Connector>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderPlan {
    pub fn layout_node(&self, species: SpeciesId) -> Option<&LayoutNode> {
        self.layout_nodes.iter().find(|n| n.species_id == species)
    }

    /// True when nothing had to be degraded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

fn missing_requirements(edges: &[EvolutionEdge]) -> impl Iterator<Item = Diagnostic> + '_ {
    edges
        .iter()
        .filter(|e| !e.requirement.is_complete())
        .map(|e| Diagnostic::MissingRequirementData {
            from: e.from,
            to: e.to,
        })
}

/// Lay out an already classified and highlighted chain.
pub fn build_render_plan(chain: Chain, width: f32, height: f32, config: &EngineConfig) -> RenderPlan {
    let layout = layout_chain(&chain, width, height, &config.layout);

    let mut diagnostics: Vec<Diagnostic> = missing_requirements(&chain.edges).collect();
    if let Some(overflow) = layout.overflow {
        diagnostics.push(Diagnostic::LayoutOverflow {
            requested_box: overflow.requested_box,
            effective_box: overflow.effective_box,
        });
    }

    RenderPlan {
        chain,
        layout_nodes: layout.nodes,
        connectors: layout.connectors,
        diagnostics,
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Resolves and lays out evolution chains from an [`EdgeProvider`].
///
/// Holds no per-call state; every call builds a fresh plan.
#[derive(Debug, Clone)]
pub struct ChainEngine<P> {
    provider: P,
    config: EngineConfig,
}

impl<P: EdgeProvider> ChainEngine<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: EngineConfig::default(),
        }
    }

    /// Use `config` instead of the defaults. Rejects invalid values.
    pub fn with_config(provider: P, config: EngineConfig) -> Result<Self, crate::error::ChainError> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve, classify, and highlight the chain containing `species`.
    ///
    /// Integrity problems in the evolution data fall back to a chain holding
    /// only `species`.
    pub fn resolve(&self, species: SpeciesId, current: SpeciesId) -> (Chain, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();

        let mut chain = match resolve_chain(species, &self.provider, &self.config) {
            Ok(chain) => chain,
            Err(e) => {
                error!(
                    "evolution data for species {:?} is inconsistent ({}); showing it alone",
                    species, e
                );
                diagnostics.push(Diagnostic::DataIntegrity {
                    species,
                    reason: e.to_string(),
                });
                let info = self
                    .provider
                    .species_info(species)
                    .unwrap_or_else(|| SpeciesInfo::unknown(species));
                Chain::single(species, info)
            }
        };

        classify_branching(&mut chain);
        if apply_highlights(&mut chain, current) == HighlightOutcome::Unresolved {
            diagnostics.push(Diagnostic::UnresolvedCurrent { species: current });
        }

        (chain, diagnostics)
    }

    /// Build the render plan for the chain containing `species`, with
    /// `current` highlighted, in a `width` x `height` panel.
    pub fn resolve_and_layout(
        &self,
        species: SpeciesId,
        current: SpeciesId,
        width: f32,
        height: f32,
    ) -> RenderPlan {
        let (chain, mut diagnostics) = self.resolve(species, current);
        let mut plan = build_render_plan(chain, width, height, &self.config);
        diagnostics.append(&mut plan.diagnostics);
        plan.diagnostics = diagnostics;
        plan
    }

    /// [`Self::resolve_and_layout`] for the common case of viewing `species` itself.
    pub fn plan_for(&self, species: SpeciesId, width: f32, height: f32) -> RenderPlan {
        self.resolve_and_layout(species, species, width, height)
    }
}
