//! Evochain Core -- evolution chain resolution and layout for dex panels.
//!
//! Turns the raw "evolves into" edges around a species into a validated
//! chain and a deterministic 2-D plan that always fits a fixed-size panel.
//!
//! # Pipeline
//!
//! Each call to [`engine::ChainEngine::resolve_and_layout`] runs:
//!
//! 1. **Fetch** -- ask the [`provider::EdgeProvider`] for the species' edge component.
//! 2. **Resolve** -- walk predecessors to the root, then breadth-first forward
//!    to assign stages ([`resolver`]).
//! 3. **Classify** -- flag chains where a species has several successors ([`classify`]).
//! 4. **Highlight** -- mark the current species and the root ([`highlight`]).
//! 5. **Layout** -- place boxes, connectors, and requirement labels ([`layout`],
//!    [`requirement`]).
//!
//! Inconsistent evolution data, missing requirement details, crowded panels,
//! and an unknown current species never fail the call; they show up as
//! [`engine::Diagnostic`]s on the returned [`engine::RenderPlan`].
//!
//! ```rust,ignore
//! let engine = ChainEngine::new(provider);
//! let plan = engine.resolve_and_layout(SpeciesId(133), SpeciesId(135), 440.0, 150.0);
//! renderer.draw(&plan);
//! ```

pub mod chain;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod id;
pub mod layout;
pub mod provider;
pub mod requirement;
pub mod resolver;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
