//! End-to-end panel scenarios against the sample dex.
//!
//! Each test drives `ChainEngine::resolve_and_layout` on a 440x150 panel and
//! checks the resulting plan the way the detail view consumes it.

use evochain_core::chain::{HighlightState, LayoutMode};
use evochain_core::config::{EngineConfig, LayoutConfig};
use evochain_core::engine::{ChainEngine, Diagnostic, RenderPlan};
use evochain_core::provider::MemoryEdgeProvider;
use evochain_core::test_utils::*;

const WIDTH: f32 = 440.0;
const HEIGHT: f32 = 150.0;
const EPS: f32 = 1e-2;

fn engine_with_box(box_size: f32) -> ChainEngine<MemoryEdgeProvider> {
    let config = EngineConfig {
        layout: LayoutConfig {
            box_size,
            padding: 20.0,
            ..LayoutConfig::default()
        },
        ..EngineConfig::default()
    };
    ChainEngine::with_config(sample_provider(), config).unwrap()
}

fn xs(plan: &RenderPlan) -> Vec<f32> {
    plan.layout_nodes.iter().map(|n| n.position.x).collect()
}

// ============================================================================
// Scenario A: three-stage linear chain
// ============================================================================

#[test]
fn scenario_a_linear_three_stages() {
    let plan = engine_with_box(32.0).plan_for(VENUSAUR, WIDTH, HEIGHT);

    assert!(!plan.chain.is_branching);
    assert_eq!(plan.chain.layout_mode(), LayoutMode::Linear);
    assert_eq!(plan.layout_nodes.len(), 3);
    let stages: Vec<u32> = plan.chain.nodes.iter().map(|n| n.stage_index).collect();
    assert_eq!(stages, vec![0, 1, 2]);

    let x = xs(&plan);
    assert!(x[0] < x[1] && x[1] < x[2]);
    assert!(plan.layout_nodes.iter().all(|n| (n.position.y - HEIGHT / 2.0).abs() < EPS));

    let labels: Vec<&str> = plan.connectors.iter().map(|c| c.label_text.as_str()).collect();
    assert_eq!(labels, vec!["Level 16", "Level 32"]);
    assert_eq!(plan.chain.current().unwrap().display_name, "Venusaur");
    assert!(plan.is_clean());
}

// ============================================================================
// Scenario B: five-way branch
// ============================================================================

#[test]
fn scenario_b_five_branches() {
    let plan = engine_with_box(16.0).plan_for(EEVEE, WIDTH, HEIGHT);

    assert!(plan.chain.is_branching);
    assert_eq!(plan.chain.nodes.iter().filter(|n| n.species_id == EEVEE).count(), 1);

    let root = plan.layout_node(EEVEE).unwrap();
    assert!((root.position.x - 20.0).abs() < EPS);
    assert!((root.position.y - 75.0).abs() < EPS);

    let spacing = (HEIGHT - 40.0) / 6.0;
    assert!((spacing - 18.333).abs() < EPS);

    let branch_ys: Vec<f32> = [VAPOREON, JOLTEON, FLAREON, ESPEON, UMBREON]
        .iter()
        .map(|&id| plan.layout_node(id).unwrap().position.y)
        .collect();
    let expected = [38.333, 56.667, 75.0, 93.333, 111.667];
    for (y, e) in branch_ys.iter().zip(expected) {
        assert!((y - e).abs() < EPS, "branch y {y} != {e}");
    }
    assert!(plan.is_clean());
}

#[test]
fn scenario_b_oversized_box_is_clamped_not_overlapping() {
    let plan = engine_with_box(32.0).plan_for(EEVEE, WIDTH, HEIGHT);
    let overflow = plan
        .diagnostics
        .iter()
        .find_map(|d| match d {
            Diagnostic::LayoutOverflow { effective_box, .. } => Some(*effective_box),
            _ => None,
        })
        .expect("crowded panel should report overflow");
    assert!(overflow <= (HEIGHT - 40.0) / 6.0 + EPS);

    // Branch y-values keep the same spacing formula.
    let y = plan.layout_node(ESPEON).unwrap().position.y;
    assert!((y - 93.333).abs() < EPS);
}

// ============================================================================
// Scenario C: species without evolutions
// ============================================================================

#[test]
fn scenario_c_no_evolutions() {
    let plan = engine_with_box(32.0).plan_for(DITTO, WIDTH, HEIGHT);

    assert_eq!(plan.chain.len(), 1);
    assert!(plan.chain.edges.is_empty());
    assert!(!plan.chain.is_branching);
    assert!(plan.connectors.is_empty());

    let node = &plan.layout_nodes[0];
    let centre_x = node.position.x + node.box_size / 2.0;
    assert!((centre_x - WIDTH / 2.0).abs() < EPS);
    assert!((node.position.y - HEIGHT / 2.0).abs() < EPS);
    assert_eq!(plan.chain.nodes[0].highlight, HighlightState::Current);
}

// ============================================================================
// Scenario D: current species is a non-root branch member
// ============================================================================

#[test]
fn scenario_d_branch_member_current() {
    let plan = engine_with_box(16.0).resolve_and_layout(EEVEE, JOLTEON, WIDTH, HEIGHT);

    let state = |id| plan.chain.node(id).unwrap().highlight;
    assert_eq!(state(JOLTEON), HighlightState::Current);
    assert_eq!(state(EEVEE), HighlightState::Root);
    for sibling in [VAPOREON, FLAREON, ESPEON, UMBREON] {
        assert_eq!(state(sibling), HighlightState::Normal);
    }
}

// ============================================================================
// Multi-stage branch and re-entry
// ============================================================================

#[test]
fn branch_below_root_places_columns() {
    let plan = engine_with_box(16.0).plan_for(BELLOSSOM, WIDTH, HEIGHT);

    assert!(plan.chain.is_branching);
    assert_eq!(plan.chain.root_id, ODDISH);
    let oddish = plan.layout_node(ODDISH).unwrap().position;
    let gloom = plan.layout_node(GLOOM).unwrap().position;
    let vileplume = plan.layout_node(VILEPLUME).unwrap().position;
    let bellossom = plan.layout_node(BELLOSSOM).unwrap().position;

    assert!(oddish.x < gloom.x && gloom.x < vileplume.x);
    assert_eq!(vileplume.x, bellossom.x);
    assert!((gloom.y - 75.0).abs() < EPS);
    assert!(vileplume.y < bellossom.y);
}

#[test]
fn repeated_activation_is_identical() {
    let engine = engine_with_box(32.0);
    let first = engine.resolve_and_layout(EEVEE, UMBREON, WIDTH, HEIGHT);
    let second = engine.resolve_and_layout(EEVEE, UMBREON, WIDTH, HEIGHT);
    assert_eq!(first, second);

    // A different member of the same family yields the same geometry.
    let from_branch = engine.resolve_and_layout(UMBREON, UMBREON, WIDTH, HEIGHT);
    assert_eq!(first.layout_nodes, from_branch.layout_nodes);
    assert_eq!(first.connectors, from_branch.connectors);
}

#[test]
fn trade_label() {
    let plan = engine_with_box(32.0).plan_for(GENGAR, WIDTH, HEIGHT);
    assert_eq!(plan.connectors[1].label_text, "Trade");
    assert!(plan.connectors[1].label_anchor.y < plan.connectors[1].from_position.y);
}
