//! Deterministic placement of chain members inside a fixed-size panel.
//!
//! # Coordinates
//!
//! Panel coordinates start at the top-left corner with `y` growing downward.
//! A node's `position.x` is the left edge of its square box and
//! `position.y` is the box's vertical centre, so a box occupies
//! `[x, x + box_size] x [y - box_size / 2, y + box_size / 2]`.
//!
//! # Modes
//!
//! - **Linear**: one row at the vertical centre, spread across the full
//!   padded width. A single node is centred horizontally.
//! - **Branching**: one column per stage. The root column sits at the
//!   padding edge, the last column at `branch_x_fraction` of the width, and
//!   the nodes of each column are spread evenly over the padded height.
//!
//! # Overflow
//!
//! The spacing formulas never change. When the configured box is too large
//! for them, every box shrinks to the largest size that keeps all boxes
//! inside the padded panel without overlapping, and the result carries a
//! [`LayoutOverflow`].

use crate::chain::{Chain, ChainNode, LayoutMode};
use crate::config::LayoutConfig;
use crate::id::SpeciesId;
use crate::requirement::format_requirement;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A point in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A placed chain member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub species_id: SpeciesId,
    /// Left edge and vertical centre of the box.
    pub position: Point,
    pub box_size: f32,
}

impl LayoutNode {
    /// Top-left and bottom-right corners of the box.
    pub fn bounds(&self) -> (Point, Point) {
        let half = self.box_size / 2.0;
        (
            Point::new(self.position.x, self.position.y - half),
            Point::new(self.position.x + self.box_size, self.position.y + half),
        )
    }

    /// Whether the interiors of two boxes intersect. Touching edges do not count.
    pub fn overlaps(&self, other: &LayoutNode) -> bool {
        let (a0, a1) = self.bounds();
        let (b0, b1) = other.bounds();
        a0.x < b1.x && b0.x < a1.x && a0.y < b1.y && b0.y < a1.y
    }
}

/// A straight line between two placed members, with its requirement label.
///
/// The endpoints sit on the facing box edges so the line never crosses a
/// box. `to_position` equals the target's [`LayoutNode::position`];
/// `from_position` is the source's position moved right by its `box_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub from: SpeciesId,
    pub to: SpeciesId,
    /// Right edge of the source box, at its vertical centre. Not the source
    /// node's `position`.
    pub from_position: Point,
    /// Left edge of the target box, at its vertical centre.
    pub to_position: Point,
    pub label_anchor: Point,
    pub label_text: String,
}

/// Recorded when the configured box had to shrink to fit the panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOverflow {
    pub requested_box: f32,
    pub effective_box: f32,
}

/// Everything the layout engine produces for one chain.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub mode: LayoutMode,
    /// In chain node order.
    pub nodes: Vec<LayoutNode>,
    /// In chain edge order.
    pub connectors: Vec<Connector>,
    pub overflow: Option<LayoutOverflow>,
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Evenly spaced centres across `[padding, padding + extent]` for `count`
/// slots: `padding + (i + 1) * extent / (count + 1)`.
fn spread(padding: f32, extent: f32, count: usize) -> impl Iterator<Item = f32> {
    let spacing = extent / (count as f32 + 1.0);
    (0..count).map(move |i| padding + (i as f32 + 1.0) * spacing)
}

fn place_linear(
    nodes: &[ChainNode],
    width: f32,
    height: f32,
    config: &LayoutConfig,
) -> (Vec<LayoutNode>, f32) {
    let padding = config.padding;
    let inner_w = (width - 2.0 * padding).max(0.0);
    let inner_h = (height - 2.0 * padding).max(0.0);
    let count = nodes.len().max(1);

    let box_size = config
        .box_size
        .min(inner_w / count as f32)
        .min(inner_h)
        .max(0.0);
    let y = height / 2.0;

    let placed = if count == 1 {
        nodes
            .iter()
            .map(|n| LayoutNode {
                species_id: n.species_id,
                position: Point::new((width - box_size) / 2.0, y),
                box_size,
            })
            .collect()
    } else {
        let available = inner_w - box_size;
        let step = available / (count - 1) as f32;
        nodes
            .iter()
            .enumerate()
            .map(|(i, n)| LayoutNode {
                species_id: n.species_id,
                position: Point::new(padding + i as f32 * step, y),
                box_size,
            })
            .collect()
    };
    (placed, box_size)
}

fn place_branching(
    chain: &Chain,
    width: f32,
    height: f32,
    config: &LayoutConfig,
) -> (Vec<LayoutNode>, f32) {
    let padding = config.padding;
    let inner_w = (width - 2.0 * padding).max(0.0);
    let inner_h = (height - 2.0 * padding).max(0.0);

    let stages = chain.stage_count().max(1);
    let mut columns: Vec<Vec<&ChainNode>> = vec![Vec::new(); stages];
    for node in &chain.nodes {
        columns[node.stage_index as usize].push(node);
    }

    // Largest box that fits every column and the gaps between columns.
    let branch_target = width * config.branch_x_fraction;
    let mut box_size = config.box_size.min(inner_h).min(inner_w / stages as f32);
    if stages > 1 {
        box_size = box_size.min((branch_target - padding) / (stages - 1) as f32);
    }
    for column in columns.iter().filter(|c| c.len() > 1) {
        box_size = box_size.min(inner_h / (column.len() as f32 + 1.0));
    }
    let box_size = box_size.max(0.0);

    let root_x = padding;
    let branch_x = branch_target.min(width - padding - box_size).max(root_x);
    let column_step = if stages > 1 {
        (branch_x - root_x) / (stages - 1) as f32
    } else {
        0.0
    };

    let mut positions: HashMap<SpeciesId, Point> = HashMap::with_capacity(chain.len());
    for (stage, column) in columns.iter().enumerate() {
        let x = root_x + stage as f32 * column_step;
        for (node, y) in column.iter().zip(spread(padding, inner_h, column.len())) {
            positions.insert(node.species_id, Point::new(x, y));
        }
    }

    let placed = chain
        .nodes
        .iter()
        .map(|n| LayoutNode {
            species_id: n.species_id,
            position: positions
                .get(&n.species_id)
                .copied()
                .unwrap_or_default(),
            box_size,
        })
        .collect();
    (placed, box_size)
}

// ---------------------------------------------------------------------------
// Connectors
// ---------------------------------------------------------------------------

/// Midpoint of `a`-`b`, pushed `offset` along the perpendicular that points
/// up the panel. Degenerate lines push straight up.
fn label_anchor(a: Point, b: Point, offset: f32) -> Point {
    let mid = a.midpoint(b);
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if len > f32::EPSILON {
        (dy / len, -dx / len)
    } else {
        (0.0, -1.0)
    };
    // Keep the label above the line for right-to-left segments too.
    let (nx, ny) = if ny > 0.0 { (-nx, -ny) } else { (nx, ny) };
    Point::new(mid.x + nx * offset, mid.y + ny * offset)
}

fn connect(chain: &Chain, nodes: &[LayoutNode], config: &LayoutConfig) -> Vec<Connector> {
    let by_id: HashMap<SpeciesId, &LayoutNode> =
        nodes.iter().map(|n| (n.species_id, n)).collect();

    chain
        .edges
        .iter()
        .filter_map(|edge| {
            let source = by_id.get(&edge.from)?;
            let target = by_id.get(&edge.to)?;
            let from_position =
                Point::new(source.position.x + source.box_size, source.position.y);
            let to_position = target.position;
            Some(Connector {
                from: edge.from,
                to: edge.to,
                from_position,
                to_position,
                label_anchor: label_anchor(from_position, to_position, config.label_offset),
                label_text: format_requirement(&edge.requirement),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Lay out `chain` in a `width` x `height` panel.
///
/// Pure: identical inputs always give an identical result.
pub fn layout_chain(chain: &Chain, width: f32, height: f32, config: &LayoutConfig) -> LayoutResult {
    let mode = chain.layout_mode();
    let (nodes, box_size) = match mode {
        LayoutMode::Linear => place_linear(&chain.nodes, width, height, config),
        LayoutMode::Branching => place_branching(chain, width, height, config),
    };

    let overflow = if box_size < config.box_size {
        warn!(
            "evolution chain of {} nodes does not fit a {}x{} panel; shrinking boxes from {} to {}",
            chain.len(),
            width,
            height,
            config.box_size,
            box_size
        );
        Some(LayoutOverflow {
            requested_box: config.box_size,
            effective_box: box_size,
        })
    } else {
        None
    };

    let connectors = connect(chain, &nodes, config);
    LayoutResult {
        mode,
        nodes,
        connectors,
        overflow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    const EPS: f32 = 1e-3;

    fn large_box() -> LayoutConfig {
        LayoutConfig {
            box_size: 32.0,
            ..LayoutConfig::default()
        }
    }

    fn assert_inside(result: &LayoutResult, width: f32, height: f32, padding: f32) {
        for node in &result.nodes {
            let (min, max) = node.bounds();
            assert!(min.x >= padding - EPS, "{node:?} left of padding");
            assert!(min.y >= padding - EPS, "{node:?} above padding");
            assert!(max.x <= width - padding + EPS, "{node:?} right of padding");
            assert!(max.y <= height - padding + EPS, "{node:?} below padding");
        }
    }

    fn assert_no_overlap(result: &LayoutResult) {
        for (i, a) in result.nodes.iter().enumerate() {
            for b in &result.nodes[i + 1..] {
                let mut shrunk = b.clone();
                // Tolerate float noise on touching edges.
                shrunk.box_size -= EPS;
                assert!(!a.overlaps(&shrunk), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn single_node_is_centred() {
        let chain = single_chain(132);
        let result = layout_chain(&chain, 440.0, 150.0, &LayoutConfig::default());
        assert_eq!(result.mode, LayoutMode::Linear);
        let node = &result.nodes[0];
        assert!((node.position.x + node.box_size / 2.0 - 220.0).abs() < EPS);
        assert!((node.position.y - 75.0).abs() < EPS);
        assert!(result.connectors.is_empty());
        assert!(result.overflow.is_none());
    }

    #[test]
    fn linear_spans_padded_width() {
        let chain = linear_chain(&[1, 2, 3]);
        let config = large_box();
        let result = layout_chain(&chain, 440.0, 150.0, &config);
        let xs: Vec<f32> = result.nodes.iter().map(|n| n.position.x).collect();
        // available = 440 - 40 - 32 = 368, step = 184
        assert!((xs[0] - 20.0).abs() < EPS);
        assert!((xs[1] - 204.0).abs() < EPS);
        assert!((xs[2] - 388.0).abs() < EPS);
        assert!(result.nodes.iter().all(|n| (n.position.y - 75.0).abs() < EPS));
        assert_inside(&result, 440.0, 150.0, config.padding);
        assert_no_overlap(&result);
    }

    #[test]
    fn branching_root_and_equal_spacing() {
        let chain = branching_chain(133, &[134, 135, 136, 196, 197]);
        let config = LayoutConfig::default();
        let result = layout_chain(&chain, 440.0, 150.0, &config);
        assert_eq!(result.mode, LayoutMode::Branching);

        let root = &result.nodes[0];
        assert!((root.position.x - 20.0).abs() < EPS);
        assert!((root.position.y - 75.0).abs() < EPS);

        let ys: Vec<f32> = result.nodes[1..].iter().map(|n| n.position.y).collect();
        let expected = [38.333, 56.667, 75.0, 93.333, 111.667];
        for (y, e) in ys.iter().zip(expected) {
            assert!((y - e).abs() < 1e-2, "{y} != {e}");
        }
        let branch_x = result.nodes[1].position.x;
        assert!((branch_x - 330.0).abs() < EPS);
        assert!(result.nodes[1..].iter().all(|n| n.position.x == branch_x));
        assert!(result.overflow.is_none());
        assert_inside(&result, 440.0, 150.0, config.padding);
        assert_no_overlap(&result);
    }

    #[test]
    fn crowded_branches_shrink_boxes() {
        let chain = branching_chain(133, &[134, 135, 136, 196, 197, 470, 471, 700]);
        let config = large_box();
        let result = layout_chain(&chain, 440.0, 150.0, &config);
        let overflow = result.overflow.expect("overflow expected");
        assert_eq!(overflow.requested_box, 32.0);
        // 110 / 9
        assert!((overflow.effective_box - 110.0 / 9.0).abs() < EPS);
        assert_inside(&result, 440.0, 150.0, config.padding);
        assert_no_overlap(&result);
    }

    #[test]
    fn long_linear_chain_shrinks_boxes() {
        let ids: Vec<u32> = (1..=20).collect();
        let chain = linear_chain(&ids);
        let config = large_box();
        let result = layout_chain(&chain, 440.0, 150.0, &config);
        assert!(result.overflow.is_some());
        assert_inside(&result, 440.0, 150.0, config.padding);
        assert_no_overlap(&result);
    }

    #[test]
    fn multi_stage_branching_uses_columns() {
        // Wurmple-style: 265 -> {266, 268}, 266 -> 267, 268 -> 269
        let chain = chain_from_edges(265, &[(265, 266), (265, 268), (266, 267), (268, 269)]);
        let config = LayoutConfig::default();
        let result = layout_chain(&chain, 440.0, 150.0, &config);
        let x_of = |id: u32| {
            result
                .nodes
                .iter()
                .find(|n| n.species_id == SpeciesId(id))
                .unwrap()
                .position
        };
        assert!(x_of(265).x < x_of(266).x);
        assert!(x_of(266).x < x_of(267).x);
        assert_eq!(x_of(266).x, x_of(268).x);
        assert!((x_of(267).x - 330.0).abs() < EPS);
        assert!(x_of(266).y < x_of(268).y);
        assert_eq!(x_of(266).y, x_of(267).y);
        assert_inside(&result, 440.0, 150.0, config.padding);
        assert_no_overlap(&result);
    }

    #[test]
    fn connectors_follow_edges_with_labels_above() {
        let chain = linear_chain(&[1, 2, 3]);
        let result = layout_chain(&chain, 440.0, 150.0, &large_box());
        assert_eq!(result.connectors.len(), 2);
        let c = &result.connectors[0];
        assert_eq!((c.from, c.to), (SpeciesId(1), SpeciesId(2)));
        assert!((c.from_position.x - 52.0).abs() < EPS);
        assert!((c.to_position.x - 204.0).abs() < EPS);
        assert!((c.label_anchor.x - 128.0).abs() < EPS);
        assert!((c.label_anchor.y - 65.0).abs() < EPS);
        assert_eq!(c.label_text, "Level 1");

        let (source, target) = (&result.nodes[0], &result.nodes[1]);
        assert_eq!(c.to_position, target.position);
        assert_eq!(
            c.from_position,
            Point::new(source.position.x + source.box_size, source.position.y)
        );
    }

    #[test]
    fn branch_connectors_end_on_box_edges() {
        let chain = branching_chain(133, &[134, 135]);
        let result = layout_chain(&chain, 440.0, 150.0, &LayoutConfig::default());
        let root = &result.nodes[0];
        for (c, target) in result.connectors.iter().zip(&result.nodes[1..]) {
            assert_eq!(c.to, target.species_id);
            assert_eq!(c.to_position, target.position);
            assert!((c.from_position.x - (root.position.x + root.box_size)).abs() < EPS);
            assert!((c.from_position.y - root.position.y).abs() < EPS);
        }
    }

    #[test]
    fn label_anchor_is_perpendicular() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(30.0, 40.0);
        let anchor = label_anchor(a, b, 10.0);
        let mid = a.midpoint(b);
        let (ox, oy) = (anchor.x - mid.x, anchor.y - mid.y);
        assert!((ox * 30.0 + oy * 40.0).abs() < EPS);
        assert!(((ox * ox + oy * oy).sqrt() - 10.0).abs() < EPS);
        assert!(oy < 0.0);

        let same = label_anchor(a, a, 10.0);
        assert_eq!(same, Point::new(0.0, -10.0));
    }

    #[test]
    fn layout_is_deterministic() {
        let chain = branching_chain(133, &[134, 135, 136]);
        let config = LayoutConfig::default();
        let a = layout_chain(&chain, 440.0, 150.0, &config);
        let b = layout_chain(&chain, 440.0, 150.0, &config);
        assert_eq!(a, b);
        for (x, y) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(x.position.x.to_bits(), y.position.x.to_bits());
            assert_eq!(x.position.y.to_bits(), y.position.y.to_bits());
        }
    }
}
