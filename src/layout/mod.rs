//! The tree-backbone layout engine.
//!
//! Used only when the document supplied no authoritative pixel hints: the
//! builder's grid fallback positions are replaced with a readable
//! tree-shaped arrangement. This is a single measure-then-place pass over a
//! spanning tree, not a general force-directed layout; the guarantees are
//! determinism and vertical non-overlap of sibling subtrees, not minimal
//! area.

mod tree;

use crate::graph::{FlowGraph, GraphEdge, GraphNode, Position};
use crate::taxonomy::NodeCategory;
use tree::LayoutTree;

const ROOT_X: f64 = 0.0;
/// Vertical gap between consecutive root subtrees.
const ROOT_GAP: f64 = 160.0;
/// Event headers have no subtree; they advance the cursor by a smaller
/// fixed amount.
const HEADER_GAP: f64 = 80.0;

pub struct LayoutEngine;

impl LayoutEngine {
    /// Replaces node positions with computed tree-layout coordinates.
    ///
    /// Roots are stacked top to bottom (start node first, then remaining
    /// main-flow roots, then event roots), each advancing a shared vertical
    /// cursor by its measured subtree height. Nodes never reached by the
    /// spanning tree keep their builder positions.
    pub fn layout(nodes: &mut [GraphNode], edges: &[GraphEdge]) {
        if nodes.is_empty() {
            return;
        }
        let (mut tree, roots) = LayoutTree::build(nodes, edges);

        let mut cursor = 0.0;
        for root in roots {
            if nodes[root].category == NodeCategory::EventHeader {
                nodes[root].position = Position {
                    x: ROOT_X,
                    y: cursor,
                };
                cursor += HEADER_GAP;
            } else {
                let height = tree.measure(root);
                tree.place(root, ROOT_X, cursor, nodes);
                cursor += height + ROOT_GAP;
            }
        }
    }

    /// Lays out a built graph in place when it carries no pixel hints.
    pub fn layout_graph(graph: &mut FlowGraph) {
        if graph.needs_layout() {
            Self::layout(&mut graph.nodes, &graph.edges);
        }
    }
}
