//! Spanning-tree extraction and the measure/place passes.
//!
//! The input graph is a general digraph (cycles and multi-parent targets
//! are legal input), but the layout needs a tree. The tree is extracted
//! breadth-first from all roots with a first-writer-wins parent rule: a
//! node keeps the first tree-parent that reaches it, so cycles never get a
//! second assignment and simply drop out of the tree. Happy-path edges are
//! considered first, which makes the rendered backbone follow the success
//! path.
//!
//! Both traversals run on explicit work stacks; recursion depth would
//! otherwise track the flow's depth, which is unbounded in practice.

use crate::graph::{GraphEdge, GraphNode};
use crate::taxonomy::NodeCategory;
use ahash::AHashMap;
use std::collections::VecDeque;

pub(super) const NODE_HEIGHT: f64 = 120.0;
pub(super) const VERTICAL_GAP: f64 = 60.0;
pub(super) const HORIZONTAL_GAP: f64 = 320.0;

#[derive(Default, Clone)]
struct TreeNode {
    /// Tree children with the happy-path flag of the adopting edge.
    children: Vec<(usize, bool)>,
    has_parent: bool,
    subtree_height: f64,
}

/// Arena-backed layout tree; entries are addressed by the node's index in
/// the graph's node list.
pub(super) struct LayoutTree {
    nodes: Vec<TreeNode>,
}

impl LayoutTree {
    /// Extracts the spanning tree and returns it with the ordered root
    /// list: the start node first, then remaining main-flow roots, then
    /// event roots, all in node-list order.
    pub(super) fn build(nodes: &[GraphNode], edges: &[GraphEdge]) -> (LayoutTree, Vec<usize>) {
        let index: AHashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let mut incoming = vec![0usize; nodes.len()];
        let mut outgoing: Vec<Vec<(usize, bool)>> = vec![Vec::new(); nodes.len()];
        for edge in edges {
            let (Some(&source), Some(&target)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            incoming[target] += 1;
            outgoing[source].push((target, edge.exit.is_happy_path()));
        }
        // Happy-path edges first; the sort is stable so edge input order
        // breaks ties.
        for list in &mut outgoing {
            list.sort_by_key(|&(_, happy)| !happy);
        }

        let is_root = |i: usize| {
            incoming[i] == 0
                || nodes[i].category == NodeCategory::Start
                || nodes[i].category == NodeCategory::EventHeader
        };
        let mut roots = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            if is_root(i) && !node.is_event_node && node.category == NodeCategory::Start {
                roots.push(i);
            }
        }
        for (i, node) in nodes.iter().enumerate() {
            if is_root(i) && !node.is_event_node && node.category != NodeCategory::Start {
                roots.push(i);
            }
        }
        for (i, node) in nodes.iter().enumerate() {
            if is_root(i) && node.is_event_node {
                roots.push(i);
            }
        }

        let mut tree = LayoutTree {
            nodes: vec![TreeNode::default(); nodes.len()],
        };
        // Roots are never adopted as children of another subtree.
        for &root in &roots {
            tree.nodes[root].has_parent = true;
        }

        let mut queue: VecDeque<usize> = roots.iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            for &(target, happy) in &outgoing[current] {
                if target == current || tree.nodes[target].has_parent {
                    continue;
                }
                tree.nodes[target].has_parent = true;
                tree.nodes[current].children.push((target, happy));
                queue.push_back(target);
            }
        }

        // Sibling ordering: children reached via a happy-path edge float to
        // the front, keeping the "top = happy path" convention.
        for node in &mut tree.nodes {
            node.children.sort_by_key(|&(_, happy)| !happy);
        }

        (tree, roots)
    }

    /// Post-order subtree measurement. A leaf reserves one node height plus
    /// vertical spacing; an internal node reserves the sum (not the max) of
    /// its children, so sibling subtrees can never overlap vertically.
    pub(super) fn measure(&mut self, root: usize) -> f64 {
        let mut stack = vec![(root, false)];
        while let Some((idx, expanded)) = stack.pop() {
            if expanded {
                let height = {
                    let node = &self.nodes[idx];
                    if node.children.is_empty() {
                        NODE_HEIGHT + VERTICAL_GAP
                    } else {
                        node.children
                            .iter()
                            .map(|&(child, _)| self.nodes[child].subtree_height)
                            .sum()
                    }
                };
                self.nodes[idx].subtree_height = height;
            } else {
                stack.push((idx, true));
                for &(child, _) in &self.nodes[idx].children {
                    stack.push((child, false));
                }
            }
        }
        self.nodes[root].subtree_height
    }

    /// Places one measured subtree. Horizontal coordinates are
    /// depth-proportional; each child receives a vertical band sized to its
    /// measured subtree height, and a parent centers on the midpoint of its
    /// first and last child.
    pub(super) fn place(&self, root: usize, root_x: f64, band_start: f64, nodes: &mut [GraphNode]) {
        // Pass 1: pre-order. Assign x, hand each child its band cursor,
        // and pin leaves to their band start.
        let mut order = Vec::new();
        let mut stack = vec![(root, root_x, band_start)];
        while let Some((idx, x, start)) = stack.pop() {
            order.push(idx);
            nodes[idx].position.x = x;
            let tree_node = &self.nodes[idx];
            if tree_node.children.is_empty() {
                nodes[idx].position.y = start;
            }
            let mut cursor = start;
            for &(child, _) in &tree_node.children {
                stack.push((child, x + HORIZONTAL_GAP, cursor));
                cursor += self.nodes[child].subtree_height;
            }
        }

        // Pass 2: children precede parents in reverse pre-order, so every
        // parent can center over its already-placed subtree.
        for &idx in order.iter().rev() {
            let children = &self.nodes[idx].children;
            if let (Some(&(first, _)), Some(&(last, _))) = (children.first(), children.last()) {
                nodes[idx].position.y =
                    (nodes[first].position.y + nodes[last].position.y) / 2.0;
            }
        }
    }
}
