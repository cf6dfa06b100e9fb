//! The renderable graph model handed to the rendering and export layers.

use crate::exits::ExitId;
use crate::taxonomy::NodeCategory;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A typed, positioned node of the output graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Globally unique after event namespacing.
    pub id: String,
    pub category: NodeCategory,
    /// Always defined: pixel hint, grid fallback, or computed layout.
    pub position: Position,
    pub label: String,
    pub raw_type: String,
    /// Derived properties record; opaque to the core beyond the
    /// category-specific extractions performed by the builder.
    pub details: Map<String, Value>,
    pub is_event_node: bool,
}

/// A classified edge of the output graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// The resolved canonical exit, never the raw condition string.
    pub exit: ExitId,
    /// Position of `exit` within the source node's ordered exit list
    /// (default exit, then the category's extra exits, then data-defined
    /// branches). Lets export consumers compute edge anchors without
    /// re-deriving the exit enumeration.
    pub exit_index: usize,
    pub is_error_path: bool,
    pub is_timeout: bool,
}

/// The complete output graph: flat node and edge lists, error-path edges
/// sorted first so the rendering layer draws them underneath.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Whether any authoritative pixel hint was consulted. When false the
    /// positions are grid fallbacks and the layout engine should run.
    pub has_pixel_hints: bool,
}

impl FlowGraph {
    /// Whether the tree layout pass should replace the builder's fallback
    /// grid positions.
    pub fn needs_layout(&self) -> bool {
        !self.has_pixel_hints && !self.nodes.is_empty()
    }
}
