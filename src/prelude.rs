//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and traits of the flowsketch
//! crate so consumers do not have to import each one individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowsketch::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/flow.json")?;
//! let document = FlowDocument::from_json(&json)?;
//!
//! let mut graph = GraphBuilder::build(&document);
//! LayoutEngine::layout_graph(&mut graph);
//!
//! println!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
//! # Ok(())
//! # }
//! ```

// Input model and conversion
pub use crate::document::{Activity, FlowDocument, FlowScope, IntoFlowDocument, Link};

// Output graph
pub use crate::graph::{FlowGraph, GraphBuilder, GraphEdge, GraphNode, Position};

// Classification and exit resolution
pub use crate::exits::{ExitId, ResolvedHandle, resolve_handle};
pub use crate::taxonomy::{NodeCategory, TypeInfo, resolve};

// Layout
pub use crate::layout::LayoutEngine;

// Artifact hand-off
pub use crate::artifact::GraphArtifact;

// Error types
pub use crate::error::{ArtifactError, DocumentError};

// Standard library re-exports commonly used with this crate
pub use std::collections::BTreeMap;
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
