//! # Flowsketch - Call-Flow Graph Transformation and Layout
//!
//! **Flowsketch** transforms contact-center call-flow definitions (graphs of
//! typed "activities" connected by conditional "links", possibly nested
//! inside named event sub-flows) into renderable graphs: typed nodes
//! carrying UI-relevant details and typed edges carrying resolved semantic
//! exit labels. A second stage computes non-overlapping 2-D coordinates for
//! every node when the document supplies no authoritative layout.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic. It operates on a canonical internal model
//! of a flow document. The primary workflow is:
//!
//! 1.  **Load Your Data**: Parse the authoring tool's JSON directly with
//!     [`document::FlowDocument::from_json`], or parse your own export
//!     format into your own Rust structs and implement the
//!     [`document::IntoFlowDocument`] trait for them.
//! 2.  **Build**: Run [`graph::GraphBuilder::build`] to classify every
//!     activity into the closed node taxonomy, resolve every link condition
//!     into a canonical exit, and merge event sub-flows into one graph.
//! 3.  **Lay Out**: When the document carried no pixel hints, run
//!     [`layout::LayoutEngine::layout_graph`] to replace the grid fallback
//!     positions with a readable tree layout.
//! 4.  **Hand Off**: Serialize the result with [`artifact::GraphArtifact`]
//!     or walk the node/edge lists directly from the rendering layer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowsketch::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("flow.json")?;
//!
//!     // The only hard failure point: a document that does not parse.
//!     let document = FlowDocument::from_json(&json)?;
//!
//!     let mut graph = GraphBuilder::build(&document);
//!     LayoutEngine::layout_graph(&mut graph);
//!
//!     for node in &graph.nodes {
//!         println!(
//!             "{} [{}] at ({}, {})",
//!             node.label, node.category, node.position.x, node.position.y
//!         );
//!     }
//!     for edge in &graph.edges {
//!         println!("{} -> {} via {}", edge.source, edge.target, edge.exit);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod document;
pub mod error;
pub mod exits;
pub mod graph;
pub mod layout;
pub mod prelude;
pub mod taxonomy;
