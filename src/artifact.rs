//! Binary serialization of a built graph.
//!
//! The rendering and export collaborators run in separately triggered
//! processes; the artifact is the stable hand-off format between them,
//! encoded with bincode.

use crate::error::ArtifactError;
use crate::graph::{FlowGraph, GraphEdge, GraphNode, Position};
use crate::taxonomy::NodeCategory;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::fs;
use std::io::{Read, Write};

/// One node of the serialized graph. The `details` record is an open JSON
/// value that bincode cannot decode without a schema, so it travels as
/// JSON text.
#[derive(Serialize, Deserialize, Debug)]
pub struct ArtifactNode {
    pub id: String,
    pub category: NodeCategory,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub raw_type: String,
    pub details_json: String,
    pub is_event_node: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GraphArtifact {
    pub nodes: Vec<ArtifactNode>,
    pub edges: Vec<GraphEdge>,
    pub has_pixel_hints: bool,
}

impl GraphArtifact {
    pub fn from_graph(graph: &FlowGraph) -> Result<Self, ArtifactError> {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| {
                let details_json = serde_json::to_string(&node.details)
                    .map_err(|e| ArtifactError::Encode(e.to_string()))?;
                Ok(ArtifactNode {
                    id: node.id.clone(),
                    category: node.category,
                    x: node.position.x,
                    y: node.position.y,
                    label: node.label.clone(),
                    raw_type: node.raw_type.clone(),
                    details_json,
                    is_event_node: node.is_event_node,
                })
            })
            .collect::<Result<Vec<_>, ArtifactError>>()?;

        Ok(GraphArtifact {
            nodes,
            edges: graph.edges.clone(),
            has_pixel_hints: graph.has_pixel_hints,
        })
    }

    /// Restores the renderable graph. A details record that no longer
    /// parses degrades to an empty record instead of failing.
    pub fn into_graph(self) -> FlowGraph {
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| GraphNode {
                id: node.id,
                category: node.category,
                position: Position {
                    x: node.x,
                    y: node.y,
                },
                label: node.label,
                raw_type: node.raw_type,
                details: serde_json::from_str(&node.details_json).unwrap_or_else(|_| Map::new()),
                is_event_node: node.is_event_node,
            })
            .collect();

        FlowGraph {
            nodes,
            edges: self.edges,
            has_pixel_hints: self.has_pixel_hints,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard()).map_err(|e| ArtifactError::Encode(e.to_string()))
    }

    /// Deserializes an artifact from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(artifact, _)| artifact) // bincode 2 returns (data, bytes_read)
            .map_err(|e| ArtifactError::Decode(e.to_string()))
    }

    /// Saves the artifact to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        file.write_all(&bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Loads an artifact from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }
}
