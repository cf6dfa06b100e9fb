use thiserror::Error;

/// Errors that can occur while loading or converting a flow document.
///
/// This is the only error surface of the transform itself: a document that
/// parses is always transformed into a graph. Missing or malformed optional
/// fields degrade to documented defaults instead of failing.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("Failed to parse flow document JSON: {0}")]
    JsonParse(String),

    #[error("Invalid flow document: {0}")]
    Validation(String),
}

/// Errors that can occur when saving or loading a serialized graph artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Could not access artifact file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Artifact encoding failed: {0}")]
    Encode(String),

    #[error("Artifact decoding failed: {0}")]
    Decode(String),
}
