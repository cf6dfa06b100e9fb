use super::types::FlowDocument;
use crate::error::DocumentError;

/// A trait for custom data models that can be converted into a
/// [`FlowDocument`].
///
/// This is the extension point for making flowsketch format-agnostic: parse
/// your vendor's export format into your own structs, then implement
/// `IntoFlowDocument` to translate them into the canonical model the graph
/// builder consumes.
///
/// # Example
///
/// ```rust,no_run
/// use flowsketch::document::{Activity, FlowDocument, FlowScope, IntoFlowDocument};
/// use flowsketch::error::DocumentError;
/// use std::collections::BTreeMap;
///
/// struct VendorStep { id: String, kind: String }
/// struct VendorExport { steps: Vec<VendorStep> }
///
/// impl IntoFlowDocument for VendorExport {
///     fn into_flow_document(self) -> Result<FlowDocument, DocumentError> {
///         let mut activities = BTreeMap::new();
///         for step in self.steps {
///             activities.insert(
///                 step.id.clone(),
///                 Activity {
///                     id: Some(step.id),
///                     activity_name: Some(step.kind),
///                     ..Default::default()
///                 },
///             );
///         }
///         Ok(FlowDocument {
///             process: Some(FlowScope { activities, links: vec![] }),
///             ..Default::default()
///         })
///     }
/// }
/// ```
pub trait IntoFlowDocument {
    /// Consumes the object and converts it into a canonical flow document.
    fn into_flow_document(self) -> Result<FlowDocument, DocumentError>;
}

impl FlowDocument {
    /// Parses a flow document from its JSON representation. This is the
    /// single hard-failure point of the pipeline: once a document parses,
    /// graph construction always succeeds.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::JsonParse(e.to_string()))
    }
}
