//! The canonical input model: a call-flow document as emitted by an
//! authoring tool. Every optional field tolerates absence; the only hard
//! failure is a document that does not parse at all.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A complete flow document: one main flow scope plus zero or more named
/// event sub-flows, each with an optional authoritative pixel layout.
#[derive(Debug, Deserialize, Default)]
pub struct FlowDocument {
    #[serde(default)]
    pub process: Option<FlowScope>,
    #[serde(default)]
    pub diagram: Option<Diagram>,
    #[serde(default, alias = "eventFlows")]
    pub event_flows: Option<EventFlows>,
}

/// Named event sub-flows. A `BTreeMap` keeps event iteration order
/// deterministic, which the merged graph depends on.
#[derive(Debug, Deserialize, Default)]
pub struct EventFlows {
    #[serde(default, alias = "eventsMap")]
    pub events_map: BTreeMap<String, EventFlow>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EventFlow {
    #[serde(default)]
    pub process: Option<FlowScope>,
    #[serde(default)]
    pub diagram: Option<Diagram>,
}

/// One self-contained activities + links unit.
#[derive(Debug, Deserialize, Default)]
pub struct FlowScope {
    #[serde(default)]
    pub activities: BTreeMap<String, Activity>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// One step in the call flow. `properties` is an open, heterogeneous record
/// whose shape depends on the activity type; it is carried through largely
/// opaque apart from a few category-specific extractions.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Activity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "activityName")]
    pub activity_name: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// A directed, conditionally labeled connection between two activities.
#[derive(Debug, Deserialize, Clone)]
pub struct Link {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "sourceActivityId")]
    pub source_activity_id: String,
    #[serde(alias = "targetActivityId")]
    pub target_activity_id: String,
    #[serde(default, alias = "interactionCondition")]
    pub interaction_condition: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "conditionExpr")]
    pub condition_expr: Option<String>,
}

impl Link {
    /// The first present condition field carries the branch semantics;
    /// absence means default/success.
    pub fn condition(&self) -> Option<&str> {
        self.interaction_condition
            .as_deref()
            .or(self.name.as_deref())
            .or(self.condition_expr.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Authoritative per-activity pixel hints, keyed by activity id.
pub type Diagram = BTreeMap<String, Widget>;

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Widget {
    pub point: Point,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
