//! The graph builder: flow scopes in, positioned nodes and classified
//! edges out.
//!
//! The main flow and every named event sub-flow are processed as
//! independent scopes; event scopes are namespaced and vertically offset by
//! a running cursor so no two blocks collide, with a synthetic header node
//! marking the start of each event block.

use crate::document::{Activity, Diagram, FlowDocument, FlowScope, Link};
use crate::exits::{self, ExitId};
use crate::graph::types::{FlowGraph, GraphEdge, GraphNode, Position};
use crate::taxonomy::{self, NodeCategory, TypeInfo};
use ahash::AHashMap;
use itertools::Itertools;
use serde_json::{Map, Value, json};

/// Pixel hints from authoring tools are packed tightly; scaling them up
/// leaves breathing room for node bodies and edge labels.
const HINT_SCALE: f64 = 1.4;

/// Grid fallback for the main flow: tiles of 5 activities per row.
const GRID_PER_ROW: usize = 5;
const GRID_X_STEP: f64 = 400.0;
const GRID_Y_STEP: f64 = 300.0;

/// Grid fallback for event flows: two alternating columns.
const EVENT_COLUMN_X: [f64; 2] = [0.0, 500.0];
const EVENT_ROW_STEP: f64 = 300.0;

/// Vertical gap between the main flow and the first event block.
const EVENT_FLOW_GAP: f64 = 2000.0;
/// Gap appended after each event block before the next one starts.
const EVENT_BLOCK_GAP: f64 = 500.0;
/// The header node sits this far above its event block.
const EVENT_HEADER_OFFSET: f64 = 400.0;

/// Per-activity classification carried from the node pass into the edge
/// pass of the same scope.
struct ActivityProfile {
    info: TypeInfo,
    /// Data-defined branch keys, in exit-anchor order.
    choices: Vec<String>,
}

impl ActivityProfile {
    fn generic() -> Self {
        ActivityProfile {
            info: taxonomy::resolve(""),
            choices: Vec::new(),
        }
    }
}

enum ScopeKind<'a> {
    Main,
    Event(&'a str),
}

impl ScopeKind<'_> {
    fn namespaced(&self, id: &str) -> String {
        match self {
            ScopeKind::Main => id.to_string(),
            ScopeKind::Event(name) => format!("{}-{}", name, id),
        }
    }

    fn is_event(&self) -> bool {
        matches!(self, ScopeKind::Event(_))
    }
}

/// Builds a renderable [`FlowGraph`] from a parsed [`FlowDocument`].
pub struct GraphBuilder {
    graph: FlowGraph,
}

impl GraphBuilder {
    pub fn build(document: &FlowDocument) -> FlowGraph {
        let mut builder = GraphBuilder {
            graph: FlowGraph::default(),
        };

        let mut main_extent = 0.0;
        if let Some(process) = &document.process {
            main_extent =
                builder.build_scope(process, document.diagram.as_ref(), ScopeKind::Main, 0.0);
        }

        if let Some(event_flows) = &document.event_flows {
            // Each event block starts below the tallest point of the
            // previous one; the BTreeMap keeps the order deterministic.
            let mut cursor = main_extent + EVENT_FLOW_GAP;
            for (name, flow) in &event_flows.events_map {
                builder.graph.nodes.push(GraphBuilder::header_node(
                    name,
                    cursor - EVENT_HEADER_OFFSET,
                ));
                let extent = match &flow.process {
                    Some(process) => builder.build_scope(
                        process,
                        flow.diagram.as_ref(),
                        ScopeKind::Event(name),
                        cursor,
                    ),
                    None => 0.0,
                };
                cursor += extent + EVENT_BLOCK_GAP;
            }
        }

        // Stable sort: error-path edges first, so the rendering layer draws
        // them underneath the happy path.
        builder.graph.edges.sort_by_key(|e| !e.is_error_path);
        builder.graph
    }

    /// Processes one flow scope, appending its nodes and edges to the
    /// graph. Returns the block's vertical extent relative to `y_offset`.
    /// A scope with no activities is silently skipped.
    fn build_scope(
        &mut self,
        scope: &FlowScope,
        diagram: Option<&Diagram>,
        kind: ScopeKind<'_>,
        y_offset: f64,
    ) -> f64 {
        if scope.activities.is_empty() {
            return 0.0;
        }

        let mut profiles: AHashMap<&str, ActivityProfile> = AHashMap::new();
        let mut extent = 0.0f64;

        for (index, (id, activity)) in scope.activities.iter().enumerate() {
            let raw_type = activity.activity_name.clone().unwrap_or_default();
            let info = taxonomy::resolve(&raw_type);
            let (details, choices) = derive_details(activity, info.category, id, &scope.links);

            let position = match diagram.and_then(|d| d.get(id.as_str())) {
                Some(widget) => {
                    self.graph.has_pixel_hints = true;
                    Position {
                        x: widget.point.x * HINT_SCALE,
                        y: widget.point.y * HINT_SCALE + y_offset,
                    }
                }
                None => grid_position(&kind, index, y_offset),
            };
            extent = extent.max(position.y - y_offset + GRID_Y_STEP);

            let label = activity
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| info.label.to_string());

            self.graph.nodes.push(GraphNode {
                id: kind.namespaced(id),
                category: info.category,
                position,
                label,
                raw_type,
                details,
                is_event_node: kind.is_event(),
            });
            profiles.insert(id.as_str(), ActivityProfile { info, choices });
        }

        let generic = ActivityProfile::generic();
        for (index, link) in scope.links.iter().enumerate() {
            let profile = match profiles.get(link.source_activity_id.as_str()) {
                Some(profile) => profile,
                None => {
                    tracing::debug!(
                        source = %link.source_activity_id,
                        "link source has no activity in scope, classifying as generic"
                    );
                    &generic
                }
            };
            let resolved = exits::resolve_handle(link.condition(), profile.info.category);
            let exit_index = exit_index(profile, &resolved.exit);

            let id = link
                .id
                .clone()
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| format!("link-{}", index));

            self.graph.edges.push(GraphEdge {
                id: kind.namespaced(&id),
                source: kind.namespaced(&link.source_activity_id),
                target: kind.namespaced(&link.target_activity_id),
                exit: resolved.exit,
                exit_index,
                is_error_path: resolved.is_error_path,
                is_timeout: resolved.is_timeout,
            });
        }

        extent
    }

    /// Synthetic non-interactive header marking the start of an event
    /// block. Emitted even when the event scope has no activities.
    fn header_node(event_name: &str, y: f64) -> GraphNode {
        GraphNode {
            id: format!("{}-header", event_name),
            category: NodeCategory::EventHeader,
            position: Position { x: 0.0, y },
            label: format!("Event: {}", event_name),
            raw_type: "eventHeader".to_string(),
            details: Map::new(),
            is_event_node: true,
        }
    }
}

fn grid_position(kind: &ScopeKind<'_>, index: usize, y_offset: f64) -> Position {
    match kind {
        ScopeKind::Main => Position {
            x: (index % GRID_PER_ROW) as f64 * GRID_X_STEP,
            y: y_offset + (index / GRID_PER_ROW) as f64 * GRID_Y_STEP,
        },
        ScopeKind::Event(_) => Position {
            x: EVENT_COLUMN_X[index % EVENT_COLUMN_X.len()],
            y: y_offset + (index / EVENT_COLUMN_X.len()) as f64 * EVENT_ROW_STEP,
        },
    }
}

/// Position of a resolved exit within the source node's ordered exit list:
/// the default exit first, then the category's extra exits, then the
/// data-defined branches. Unresolvable exits anchor at the default slot.
fn exit_index(profile: &ActivityProfile, exit: &ExitId) -> usize {
    if exit.is_happy_path() {
        return 0;
    }
    if let Some(pos) = profile.info.extra_exits.iter().position(|e| e == exit) {
        return pos + 1;
    }
    if let ExitId::Branch(name) = exit {
        if let Some(pos) = profile.choices.iter().position(|c| c == name) {
            return 1 + profile.info.extra_exits.len() + pos;
        }
    }
    0
}

/// A data-defined branch of a menu or case node.
struct Choice {
    key: String,
    label: String,
}

/// Computes a node's `details` record: a shallow copy of the activity's
/// properties plus the category-specific derivations (menu choices, case
/// lists, prompt text). Returns the derived branch keys alongside for exit
/// indexing.
fn derive_details(
    activity: &Activity,
    category: NodeCategory,
    id: &str,
    links: &[Link],
) -> (Map<String, Value>, Vec<String>) {
    let mut details = activity.properties.clone();
    let mut choice_keys = Vec::new();

    match category {
        NodeCategory::Menu | NodeCategory::Collect | NodeCategory::Case => {
            let field = if category == NodeCategory::Case {
                "cases"
            } else {
                "choices"
            };
            // First non-empty source wins: explicit array, parallel
            // keys/labels arrays, then inference from the scope's links.
            let choices = explicit_choices(&activity.properties, field)
                .or_else(|| parallel_array_choices(&activity.properties))
                .unwrap_or_else(|| choices_from_links(id, links));
            if !choices.is_empty() {
                choice_keys = choices.iter().map(|c| c.key.clone()).collect();
                let rendered: Vec<Value> = choices
                    .iter()
                    .map(|c| json!({ "key": c.key, "label": c.label }))
                    .collect();
                details.insert(field.to_string(), Value::Array(rendered));
            }
        }
        NodeCategory::Prompt => {
            let prompts = prompt_texts(&activity.properties);
            if !prompts.is_empty() {
                details.insert(
                    "prompts".to_string(),
                    Value::Array(prompts.into_iter().map(Value::String).collect()),
                );
            }
        }
        _ => {}
    }

    (details, choice_keys)
}

/// Reads an explicit `choices`/`cases` array: entries are either plain
/// strings or objects with key/label fields under various vendor spellings.
fn explicit_choices(properties: &Map<String, Value>, field: &str) -> Option<Vec<Choice>> {
    let entries = properties.get(field)?.as_array()?;
    let choices: Vec<Choice> = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(key) => Some(Choice {
                key: key.clone(),
                label: key.clone(),
            }),
            Value::Object(obj) => {
                let key = string_field(obj, &["key", "digit", "caseId", "value"])?;
                let label =
                    string_field(obj, &["label", "name", "caseName"]).unwrap_or_else(|| key.clone());
                Some(Choice { key, label })
            }
            _ => None,
        })
        .collect();
    (!choices.is_empty()).then_some(choices)
}

/// Zips parallel `keys`/`labels` arrays; missing labels fall back to keys.
fn parallel_array_choices(properties: &Map<String, Value>) -> Option<Vec<Choice>> {
    let keys = properties.get("keys")?.as_array()?;
    let labels = properties
        .get("labels")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let choices: Vec<Choice> = keys
        .iter()
        .enumerate()
        .filter_map(|(i, key)| {
            let key = scalar_string(key)?;
            let label = labels
                .get(i)
                .and_then(|l| scalar_string(l))
                .unwrap_or_else(|| key.clone());
            Some(Choice { key, label })
        })
        .collect();
    (!choices.is_empty()).then_some(choices)
}

/// Fallback inference: the branch identifiers of a menu/case node are the
/// non-system condition strings of its outgoing links.
fn choices_from_links(id: &str, links: &[Link]) -> Vec<Choice> {
    links
        .iter()
        .filter(|link| link.source_activity_id == id)
        .filter_map(|link| link.condition())
        .filter(|condition| !is_system_condition(condition))
        .map(str::to_string)
        .unique()
        .map(|key| Choice {
            label: key.clone(),
            key,
        })
        .collect()
}

/// System tokens never describe a data-defined branch.
fn is_system_condition(condition: &str) -> bool {
    let resolved = exits::resolve_handle(Some(condition), NodeCategory::Generic);
    if resolved.is_error_path || resolved.is_timeout {
        return true;
    }
    let lowered = condition.to_ascii_lowercase();
    matches!(lowered.as_str(), "default" | "success" | "true")
}

/// Flattens TTS/audio prompt arrays into a list of display strings.
fn prompt_texts(properties: &Map<String, Value>) -> Vec<String> {
    for field in ["prompts", "tts", "audio"] {
        let Some(entries) = properties.get(field).and_then(Value::as_array) else {
            continue;
        };
        let texts: Vec<String> = entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(text) => Some(text.clone()),
                Value::Object(obj) => string_field(obj, &["text", "file", "uri"]),
                _ => None,
            })
            .collect();
        if !texts.is_empty() {
            return texts;
        }
    }
    Vec::new()
}

fn string_field(obj: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| obj.get(*name).and_then(|v| scalar_string(v)))
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
