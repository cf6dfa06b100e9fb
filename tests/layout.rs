//! Integration tests for the tree-backbone layout engine.
mod common;
use common::*;
use flowsketch::prelude::*;

fn node<'a>(graph: &'a FlowGraph, id: &str) -> &'a GraphNode {
    graph
        .nodes
        .iter()
        .find(|n| n.id == id)
        .unwrap_or_else(|| panic!("node '{}' missing", id))
}

#[test]
fn test_layout_is_deterministic() {
    let doc = branching_document();
    let mut first = GraphBuilder::build(&doc);
    LayoutEngine::layout_graph(&mut first);
    let mut second = GraphBuilder::build(&doc);
    LayoutEngine::layout_graph(&mut second);
    assert_eq!(first, second);
}

#[test]
fn test_depth_proportional_x() {
    let mut graph = GraphBuilder::build(&branching_document());
    LayoutEngine::layout_graph(&mut graph);

    let start = node(&graph, "start");
    let check = node(&graph, "check");
    let agent = node(&graph, "agent");
    let voicemail = node(&graph, "voicemail");
    let end = node(&graph, "end");

    assert!(check.position.x > start.position.x);
    assert!(agent.position.x > check.position.x);
    assert!(end.position.x > agent.position.x);
    // Siblings share a depth.
    assert_eq!(agent.position.x, voicemail.position.x);
}

#[test]
fn test_happy_path_child_floats_to_top() {
    let mut graph = GraphBuilder::build(&branching_document());
    LayoutEngine::layout_graph(&mut graph);

    // "agent" is reached via the success edge, "voicemail" via the error
    // edge; the happy path takes the upper band.
    let agent = node(&graph, "agent");
    let voicemail = node(&graph, "voicemail");
    assert!(agent.position.y < voicemail.position.y);
}

#[test]
fn test_parent_centers_over_children() {
    let mut graph = GraphBuilder::build(&branching_document());
    LayoutEngine::layout_graph(&mut graph);

    let check = node(&graph, "check");
    let agent = node(&graph, "agent");
    let voicemail = node(&graph, "voicemail");
    let mid = (agent.position.y + voicemail.position.y) / 2.0;
    assert!((check.position.y - mid).abs() < 1e-9);
}

#[test]
fn test_sibling_subtrees_do_not_overlap() {
    // One root with three chains of different lengths hanging off it.
    let mut activities = BTreeMap::new();
    activities.insert("root".to_string(), activity("Start", "StartActivity"));
    let mut links = Vec::new();
    for (chain, len) in [("a", 4usize), ("b", 1), ("c", 2)] {
        links.push(link("root", &format!("{}0", chain), Some("error")));
        for i in 0..len {
            activities.insert(
                format!("{}{}", chain, i),
                activity("Step", "PlayPromptActivity"),
            );
            if i > 0 {
                links.push(link(
                    &format!("{}{}", chain, i - 1),
                    &format!("{}{}", chain, i),
                    None,
                ));
            }
        }
    }
    let mut graph = GraphBuilder::build(&document(FlowScope { activities, links }));
    LayoutEngine::layout_graph(&mut graph);

    // Each chain occupies its own vertical range.
    let range = |prefix: &str| {
        let ys: Vec<f64> = graph
            .nodes
            .iter()
            .filter(|n| n.id.starts_with(prefix))
            .map(|n| n.position.y)
            .collect();
        let min = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    };
    let mut ranges = vec![range("a"), range("b"), range("c")];
    ranges.sort_by(|l, r| l.0.partial_cmp(&r.0).unwrap());
    for pair in ranges.windows(2) {
        assert!(
            pair[0].1 < pair[1].0,
            "sibling subtree ranges overlap: {:?}",
            ranges
        );
    }
}

#[test]
fn test_start_node_is_first_root() {
    // Two disconnected components; the start-category node leads even
    // though it sorts after "alpha" in the node list.
    let mut graph = GraphBuilder::build(&document(scope(
        vec![
            ("alpha", activity("Orphan", "PlayPromptActivity")),
            ("zstart", activity("Incoming", "StartActivity")),
        ],
        vec![],
    )));
    LayoutEngine::layout_graph(&mut graph);

    let start = node(&graph, "zstart");
    let orphan = node(&graph, "alpha");
    assert!(start.position.y < orphan.position.y);
}

#[test]
fn test_cycle_members_keep_builder_positions() {
    // A pure cycle has no root; its members stay where the grid fallback
    // put them instead of failing.
    let mut graph = GraphBuilder::build(&document(scope(
        vec![
            ("a", activity("Ping", "PlayPromptActivity")),
            ("b", activity("Pong", "PlayPromptActivity")),
        ],
        vec![link("a", "b", None), link("b", "a", None)],
    )));
    let before: Vec<Position> = graph.nodes.iter().map(|n| n.position).collect();
    LayoutEngine::layout_graph(&mut graph);
    let after: Vec<Position> = graph.nodes.iter().map(|n| n.position).collect();
    assert_eq!(before, after);
}

#[test]
fn test_multi_parent_target_gets_single_tree_parent() {
    // "shared" is reachable from both branches; the happy path adopts it
    // first and the layout still places every node exactly once.
    let mut graph = GraphBuilder::build(&document(scope(
        vec![
            ("start", activity("Incoming", "StartActivity")),
            ("left", activity("Left", "QueueActivity")),
            ("right", activity("Right", "QueueActivity")),
            ("shared", activity("Shared", "DisconnectActivity")),
        ],
        vec![
            link("start", "left", Some("success")),
            link("start", "right", Some("error")),
            link("left", "shared", Some("success")),
            link("right", "shared", Some("error")),
        ],
    )));
    LayoutEngine::layout_graph(&mut graph);

    let shared = node(&graph, "shared");
    let left = node(&graph, "left");
    // Adopted by the happy-path parent: one depth step past "left".
    assert!(shared.position.x > left.position.x);
}

#[test]
fn test_event_blocks_layout_below_main_flow() {
    let doc = document_with_event(
        "callError",
        Some(scope(
            vec![
                ("5", activity("Apology", "PlayPromptActivity")),
                ("6", activity("Hangup", "DisconnectActivity")),
            ],
            vec![link("5", "6", None)],
        )),
    );
    let mut graph = GraphBuilder::build(&doc);
    LayoutEngine::layout_graph(&mut graph);

    let main_max = graph
        .nodes
        .iter()
        .filter(|n| !n.is_event_node)
        .map(|n| n.position.y)
        .fold(f64::NEG_INFINITY, f64::max);
    let header = node(&graph, "callError-header");
    let first = node(&graph, "callError-5");
    assert!(header.position.y > main_max);
    assert!(first.position.y >= header.position.y);
    // The event chain still reads left to right.
    assert!(node(&graph, "callError-6").position.x > first.position.x);
}

#[test]
fn test_layout_graph_respects_pixel_hints() {
    let json = r#"{
        "process": {
            "activities": {
                "a": { "activityName": "PlayPromptActivity" },
                "b": { "activityName": "DisconnectActivity" }
            },
            "links": [{ "sourceActivityId": "a", "targetActivityId": "b" }]
        },
        "diagram": {
            "a": { "point": { "x": 10.0, "y": 20.0 } },
            "b": { "point": { "x": 30.0, "y": 40.0 } }
        }
    }"#;
    let doc = FlowDocument::from_json(json).unwrap();
    let mut graph = GraphBuilder::build(&doc);
    let before: Vec<Position> = graph.nodes.iter().map(|n| n.position).collect();
    LayoutEngine::layout_graph(&mut graph);
    let after: Vec<Position> = graph.nodes.iter().map(|n| n.position).collect();
    assert_eq!(before, after);
}
