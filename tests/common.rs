//! Common test utilities for building flow documents.
use flowsketch::document::{EventFlow, EventFlows};
use flowsketch::prelude::*;

#[allow(dead_code)]
pub fn activity(name: &str, raw_type: &str) -> Activity {
    Activity {
        id: None,
        name: Some(name.to_string()),
        activity_name: Some(raw_type.to_string()),
        properties: serde_json::Map::new(),
    }
}

#[allow(dead_code)]
pub fn link(source: &str, target: &str, condition: Option<&str>) -> Link {
    Link {
        id: None,
        source_activity_id: source.to_string(),
        target_activity_id: target.to_string(),
        interaction_condition: condition.map(str::to_string),
        name: None,
        condition_expr: None,
    }
}

#[allow(dead_code)]
pub fn scope(activities: Vec<(&str, Activity)>, links: Vec<Link>) -> FlowScope {
    FlowScope {
        activities: activities
            .into_iter()
            .map(|(id, a)| (id.to_string(), a))
            .collect(),
        links,
    }
}

#[allow(dead_code)]
pub fn document(process: FlowScope) -> FlowDocument {
    FlowDocument {
        process: Some(process),
        diagram: None,
        event_flows: None,
    }
}

/// Main flow: menu "a" -> disconnect "b" via the digit "1".
#[allow(dead_code)]
pub fn simple_menu_document() -> FlowDocument {
    document(scope(
        vec![
            ("a", activity("Main Menu", "MenuActivity")),
            ("b", activity("Goodbye", "DisconnectActivity")),
        ],
        vec![link("a", "b", Some("1"))],
    ))
}

/// Main flow plus one named event sub-flow.
#[allow(dead_code)]
pub fn document_with_event(event_name: &str, event_process: Option<FlowScope>) -> FlowDocument {
    let mut events_map = BTreeMap::new();
    events_map.insert(
        event_name.to_string(),
        EventFlow {
            process: event_process,
            diagram: None,
        },
    );
    FlowDocument {
        process: Some(scope(
            vec![
                ("start", activity("Incoming", "StartActivity")),
                ("end", activity("Goodbye", "DisconnectActivity")),
            ],
            vec![link("start", "end", None)],
        )),
        diagram: None,
        event_flows: Some(EventFlows { events_map }),
    }
}

/// A branching flow rooted at a start activity: start -> check, check ->
/// agent (success) and check -> voicemail (error), agent -> end.
#[allow(dead_code)]
pub fn branching_document() -> FlowDocument {
    document(scope(
        vec![
            ("start", activity("Incoming", "StartActivity")),
            ("check", activity("Open?", "BusinessHoursActivity")),
            ("agent", activity("To Agent", "TransferActivity")),
            ("voicemail", activity("Leave Message", "VoicemailActivity")),
            ("end", activity("Goodbye", "DisconnectActivity")),
        ],
        vec![
            link("start", "check", Some("success")),
            link("check", "agent", Some("success")),
            link("check", "voicemail", Some("error")),
            link("agent", "end", Some("success")),
        ],
    ))
}
