use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate synthetic call-flow documents for exercising the
/// graph builder and layout engine at scale
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Number of activities in the main flow
    #[arg(long, default_value_t = 25)]
    activities: usize,

    /// Number of named event sub-flows
    #[arg(long, default_value_t = 2)]
    events: usize,

    /// Approximate number of outgoing links per activity
    #[arg(long, default_value_t = 2)]
    fanout: usize,
}

const ACTIVITY_TYPES: &[&str] = &[
    "StartActivity",
    "MenuActivity",
    "PlayPromptActivity",
    "TransferActivity",
    "QueueActivity",
    "ConditionActivity",
    "CaseActivity",
    "BusinessHoursActivity",
    "CollectDigitsActivity",
    "DisconnectActivity",
];

const CONDITIONS: &[&str] = &[
    "success", "error", "timeout", "busy", "no_answer", "invalid", "1", "2", "3", "true", "false",
];

const EVENT_NAMES: &[&str] = &["callError", "agentTimeout", "queueFull", "afterHours"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.activities == 0 {
        eprintln!("Error: --activities must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating flow document ({} activities, {} event flows, fanout {})...",
        cli.activities, cli.events, cli.fanout
    );

    let process = generate_scope(&mut rng, cli.activities, cli.fanout);

    let mut events_map = serde_json::Map::new();
    for i in 0..cli.events {
        let name = EVENT_NAMES[i % EVENT_NAMES.len()];
        let name = if i < EVENT_NAMES.len() {
            name.to_string()
        } else {
            format!("{}{}", name, i)
        };
        let count = rng.random_range(1..=8);
        events_map.insert(
            name,
            json!({ "process": generate_scope(&mut rng, count, cli.fanout) }),
        );
    }

    let document = json!({
        "process": process,
        "eventFlows": { "eventsMap": events_map },
    });

    fs::write(&cli.output, serde_json::to_string_pretty(&document)?)?;
    println!(
        "Successfully generated and saved flow document to '{}'",
        cli.output
    );

    Ok(())
}

/// Generates one flow scope: a chain through every activity (so the layout
/// backbone is non-trivial) plus random extra links.
fn generate_scope(rng: &mut ThreadRng, activities: usize, fanout: usize) -> Value {
    let mut activity_map = serde_json::Map::new();
    for i in 0..activities {
        let raw_type = if i == 0 {
            ACTIVITY_TYPES[0]
        } else {
            ACTIVITY_TYPES[rng.random_range(1..ACTIVITY_TYPES.len())]
        };
        activity_map.insert(
            format!("a{}", i),
            json!({
                "name": format!("{} {}", raw_type.trim_end_matches("Activity"), i),
                "activityName": raw_type,
            }),
        );
    }

    let mut links = Vec::new();
    for i in 0..activities.saturating_sub(1) {
        links.push(json!({
            "id": format!("l{}", links.len()),
            "sourceActivityId": format!("a{}", i),
            "targetActivityId": format!("a{}", i + 1),
            "interactionCondition": "success",
        }));
    }
    for i in 0..activities {
        for _ in 1..fanout {
            let target = rng.random_range(0..activities);
            let condition = CONDITIONS[rng.random_range(0..CONDITIONS.len())];
            links.push(json!({
                "id": format!("l{}", links.len()),
                "sourceActivityId": format!("a{}", i),
                "targetActivityId": format!("a{}", target),
                "interactionCondition": condition,
            }));
        }
    }

    json!({ "activities": activity_map, "links": links })
}
