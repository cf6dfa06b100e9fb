use clap::Parser;
use flowsketch::prelude::*;
use std::fs;
use std::time::Instant;

/// A call-flow graph transformation and layout CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the call-flow definition JSON file
    flow_path: String,

    /// Force the tree layout even when the document carries pixel hints
    #[arg(short, long)]
    layout: bool,

    /// Write the graph as a binary artifact instead of printing JSON
    #[arg(short, long)]
    artifact: Option<String>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let flow_json = fs::read_to_string(&cli.flow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read flow file '{}': {}",
            &cli.flow_path, e
        ))
    });

    // --- 2. Parsing ---
    let document = FlowDocument::from_json(&flow_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse flow document: {}", e)));

    // --- 3. Graph Construction ---
    let build_start = Instant::now();
    let mut graph = GraphBuilder::build(&document);
    let build_duration = build_start.elapsed();

    // --- 4. Layout ---
    let layout_start = Instant::now();
    if cli.layout {
        LayoutEngine::layout(&mut graph.nodes, &graph.edges);
    } else {
        LayoutEngine::layout_graph(&mut graph);
    }
    let layout_duration = layout_start.elapsed();

    eprintln!(
        "Built {} nodes and {} edges (build {:?}, layout {:?}, total {:?})",
        graph.nodes.len(),
        graph.edges.len(),
        build_duration,
        layout_duration,
        total_start.elapsed()
    );

    // --- 5. Output ---
    if let Some(artifact_path) = cli.artifact {
        let artifact = GraphArtifact::from_graph(&graph)
            .unwrap_or_else(|e| exit_with_error(&format!("Artifact encoding failed: {}", e)));
        artifact.save(&artifact_path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to write artifact '{}': {}",
                artifact_path, e
            ))
        });
        eprintln!("Artifact written to '{}'", artifact_path);
    } else {
        let rendered = if cli.pretty {
            serde_json::to_string_pretty(&graph)
        } else {
            serde_json::to_string(&graph)
        }
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));
        println!("{}", rendered);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
