//! Procflow CLI - Process-Flow Workflow Graphs
//!
//! This is a demonstration CLI for the Procflow library.

use procflow::prelude::*;
use procflow::samples;

fn main() {
    env_logger::init();

    println!("⚙ Procflow - Process-Flow Workflow Graphs v{}", procflow::VERSION);
    println!();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return;
    }

    match args[1].as_str() {
        "init" => {
            if args.len() < 3 {
                eprintln!("Error: Please specify an output path");
                return;
            }
            init_sample(&args[2]);
        }
        "show" => {
            if args.len() < 3 {
                eprintln!("Error: Please specify a snapshot path");
                return;
            }
            show_snapshot(&args[2]);
        }
        "validate" => {
            if args.len() < 3 {
                eprintln!("Error: Please specify a snapshot path");
                return;
            }
            validate_snapshot(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(&args[0]),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage(&args[0]);
        }
    }
}

fn print_usage(program: &str) {
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  init <file>       Write the customer-migration demo workflow");
    println!("  show <file>       Summarize the workflow stored in a snapshot");
    println!("  validate <file>   Run the validation pipeline on a snapshot");
    println!("  help              Show this help message");
}

fn init_sample(path: &str) {
    let (graph, viewport) = samples::migration_workflow();
    let snapshot = Snapshot::capture(&graph, viewport);

    let mut store = FileStore::new(path);
    match store.save(&snapshot) {
        Ok(()) => println!(
            "Wrote demo workflow ({} stages, {} actions) to {}",
            graph.node_count(),
            graph.edge_count(),
            path
        ),
        Err(err) => eprintln!("Error: {}", err),
    }
}

fn load_graph(path: &str) -> Option<ProcessGraph> {
    let store = FileStore::new(path);
    match store.load() {
        Ok(Some(snapshot)) => Some(snapshot.restore().0),
        Ok(None) => {
            eprintln!("Error: no snapshot at {}", path);
            None
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            None
        }
    }
}

fn show_snapshot(path: &str) {
    let Some(graph) = load_graph(path) else {
        return;
    };

    println!("Stages ({}):", graph.node_count());
    for node in graph.nodes() {
        println!("  • [{}] {} ({})", node.stage_type, node.label, node.id);
    }
    println!();

    println!("Actions ({}):", graph.edge_count());
    for edge in graph.edges() {
        let source = graph
            .get_node(edge.source)
            .map(|n| n.label.clone())
            .unwrap_or_else(|_| edge.source.to_string());
        let target = graph
            .get_node(edge.target)
            .map(|n| n.label.clone())
            .unwrap_or_else(|_| edge.target.to_string());
        let email = if edge.is_email_action { " ✉" } else { "" };
        println!("  • {} → {}: {}{}", source, target, edge.label, email);
        if edge.variants.len() > 1 {
            for variant in &edge.variants {
                println!("      - variant '{}'", variant.label);
            }
        }
    }
}

fn validate_snapshot(path: &str) {
    let Some(graph) = load_graph(path) else {
        return;
    };

    let report = ValidationPipeline::default_pipeline().validate(&graph);
    println!("{}", report.summary());

    for msg in report.detailed_errors() {
        println!("{}", msg);
    }
    for warning in &report.warnings {
        println!("⚠ {}", warning.message);
        if let Some(suggestion) = &warning.suggestion {
            println!("   → Suggestion: {}", suggestion);
        }
    }
}
