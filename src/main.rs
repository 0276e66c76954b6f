use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use workflow_canvas::{
    EditorConfig, ExecutionPlanner, NodeId, NodeKind, OrderingPolicy, RunSignal, RunStatus,
    ValidationSeverity, Validator, WorkflowDocument, WorkflowEditor,
};

#[derive(Parser)]
#[command(name = "workflow_canvas", version, about = "Visual workflow graph tools")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every node type in palette order
    Catalog,
    /// Print the execution order of a saved workflow
    Plan {
        /// Workflow JSON file
        file: PathBuf,
        /// Override the configured ordering policy
        #[arg(long, value_parser = parse_ordering)]
        ordering: Option<OrderingPolicy>,
    },
    /// Check a saved workflow for problems
    Validate {
        /// Workflow JSON file
        file: PathBuf,
    },
    /// Play a saved workflow with the simulated activator
    Run {
        /// Workflow JSON file
        file: PathBuf,
    },
}

fn parse_ordering(s: &str) -> Result<OrderingPolicy, String> {
    match s {
        "insertion-order" => Ok(OrderingPolicy::InsertionOrder),
        "dataflow" => Ok(OrderingPolicy::Dataflow),
        other => Err(format!(
            "unknown ordering '{}', expected insertion-order or dataflow",
            other
        )),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("workflow_canvas=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = EditorConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Catalog => print_catalog(),
        Commands::Plan { file, ordering } => {
            let ordering = ordering.unwrap_or(config.run.ordering);
            print_plan(&file, ordering)?;
        }
        Commands::Validate { file } => validate(&file)?,
        Commands::Run { file } => run(&file, config)?,
    }

    Ok(())
}

fn load_document(path: &Path) -> anyhow::Result<WorkflowDocument> {
    let document = WorkflowDocument::load(path)?;
    info!(
        path = %path.display(),
        nodes = document.nodes.len(),
        connections = document.connections.len(),
        "workflow read"
    );
    Ok(document)
}

fn print_catalog() {
    for kind in NodeKind::catalog() {
        println!(
            "{:<12} {:<8} {:<20} {}",
            kind.wire_name(),
            kind.category(),
            kind.title(),
            kind.description()
        );
    }
}

fn print_plan(path: &Path, ordering: OrderingPolicy) -> anyhow::Result<()> {
    let graph = load_document(path)?.into_graph();
    let plan = ExecutionPlanner::plan_with(&graph, ordering)
        .with_context(|| format!("Cannot plan {}", path.display()))?;

    for (step, id) in plan.order.iter().enumerate() {
        let title = graph.node(id).map(|n| n.title.as_str()).unwrap_or("?");
        println!("{:>3}. {} ({})", step + 1, title, id);
    }
    Ok(())
}

fn validate(path: &Path) -> anyhow::Result<()> {
    let graph = load_document(path)?.into_graph();
    let result = Validator::validate(&graph);

    if result.issues.is_empty() {
        println!("✓ All checks passed");
        return Ok(());
    }

    for issue in &result.issues {
        let marker = match issue.severity {
            ValidationSeverity::Error => "❌",
            ValidationSeverity::Warning => "⚠",
            ValidationSeverity::Info => "ℹ",
        };
        println!("{} {}", marker, issue.message);
    }

    if result.has_errors() {
        bail!("{} validation errors", result.errors().len());
    }
    Ok(())
}

fn run(path: &Path, config: EditorConfig) -> anyhow::Result<()> {
    let mut editor = WorkflowEditor::new(config);
    editor.load(load_document(path)?);

    let outcome = editor.execute_workflow(Instant::now())?;
    println!("{}", outcome);

    loop {
        for signal in editor.tick(Instant::now()) {
            print_signal(&editor, &signal);
        }
        let Some(deadline) = editor.runs().next_deadline() else {
            break;
        };
        std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
    }

    if editor.runs().status() == RunStatus::Halted {
        bail!("Workflow run halted");
    }
    Ok(())
}

fn print_signal(editor: &WorkflowEditor, signal: &RunSignal) {
    let title = |id: &NodeId| {
        editor
            .store()
            .node(id)
            .map(|n| n.title.clone())
            .unwrap_or_else(|| id.to_string())
    };

    match signal {
        RunSignal::Activated { node, .. } => println!("▶ {}", title(node)),
        RunSignal::Settled { node, outcome, .. } => {
            let marker = if outcome.is_success() { "✓" } else { "❌" };
            println!("  {} {}: {}", marker, title(node), outcome.message());
        }
        RunSignal::Completed {
            succeeded, failed, ..
        } => println!("Workflow completed: {} succeeded, {} failed", succeeded, failed),
        RunSignal::Halted { node, reason, .. } => {
            println!("Workflow halted at {}: {}", title(node), reason)
        }
        RunSignal::Cancelled { .. } => println!("Workflow cancelled"),
    }
}
