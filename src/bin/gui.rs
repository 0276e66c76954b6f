use std::path::PathBuf;

use anyhow::Context;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use workflow_canvas::{EditorConfig, WorkflowCanvasApp};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("workflow_canvas=info,warn")),
        )
        .with_target(false)
        .init();

    // Optional config path as the only argument
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = EditorConfig::load_or_default(config_path.as_deref())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Workflow Canvas"),
        ..Default::default()
    };

    eframe::run_native(
        "Workflow Canvas",
        options,
        Box::new(|_cc| Ok(Box::new(WorkflowCanvasApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("Failed to start the editor window")
}
