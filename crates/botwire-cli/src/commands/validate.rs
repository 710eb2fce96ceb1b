//! Validate the project and its layout

use anyhow::{Context, Result};
use botwire_codegen::diagnostics;

use super::project::Project;

/// Run the validate command
pub async fn run(config_path: &str) -> Result<()> {
    tracing::info!("Validating project: {}", config_path);

    let project = Project::open(config_path)?;
    let graph = project.session.graph();

    tracing::info!("✓ Project: {}", project.config.project.name);
    tracing::info!("✓ Version: {}", project.config.project.version);
    tracing::info!(
        "✓ Layout: {} nodes, {} wires",
        graph.len(),
        graph.connections().len()
    );

    let found = diagnostics::analyze(graph, project.session.registry())
        .context("Failed to analyze layout")?;
    for diagnostic in &found {
        tracing::warn!("{}", diagnostic);
    }

    if found.is_empty() {
        tracing::info!("✓ Layout is valid");
    } else {
        tracing::info!("Layout is valid with {} warning(s)", found.len());
    }
    Ok(())
}
