//! Show the layout contents

use anyhow::Result;

use super::project::Project;

/// Run the show command
pub async fn run(config_path: &str) -> Result<()> {
    let project = Project::open(config_path)?;
    let graph = project.session.graph();

    tracing::info!("Project: {}", project.config.project.name);
    tracing::info!("Nodes ({}):", graph.len());
    for node in graph.nodes() {
        tracing::info!(
            "  {} {} at ({}, {}) \"{}\"",
            node.id,
            node.type_name,
            node.position.x,
            node.position.y,
            node.label
        );
        for (key, value) in &node.properties {
            tracing::info!("    {} = {:?}", key, value);
        }
    }

    tracing::info!("Wires ({}):", graph.connections().len());
    for conn in graph.connections() {
        tracing::info!(
            "  {}:{} -> {}:{}",
            conn.source,
            conn.source_port,
            conn.target,
            conn.target_port
        );
    }

    Ok(())
}
