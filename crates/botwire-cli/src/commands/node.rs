//! Node editing commands
//!
//! Each command applies one mutation to the layout and saves it.

use anyhow::{Context, Result};
use botwire_core::Point;

use super::project::Project;

/// Add a node
pub async fn add(
    config_path: &str,
    type_name: &str,
    x: f64,
    y: f64,
    id: Option<&str>,
) -> Result<()> {
    let mut project = Project::open(config_path)?;
    let id = project
        .session
        .add_node(type_name, Point::new(x, y), id)
        .with_context(|| format!("Failed to add '{}' node", type_name))?;
    project.save()?;

    tracing::info!("✓ Added {} ({})", id, type_name);
    Ok(())
}

/// Move a node
pub async fn move_to(config_path: &str, id: &str, x: f64, y: f64) -> Result<()> {
    let mut project = Project::open(config_path)?;
    project.session.move_node(id, Point::new(x, y))?;
    project.save()?;

    tracing::info!("✓ Moved {} to ({}, {})", id, x, y);
    Ok(())
}

/// Set a property value
pub async fn set(config_path: &str, id: &str, key: &str, value: &str) -> Result<()> {
    let mut project = Project::open(config_path)?;
    project.session.set_property(id, key, value)?;
    project.save()?;

    tracing::info!("✓ Set {}.{} = {:?}", id, key, value);
    Ok(())
}

/// Change a node's label
pub async fn rename(config_path: &str, id: &str, label: &str) -> Result<()> {
    let mut project = Project::open(config_path)?;
    project.session.rename_node(id, label)?;
    project.save()?;

    let node = project.session.graph().node(id)?;
    tracing::info!("✓ Renamed {} to \"{}\"", id, node.label);
    Ok(())
}

/// Delete a node and its wires
pub async fn delete(config_path: &str, id: &str) -> Result<()> {
    let mut project = Project::open(config_path)?;
    project.session.delete_node(id)?;
    project.save()?;

    tracing::info!("✓ Deleted {}", id);
    Ok(())
}
