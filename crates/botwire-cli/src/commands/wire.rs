//! Wiring commands

use anyhow::Result;

use super::project::Project;

/// Wire `source:from_port` to `target:to_port`
pub async fn connect(
    config_path: &str,
    source: &str,
    from_port: usize,
    target: &str,
    to_port: usize,
) -> Result<()> {
    let mut project = Project::open(config_path)?;

    if project
        .session
        .connect(source, from_port, target, to_port)?
    {
        project.save()?;
        tracing::info!(
            "✓ Connected {}:{} -> {}:{}",
            source,
            from_port,
            target,
            to_port
        );
    } else {
        tracing::warn!(
            "Wire {}:{} -> {}:{} not added (already present or loops onto itself)",
            source,
            from_port,
            target,
            to_port
        );
    }

    Ok(())
}

/// Remove one wire, or every wire touching `source` when `target` is `None`
pub async fn disconnect(
    config_path: &str,
    source: &str,
    from_port: usize,
    target: Option<&str>,
    to_port: usize,
) -> Result<()> {
    let mut project = Project::open(config_path)?;

    let removed = match target {
        Some(target) => {
            usize::from(project.session.disconnect(source, from_port, target, to_port))
        }
        None => project.session.disconnect_all(source),
    };

    if removed > 0 {
        project.save()?;
    }
    tracing::info!("✓ Removed {} wire(s)", removed);
    Ok(())
}

/// Reset the layout
pub async fn clear(config_path: &str) -> Result<()> {
    let mut project = Project::open(config_path)?;
    let nodes = project.session.graph().len();
    project.session.clear();
    project.save()?;

    tracing::info!("✓ Cleared {} node(s)", nodes);
    Ok(())
}
