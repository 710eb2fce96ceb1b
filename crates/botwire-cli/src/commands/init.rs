//! Initialize a new Botwire project

use anyhow::Result;
use std::fs;
use std::path::Path;

use botwire_core::{CONFIG_FILE, Point, Registry, Session};

/// Run the init command
pub async fn run(path: &str, name: Option<&str>) -> Result<()> {
    let project_dir = Path::new(path);

    // Create directory if it doesn't exist
    if !project_dir.exists() {
        fs::create_dir_all(project_dir)?;
    }

    // Get absolute path for deriving name
    let abs_path = project_dir.canonicalize()?;

    // Derive project name from directory name if not provided
    let project_name = match name {
        Some(n) => n.to_string(),
        None => abs_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Could not determine project name from path"))?,
    };

    // Check if already initialized
    if project_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!(
            "Directory '{}' already contains a {}",
            project_dir.display(),
            CONFIG_FILE
        );
    }

    tracing::info!("Creating new Botwire project: {}", project_name);

    let config = format!(
        r#"# Botwire Project Configuration
name: {project_name}
version: "0.1.0"

# Layout document edited by the canvas and the node commands
layout: layout.json

# Compiled bot script
output: bot.py

codegen:
  function_prefix: cmd_
  command_prefix: "!"
  token: YOUR_TOKEN_HERE

canvas:
  node_width: 140
  node_height: 60
  port_gap: 6
"#
    );
    fs::write(project_dir.join(CONFIG_FILE), config)?;

    // Sample flow: `!hello` answers with a message
    let mut session = Session::new(Registry::builtin());
    let command = session.add_node("Command", Point::new(40.0, 40.0), None)?;
    let send = session.add_node("Send Message", Point::new(260.0, 40.0), None)?;
    session.connect(&command, 0, &send, 0)?;
    session.serialize().save(project_dir.join("layout.json"))?;

    let gitignore = r#"# Compiled bot script
bot.py

# IDE
.idea/
.vscode/
*.swp
"#;
    fs::write(project_dir.join(".gitignore"), gitignore)?;

    tracing::info!(
        "✓ Created project '{}' at {}",
        project_name,
        abs_path.display()
    );
    tracing::info!("");
    tracing::info!("Next steps:");
    if path != "." {
        tracing::info!("  cd {}", project_dir.display());
    }
    tracing::info!("  botwire show        # Inspect the layout");
    tracing::info!("  botwire compile     # Write bot.py");

    Ok(())
}
