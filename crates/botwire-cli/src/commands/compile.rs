//! Compile the layout to a bot script

use anyhow::{Context, Result};
use botwire_codegen::{CompileOptions, Compiler};
use std::path::PathBuf;

use super::project::Project;

/// Run the compile command
pub async fn run(config_path: &str, output: Option<&str>, debug: bool, force: bool) -> Result<()> {
    let project = Project::open(config_path)?;

    let options = CompileOptions {
        settings: project.config.project.codegen.clone(),
        debug,
    };
    let compiler = Compiler::new(options);

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => project.config.output_path(),
    };

    tracing::info!("Compiling {}", project.config.layout_path().display());
    let compiled = compiler
        .compile(project.session.graph(), project.session.registry())
        .context("Compilation failed")?;

    if !force && compiled.matches_file(&output_path) {
        tracing::info!(
            "✓ {} is up to date (hash: {}...)",
            output_path.display(),
            compiled.short_hash()
        );
        return Ok(());
    }

    compiled
        .save(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    tracing::info!(
        "✓ {} ({} handlers, {} bytes, hash: {}...)",
        output_path.display(),
        compiled.handlers,
        compiled.size(),
        compiled.short_hash()
    );
    Ok(())
}
