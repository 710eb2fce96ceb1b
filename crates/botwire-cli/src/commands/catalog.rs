//! List node types

use anyhow::{Context, Result};
use botwire_core::Config;

/// Run the catalog command
pub async fn run(config_path: &str) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let registry = config.registry().context("Failed to load node catalog")?;

    tracing::info!("Node types ({}):", registry.types().len());
    for def in registry.types() {
        tracing::info!("  {} [{:?}]", def.name, def.kind);
        tracing::info!(
            "    ports: in {:?}, out {:?}",
            def.input_port_names(),
            def.output_port_names()
        );
        for prop in def.property_defs() {
            tracing::info!("    {} ({}) = {:?}", prop.key, prop.label, prop.default);
        }
    }

    Ok(())
}
