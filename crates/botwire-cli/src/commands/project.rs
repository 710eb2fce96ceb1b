//! Project loading shared by the editing commands

use anyhow::{Context, Result};
use botwire_core::{Config, LayoutDocument, Session};

/// A loaded project: configuration plus an editing session over its layout
pub struct Project {
    pub config: Config,
    pub session: Session,
}

impl Project {
    /// Load the configuration and, if it exists, the layout document
    pub fn open(config_path: &str) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", config_path);
        let config = Config::load(config_path).context("Failed to load configuration")?;
        let mut session = Session::from_config(&config).context("Failed to load node catalog")?;

        let layout_path = config.layout_path();
        if layout_path.exists() {
            let document = LayoutDocument::load(&layout_path)
                .with_context(|| format!("Failed to read {}", layout_path.display()))?;
            session
                .deserialize(&document)
                .with_context(|| format!("Failed to load {}", layout_path.display()))?;
            tracing::debug!(
                "Loaded {} nodes and {} wires",
                session.graph().len(),
                session.graph().connections().len()
            );
        } else {
            tracing::debug!("No layout at {}, starting empty", layout_path.display());
        }

        Ok(Self { config, session })
    }

    /// Write the session's graph back to the layout document
    pub fn save(&self) -> Result<()> {
        let layout_path = self.config.layout_path();
        self.session
            .serialize()
            .save(&layout_path)
            .with_context(|| format!("Failed to write {}", layout_path.display()))?;
        tracing::debug!("Saved layout to {}", layout_path.display());
        Ok(())
    }
}
