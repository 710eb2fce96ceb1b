//! Configuration parsing and validation
//!
//! A Botwire project is a directory holding `botwire.yaml`, the layout
//! document it points at, and optionally a custom node catalog.
//!
//! ```yaml
//! name: my-bot
//! layout: layout.json
//! output: bot.py
//! codegen:
//!   command_prefix: "?"
//! canvas:
//!   node_width: 160
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::geometry::NodeGeometry;
use crate::registry::Registry;

/// Name of the project file looked up inside a project directory
pub const CONFIG_FILE: &str = "botwire.yaml";

/// Root project configuration from `botwire.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Layout document, relative to the project directory
    #[serde(default = "default_layout")]
    pub layout: String,

    /// Compiled script, relative to the project directory
    #[serde(default = "default_output")]
    pub output: String,

    /// Optional YAML node catalog replacing the built-in one
    #[serde(default)]
    pub catalog: Option<String>,

    /// Code generation settings
    #[serde(default)]
    pub codegen: CodegenConfig,

    /// Canvas geometry
    #[serde(default)]
    pub canvas: NodeGeometry,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_layout() -> String {
    "layout.json".to_string()
}

fn default_output() -> String {
    "bot.py".to_string()
}

/// Code generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Prefix of generated handler names (`cmd_` → `cmd_3`)
    #[serde(default = "default_function_prefix")]
    pub function_prefix: String,

    /// Chat command prefix passed to the bot constructor
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Credential placeholder in the closing run call
    #[serde(default = "default_token")]
    pub token: String,
}

fn default_function_prefix() -> String {
    "cmd_".to_string()
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_token() -> String {
    "YOUR_TOKEN_HERE".to_string()
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            function_prefix: default_function_prefix(),
            command_prefix: default_command_prefix(),
            token: default_token(),
        }
    }
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Base path of the project
    pub base_path: PathBuf,
}

impl Config {
    /// Load configuration from a project directory or a `botwire.yaml` path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let (config_path, base_path) = if path.is_dir() {
            (path.join(CONFIG_FILE), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            )
        };

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let project: ProjectConfig = serde_yaml::from_str(&contents)?;
        project.validate()?;

        Ok(Self { project, base_path })
    }

    /// Absolute path of the layout document
    pub fn layout_path(&self) -> PathBuf {
        self.base_path.join(&self.project.layout)
    }

    /// Absolute path of the compiled script
    pub fn output_path(&self) -> PathBuf {
        self.base_path.join(&self.project.output)
    }

    /// The project's node catalog
    pub fn registry(&self) -> Result<Registry> {
        match &self.project.catalog {
            Some(catalog) => Registry::load(self.base_path.join(catalog)),
            None => Ok(Registry::builtin()),
        }
    }
}

impl ProjectConfig {
    /// Reject values that cannot produce a usable canvas or script
    pub fn validate(&self) -> Result<()> {
        let canvas = &self.canvas;
        if !(canvas.node_width > 0.0 && canvas.node_height > 0.0) {
            return Err(Error::ConfigInvalid {
                message: "canvas node_width and node_height must be positive".to_string(),
            });
        }
        if !canvas.port_gap.is_finite() {
            return Err(Error::ConfigInvalid {
                message: "canvas port_gap must be a finite number".to_string(),
            });
        }
        if self.codegen.function_prefix.is_empty() {
            return Err(Error::ConfigInvalid {
                message: "codegen function_prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
