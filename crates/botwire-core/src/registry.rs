//! Node type catalog
//!
//! Every node placed on the canvas refers to a [`NodeTypeDef`] by name. The
//! registry is built once (from the built-in catalog or a YAML catalog file)
//! and is read-only afterwards.
//!
//! # Catalog format
//!
//! ```yaml
//! - name: Command
//!   kind: event
//!   outputs: [Flow]
//!   properties:
//!     - key: trigger
//!       label: "Trigger (!name)"
//!       default: hello
//!   code_start: "@bot.command(name='{trigger}')\nasync def {func_name}(ctx):"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Role of a node type in a flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Starts a flow chain; compiled into a handler header
    Event,
    /// Inline step inside a chain
    Action,
}

/// A configurable property of a node type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyDef {
    /// Key used in templates as `{key}`
    pub key: String,
    /// Label shown next to the property editor
    pub label: String,
    /// Initial value for new nodes
    #[serde(default)]
    pub default: String,
}

/// Static definition of a node type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeTypeDef {
    /// Unique type name
    pub name: String,

    /// Event root or inline action
    pub kind: NodeKind,

    /// Input port names, in port order
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Output port names, in port order
    #[serde(default)]
    pub outputs: Vec<String>,

    /// Property definitions, in display order
    #[serde(default)]
    pub properties: Vec<PropertyDef>,

    /// Block header emitted for event roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_start: Option<String>,

    /// Line(s) emitted when the node is reached inside a chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl NodeTypeDef {
    /// Whether nodes of this type start a chain
    pub fn is_event_root(&self) -> bool {
        self.kind == NodeKind::Event
    }

    /// Input port names
    pub fn input_port_names(&self) -> &[String] {
        &self.inputs
    }

    /// Output port names
    pub fn output_port_names(&self) -> &[String] {
        &self.outputs
    }

    /// Property definitions
    pub fn property_defs(&self) -> &[PropertyDef] {
        &self.properties
    }

    /// Default property values keyed by property key
    pub fn default_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|p| (p.key.as_str(), p.default.as_str()))
    }
}

/// Read-only lookup of node types by name
#[derive(Debug, Clone)]
pub struct Registry {
    types: Vec<NodeTypeDef>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry from type definitions, rejecting duplicate names
    pub fn new(types: Vec<NodeTypeDef>) -> Result<Self> {
        let mut index = HashMap::with_capacity(types.len());
        for (i, def) in types.iter().enumerate() {
            if index.insert(def.name.clone(), i).is_some() {
                return Err(Error::ConfigInvalid {
                    message: format!("node type '{}' is defined more than once", def.name),
                });
            }
        }
        Ok(Self { types, index })
    }

    /// The built-in chat-bot catalog
    pub fn builtin() -> Self {
        let types = builtin_types();
        let index = types
            .iter()
            .enumerate()
            .map(|(i, def)| (def.name.clone(), i))
            .collect();
        Self { types, index }
    }

    /// Parse a YAML catalog (a list of type definitions)
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let types: Vec<NodeTypeDef> = serde_yaml::from_str(yaml)?;
        Self::new(types)
    }

    /// Load a YAML catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let registry = Self::from_yaml_str(&contents)?;
        tracing::debug!(
            "Loaded {} node types from {}",
            registry.types.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Look up a type by name
    pub fn type_def(&self, name: &str) -> Result<&NodeTypeDef> {
        self.index
            .get(name)
            .map(|&i| &self.types[i])
            .ok_or_else(|| Error::UnknownType {
                type_name: name.to_string(),
            })
    }

    /// Whether a type with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All types in catalog order
    pub fn types(&self) -> &[NodeTypeDef] {
        &self.types
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn flow() -> Vec<String> {
    vec!["Flow".to_string()]
}

fn text_action(name: &str, label: &str, default: &str, code: &str) -> NodeTypeDef {
    NodeTypeDef {
        name: name.to_string(),
        kind: NodeKind::Action,
        inputs: flow(),
        outputs: flow(),
        properties: vec![PropertyDef {
            key: "text".to_string(),
            label: label.to_string(),
            default: default.to_string(),
        }],
        code_start: None,
        code: Some(code.to_string()),
    }
}

fn builtin_types() -> Vec<NodeTypeDef> {
    vec![
        NodeTypeDef {
            name: "Event: On Ready".to_string(),
            kind: NodeKind::Event,
            inputs: vec![],
            outputs: flow(),
            properties: vec![],
            code_start: Some("@bot.event\nasync def on_ready():".to_string()),
            code: None,
        },
        NodeTypeDef {
            name: "Command".to_string(),
            kind: NodeKind::Event,
            inputs: vec![],
            outputs: flow(),
            properties: vec![PropertyDef {
                key: "trigger".to_string(),
                label: "Trigger (!name)".to_string(),
                default: "hello".to_string(),
            }],
            code_start: Some(
                "@bot.command(name='{trigger}')\nasync def {func_name}(ctx):".to_string(),
            ),
            code: None,
        },
        text_action(
            "Send Message",
            "Message Text",
            "Hello World!",
            "    await ctx.send('{text}')",
        ),
        text_action(
            "Reply to User",
            "Reply Text",
            "I hear you!",
            "    await ctx.reply('{text}')",
        ),
        text_action(
            "Print Console",
            "Log Text",
            "Debug message",
            "    print('{text}')",
        ),
    ]
}
