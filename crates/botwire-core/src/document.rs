//! Layout document persistence
//!
//! The layout document is the only storage format. It is a flat JSON shape:
//!
//! ```json
//! {
//!   "nodes": [
//!     {"id": "node_0", "type": "Command", "x": 200.0, "y": 200.0,
//!      "properties": {"trigger": "hello"}, "label": "Command",
//!      "portCounts": {"in": 0, "out": 1}}
//!   ],
//!   "connections": [["node_0", 0, "node_1", 0]]
//! }
//! ```
//!
//! Properties, labels and port counts are restored verbatim rather than
//! re-derived from the registry, so a saved layout keeps loading after the
//! catalog defaults change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::graph::{Connection, Graph, PortCounts};
use crate::registry::Registry;

/// A wire as `[source, source_port, target, target_port]`
pub type ConnectionRecord = (String, usize, String, usize);

/// Serialized graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Nodes in graph order
    pub nodes: Vec<NodeRecord>,

    /// Wires in insertion order
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

/// Serialized node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node id
    pub id: String,

    /// Node type name
    #[serde(rename = "type")]
    pub type_name: String,

    /// Stage x coordinate
    pub x: f64,

    /// Stage y coordinate
    pub y: f64,

    /// Property values; catalog defaults apply when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,

    /// Display label; the type name applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Port counts; the catalog's counts apply when absent
    #[serde(
        default,
        rename = "portCounts",
        skip_serializing_if = "Option::is_none"
    )]
    pub port_counts: Option<PortCounts>,
}

/// Snapshot a graph into a layout document
pub fn serialize(graph: &Graph) -> LayoutDocument {
    LayoutDocument {
        nodes: graph
            .nodes()
            .map(|node| NodeRecord {
                id: node.id.clone(),
                type_name: node.type_name.clone(),
                x: node.position.x,
                y: node.position.y,
                properties: Some(node.properties.clone()),
                label: Some(node.label.clone()),
                port_counts: Some(node.port_counts),
            })
            .collect(),
        connections: graph
            .connections()
            .iter()
            .map(|c| {
                (
                    c.source.clone(),
                    c.source_port,
                    c.target.clone(),
                    c.target_port,
                )
            })
            .collect(),
    }
}

/// Replace the contents of `graph` with the document.
///
/// Node ids are preserved and the id counter is advanced past them. On error
/// `graph` is left untouched.
pub fn deserialize(document: &LayoutDocument, graph: &mut Graph, registry: &Registry) -> Result<()> {
    let mut restored = Graph::new();

    for record in &document.nodes {
        let position = Point::new(record.x, record.y);
        restored
            .add_node(registry, &record.type_name, position, Some(&record.id))
            .map_err(|e| match e {
                Error::UnknownType { type_name } => Error::corrupt(format!(
                    "node '{}' has unknown type '{}'",
                    record.id, type_name
                )),
                Error::DuplicateNode { id } => {
                    Error::corrupt(format!("node id '{}' appears more than once", id))
                }
                other => other,
            })?;

        let node = restored.node(&record.id)?;
        let label = record.label.clone().unwrap_or_else(|| node.label.clone());
        let properties = record
            .properties
            .clone()
            .unwrap_or_else(|| node.properties.clone());
        let port_counts = record.port_counts.unwrap_or(node.port_counts);
        restored.restore_node(&record.id, label, properties, port_counts)?;
    }

    for (source, source_port, target, target_port) in &document.connections {
        for endpoint in [source, target] {
            if !restored.contains(endpoint) {
                return Err(Error::corrupt(format!(
                    "connection references missing node '{}'",
                    endpoint
                )));
            }
        }
        restored.restore_connection(Connection::new(
            source.as_str(),
            *source_port,
            target.as_str(),
            *target_port,
        ));
    }

    tracing::debug!(
        "Loaded layout with {} nodes and {} connections",
        restored.len(),
        restored.connections().len()
    );
    *graph = restored;
    Ok(())
}

impl LayoutDocument {
    /// Parse a JSON layout document
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::corrupt(e.to_string()))
    }

    /// Render as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a layout file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Write a layout file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json_string()?)?;
        Ok(())
    }
}
