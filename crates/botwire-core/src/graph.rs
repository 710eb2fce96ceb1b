//! Flow graph store
//!
//! Owns the live node instances and the wires between them, and enforces the
//! structural rules: ids are never reused within a session, wires are never
//! duplicated, and deleting a node removes every wire touching it.
//!
//! Nodes iterate in insertion order. The code generator relies on that order
//! for deterministic output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::geometry::{Point, Side};
use crate::registry::Registry;

/// Prefix of generated node ids
pub const NODE_ID_PREFIX: &str = "node_";

/// Trailing integer of an id such as `node_12`
pub fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id.len() - id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    id[id.len() - digits..].parse().ok()
}

/// Number of ports on each side of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortCounts {
    /// Input ports
    #[serde(rename = "in")]
    pub inputs: usize,
    /// Output ports
    #[serde(rename = "out")]
    pub outputs: usize,
}

impl PortCounts {
    /// Count on the given side
    pub fn on(&self, side: Side) -> usize {
        match side {
            Side::Input => self.inputs,
            Side::Output => self.outputs,
        }
    }
}

/// A node placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Session-unique id
    pub id: String,
    /// Name of the node type in the registry
    pub type_name: String,
    /// Top-left corner in stage coordinates
    pub position: Point,
    /// Display label
    pub label: String,
    /// Current property values
    pub properties: BTreeMap<String, String>,
    /// Port counts captured when the node was created
    pub port_counts: PortCounts,
}

/// A wire from an output port to an input port
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Source node id
    pub source: String,
    /// Output port index on the source
    pub source_port: usize,
    /// Target node id
    pub target: String,
    /// Input port index on the target
    pub target_port: usize,
}

impl Connection {
    /// Create a connection
    pub fn new(
        source: impl Into<String>,
        source_port: usize,
        target: impl Into<String>,
        target_port: usize,
    ) -> Self {
        Self {
            source: source.into(),
            source_port,
            target: target.into(),
            target_port,
        }
    }

    /// Whether either endpoint is the given node
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

/// The live flow graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    next_id: u64,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node of `type_name` at `position`.
    ///
    /// Without an explicit id the next `node_<n>` id is allocated. An explicit
    /// id advances the counter past its numeric suffix so later allocations
    /// cannot collide with it.
    pub fn add_node(
        &mut self,
        registry: &Registry,
        type_name: &str,
        position: Point,
        explicit_id: Option<&str>,
    ) -> Result<String> {
        let def = registry.type_def(type_name)?;

        let id = match explicit_id {
            Some(id) => {
                if self.contains(id) {
                    return Err(Error::DuplicateNode { id: id.to_string() });
                }
                if let Some(n) = numeric_suffix(id) {
                    self.next_id = self.next_id.max(n.saturating_add(1));
                }
                id.to_string()
            }
            None => self.allocate_id()?,
        };

        let node = Node {
            id: id.clone(),
            type_name: def.name.clone(),
            position,
            label: def.name.clone(),
            properties: def
                .default_properties()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            port_counts: PortCounts {
                inputs: def.inputs.len(),
                outputs: def.outputs.len(),
            },
        };
        self.nodes.push(node);

        tracing::debug!("Added node {} ({})", id, type_name);
        Ok(id)
    }

    fn allocate_id(&mut self) -> Result<String> {
        loop {
            let id = format!("{}{}", NODE_ID_PREFIX, self.next_id);
            self.next_id = self
                .next_id
                .checked_add(1)
                .ok_or_else(|| Error::IdsExhausted { last: id.clone() })?;
            if !self.contains(&id) {
                return Ok(id);
            }
        }
    }

    /// Move a node; wires follow implicitly
    pub fn move_node(&mut self, id: &str, position: Point) -> Result<()> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Set an existing property of a node
    pub fn set_property(&mut self, id: &str, key: &str, value: impl Into<String>) -> Result<()> {
        let node = self.node_mut(id)?;
        match node.properties.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                tracing::debug!("Set {}.{}", id, key);
                Ok(())
            }
            None => Err(Error::UnknownProperty {
                node_id: id.to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// Rename a node; a blank label falls back to the type name
    pub fn rename_node(&mut self, id: &str, label: &str) -> Result<()> {
        let node = self.node_mut(id)?;
        node.label = if label.trim().is_empty() {
            node.type_name.clone()
        } else {
            label.to_string()
        };
        Ok(())
    }

    /// Wire an output port to an input port.
    ///
    /// Returns `Ok(false)` without changing anything when the identical wire
    /// already exists or when it would join a port to itself.
    pub fn connect(
        &mut self,
        source: &str,
        source_port: usize,
        target: &str,
        target_port: usize,
    ) -> Result<bool> {
        let outputs = self.node(source)?.port_counts.outputs;
        let inputs = self.node(target)?.port_counts.inputs;

        if source_port >= outputs {
            return Err(Error::PortOutOfRange {
                node_id: source.to_string(),
                side: Side::Output,
                index: source_port,
                count: outputs,
            });
        }
        if target_port >= inputs {
            return Err(Error::PortOutOfRange {
                node_id: target.to_string(),
                side: Side::Input,
                index: target_port,
                count: inputs,
            });
        }

        if source == target && source_port == target_port {
            return Ok(false);
        }

        let conn = Connection::new(source, source_port, target, target_port);
        if self.connections.contains(&conn) {
            return Ok(false);
        }

        tracing::debug!(
            "Connected {}[{}] -> {}[{}]",
            source,
            source_port,
            target,
            target_port
        );
        self.connections.push(conn);
        Ok(true)
    }

    /// Remove one wire; returns whether it existed
    pub fn disconnect(
        &mut self,
        source: &str,
        source_port: usize,
        target: &str,
        target_port: usize,
    ) -> bool {
        let conn = Connection::new(source, source_port, target, target_port);
        let before = self.connections.len();
        self.connections.retain(|c| *c != conn);
        before != self.connections.len()
    }

    /// Remove every wire touching `id`; returns how many were removed
    pub fn disconnect_all(&mut self, id: &str) -> usize {
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        before - self.connections.len()
    }

    /// Remove a node and all of its wires
    pub fn delete_node(&mut self, id: &str) -> Result<()> {
        let index = self.index_of(id)?;
        self.nodes.remove(index);
        let removed = self.disconnect_all(id);
        tracing::debug!("Deleted node {} and {} connections", id, removed);
        Ok(())
    }

    /// Reset to an empty graph with a fresh id counter
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.next_id = 0;
    }

    /// First wire leaving `id`, by insertion order
    pub fn outgoing_connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.source == id)
    }

    /// All wires leaving `id`, by insertion order
    pub fn outgoing_connections<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.source == id)
    }

    /// Look up a node
    pub fn node(&self, id: &str) -> Result<&Node> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::node_not_found(id))
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::node_not_found(id))
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| Error::node_not_found(id))
    }

    /// Whether a node with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Wires in insertion order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mutable access for restoring persisted state verbatim
    pub(crate) fn restore_node(
        &mut self,
        id: &str,
        label: String,
        properties: BTreeMap<String, String>,
        port_counts: PortCounts,
    ) -> Result<()> {
        let node = self.node_mut(id)?;
        node.label = label;
        node.properties = properties;
        node.port_counts = port_counts;
        Ok(())
    }

    /// Append a wire without validation
    pub(crate) fn restore_connection(&mut self, conn: Connection) {
        self.connections.push(conn);
    }
}
