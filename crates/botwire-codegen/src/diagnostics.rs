//! Flow diagnostics
//!
//! Warnings about graph shapes that compile but probably do not do what the
//! author meant. They never block code generation.

use std::collections::HashSet;
use std::fmt;

use botwire_core::{Graph, Registry};

use crate::chain;
use crate::compiler::FUNC_NAME_VAR;
use crate::error::Result;
use crate::template;

/// A warning about the flow structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A node has several outgoing wires; only the first is compiled
    FanOut {
        /// Node with the extra wires
        node_id: String,
        /// Number of outgoing wires
        wires: usize,
        /// Target of the wire that is followed
        followed: String,
    },

    /// A root's chain loops back on itself and was cut short
    CycleTruncated {
        /// Root whose chain was truncated
        root_id: String,
        /// Node that would have been emitted twice
        at: String,
    },

    /// A node is not on any root's chain and produces no code
    Unreachable {
        /// The unreachable node
        node_id: String,
    },

    /// A template placeholder has no matching property and renders empty
    MissingProperty {
        /// Node whose template references the key
        node_id: String,
        /// Placeholder key
        key: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FanOut {
                node_id,
                wires,
                followed,
            } => write!(
                f,
                "node '{}' has {} outgoing wires; only the wire to '{}' is compiled",
                node_id, wires, followed
            ),
            Diagnostic::CycleTruncated { root_id, at } => write!(
                f,
                "chain from '{}' loops back to '{}' and stops there",
                root_id, at
            ),
            Diagnostic::Unreachable { node_id } => {
                write!(f, "node '{}' is not reachable from any event", node_id)
            }
            Diagnostic::MissingProperty { node_id, key } => write!(
                f,
                "node '{}' has no property '{}'; the placeholder renders empty",
                node_id, key
            ),
        }
    }
}

/// Inspect a graph for fan-out, cycles, unreachable nodes and placeholders
/// without a property.
///
/// Diagnostics are ordered by kind, then by graph order.
pub fn analyze(graph: &Graph, registry: &Registry) -> Result<Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();

    for node in graph.nodes() {
        let wires = graph.outgoing_connections(&node.id).count();
        if wires > 1
            && let Some(first) = graph.outgoing_connection(&node.id)
        {
            diagnostics.push(Diagnostic::FanOut {
                node_id: node.id.clone(),
                wires,
                followed: first.target.clone(),
            });
        }
    }

    let mut reached: HashSet<&str> = HashSet::new();
    for root in chain::roots(graph, registry)? {
        let walked = chain::walk(graph, root)?;
        reached.insert(root.id.as_str());
        reached.extend(walked.steps.iter().map(|n| n.id.as_str()));
        if let Some(at) = walked.cycle_at {
            diagnostics.push(Diagnostic::CycleTruncated {
                root_id: root.id.clone(),
                at: at.to_string(),
            });
        }
    }

    for node in graph.nodes() {
        if !reached.contains(node.id.as_str()) {
            diagnostics.push(Diagnostic::Unreachable {
                node_id: node.id.clone(),
            });
        }
    }

    for node in graph.nodes() {
        let def = registry.type_def(&node.type_name)?;
        let mut keys = Vec::new();
        for source in [&def.code_start, &def.code].into_iter().flatten() {
            for key in template::placeholders(source) {
                if key != FUNC_NAME_VAR
                    && !node.properties.contains_key(key)
                    && !keys.contains(&key)
                {
                    keys.push(key);
                }
            }
        }
        diagnostics.extend(keys.into_iter().map(|key| Diagnostic::MissingProperty {
            node_id: node.id.clone(),
            key: key.to_string(),
        }));
    }

    Ok(diagnostics)
}
