//! Flow chain traversal
//!
//! Each event root starts a chain that follows the first outgoing wire of
//! every node. Nodes with several outgoing wires only ever continue through
//! the first one (by insertion order). A walk stops at a node without outgoing
//! wires or when it would revisit a node, which bounds it by the graph size.
//!
//! The root itself starts outside the visited set, so a wire leading back into
//! the root emits it once as a step before the walk stops.

use std::collections::HashSet;

use botwire_core::{Graph, Node, Registry};

use crate::error::Result;

/// One root's walk through the graph
#[derive(Debug)]
pub struct Chain<'g> {
    /// The event root the walk started from
    pub root: &'g Node,
    /// Nodes reached after the root, in walk order
    pub steps: Vec<&'g Node>,
    /// Node the walk refused to revisit, if it was cut short by a cycle
    pub cycle_at: Option<&'g str>,
}

/// Event-root nodes in graph order
pub fn roots<'g>(graph: &'g Graph, registry: &Registry) -> Result<Vec<&'g Node>> {
    let mut roots = Vec::new();
    for node in graph.nodes() {
        if registry.type_def(&node.type_name)?.is_event_root() {
            roots.push(node);
        }
    }
    Ok(roots)
}

/// Walk the chain starting at `root`
pub fn walk<'g>(graph: &'g Graph, root: &'g Node) -> Result<Chain<'g>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut steps = Vec::new();
    let mut cycle_at = None;
    let mut current = root.id.as_str();

    while let Some(conn) = graph.outgoing_connection(current) {
        let target = conn.target.as_str();
        if !visited.insert(target) {
            cycle_at = Some(target);
            break;
        }
        steps.push(graph.node(target)?);
        current = target;
    }

    tracing::trace!("Chain from {} has {} steps", root.id, steps.len());
    Ok(Chain {
        root,
        steps,
        cycle_at,
    })
}
