//! Editing session
//!
//! A [`Session`] owns everything one editor needs: the node catalog, the live
//! graph, the viewport and the canvas geometry. Hosts keep one per open
//! layout and route every command through it, so independent sessions never
//! share state.

use crate::config::Config;
use crate::document::{self, LayoutDocument};
use crate::error::Result;
use crate::geometry::{NodeGeometry, Point, PortHit, Side, WireCurve};
use crate::graph::Graph;
use crate::registry::Registry;
use crate::viewport::Viewport;

/// Explicitly owned editor state
#[derive(Debug, Clone)]
pub struct Session {
    registry: Registry,
    graph: Graph,
    viewport: Viewport,
    geometry: NodeGeometry,
}

impl Session {
    /// Empty session over a catalog
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            graph: Graph::new(),
            viewport: Viewport::default(),
            geometry: NodeGeometry::default(),
        }
    }

    /// Empty session using the project's catalog and canvas settings
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.registry()?).with_geometry(config.project.canvas))
    }

    /// Override the canvas geometry
    pub fn with_geometry(mut self, geometry: NodeGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Node catalog
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Live graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Current viewport
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport, for hosts that track the stage origin
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Canvas geometry
    pub fn geometry(&self) -> &NodeGeometry {
        &self.geometry
    }

    /// Add a node at a stage position
    pub fn add_node(
        &mut self,
        type_name: &str,
        position: Point,
        explicit_id: Option<&str>,
    ) -> Result<String> {
        self.graph
            .add_node(&self.registry, type_name, position, explicit_id)
    }

    /// Add a node at a client position (e.g. where a palette item was dropped)
    pub fn add_node_at_client(&mut self, type_name: &str, client: Point) -> Result<String> {
        let position = self.viewport.to_stage(client);
        self.add_node(type_name, position, None)
    }

    /// Move a node
    pub fn move_node(&mut self, id: &str, position: Point) -> Result<()> {
        self.graph.move_node(id, position)
    }

    /// Edit a property
    pub fn set_property(&mut self, id: &str, key: &str, value: impl Into<String>) -> Result<()> {
        self.graph.set_property(id, key, value)
    }

    /// Rename a node
    pub fn rename_node(&mut self, id: &str, label: &str) -> Result<()> {
        self.graph.rename_node(id, label)
    }

    /// Wire two ports
    pub fn connect(
        &mut self,
        source: &str,
        source_port: usize,
        target: &str,
        target_port: usize,
    ) -> Result<bool> {
        self.graph.connect(source, source_port, target, target_port)
    }

    /// Finish a wire-drag gesture: connect `source`'s output port to whichever
    /// input port lies within `radius` of the client drop point.
    ///
    /// Returns `Ok(false)` when nothing is under the pointer.
    pub fn connect_at_client(
        &mut self,
        source: &str,
        source_port: usize,
        drop: Point,
        radius: f64,
    ) -> Result<bool> {
        let stage = self.viewport.to_stage(drop);
        match self.hit_test(stage, Side::Input, radius) {
            Some(hit) => self
                .graph
                .connect(source, source_port, &hit.node_id, hit.index),
            None => Ok(false),
        }
    }

    /// Remove one wire
    pub fn disconnect(
        &mut self,
        source: &str,
        source_port: usize,
        target: &str,
        target_port: usize,
    ) -> bool {
        self.graph
            .disconnect(source, source_port, target, target_port)
    }

    /// Remove every wire touching a node
    pub fn disconnect_all(&mut self, id: &str) -> usize {
        self.graph.disconnect_all(id)
    }

    /// Delete a node and its wires
    pub fn delete_node(&mut self, id: &str) -> Result<()> {
        self.graph.delete_node(id)
    }

    /// Reset the graph
    pub fn clear(&mut self) {
        self.graph.clear();
    }

    /// Snapshot the graph
    pub fn serialize(&self) -> LayoutDocument {
        document::serialize(&self.graph)
    }

    /// Replace the graph with a document
    pub fn deserialize(&mut self, document: &LayoutDocument) -> Result<()> {
        document::deserialize(document, &mut self.graph, &self.registry)
    }

    /// Scroll the canvas
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
    }

    /// Zoom around a client point
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.viewport.zoom_at(anchor, factor);
    }

    /// Client point → stage point
    pub fn to_stage(&self, client: Point) -> Point {
        self.viewport.to_stage(client)
    }

    /// Stage anchor of a port
    pub fn port_anchor(&self, id: &str, side: Side, index: usize) -> Result<Point> {
        self.geometry.port_anchor(&self.graph, id, side, index)
    }

    /// Nearest port around a stage point
    pub fn hit_test(&self, stage: Point, side: Side, radius: f64) -> Option<PortHit> {
        self.geometry.hit_test(&self.graph, stage, side, radius)
    }

    /// Drawing curves for every wire, in wire order
    pub fn wire_curves(&self) -> Result<Vec<WireCurve>> {
        self.graph
            .connections()
            .iter()
            .map(|c| self.geometry.wire_curve(&self.graph, c))
            .collect()
    }
}
