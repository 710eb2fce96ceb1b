//! Canvas geometry
//!
//! Port anchors are derived from a node's stored position and the configured
//! node size, so wire endpoints and drop targets can be computed without a
//! rendering surface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::error::{Error, Result};
use crate::graph::{Connection, Graph, Node};

/// A point in client or stage coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned rectangle in stage coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl Rect {
    /// Whether the point lies inside (edges inclusive)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Which side of a node a port sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left edge, wires arrive here
    Input,
    /// Right edge, wires leave here
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Input => f.write_str("input"),
            Side::Output => f.write_str("output"),
        }
    }
}

/// Anchor of port `index` out of `total` on one side of `rect`.
///
/// Ports are spaced evenly and never sit on the top or bottom edge.
pub fn port_anchor(rect: Rect, side: Side, index: usize, total: usize, gap: f64) -> Point {
    let x = match side {
        Side::Output => rect.x + rect.w + gap,
        Side::Input => rect.x - gap,
    };
    let y = rect.y + rect.h * (index as f64 + 1.0) / (total as f64 + 1.0);
    Point::new(x, y)
}

/// Node size and port offset used for all geometry queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    /// Node width in stage units
    #[serde(default = "default_node_width")]
    pub node_width: f64,

    /// Node height in stage units
    #[serde(default = "default_node_height")]
    pub node_height: f64,

    /// Distance between the node edge and its port anchors
    #[serde(default = "default_port_gap")]
    pub port_gap: f64,
}

fn default_node_width() -> f64 {
    140.0
}

fn default_node_height() -> f64 {
    60.0
}

fn default_port_gap() -> f64 {
    6.0
}

impl Default for NodeGeometry {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            port_gap: default_port_gap(),
        }
    }
}

/// A port located by [`NodeGeometry::hit_test`]
#[derive(Debug, Clone, PartialEq)]
pub struct PortHit {
    /// Node owning the port
    pub node_id: String,
    /// Port side
    pub side: Side,
    /// Port index on that side
    pub index: usize,
    /// Anchor of the port
    pub anchor: Point,
}

/// Cubic Bézier control points for drawing a wire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireCurve {
    /// Output port anchor
    pub start: Point,
    /// First control point
    pub control1: Point,
    /// Second control point
    pub control2: Point,
    /// Input port anchor
    pub end: Point,
}

/// Horizontal pull of wire control points is capped at this many stage units
const MAX_WIRE_PULL: f64 = 100.0;

impl WireCurve {
    /// Curve between two anchors, pulled horizontally towards each other
    pub fn between(start: Point, end: Point) -> Self {
        let pull = ((end.x - start.x).abs() / 2.0).min(MAX_WIRE_PULL);
        Self {
            start,
            control1: Point::new(start.x + pull, start.y),
            control2: Point::new(end.x - pull, end.y),
            end,
        }
    }
}

impl NodeGeometry {
    /// Stage rectangle occupied by a node
    pub fn node_rect(&self, node: &Node) -> Rect {
        Rect {
            x: node.position.x,
            y: node.position.y,
            w: self.node_width,
            h: self.node_height,
        }
    }

    /// Anchor of one of a node's ports
    pub fn port_anchor(&self, graph: &Graph, id: &str, side: Side, index: usize) -> Result<Point> {
        let node = graph.node(id)?;
        let total = node.port_counts.on(side);
        if index >= total {
            return Err(Error::PortOutOfRange {
                node_id: id.to_string(),
                side,
                index,
                count: total,
            });
        }
        Ok(port_anchor(
            self.node_rect(node),
            side,
            index,
            total,
            self.port_gap,
        ))
    }

    /// Both endpoints of a connection
    pub fn connection_endpoints(&self, graph: &Graph, conn: &Connection) -> Result<(Point, Point)> {
        let start = self.port_anchor(graph, &conn.source, Side::Output, conn.source_port)?;
        let end = self.port_anchor(graph, &conn.target, Side::Input, conn.target_port)?;
        Ok((start, end))
    }

    /// Drawing curve for a connection
    pub fn wire_curve(&self, graph: &Graph, conn: &Connection) -> Result<WireCurve> {
        let (start, end) = self.connection_endpoints(graph, conn)?;
        Ok(WireCurve::between(start, end))
    }

    /// Nearest port on `side` whose anchor is within `radius` of `point`.
    ///
    /// Ties go to the node added first.
    pub fn hit_test(&self, graph: &Graph, point: Point, side: Side, radius: f64) -> Option<PortHit> {
        let mut best: Option<(f64, PortHit)> = None;
        for node in graph.nodes() {
            let rect = self.node_rect(node);
            let total = node.port_counts.on(side);
            for index in 0..total {
                let anchor = port_anchor(rect, side, index, total, self.port_gap);
                let distance = anchor.distance(point);
                if distance > radius {
                    continue;
                }
                if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                    best = Some((
                        distance,
                        PortHit {
                            node_id: node.id.clone(),
                            side,
                            index,
                            anchor,
                        },
                    ));
                }
            }
        }
        best.map(|(_, hit)| hit)
    }

    /// Topmost node whose body contains `point` (last added wins)
    pub fn node_at<'a>(&self, graph: &'a Graph, point: Point) -> Option<&'a Node> {
        graph
            .nodes()
            .rev()
            .find(|node| self.node_rect(node).contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use rstest::rstest;

    const RECT: Rect = Rect {
        x: 100.0,
        y: 50.0,
        w: 140.0,
        h: 60.0,
    };

    #[rstest]
    #[case(Side::Output, 0, 1, Point::new(246.0, 80.0))]
    #[case(Side::Input, 0, 1, Point::new(94.0, 80.0))]
    #[case(Side::Output, 0, 2, Point::new(246.0, 70.0))]
    #[case(Side::Output, 1, 2, Point::new(246.0, 90.0))]
    #[case(Side::Input, 2, 3, Point::new(94.0, 95.0))]
    fn test_port_anchor(
        #[case] side: Side,
        #[case] index: usize,
        #[case] total: usize,
        #[case] expected: Point,
    ) {
        assert_eq!(port_anchor(RECT, side, index, total, 6.0), expected);
    }

    #[test]
    fn test_ports_never_on_edges() {
        for total in 1..6 {
            for index in 0..total {
                let p = port_anchor(RECT, Side::Input, index, total, 0.0);
                assert!(p.y > RECT.y && p.y < RECT.y + RECT.h);
            }
        }
    }

    #[test]
    fn test_resolver_uses_node_position() {
        let registry = Registry::builtin();
        let mut graph = Graph::new();
        let id = graph
            .add_node(&registry, "Send Message", Point::new(10.0, 20.0), None)
            .unwrap();
        let geometry = NodeGeometry::default();

        let out = geometry.port_anchor(&graph, &id, Side::Output, 0).unwrap();
        assert_eq!(out, Point::new(156.0, 50.0));

        graph.move_node(&id, Point::new(0.0, 0.0)).unwrap();
        let input = geometry.port_anchor(&graph, &id, Side::Input, 0).unwrap();
        assert_eq!(input, Point::new(-6.0, 30.0));
    }

    #[test]
    fn test_resolver_port_out_of_range() {
        let registry = Registry::builtin();
        let mut graph = Graph::new();
        let id = graph
            .add_node(&registry, "Command", Point::default(), None)
            .unwrap();
        let geometry = NodeGeometry::default();

        let err = geometry
            .port_anchor(&graph, &id, Side::Input, 0)
            .unwrap_err();
        assert!(matches!(err, Error::PortOutOfRange { count: 0, .. }));
    }

    #[test]
    fn test_hit_test_finds_nearest_input() {
        let registry = Registry::builtin();
        let mut graph = Graph::new();
        graph
            .add_node(&registry, "Send Message", Point::new(0.0, 0.0), None)
            .unwrap();
        let far = graph
            .add_node(&registry, "Print Console", Point::new(300.0, 0.0), None)
            .unwrap();
        let geometry = NodeGeometry::default();

        let hit = geometry
            .hit_test(&graph, Point::new(292.0, 31.0), Side::Input, 8.0)
            .unwrap();
        assert_eq!(hit.node_id, far);
        assert_eq!(hit.index, 0);
        assert_eq!(hit.anchor, Point::new(294.0, 30.0));

        assert!(
            geometry
                .hit_test(&graph, Point::new(200.0, 200.0), Side::Input, 8.0)
                .is_none()
        );
    }

    #[test]
    fn test_wire_curve_pull_is_capped() {
        let near = WireCurve::between(Point::new(0.0, 0.0), Point::new(60.0, 40.0));
        assert_eq!(near.control1, Point::new(30.0, 0.0));
        assert_eq!(near.control2, Point::new(30.0, 40.0));

        let far = WireCurve::between(Point::new(0.0, 0.0), Point::new(500.0, 0.0));
        assert_eq!(far.control1, Point::new(100.0, 0.0));
        assert_eq!(far.control2, Point::new(400.0, 0.0));
    }

    #[test]
    fn test_node_at_prefers_topmost() {
        let registry = Registry::builtin();
        let mut graph = Graph::new();
        graph
            .add_node(&registry, "Send Message", Point::new(0.0, 0.0), None)
            .unwrap();
        let top = graph
            .add_node(&registry, "Send Message", Point::new(20.0, 20.0), None)
            .unwrap();
        let geometry = NodeGeometry::default();

        let node = geometry.node_at(&graph, Point::new(30.0, 30.0)).unwrap();
        assert_eq!(node.id, top);
        assert!(geometry.node_at(&graph, Point::new(500.0, 500.0)).is_none());
    }
}
