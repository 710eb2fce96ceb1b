//! Viewport transform
//!
//! Maps client (screen) coordinates to stage (graph) coordinates under pan,
//! scroll and zoom:
//!
//! ```text
//! stage = (client - origin + scroll) / scale
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Smallest allowed zoom
pub const MIN_SCALE: f64 = 0.5;

/// Largest allowed zoom
pub const MAX_SCALE: f64 = 2.0;

/// Presentation state of the canvas; never part of the layout document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    scale: f64,
    scroll: Point,
    origin: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            scroll: Point::default(),
            origin: Point::default(),
        }
    }
}

impl Viewport {
    /// Viewport whose stage starts at `origin` in client coordinates
    pub fn with_origin(origin: Point) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// Current zoom factor
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current scroll offset in scaled stage units
    pub fn scroll(&self) -> Point {
        self.scroll
    }

    /// Client position of the stage's top-left corner
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Move the stage within the client area (e.g. after a window resize)
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Client point → stage point
    pub fn to_stage(&self, client: Point) -> Point {
        (client - self.origin + self.scroll) / self.scale
    }

    /// Stage point → client point
    pub fn to_client(&self, stage: Point) -> Point {
        stage * self.scale - self.scroll + self.origin
    }

    /// Scroll by a client-space delta
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.scroll = self.scroll + Point::new(dx, dy);
    }

    /// Multiply the zoom by `factor`, keeping the stage point under `anchor` fixed
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.set_scale_at(anchor, self.scale * factor);
    }

    /// Set an absolute zoom, keeping the stage point under `anchor` fixed.
    ///
    /// The scale is clamped to [`MIN_SCALE`, `MAX_SCALE`]; non-finite values
    /// are ignored.
    pub fn set_scale_at(&mut self, anchor: Point, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        let stage = self.to_stage(anchor);
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.scroll = stage * self.scale - (anchor - self.origin);
        tracing::trace!("Zoom {:.3} at ({}, {})", self.scale, anchor.x, anchor.y);
    }
}
