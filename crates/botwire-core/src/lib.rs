//! Botwire Core Library
//!
//! This crate provides the editing model behind Botwire:
//! - Node type catalog
//! - Flow graph store and its structural rules
//! - Viewport transform and port geometry
//! - Layout document persistence
//! - Project configuration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│    Graph    │────▶│  Document   │
//! │  (catalog)  │     │   (store)   │     │   (JSON)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  Geometry / │
//!                     │  Viewport   │
//!                     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use botwire_core::{Point, Registry, Session};
//!
//! let mut session = Session::new(Registry::builtin());
//! let cmd = session.add_node("Command", Point::new(200.0, 200.0), None)?;
//! let send = session.add_node("Send Message", Point::new(420.0, 200.0), None)?;
//! session.set_property(&send, "text", "Hi!")?;
//! assert!(session.connect(&cmd, 0, &send, 0)?);
//! # Ok::<(), botwire_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod registry;
pub mod session;
pub mod viewport;

pub use config::{CONFIG_FILE, CodegenConfig, Config, ProjectConfig};
pub use document::LayoutDocument;
pub use error::{Error, Result};
pub use geometry::{NodeGeometry, Point, Side};
pub use graph::{Connection, Graph, Node};
pub use registry::{NodeKind, NodeTypeDef, Registry};
pub use session::Session;
pub use viewport::Viewport;
