//! Error types for botwire-core

use thiserror::Error;

use crate::geometry::Side;

/// Result type alias for botwire-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in botwire-core
#[derive(Error, Debug)]
pub enum Error {
    /// Node type is not part of the catalog
    #[error("unknown node type: '{type_name}'")]
    UnknownType {
        /// Requested type name
        type_name: String,
    },

    /// No node with the given id exists in the graph
    #[error("node not found: '{id}'")]
    NodeNotFound {
        /// Requested node id
        id: String,
    },

    /// An explicit id is already taken by a live node
    #[error("node id already in use: '{id}'")]
    DuplicateNode {
        /// Requested node id
        id: String,
    },

    /// The id counter cannot advance past the highest id in use
    #[error("no node ids left to allocate after '{last}'")]
    IdsExhausted {
        /// Last id the counter reached
        last: String,
    },

    /// Node has no property with the given key
    #[error("node '{node_id}' has no property '{key}'")]
    UnknownProperty {
        /// Node that was edited
        node_id: String,
        /// Property key that does not exist
        key: String,
    },

    /// Port index is past the node's port count on that side
    #[error("{side} port {index} is out of range for node '{node_id}' ({count} ports)")]
    PortOutOfRange {
        /// Node the port belongs to
        node_id: String,
        /// Input or output side
        side: Side,
        /// Requested port index
        index: usize,
        /// Number of ports on that side
        count: usize,
    },

    /// Layout document is missing fields or references things that do not exist
    #[error("corrupt layout document: {message}")]
    CorruptDocument {
        /// Description of what's wrong
        message: String,
    },

    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration or catalog
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptDocument {
            message: message.into(),
        }
    }
}
