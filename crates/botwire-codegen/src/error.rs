//! Error types for code generation

use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum Error {
    /// Graph, catalog or layout error
    #[error(transparent)]
    Core(#[from] botwire_core::Error),

    /// Boilerplate template failed to render
    #[error("invalid template: {0}")]
    InvalidTemplate(#[from] minijinja::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
