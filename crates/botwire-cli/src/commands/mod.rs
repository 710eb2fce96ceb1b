//! CLI command implementations

pub mod catalog;
pub mod compile;
pub mod init;
pub mod node;
pub mod project;
pub mod show;
pub mod validate;
pub mod wire;
