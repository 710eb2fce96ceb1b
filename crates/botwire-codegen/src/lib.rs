//! Botwire Code Generation
//!
//! This crate turns a flow graph into a chat-bot script.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌─────────┐     ┌─────────┐     ┌─────────┐     ┌─────────┐
//! │ Layout  │────▶│  Graph  │────▶│ Chains  │────▶│ Script  │
//! │ (JSON)  │     │ (Load)  │     │ (Walk)  │     │ (Emit)  │
//! └─────────┘     └─────────┘     └─────────┘     └─────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use botwire_codegen::{CompileOptions, Compiler};
//! use botwire_core::{Point, Registry, Session};
//!
//! let mut session = Session::new(Registry::builtin());
//! let cmd = session.add_node("Command", Point::new(0.0, 0.0), None)?;
//! let send = session.add_node("Send Message", Point::new(200.0, 0.0), None)?;
//! session.connect(&cmd, 0, &send, 0)?;
//!
//! let compiler = Compiler::new(CompileOptions::default());
//! let compiled = compiler.compile(session.graph(), session.registry())?;
//! assert!(compiled.source.contains("async def cmd_0(ctx):"));
//! # Ok::<(), botwire_codegen::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod boilerplate;
pub mod chain;
pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod template;

pub use compiler::{CompileOptions, CompiledBot, Compiler};
pub use diagnostics::Diagnostic;
pub use error::{Error, Result};
