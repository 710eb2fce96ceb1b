//! Bot script compiler
//!
//! Turns a flow graph into one Python script: the setup preamble, one handler
//! per event root with its chain of actions inlined, and the run call.

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use botwire_core::document::{self, LayoutDocument};
use botwire_core::graph::NODE_ID_PREFIX;
use botwire_core::{CodegenConfig, Graph, Node, Registry};

use crate::boilerplate::Boilerplate;
use crate::chain;
use crate::diagnostics::{self, Diagnostic};
use crate::error::Result;
use crate::template;

/// Template variable holding the generated handler name
pub const FUNC_NAME_VAR: &str = "func_name";

/// Options for the compiler
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Naming, command prefix and token settings
    pub settings: CodegenConfig,

    /// Emit a comment naming the source node above each inlined action
    pub debug: bool,
}

/// Graph → script compiler
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Create a new compiler with the given options
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Handler name for a root node (`node_3` → `cmd_3`, `greet-user` →
    /// `cmd_greet_user`).
    ///
    /// Distinct ids can map to the same name; [`Compiler::compile`] makes the
    /// names unique within one script.
    pub fn function_name(&self, id: &str) -> String {
        let stem: String = id
            .strip_prefix(NODE_ID_PREFIX)
            .filter(|rest| !rest.is_empty())
            .unwrap_or(id)
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("{}{}", self.options.settings.function_prefix, stem)
    }

    fn unique_function_name(&self, id: &str, used: &mut HashSet<String>) -> String {
        let base = self.function_name(id);
        let mut name = base.clone();
        let mut n = 2;
        while !used.insert(name.clone()) {
            name = format!("{}_{}", base, n);
            n += 1;
        }
        if name != base {
            tracing::debug!("Handler for {} renamed to {} to avoid a clash", id, name);
        }
        name
    }

    /// Compile a graph to script text.
    ///
    /// Output depends only on the graph contents, so compiling an unchanged
    /// graph twice yields byte-identical text.
    pub fn compile(&self, graph: &Graph, registry: &Registry) -> Result<CompiledBot> {
        let boilerplate = Boilerplate::render(&self.options.settings)?;
        let mut lines = boilerplate.preamble;

        let roots = chain::roots(graph, registry)?;
        let mut used = HashSet::new();
        for root in &roots {
            let func_name = self.unique_function_name(&root.id, &mut used);
            self.emit_chain(&mut lines, graph, registry, root, &func_name)?;
        }

        lines.push(boilerplate.closing);
        let source = lines.join("\n");

        let diagnostics = diagnostics::analyze(graph, registry)?;
        for diagnostic in &diagnostics {
            tracing::warn!("{}", diagnostic);
        }

        tracing::debug!("Compiled {} handlers", roots.len());
        Ok(CompiledBot {
            hash: content_hash(&source),
            source,
            handlers: roots.len(),
            diagnostics,
        })
    }

    fn emit_chain(
        &self,
        lines: &mut Vec<String>,
        graph: &Graph,
        registry: &Registry,
        root: &Node,
        func_name: &str,
    ) -> Result<()> {
        let def = registry.type_def(&root.type_name)?;

        match &def.code_start {
            Some(code_start) => lines.push(template::render(code_start, |key| {
                if key == FUNC_NAME_VAR {
                    Some(func_name)
                } else {
                    root.properties.get(key).map(String::as_str)
                }
            })),
            None => tracing::debug!("Event type '{}' has no header template", def.name),
        }

        let walked = chain::walk(graph, root)?;
        for node in &walked.steps {
            let step = registry.type_def(&node.type_name)?;
            if let Some(code) = &step.code {
                if self.options.debug {
                    lines.push(format!("    # {} ({})", node.id, node.label));
                }
                lines.push(template::render(code, |key| {
                    node.properties.get(key).map(String::as_str)
                }));
            }
        }

        lines.push(String::new());
        Ok(())
    }

    /// Compile a layout document file
    pub fn compile_layout(
        &self,
        path: impl AsRef<Path>,
        registry: &Registry,
    ) -> Result<CompiledBot> {
        let path = path.as_ref();
        tracing::info!("Compiling layout: {}", path.display());

        let doc = LayoutDocument::load(path)?;
        let mut graph = Graph::new();
        document::deserialize(&doc, &mut graph, registry)?;
        self.compile(&graph, registry)
    }

    /// Compile every `*.json` layout under a directory, in path order
    pub fn compile_all(
        &self,
        layouts_dir: impl AsRef<Path>,
        registry: &Registry,
    ) -> Result<Vec<(PathBuf, CompiledBot)>> {
        let mut results = Vec::new();

        for entry in walkdir::WalkDir::new(layouts_dir.as_ref())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        {
            let compiled = self.compile_layout(entry.path(), registry)?;
            results.push((entry.into_path(), compiled));
        }

        Ok(results)
    }
}

fn content_hash(source: &str) -> String {
    hex::encode(Sha256::digest(source.as_bytes()))
}

/// A compiled script
#[derive(Debug, Clone)]
pub struct CompiledBot {
    /// Script text
    pub source: String,

    /// SHA-256 of the script text, hex encoded
    pub hash: String,

    /// Number of event handlers emitted
    pub handlers: usize,

    /// Flow warnings found while compiling
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledBot {
    /// Write the script, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.source)?;
        Ok(())
    }

    /// Whether the file at `path` already holds exactly this script
    pub fn matches_file(&self, path: impl AsRef<Path>) -> bool {
        std::fs::read_to_string(path.as_ref())
            .map(|existing| content_hash(&existing) == self.hash)
            .unwrap_or(false)
    }

    /// First eight hex digits of the hash
    pub fn short_hash(&self) -> &str {
        &self.hash[..8]
    }

    /// Script size in bytes
    pub fn size(&self) -> usize {
        self.source.len()
    }
}
