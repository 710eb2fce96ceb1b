//! Botwire CLI
//!
//! Developer tool for editing flow layouts and exporting bot scripts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Botwire - Visual bot logic editor
#[derive(Parser)]
#[command(name = "botwire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file or project directory
    #[arg(short, long, default_value = "botwire.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Botwire project
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Project name (defaults to directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List the node types available to the project
    Catalog,

    /// Show the nodes and wires of the layout
    Show,

    /// Edit nodes
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },

    /// Wire an output port to an input port
    Connect {
        /// Source node id
        source: String,

        /// Target node id
        target: String,

        /// Output port index on the source
        #[arg(long, default_value_t = 0)]
        from_port: usize,

        /// Input port index on the target
        #[arg(long, default_value_t = 0)]
        to_port: usize,
    },

    /// Remove one wire, or every wire of a node when no target is given
    Disconnect {
        /// Node id (source of the wire)
        source: String,

        /// Target node id
        target: Option<String>,

        /// Output port index on the source
        #[arg(long, default_value_t = 0)]
        from_port: usize,

        /// Input port index on the target
        #[arg(long, default_value_t = 0)]
        to_port: usize,
    },

    /// Remove every node and wire from the layout
    Clear,

    /// Load the layout and report flow warnings
    Validate,

    /// Compile the layout to a bot script
    Compile {
        /// Output path (defaults to the project's output setting)
        #[arg(short, long)]
        output: Option<String>,

        /// Annotate each emitted action with its source node
        #[arg(long)]
        debug: bool,

        /// Rewrite the script even if it is unchanged
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum NodeCommands {
    /// Add a node of the given type
    Add {
        /// Node type name
        type_name: String,

        /// Stage x coordinate
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,

        /// Stage y coordinate
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,

        /// Explicit node id
        #[arg(long)]
        id: Option<String>,
    },

    /// Move a node
    Move {
        /// Node id
        id: String,

        /// Stage x coordinate
        #[arg(allow_negative_numbers = true)]
        x: f64,

        /// Stage y coordinate
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Set a property value
    Set {
        /// Node id
        id: String,

        /// Property key
        key: String,

        /// New value
        value: String,
    },

    /// Change a node's label
    Rename {
        /// Node id
        id: String,

        /// New label (blank resets to the type name)
        label: String,
    },

    /// Delete a node and its wires
    Delete {
        /// Node id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Init { path, name } => {
            commands::init::run(&path, name.as_deref()).await?;
        }
        Commands::Catalog => {
            commands::catalog::run(&cli.config).await?;
        }
        Commands::Show => {
            commands::show::run(&cli.config).await?;
        }
        Commands::Node { command } => match command {
            NodeCommands::Add {
                type_name,
                x,
                y,
                id,
            } => {
                commands::node::add(&cli.config, &type_name, x, y, id.as_deref()).await?;
            }
            NodeCommands::Move { id, x, y } => {
                commands::node::move_to(&cli.config, &id, x, y).await?;
            }
            NodeCommands::Set { id, key, value } => {
                commands::node::set(&cli.config, &id, &key, &value).await?;
            }
            NodeCommands::Rename { id, label } => {
                commands::node::rename(&cli.config, &id, &label).await?;
            }
            NodeCommands::Delete { id } => {
                commands::node::delete(&cli.config, &id).await?;
            }
        },
        Commands::Connect {
            source,
            target,
            from_port,
            to_port,
        } => {
            commands::wire::connect(&cli.config, &source, from_port, &target, to_port).await?;
        }
        Commands::Disconnect {
            source,
            target,
            from_port,
            to_port,
        } => {
            commands::wire::disconnect(
                &cli.config,
                &source,
                from_port,
                target.as_deref(),
                to_port,
            )
            .await?;
        }
        Commands::Clear => {
            commands::wire::clear(&cli.config).await?;
        }
        Commands::Validate => {
            commands::validate::run(&cli.config).await?;
        }
        Commands::Compile {
            output,
            debug,
            force,
        } => {
            commands::compile::run(&cli.config, output.as_deref(), debug, force).await?;
        }
    }

    Ok(())
}
