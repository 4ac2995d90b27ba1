//! JIT Trace Studio CLI
//!
//! Visualizes V8 JIT optimization and deoptimization events for a given
//! script: runs the traced process, ingests the log into an event graph,
//! and serves the interactive visualization.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use jit_trace_studio::commands::{
    execute_ingest, execute_run, execute_serve, IngestArgs, RunArgs, ServeArgs,
};
use jit_trace_studio::utils::config::{
    DEFAULT_LOG_FILE, DEFAULT_PORT, DEFAULT_RUNTIME, SCHEMA_VERSION,
};

/// JIT Trace Studio - Visualize V8 JIT optimizations over time
#[derive(Parser, Debug)]
#[command(name = "jit-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Trace a script, build the event graph, optionally serve it
    Run {
        /// The JavaScript file to profile
        file: PathBuf,

        /// Runtime binary used to execute the script
        #[arg(long, default_value = DEFAULT_RUNTIME)]
        runtime: String,

        /// Trace log file written by the runtime
        #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
        log: PathBuf,

        /// Output path for the graph document JSON
        #[arg(short, long, default_value = "graph.json")]
        output: PathBuf,

        /// Start the visualization server after ingesting
        #[arg(long)]
        serve: bool,

        /// Port for the visualization server
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Build the event graph from an existing trace log
    Ingest {
        /// Path to the raw trace log
        #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
        input: PathBuf,

        /// Output path for the graph document JSON
        #[arg(short, long, default_value = "graph.json")]
        output: PathBuf,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Serve the visualization for an existing trace log
    Serve {
        /// Trace log file to serve
        #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
        log: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Validate a graph document JSON file
    Validate {
        /// Path to graph document JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Run {
            file,
            runtime,
            log,
            output,
            serve,
            port,
        } => {
            execute_run(RunArgs {
                script: file,
                runtime,
                log_file: log,
                output,
                serve,
                port,
            })?;
        }

        Commands::Ingest {
            input,
            output,
            summary,
        } => {
            execute_ingest(IngestArgs {
                input,
                output,
                print_summary: summary,
            })?;
        }

        Commands::Serve { log, port } => {
            execute_serve(ServeArgs {
                log_file: log,
                port,
            })?;
        }

        Commands::Validate { file } => {
            validate_graph_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a graph document JSON file
///
/// **Private** - internal command implementation
fn validate_graph_file(file_path: PathBuf) -> Result<()> {
    use jit_trace_studio::output::read_graph;

    println!("Validating graph document: {}", file_path.display());

    let document = read_graph(&file_path)?;

    println!("✓ Valid graph document JSON");
    println!("  Version:   {}", document.version);
    println!("  Source:    {}", document.source);
    println!("  Functions: {}", document.graph.anchor_count());
    println!("  Nodes:     {}", document.graph.nodes.len());
    println!("  Edges:     {}", document.graph.edges.len());

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("JIT Trace Studio Graph Document Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string       - Schema version (e.g., '1.0.0')");
        println!("  source: string        - Trace log the graph was built from");
        println!("  graph: object         - The event graph");
        println!("    nodes: array        - Ordered event and anchor nodes");
        println!("      id: number        - Unique, strictly increasing");
        println!("      label: string     - Kind-specific display text");
        println!("      color: string     - Fixed palette by event kind");
        println!("      x, y: number      - Lane layout position");
        println!("      fixed: bool|object - Pinning (anchors fully locked)");
        println!("    edges: array        - Chronological linkage");
        println!("      from, to: number  - Node ids");
        println!("      dashes: bool      - true marks global chronology");
        println!("  generated_at: string  - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("JIT Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Graph Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Visualizes V8 JIT optimization and deoptimization events.");
}
