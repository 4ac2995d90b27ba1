//! JIT Trace Studio
//!
//! Trace ingestion and graph visualization for V8 JIT
//! optimization and deoptimization logs.
//!
//! This crate provides the core implementation for the
//! `jit-trace` CLI tool: it recognizes event records in two
//! trace formats, classifies them into semantic events, lays
//! them out one lane per function, and emits a node/edge graph
//! for interactive rendering.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install jit-trace-studio
//! jit-trace --help
//! ```

pub mod commands;
pub mod graph;
pub mod ingest;
pub mod output;
pub mod parser;
pub mod runner;
pub mod server;
pub mod utils;
