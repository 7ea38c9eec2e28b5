//! Command-line interface orchestration for the elusive coassembly
//! clustering pipeline.
//!
//! The CLI offers a single `cluster` command that reads the `elusive_edges`
//! and `read_size` CSV tables, runs the clustering pipeline, and writes the
//! `elusive_clusters` table to a file or stdout.

mod commands;

pub use commands::{
    Cli, ClusterCommand, CliError, Command, ExecutionSummary, render_summary, run_cli,
};

#[cfg(test)]
mod tests;
