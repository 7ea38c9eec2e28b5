//! Integration-style unit tests for the `cluster` command end to end.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use super::commands::run_cluster;
use super::{Cli, ClusterCommand, CliError, Command, ExecutionSummary, render_summary, run_cli};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
fn two_edge_chain_yields_single_coassembly() -> TestResult {
    let dir = temp_dir();
    let edges = write_file(
        &dir,
        "elusive_edges.csv",
        "match,2,\"sample_2,sample_1\",\"0,1,2\"\n\
         match,2,\"sample_1,sample_3\",\"1,2\"\n",
    )?;
    let weights = write_file(
        &dir,
        "read_size.csv",
        "sample_1,1000\nsample_2,2000\nsample_3,3000\n",
    )?;

    let cli = Cli {
        command: Command::Cluster(ClusterCommand {
            elusive_edges: edges,
            read_size: weights,
            output: None,
            max_coassembly_samples: 2,
            min_coassembly_samples: 2,
            max_recovery_samples: 20,
            max_coassembly_size: None,
        }),
    };
    let summary = run_cli(cli)?;
    assert_eq!(summary.clusters.len(), 1);
    let cluster = summary.clusters.first().expect("one cluster");
    assert_eq!(cluster.samples_joined(), "sample_1,sample_2");
    assert_eq!(cluster.total_targets(), 3);
    assert_eq!(cluster.coassembly(), "coassembly_0");
    Ok(())
}

#[rstest]
fn run_rejects_unknown_sample() -> TestResult {
    let dir = temp_dir();
    let edges = write_file(&dir, "elusive_edges.csv", "match,2,\"a,b\",t\n")?;
    let weights = write_file(&dir, "read_size.csv", "a,10\n")?;

    let cli = Cli {
        command: Command::Cluster(ClusterCommand {
            elusive_edges: edges,
            read_size: weights,
            output: None,
            max_coassembly_samples: 2,
            min_coassembly_samples: 2,
            max_recovery_samples: 20,
            max_coassembly_size: None,
        }),
    };
    let err = run_cli_expecting_error(cli, "unknown sample must fail");
    assert!(matches!(err, CliError::Core(_)));
    Ok(())
}

#[rstest]
fn run_rejects_malformed_style() -> TestResult {
    let dir = temp_dir();
    let edges = write_file(&dir, "elusive_edges.csv", "bogus,2,\"a,b\",t\n")?;
    let weights = write_file(&dir, "read_size.csv", "a,10\nb,10\n")?;

    let command = ClusterCommand {
        elusive_edges: edges,
        read_size: weights,
        output: None,
        max_coassembly_samples: 2,
        min_coassembly_samples: 2,
        max_recovery_samples: 20,
        max_coassembly_size: None,
    };
    let err = run_command_expecting_error(command, "unrecognised style must fail");
    assert!(matches!(err, CliError::InvalidStyle { .. }));
    Ok(())
}

#[rstest]
fn render_summary_renders_empty_output() -> TestResult {
    let summary = ExecutionSummary { clusters: vec![] };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert!(buffer.is_empty());
    Ok(())
}

#[rstest]
fn clap_requires_both_input_paths() {
    let args = ["elusive", "cluster", "--elusive-edges", "edges.csv"];
    let result = Cli::try_parse_from(args);
    assert!(result.is_err());
}

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Run CLI and expect an error, panicking with the given message if successful.
fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

/// Run the `cluster` command and expect an error, panicking if successful.
fn run_command_expecting_error(command: ClusterCommand, panic_msg: &str) -> CliError {
    match run_cluster(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
