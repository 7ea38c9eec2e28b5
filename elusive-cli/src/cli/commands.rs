//! Command implementations and argument parsing for the elusive CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use elusive_core::{Cluster, ClusterConfigBuilder, ClusterError, EdgeRow, EdgeStyle, Weights};
use thiserror::Error;

use crate::csv;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "elusive", about = "Run the elusive coassembly clustering pipeline.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster samples into coassemblies from the `elusive_edges`/`read_size` tables.
    Cluster(ClusterCommand),
}

/// Options accepted by the `cluster` command.
#[derive(Debug, Args, Clone)]
pub struct ClusterCommand {
    /// Path to the `elusive_edges` CSV table.
    #[arg(long = "elusive-edges")]
    pub elusive_edges: PathBuf,

    /// Path to the `read_size` CSV table.
    #[arg(long = "read-size")]
    pub read_size: PathBuf,

    /// Output CSV path for `elusive_clusters`; defaults to stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Upper bound on the number of samples per coassembly.
    #[arg(long, default_value_t = 2)]
    pub max_coassembly_samples: usize,

    /// Lower bound on the number of samples per coassembly.
    #[arg(long, default_value_t = 2)]
    pub min_coassembly_samples: usize,

    /// Upper bound on the number of recovery samples per coassembly.
    #[arg(long, default_value_t = 20)]
    pub max_recovery_samples: usize,

    /// Optional upper bound on a coassembly's aggregate read size.
    #[arg(long)]
    pub max_coassembly_size: Option<u64>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input table or writing output.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A CSV row did not have the expected number of columns.
    #[error("{path}:{line}: expected {expected} column(s), found {actual}")]
    MalformedRow {
        /// Path of the offending file.
        path: PathBuf,
        /// One-based line number within the file.
        line: usize,
        /// Number of columns expected.
        expected: usize,
        /// Number of columns actually present.
        actual: usize,
    },
    /// A `cluster_size` or `read_size` column did not parse as an integer.
    #[error("{path}:{line}: column `{column}` is not a valid integer: `{value}`")]
    InvalidInteger {
        /// Path of the offending file.
        path: PathBuf,
        /// One-based line number within the file.
        line: usize,
        /// Name of the offending column.
        column: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },
    /// A `style` column held a token other than `match` or `pool`.
    #[error("{path}:{line}: unrecognised edge style `{value}`")]
    InvalidStyle {
        /// Path of the offending file.
        path: PathBuf,
        /// One-based line number within the file.
        line: usize,
        /// Raw value that failed to parse.
        value: String,
    },
    /// Core clustering failed.
    #[error(transparent)]
    Core(#[from] ClusterError),
}

impl CliError {
    /// Returns the stable error code for this error: a CLI-local code for
    /// I/O and parsing failures, or the core's own code when this wraps a
    /// [`ClusterError`].
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CLI_IO",
            Self::MalformedRow { .. } => "CLI_MALFORMED_ROW",
            Self::InvalidInteger { .. } => "CLI_INVALID_INTEGER",
            Self::InvalidStyle { .. } => "CLI_INVALID_STYLE",
            Self::Core(source) => source.code().as_str(),
        }
    }
}

/// Owned row of the `elusive_edges` table, read from CSV. `elusive_core::run`
/// borrows from this via [`EdgeRow`]; keeping the owned strings alive for the
/// duration of the call is the CLI's responsibility.
struct EdgeRowOwned {
    style: EdgeStyle,
    cluster_size: usize,
    samples: String,
    target_ids: String,
}

/// Summarises the outcome of executing the `cluster` command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Coassemblies selected by the clustering pipeline, in emission order.
    pub clusters: Vec<Cluster>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading the input tables or clustering fails.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Cluster(command) => run_cluster(command),
    }
}

pub(super) fn run_cluster(command: ClusterCommand) -> Result<ExecutionSummary, CliError> {
    let weights = read_weights(&command.read_size)?;
    let owned_rows = read_edge_rows(&command.elusive_edges)?;
    let rows: Vec<EdgeRow<'_>> = owned_rows
        .iter()
        .map(|row| EdgeRow {
            style: row.style,
            cluster_size: row.cluster_size,
            samples: &row.samples,
            target_ids: &row.target_ids,
        })
        .collect();

    let config = ClusterConfigBuilder::new()
        .with_max_coassembly_samples(command.max_coassembly_samples)
        .with_min_coassembly_samples(command.min_coassembly_samples)
        .with_max_recovery_samples(command.max_recovery_samples)
        .with_max_coassembly_size(command.max_coassembly_size);

    let clusters = elusive_core::run(&rows, weights, config)?;
    Ok(ExecutionSummary { clusters })
}

fn read_weights(path: &Path) -> Result<Weights, CliError> {
    let mut weights = Weights::new();
    for (line_number, line) in lines_of(path)?.enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.is_empty() {
            continue;
        }

        let fields = csv::parse_line(&line);
        if fields.len() != 2 {
            return Err(CliError::MalformedRow {
                path: path.to_path_buf(),
                line: line_number + 1,
                expected: 2,
                actual: fields.len(),
            });
        }

        let read_size: u64 =
            fields[1]
                .trim()
                .parse()
                .map_err(|_err| CliError::InvalidInteger {
                    path: path.to_path_buf(),
                    line: line_number + 1,
                    column: "read_size",
                    value: fields[1].clone(),
                })?;
        weights.insert(fields[0].clone(), read_size);
    }
    Ok(weights)
}

fn read_edge_rows(path: &Path) -> Result<Vec<EdgeRowOwned>, CliError> {
    let mut rows = Vec::new();
    for (line_number, line) in lines_of(path)?.enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.is_empty() {
            continue;
        }

        let fields = csv::parse_line(&line);
        if fields.len() != 4 {
            return Err(CliError::MalformedRow {
                path: path.to_path_buf(),
                line: line_number + 1,
                expected: 4,
                actual: fields.len(),
            });
        }

        let style = EdgeStyle::parse(fields[0].trim()).ok_or_else(|| CliError::InvalidStyle {
            path: path.to_path_buf(),
            line: line_number + 1,
            value: fields[0].clone(),
        })?;
        let cluster_size: usize =
            fields[1]
                .trim()
                .parse()
                .map_err(|_err| CliError::InvalidInteger {
                    path: path.to_path_buf(),
                    line: line_number + 1,
                    column: "cluster_size",
                    value: fields[1].clone(),
                })?;

        rows.push(EdgeRowOwned {
            style,
            cluster_size,
            samples: fields[2].clone(),
            target_ids: fields[3].clone(),
        });
    }
    Ok(rows)
}

fn lines_of(path: &Path) -> Result<impl Iterator<Item = io::Result<String>>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file).lines())
}

/// Renders `summary` to `writer` as the `elusive_clusters` CSV table.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let mut line = String::new();
    for cluster in &summary.clusters {
        line.clear();
        let length = cluster.length().to_string();
        let total_targets = cluster.total_targets().to_string();
        let total_size = cluster.total_size().to_string();
        let samples = cluster.samples_joined();
        let recover_samples = cluster.recover_samples_joined();
        csv::write_row(
            &mut line,
            &[
                &samples,
                &length,
                &total_targets,
                &total_size,
                &recover_samples,
                cluster.coassembly(),
            ],
        )
        .map_err(|_err| io::Error::other("failed to format cluster row"))?;
        writer.write_all(line.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_summary_writes_comma_joined_rows() {
        let summary = ExecutionSummary {
            clusters: vec![Cluster::new(
                vec!["a".to_owned(), "b".to_owned()],
                3,
                10,
                vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
                0,
            )],
        };
        let mut buffer = Vec::new();
        render_summary(&summary, &mut buffer).expect("render succeeds");
        let text = String::from_utf8(buffer).expect("utf8 output");
        assert_eq!(text, "\"a,b\",2,3,10,\"a,b,c\",coassembly_0\n");
    }

    #[test]
    fn read_weights_rejects_malformed_row() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("read_size.csv");
        std::fs::write(&path, "sample_1,1000,extra\n").expect("write fixture");
        let err = read_weights(&path).expect_err("extra column must fail");
        assert!(matches!(err, CliError::MalformedRow { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn read_edge_rows_rejects_unknown_style() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("elusive_edges.csv");
        std::fs::write(&path, "bogus,2,\"a,b\",t\n").expect("write fixture");
        let err = read_edge_rows(&path).expect_err("unknown style must fail");
        assert!(matches!(err, CliError::InvalidStyle { .. }));
    }
}
