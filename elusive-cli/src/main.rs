//! CLI entry point for executing the elusive coassembly clustering pipeline.
//!
//! Parses command-line arguments with clap, executes the clustering
//! pipeline, renders the resulting `elusive_clusters` table to a file or
//! stdout, and maps errors to appropriate exit codes. Logging is initialized
//! eagerly so subsequent operations can emit structured diagnostics via
//! `tracing`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use elusive_cli::{
    cli::{Cli, CliError, Command, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::error;

/// Parse CLI arguments, execute the command, render the summary to the
/// requested sink, and flush the output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let Command::Cluster(ref cluster) = cli.command;
    let output_path = cluster.output.clone();

    let summary = run_cli(cli).context("failed to execute command")?;

    match output_path {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create output file `{}`", path.display()))?;
            let mut writer = BufWriter::new(file);
            render_summary(&summary, &mut writer).context("failed to render summary")?;
            writer.flush().context("failed to flush output")?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            render_summary(&summary, &mut writer).context("failed to render summary")?;
            writer.flush().context("failed to flush output")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err
            .chain()
            .find_map(|cause| {
                // Downcast each cause so context layers do not obscure
                // `CliError` instances that carry a structured code.
                let cause: &(dyn std::error::Error + 'static) = cause;
                cause.downcast_ref::<CliError>().map(CliError::code)
            });

        error!(error = %err, code = ?code, "command execution failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Emit a fallback diagnostic to stderr when tracing initialization fails.
#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
