//! Support library for the elusive CLI binary.
//!
//! Re-exports the CLI and CSV modules so doctests and integration tests can
//! exercise the command pipeline without forking a subprocess.

pub mod cli;
pub mod csv;
pub mod logging;
