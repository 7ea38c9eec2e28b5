//! Coassembly clustering core.
//!
//! A greedy, bounded set-cover search over a hypergraph of sample groups
//! ("edges") and the targets they share: decides which samples should be
//! jointly assembled and which additional samples should be pulled in to
//! recover genomes from each assembly. See [`pipeline::run`] for the single
//! entry point; everything else in this crate is a building block it
//! composes.
//!
//! The core never touches the filesystem, never spawns subprocesses, and
//! never schedules cross-machine work; CSV I/O and process orchestration
//! live in the `elusive-cli` binary.

mod candidate;
mod component;
mod config;
mod edge;
mod error;
mod pipeline;
mod result;
mod sample;
mod select;

pub use crate::{
    config::{ClusterConfig, ClusterConfigBuilder},
    edge::{Edge, EdgeRow, EdgeStyle},
    error::{ClusterError, ClusterErrorCode, Result},
    pipeline::run,
    result::Cluster,
    sample::{SampleId, Weights},
};
