//! Error types for the coassembly clustering core.
//!
//! Defines the error enum exposed by the public API, a stable string code per
//! variant, and a convenient result alias, mirroring the split the teacher
//! uses between an error and its machine-readable code.

use std::fmt;

use thiserror::Error;

use crate::edge::EdgeStyle;

/// Stable codes describing [`ClusterError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ClusterErrorCode {
    /// `min_coassembly_samples` was zero.
    ZeroMinCoassemblySamples,
    /// `max_coassembly_samples` was zero.
    ZeroMaxCoassemblySamples,
    /// `min_coassembly_samples` exceeded `max_coassembly_samples`.
    MinExceedsMax,
    /// `max_recovery_samples` was below `max_coassembly_samples`.
    RecoveryBelowMax,
    /// An edge row's `cluster_size` disagreed with the number of samples listed.
    EdgeSizeMismatch,
    /// An edge row referenced a sample absent from the read-size table.
    EdgeUnknownSample,
    /// An edge row's `style`/`cluster_size` pairing violated the arity rule.
    EdgeStyleArity,
}

impl ClusterErrorCode {
    /// Returns the stable machine-readable representation of this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZeroMinCoassemblySamples => "CLUSTER_ZERO_MIN_COASSEMBLY_SAMPLES",
            Self::ZeroMaxCoassemblySamples => "CLUSTER_ZERO_MAX_COASSEMBLY_SAMPLES",
            Self::MinExceedsMax => "CLUSTER_MIN_EXCEEDS_MAX",
            Self::RecoveryBelowMax => "CLUSTER_RECOVERY_BELOW_MAX",
            Self::EdgeSizeMismatch => "CLUSTER_EDGE_SIZE_MISMATCH",
            Self::EdgeUnknownSample => "CLUSTER_EDGE_UNKNOWN_SAMPLE",
            Self::EdgeStyleArity => "CLUSTER_EDGE_STYLE_ARITY",
        }
    }
}

impl fmt::Display for ClusterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced while validating a [`ClusterConfig`](crate::config::ClusterConfig)
/// or while parsing an `elusive_edges` row into an [`Edge`](crate::edge::Edge).
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ClusterError {
    /// `min_coassembly_samples` must be at least 1.
    #[error("min_coassembly_samples must be at least 1 (got 0)")]
    ZeroMinCoassemblySamples,
    /// `max_coassembly_samples` must be at least 1.
    #[error("max_coassembly_samples must be at least 1 (got 0)")]
    ZeroMaxCoassemblySamples,
    /// `min_coassembly_samples` exceeded `max_coassembly_samples`.
    #[error("min_coassembly_samples ({min}) exceeds max_coassembly_samples ({max})")]
    MinExceedsMax {
        /// Configured lower bound.
        min: usize,
        /// Configured upper bound.
        max: usize,
    },
    /// `max_recovery_samples` was below `max_coassembly_samples`.
    #[error(
        "max_recovery_samples ({max_recovery}) is below max_coassembly_samples ({max_coassembly})"
    )]
    RecoveryBelowMax {
        /// Configured recovery-sample cap.
        max_recovery: usize,
        /// Configured coassembly-size cap.
        max_coassembly: usize,
    },
    /// An edge row's `cluster_size` disagreed with the number of samples listed.
    #[error("row {row}: cluster_size {cluster_size} does not match {actual} sample id(s)")]
    EdgeSizeMismatch {
        /// Zero-based row index in the source table.
        row: usize,
        /// The row's declared `cluster_size`.
        cluster_size: usize,
        /// The number of sample identifiers actually listed.
        actual: usize,
    },
    /// An edge row referenced a sample absent from the read-size table.
    #[error("row {row}: sample `{sample}` is not present in the read-size table")]
    EdgeUnknownSample {
        /// Zero-based row index in the source table.
        row: usize,
        /// The offending sample identifier.
        sample: String,
    },
    /// An edge row's `style`/`cluster_size` pairing violated the arity rule
    /// (`Pool` requires arity `>= 3`; `Match` requires arity `== 2`).
    #[error("row {row}: style {style} is incompatible with cluster_size {cluster_size}")]
    EdgeStyleArity {
        /// Zero-based row index in the source table.
        row: usize,
        /// The row's declared style.
        style: EdgeStyle,
        /// The row's declared `cluster_size`.
        cluster_size: usize,
    },
}

impl ClusterError {
    /// Retrieves the stable [`ClusterErrorCode`] for this error.
    pub const fn code(&self) -> ClusterErrorCode {
        match self {
            Self::ZeroMinCoassemblySamples => ClusterErrorCode::ZeroMinCoassemblySamples,
            Self::ZeroMaxCoassemblySamples => ClusterErrorCode::ZeroMaxCoassemblySamples,
            Self::MinExceedsMax { .. } => ClusterErrorCode::MinExceedsMax,
            Self::RecoveryBelowMax { .. } => ClusterErrorCode::RecoveryBelowMax,
            Self::EdgeSizeMismatch { .. } => ClusterErrorCode::EdgeSizeMismatch,
            Self::EdgeUnknownSample { .. } => ClusterErrorCode::EdgeUnknownSample,
            Self::EdgeStyleArity { .. } => ClusterErrorCode::EdgeStyleArity,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ClusterError>;
