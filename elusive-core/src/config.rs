//! Configuration for the coassembly clustering pipeline.
//!
//! Mirrors the teacher's builder: a `Default` populated with the reference
//! defaults, fluent `with_*` setters, and a fallible `build` that rejects
//! configurations violating the invariants in the data model instead of
//! panicking on caller-supplied values.

use crate::error::ClusterError;

/// Validated configuration controlling candidate generation and selection.
///
/// Constructed only via [`ClusterConfigBuilder::build`], which enforces:
/// `min_coassembly_samples <= max_coassembly_samples`, both bounds `>= 1`,
/// and `max_recovery_samples >= max_coassembly_samples`.
///
/// # Examples
/// ```
/// use elusive_core::ClusterConfigBuilder;
///
/// let config = ClusterConfigBuilder::new()
///     .with_max_coassembly_samples(4)
///     .with_min_coassembly_samples(4)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(config.max_coassembly_samples(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterConfig {
    max_coassembly_samples: usize,
    min_coassembly_samples: usize,
    max_recovery_samples: usize,
    max_coassembly_size: Option<u64>,
}

impl ClusterConfig {
    /// Upper bound on the number of samples per coassembly.
    #[rustfmt::skip]
    #[must_use]
    pub const fn max_coassembly_samples(&self) -> usize { self.max_coassembly_samples }

    /// Lower bound on the number of samples per coassembly.
    #[rustfmt::skip]
    #[must_use]
    pub const fn min_coassembly_samples(&self) -> usize { self.min_coassembly_samples }

    /// Upper bound on the number of recovery samples per coassembly.
    #[rustfmt::skip]
    #[must_use]
    pub const fn max_recovery_samples(&self) -> usize { self.max_recovery_samples }

    /// Upper bound on a coassembly's aggregate read size, if configured.
    #[rustfmt::skip]
    #[must_use]
    pub const fn max_coassembly_size(&self) -> Option<u64> { self.max_coassembly_size }

    /// Returns whether bud candidates (single-sample coassemblies) are in
    /// scope for this configuration.
    #[must_use]
    pub const fn bud_regime(&self) -> bool {
        self.min_coassembly_samples == 1
    }
}

/// Builds and validates a [`ClusterConfig`].
///
/// # Examples
/// ```
/// use elusive_core::ClusterConfigBuilder;
///
/// let config = ClusterConfigBuilder::new().build().expect("defaults are valid");
/// assert_eq!(config.min_coassembly_samples(), 2);
/// assert_eq!(config.max_recovery_samples(), 20);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClusterConfigBuilder {
    max_coassembly_samples: usize,
    min_coassembly_samples: usize,
    max_recovery_samples: usize,
    max_coassembly_size: Option<u64>,
}

impl Default for ClusterConfigBuilder {
    fn default() -> Self {
        Self {
            max_coassembly_samples: 2,
            min_coassembly_samples: 2,
            max_recovery_samples: 20,
            max_coassembly_size: None,
        }
    }
}

impl ClusterConfigBuilder {
    /// Creates a builder populated with the reference defaults
    /// (`max_coassembly_samples = 2`, `min_coassembly_samples = 2`,
    /// `max_recovery_samples = 20`, no `max_coassembly_size` cap).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides `max_coassembly_samples`.
    #[must_use]
    pub const fn with_max_coassembly_samples(mut self, value: usize) -> Self {
        self.max_coassembly_samples = value;
        self
    }

    /// Overrides `min_coassembly_samples`.
    #[must_use]
    pub const fn with_min_coassembly_samples(mut self, value: usize) -> Self {
        self.min_coassembly_samples = value;
        self
    }

    /// Overrides `max_recovery_samples`.
    #[must_use]
    pub const fn with_max_recovery_samples(mut self, value: usize) -> Self {
        self.max_recovery_samples = value;
        self
    }

    /// Sets the optional aggregate read-size cap per coassembly.
    #[must_use]
    pub const fn with_max_coassembly_size(mut self, value: Option<u64>) -> Self {
        self.max_coassembly_size = value;
        self
    }

    /// Validates the configuration and constructs a [`ClusterConfig`].
    ///
    /// # Errors
    /// Returns [`ClusterError::ZeroMinCoassemblySamples`] or
    /// [`ClusterError::ZeroMaxCoassemblySamples`] when either bound is zero,
    /// [`ClusterError::MinExceedsMax`] when `min > max`, and
    /// [`ClusterError::RecoveryBelowMax`] when `max_recovery_samples` is
    /// below `max_coassembly_samples`.
    pub fn build(self) -> Result<ClusterConfig, ClusterError> {
        if self.min_coassembly_samples == 0 {
            return Err(ClusterError::ZeroMinCoassemblySamples);
        }
        if self.max_coassembly_samples == 0 {
            return Err(ClusterError::ZeroMaxCoassemblySamples);
        }
        if self.min_coassembly_samples > self.max_coassembly_samples {
            return Err(ClusterError::MinExceedsMax {
                min: self.min_coassembly_samples,
                max: self.max_coassembly_samples,
            });
        }
        if self.max_recovery_samples < self.max_coassembly_samples {
            return Err(ClusterError::RecoveryBelowMax {
                max_recovery: self.max_recovery_samples,
                max_coassembly: self.max_coassembly_samples,
            });
        }

        Ok(ClusterConfig {
            max_coassembly_samples: self.max_coassembly_samples,
            min_coassembly_samples: self.min_coassembly_samples,
            max_recovery_samples: self.max_recovery_samples,
            max_coassembly_size: self.max_coassembly_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_successfully() {
        let config = ClusterConfigBuilder::new().build().expect("defaults are valid");
        assert_eq!(config.max_coassembly_samples(), 2);
        assert_eq!(config.min_coassembly_samples(), 2);
        assert_eq!(config.max_recovery_samples(), 20);
        assert_eq!(config.max_coassembly_size(), None);
        assert!(!config.bud_regime());
    }

    #[test]
    fn bud_regime_when_min_is_one() {
        let config = ClusterConfigBuilder::new()
            .with_min_coassembly_samples(1)
            .with_max_coassembly_samples(1)
            .build()
            .expect("min=max=1 is valid");
        assert!(config.bud_regime());
    }

    #[test]
    fn rejects_min_exceeding_max() {
        let err = ClusterConfigBuilder::new()
            .with_min_coassembly_samples(5)
            .with_max_coassembly_samples(2)
            .build()
            .unwrap_err();
        assert!(matches!(err, ClusterError::MinExceedsMax { min: 5, max: 2 }));
    }

    #[test]
    fn rejects_recovery_below_max() {
        let err = ClusterConfigBuilder::new()
            .with_max_coassembly_samples(10)
            .with_max_recovery_samples(5)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ClusterError::RecoveryBelowMax {
                max_recovery: 5,
                max_coassembly: 10
            }
        ));
    }

    #[test]
    fn rejects_zero_bounds() {
        let err = ClusterConfigBuilder::new()
            .with_min_coassembly_samples(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ClusterError::ZeroMinCoassemblySamples));
    }
}
