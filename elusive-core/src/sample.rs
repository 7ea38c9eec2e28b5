//! Sample identifiers and per-sample read-size weights.

use std::collections::HashMap;

/// A sample identifier as it appears in the `elusive_edges` and `read_size`
/// input tables.
pub type SampleId = String;

/// Per-sample read-size weights, used to size a candidate coassembly against
/// [`ClusterConfig::max_coassembly_size`](crate::config::ClusterConfig).
///
/// Samples not referenced by any edge are still valid entries; they simply
/// never participate in a cluster.
///
/// # Examples
/// ```
/// use elusive_core::Weights;
///
/// let mut weights = Weights::new();
/// weights.insert("sample_1".to_owned(), 1000);
/// assert_eq!(weights.get("sample_1"), Some(1000));
/// assert_eq!(weights.get("sample_2"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Weights(HashMap<SampleId, u64>);

impl Weights {
    /// Creates an empty weights table.
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Looks up the read size recorded for `sample`, if any.
    #[must_use]
    pub fn get(&self, sample: &str) -> Option<u64> {
        self.0.get(sample).copied()
    }

    /// Returns whether `sample` has a recorded read size.
    #[must_use]
    pub fn contains(&self, sample: &str) -> bool {
        self.0.contains_key(sample)
    }

    /// Records the read size for `sample`, returning the previous value if
    /// the sample was already present.
    pub fn insert(&mut self, sample: SampleId, read_size: u64) -> Option<u64> {
        self.0.insert(sample, read_size)
    }

    /// Returns the number of samples with a recorded read size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sums the read sizes of the given samples.
    ///
    /// Samples absent from the table contribute zero; callers are expected to
    /// have validated every sample against the table beforehand (the edge
    /// parser does this via [`ClusterError::EdgeUnknownSample`](crate::ClusterError::EdgeUnknownSample)).
    #[must_use]
    pub fn total<'a, I: IntoIterator<Item = &'a str>>(&self, samples: I) -> u64 {
        samples
            .into_iter()
            .fold(0_u64, |acc, sample| acc.saturating_add(self.get(sample).unwrap_or(0)))
    }
}

impl FromIterator<(SampleId, u64)> for Weights {
    fn from_iter<T: IntoIterator<Item = (SampleId, u64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
