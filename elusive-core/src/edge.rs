//! Edge rows: shared-target relationships between sample groups.
//!
//! An [`Edge`] is the typed, validated form of one row of the `elusive_edges`
//! input table (see the pipeline driver for the untyped-to-typed boundary).
//! Splitting raw CSV bytes into fields is a CLI responsibility; this module
//! only concerns itself with turning already-split fields into a value that
//! upholds the data-model invariants.

use std::fmt;

use indexmap::IndexSet;

use crate::{
    error::ClusterError,
    sample::{SampleId, Weights},
};

/// Distinguishes a read-mapping edge (`match`) from a co-binned edge (`pool`).
///
/// `Match` edges always have arity 2; `Pool` edges record targets shared by
/// three or more samples jointly and always have arity at least 3.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EdgeStyle {
    /// Samples co-occur because reads cross-map between them. Arity is
    /// always 2.
    Match,
    /// Samples co-occur because they were binned into the same group. Arity
    /// is always at least 3.
    Pool,
}

impl EdgeStyle {
    /// Parses the `style` column token, returning `None` for anything other
    /// than `"match"` or `"pool"`.
    ///
    /// # Examples
    /// ```
    /// use elusive_core::EdgeStyle;
    ///
    /// assert_eq!(EdgeStyle::parse("pool"), Some(EdgeStyle::Pool));
    /// assert_eq!(EdgeStyle::parse("bogus"), None);
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "match" => Some(Self::Match),
            "pool" => Some(Self::Pool),
            _ => None,
        }
    }

    /// Returns the minimum arity permitted for this style.
    #[must_use]
    const fn min_arity(self) -> usize {
        match self {
            Self::Match => 2,
            Self::Pool => 3,
        }
    }

    /// Returns whether `cluster_size` is a legal arity for this style
    /// (`Match` is exactly 2; `Pool` is at least 3).
    #[must_use]
    fn permits_arity(self, cluster_size: usize) -> bool {
        match self {
            Self::Match => cluster_size == self.min_arity(),
            Self::Pool => cluster_size >= self.min_arity(),
        }
    }
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Match => "match",
            Self::Pool => "pool",
        };
        f.write_str(token)
    }
}

/// One row of the `elusive_edges` input table, typed and validated against
/// the invariants in the data model: every sample is present in the
/// read-size table, `cluster_size` equals `|samples|`, and the style/arity
/// pairing holds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Edge {
    style: EdgeStyle,
    samples: IndexSet<SampleId>,
    target_ids: IndexSet<String>,
}

impl Edge {
    /// Parses and validates one `elusive_edges` row.
    ///
    /// `row` is the zero-based row index, used only to annotate errors.
    /// `samples_field` and `target_ids_field` are the raw comma-separated
    /// column values; splitting and whitespace handling happen here so the
    /// caller only needs to hand over already-delimited CSV cells.
    ///
    /// # Errors
    /// Returns [`ClusterError::EdgeSizeMismatch`] when `cluster_size` does not
    /// equal the number of distinct sample identifiers, [`ClusterError::EdgeStyleArity`]
    /// when the style/arity pairing is illegal, and [`ClusterError::EdgeUnknownSample`]
    /// when a sample is absent from `weights`.
    ///
    /// # Examples
    /// ```
    /// use elusive_core::{Edge, EdgeStyle, Weights};
    ///
    /// let mut weights = Weights::new();
    /// weights.insert("a".to_owned(), 10);
    /// weights.insert("b".to_owned(), 20);
    ///
    /// let edge = Edge::parse(0, EdgeStyle::Match, 2, "a,b", "t1,t2", &weights)
    ///     .expect("well-formed row");
    /// assert_eq!(edge.samples().len(), 2);
    /// ```
    pub fn parse(
        row: usize,
        style: EdgeStyle,
        cluster_size: usize,
        samples_field: &str,
        target_ids_field: &str,
        weights: &Weights,
    ) -> Result<Self, ClusterError> {
        let samples: IndexSet<SampleId> = split_tokens(samples_field);

        if samples.len() != cluster_size {
            return Err(ClusterError::EdgeSizeMismatch {
                row,
                cluster_size,
                actual: samples.len(),
            });
        }

        if !style.permits_arity(cluster_size) {
            return Err(ClusterError::EdgeStyleArity {
                row,
                style,
                cluster_size,
            });
        }

        for sample in &samples {
            if !weights.contains(sample) {
                return Err(ClusterError::EdgeUnknownSample {
                    row,
                    sample: sample.clone(),
                });
            }
        }

        let target_ids = split_tokens(target_ids_field);

        Ok(Self {
            style,
            samples,
            target_ids,
        })
    }

    /// Returns this edge's style.
    #[must_use]
    pub const fn style(&self) -> EdgeStyle {
        self.style
    }

    /// Returns this edge's arity (number of distinct samples).
    #[must_use]
    pub fn cluster_size(&self) -> usize {
        self.samples.len()
    }

    /// Returns the sample identifiers participating in this edge.
    #[must_use]
    pub fn samples(&self) -> &IndexSet<SampleId> {
        &self.samples
    }

    /// Returns the shared target identifiers recorded on this edge.
    #[must_use]
    pub fn target_ids(&self) -> &IndexSet<String> {
        &self.target_ids
    }

    /// Returns whether this edge's sample set is a subset of `other`.
    #[must_use]
    pub fn samples_subset_of(&self, other: &IndexSet<SampleId>) -> bool {
        self.samples.iter().all(|sample| other.contains(sample))
    }

    /// Returns whether this edge shares at least one sample with `other`.
    #[must_use]
    pub fn intersects(&self, other: &IndexSet<SampleId>) -> bool {
        self.samples.iter().any(|sample| other.contains(sample))
    }
}

fn split_tokens(field: &str) -> IndexSet<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A borrowed view over one raw `elusive_edges` row, handed to
/// [`crate::pipeline::run`] for parsing and validation. Splitting CSV bytes
/// into these fields, including parsing `style` and `cluster_size` tokens,
/// is a CLI responsibility (§4.1); this type is the boundary between that
/// untyped text and the typed, validated [`Edge`].
#[derive(Debug, Clone, Copy)]
pub struct EdgeRow<'a> {
    /// The row's style token, already parsed.
    pub style: EdgeStyle,
    /// The row's declared arity.
    pub cluster_size: usize,
    /// The raw comma-separated `samples` cell.
    pub samples: &'a str,
    /// The raw comma-separated `target_ids` cell.
    pub target_ids: &'a str,
}

/// Collapses edges with identical sample sets into one logical edge,
/// unioning their target identifiers, per the component finder's design
/// (edges with identical sample sets collapse but target sets union).
///
/// The returned order preserves the position of each sample set's first
/// occurrence in `edges`, which the candidate generator's recovery-set
/// construction relies on for its edge-insertion-order tie-break.
#[must_use]
pub(crate) fn merge_duplicate_edges(edges: Vec<Edge>) -> Vec<Edge> {
    let mut by_samples: indexmap::IndexMap<Vec<SampleId>, Edge> = indexmap::IndexMap::new();

    for edge in edges {
        let mut key: Vec<SampleId> = edge.samples.iter().cloned().collect();
        key.sort_unstable();

        by_samples
            .entry(key)
            .and_modify(|existing| {
                existing.target_ids.extend(edge.target_ids.iter().cloned());
            })
            .or_insert(edge);
    }

    by_samples.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights_for(samples: &[&str]) -> Weights {
        samples.iter().map(|sample| ((*sample).to_owned(), 0)).collect()
    }

    #[test]
    fn parse_rejects_size_mismatch() {
        let weights = weights_for(&["a", "b"]);
        let err = Edge::parse(3, EdgeStyle::Match, 2, "a,b,a", "t", &weights).unwrap_err();
        assert!(matches!(err, ClusterError::EdgeSizeMismatch { row: 3, .. }));
    }

    #[test]
    fn parse_rejects_unknown_sample() {
        let weights = weights_for(&["a"]);
        let err = Edge::parse(0, EdgeStyle::Match, 2, "a,b", "t", &weights).unwrap_err();
        assert!(matches!(
            err,
            ClusterError::EdgeUnknownSample { ref sample, .. } if sample == "b"
        ));
    }

    #[test]
    fn parse_rejects_pool_below_arity() {
        let weights = weights_for(&["a", "b"]);
        let err = Edge::parse(1, EdgeStyle::Pool, 2, "a,b", "t", &weights).unwrap_err();
        assert!(matches!(err, ClusterError::EdgeStyleArity { row: 1, .. }));
    }

    #[test]
    fn merge_duplicate_edges_unions_targets() {
        let weights = weights_for(&["a", "b"]);
        let first = Edge::parse(0, EdgeStyle::Match, 2, "a,b", "t1", &weights).unwrap();
        let second = Edge::parse(1, EdgeStyle::Match, 2, "b,a", "t2", &weights).unwrap();

        let merged = merge_duplicate_edges(vec![first, second]);
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged.first().map(|edge| edge.target_ids().len()),
            Some(2)
        );
    }
}
