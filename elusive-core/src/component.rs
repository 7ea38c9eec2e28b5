//! Component finder: partitions edges into connected components by sample
//! overlap, so each component can be solved independently by the candidate
//! generator and greedy selector.

use indexmap::IndexMap;

use crate::{edge::Edge, sample::SampleId};

/// Union-find (disjoint set union) over sample indices.
///
/// Ported from the hierarchy extractor's union-find: path-halving `find`,
/// union-by-rank `union`. The hierarchy extractor merges components while
/// walking a sorted minimum-spanning-tree edge list; this module instead
/// merges components while walking the (unordered) edge list once, but the
/// underlying structure and merge strategy are unchanged.
#[derive(Clone, Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        let Some(mut root) = self.parent.get(node).copied() else {
            return node;
        };
        while self.parent.get(root).is_some_and(|&parent| parent != root) {
            root = self.parent.get(root).copied().unwrap_or(root);
        }

        while self.parent.get(node).is_some_and(|&parent| parent != root) {
            if let Some(slot) = self.parent.get_mut(node) {
                let parent = *slot;
                *slot = root;
                node = parent;
            } else {
                break;
            }
        }

        root
    }

    fn union(&mut self, left: usize, right: usize) -> usize {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return left;
        }
        let left_rank = self.rank.get(left).copied().unwrap_or(0);
        let right_rank = self.rank.get(right).copied().unwrap_or(0);
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        if let Some(slot) = self.parent.get_mut(right) {
            *slot = left;
        }
        if left_rank == right_rank {
            if let Some(slot) = self.rank.get_mut(left) {
                *slot = left_rank.saturating_add(1);
            }
        }
        left
    }
}

/// Partitions `edges` into connected components: two edges land in the same
/// component iff their sample sets are connected through a chain of shared
/// samples. Component order follows the position of each component's first
/// edge in `edges`; edge order within a component is preserved.
#[must_use]
pub(crate) fn partition(edges: Vec<Edge>) -> Vec<Vec<Edge>> {
    if edges.is_empty() {
        return Vec::new();
    }

    let mut index_of: IndexMap<SampleId, usize> = IndexMap::new();
    for edge in &edges {
        for sample in edge.samples() {
            let next = index_of.len();
            index_of.entry(sample.clone()).or_insert(next);
        }
    }

    let mut dsu = DisjointSet::new(index_of.len());
    for edge in &edges {
        let mut samples = edge.samples().iter();
        let Some(first) = samples.next() else {
            continue;
        };
        let Some(&first_idx) = index_of.get(first) else {
            continue;
        };
        for sample in samples {
            if let Some(&idx) = index_of.get(sample) {
                dsu.union(first_idx, idx);
            }
        }
    }

    let mut buckets: IndexMap<usize, Vec<Edge>> = IndexMap::new();
    for edge in edges {
        let Some(first) = edge.samples().iter().next() else {
            continue;
        };
        let Some(&idx) = index_of.get(first) else {
            continue;
        };
        let root = dsu.find(idx);
        buckets.entry(root).or_default().push(edge);
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{edge::EdgeStyle, sample::Weights};

    fn weights_for(samples: &[&str]) -> Weights {
        samples.iter().map(|sample| ((*sample).to_owned(), 0)).collect()
    }

    #[test]
    fn partition_splits_disconnected_groups() {
        let weights = weights_for(&["1", "2", "3", "4", "5", "6"]);
        let edges = vec![
            Edge::parse(0, EdgeStyle::Match, 2, "1,2", "a", &weights).unwrap(),
            Edge::parse(1, EdgeStyle::Match, 2, "2,3", "b", &weights).unwrap(),
            Edge::parse(2, EdgeStyle::Match, 2, "4,5", "c", &weights).unwrap(),
            Edge::parse(3, EdgeStyle::Match, 2, "5,6", "d", &weights).unwrap(),
        ];

        let components = partition(edges);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 2);
        assert_eq!(components[1].len(), 2);
    }

    #[test]
    fn partition_merges_via_shared_sample() {
        let weights = weights_for(&["1", "2", "3", "4"]);
        let edges = vec![
            Edge::parse(0, EdgeStyle::Match, 2, "1,2", "a", &weights).unwrap(),
            Edge::parse(1, EdgeStyle::Match, 2, "3,4", "b", &weights).unwrap(),
            Edge::parse(2, EdgeStyle::Match, 2, "2,3", "c", &weights).unwrap(),
        ];

        let components = partition(edges);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 3);
    }
}
