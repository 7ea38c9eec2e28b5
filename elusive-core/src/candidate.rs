//! Candidate coassembly enumeration: pair/pool and bud candidates, their
//! target unions, and recovery-sample sets.

use indexmap::IndexSet;

use crate::{
    config::ClusterConfig,
    edge::Edge,
    sample::{SampleId, Weights},
};

/// A candidate coassembly derived from a component's edges. Not persisted;
/// candidates that survive the greedy selector are materialised into
/// [`Cluster`](crate::result::Cluster) rows.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    samples: IndexSet<SampleId>,
    targets: IndexSet<String>,
    recover_samples: IndexSet<SampleId>,
    total_size: u64,
}

impl Candidate {
    /// The candidate's sample set.
    pub(crate) fn samples(&self) -> &IndexSet<SampleId> {
        &self.samples
    }

    /// `|samples|`.
    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    /// `|targets|`.
    pub(crate) fn total_targets(&self) -> usize {
        self.targets.len()
    }

    /// Sum of read sizes of `samples`.
    pub(crate) const fn total_size(&self) -> u64 {
        self.total_size
    }

    /// The recovery-sample set (a superset of `samples`).
    pub(crate) fn recover_samples(&self) -> &IndexSet<SampleId> {
        &self.recover_samples
    }

    /// `samples`, sorted lexicographically; the final output format (§6).
    pub(crate) fn sorted_samples(&self) -> Vec<SampleId> {
        sorted_vec(&self.samples)
    }

    /// `recover_samples`, sorted lexicographically; the final output format (§6).
    pub(crate) fn sorted_recover_samples(&self) -> Vec<SampleId> {
        sorted_vec(&self.recover_samples)
    }

    /// `samples`, sorted lexicographically and joined with `,`; the
    /// tie-break key used by the greedy selector (§4.5).
    pub(crate) fn sorted_samples_joined(&self) -> String {
        self.sorted_samples().join(",")
    }

    /// Whether this candidate's sample set shares any sample with `other`'s.
    pub(crate) fn intersects(&self, other: &Self) -> bool {
        self.samples.iter().any(|sample| other.samples.contains(sample))
    }
}

fn sorted_vec(samples: &IndexSet<SampleId>) -> Vec<SampleId> {
    let mut sorted: Vec<SampleId> = samples.iter().cloned().collect();
    sorted.sort_unstable();
    sorted
}

/// Enumerates every candidate coassembly for one component's edges.
///
/// `edges` must already have duplicate sample sets collapsed (see
/// [`crate::edge::merge_duplicate_edges`]); its order is also the
/// edge-insertion order used to tie-break the recovery-set walk.
pub(crate) fn generate(edges: &[Edge], config: &ClusterConfig, weights: &Weights) -> Vec<Candidate> {
    let mut sample_sets: Vec<(IndexSet<SampleId>, bool)> = Vec::new();

    for edge in edges {
        let size = edge.cluster_size();
        if size >= config.min_coassembly_samples() && size <= config.max_coassembly_samples() {
            sample_sets.push((edge.samples().clone(), false));
        }
    }

    if config.bud_regime() {
        let mut seen_samples: IndexSet<SampleId> = IndexSet::new();
        for edge in edges {
            for sample in edge.samples() {
                if seen_samples.insert(sample.clone()) {
                    sample_sets.push((IndexSet::from([sample.clone()]), true));
                }
            }
        }
    }

    sample_sets
        .into_iter()
        .filter_map(|(samples, is_bud)| build_candidate(samples, is_bud, edges, config, weights))
        .collect()
}

fn build_candidate(
    samples: IndexSet<SampleId>,
    is_bud: bool,
    edges: &[Edge],
    config: &ClusterConfig,
    weights: &Weights,
) -> Option<Candidate> {
    let total_size = weights.total(samples.iter().map(String::as_str));
    if let Some(max_size) = config.max_coassembly_size() {
        if total_size > max_size {
            return None;
        }
    }

    let targets = if is_bud {
        bud_targets_for(&samples, edges)
    } else {
        targets_for(&samples, edges)
    };
    let recover_samples = recovery_set(&samples, &targets, edges, config.max_recovery_samples());

    Some(Candidate {
        samples,
        targets,
        recover_samples,
        total_size,
    })
}

/// The union of `target_ids` of every edge whose sample set is a subset of
/// `samples`. Includes higher-arity pool edges fully contained in `samples`
/// even though those edges never become candidates themselves (§9, open
/// question on out-of-bounds pool edges).
fn targets_for(samples: &IndexSet<SampleId>, edges: &[Edge]) -> IndexSet<String> {
    let mut targets = IndexSet::new();
    for edge in edges {
        if edge.samples_subset_of(samples) {
            targets.extend(edge.target_ids().iter().cloned());
        }
    }
    targets
}

/// The union of `target_ids` of every edge containing a bud candidate's
/// single sample. Unlike [`targets_for`], this uses the containing
/// (intersects) relation rather than subset: a bud's sample set is `{x}`, and
/// it inherits targets from every edge `x` participates in, not only edges
/// whose own sample set collapses to `{x}` (which never occurs, since edges
/// always have arity at least 2).
fn bud_targets_for(samples: &IndexSet<SampleId>, edges: &[Edge]) -> IndexSet<String> {
    let mut targets = IndexSet::new();
    for edge in edges {
        if edge.intersects(samples) {
            targets.extend(edge.target_ids().iter().cloned());
        }
    }
    targets
}

/// Builds the recovery-sample set per §4.4: starts as `samples`, then walks
/// edges touching `samples` in decreasing order of how many of the
/// candidate's targets they contribute (ties broken by edge-insertion
/// order), adding each edge's remaining samples until the cap is reached.
fn recovery_set(
    samples: &IndexSet<SampleId>,
    targets: &IndexSet<String>,
    edges: &[Edge],
    max_recovery: usize,
) -> IndexSet<SampleId> {
    let mut recover: IndexSet<SampleId> = samples.clone();
    if recover.len() >= max_recovery {
        return recover;
    }

    let mut ranked: Vec<(usize, usize)> = edges
        .iter()
        .enumerate()
        .filter(|(_, edge)| edge.intersects(samples))
        .map(|(index, edge)| {
            let score = edge
                .target_ids()
                .iter()
                .filter(|target| targets.contains(target.as_str()))
                .count();
            (index, score)
        })
        .collect();
    ranked.sort_by(|left, right| right.1.cmp(&left.1));

    for (index, _score) in ranked {
        if recover.len() >= max_recovery {
            break;
        }
        let Some(edge) = edges.get(index) else {
            continue;
        };
        for sample in edge.samples() {
            if recover.len() >= max_recovery {
                break;
            }
            recover.insert(sample.clone());
        }
    }

    recover
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ClusterConfigBuilder, edge::EdgeStyle};

    fn weights_for(samples: &[(&str, u64)]) -> Weights {
        samples
            .iter()
            .map(|(sample, size)| ((*sample).to_owned(), *size))
            .collect()
    }

    #[test]
    fn pair_candidate_targets_union_subset_pool_edges() {
        let weights = weights_for(&[("1", 10), ("2", 10), ("3", 10)]);
        let edges = vec![
            Edge::parse(0, EdgeStyle::Match, 2, "1,2", "a,b", &weights).unwrap(),
            Edge::parse(1, EdgeStyle::Pool, 3, "1,2,3", "c", &weights).unwrap(),
        ];
        let config = ClusterConfigBuilder::new().build().unwrap();

        let candidates = generate(&edges, &config, &weights);
        let pair = candidates
            .iter()
            .find(|candidate| candidate.len() == 2)
            .expect("pair candidate present");
        assert_eq!(pair.total_targets(), 2);
    }

    #[test]
    fn bud_candidates_generated_when_min_is_one() {
        let weights = weights_for(&[("1", 10), ("2", 10)]);
        let edges = vec![Edge::parse(0, EdgeStyle::Match, 2, "1,2", "a", &weights).unwrap()];
        let config = ClusterConfigBuilder::new()
            .with_min_coassembly_samples(1)
            .with_max_coassembly_samples(1)
            .build()
            .unwrap();

        let candidates = generate(&edges, &config, &weights);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|candidate| candidate.len() == 1));
    }

    #[test]
    fn bud_targets_union_every_edge_containing_the_sample() {
        let weights = weights_for(&[("1", 10), ("2", 10), ("3", 10)]);
        let edges = vec![
            Edge::parse(0, EdgeStyle::Match, 2, "1,2", "a,b", &weights).unwrap(),
            Edge::parse(1, EdgeStyle::Match, 2, "1,3", "a,c", &weights).unwrap(),
        ];
        let config = ClusterConfigBuilder::new()
            .with_min_coassembly_samples(1)
            .with_max_coassembly_samples(1)
            .build()
            .unwrap();

        let candidates = generate(&edges, &config, &weights);
        let bud = candidates
            .iter()
            .find(|candidate| candidate.samples().contains("1"))
            .expect("bud candidate for sample 1");
        assert_eq!(bud.total_targets(), 3);
    }

    #[test]
    fn recovery_set_caps_at_max_recovery_samples() {
        let weights = weights_for(&[("1", 10), ("2", 10), ("3", 10)]);
        let edges = vec![
            Edge::parse(0, EdgeStyle::Match, 2, "1,2", "a,b", &weights).unwrap(),
            Edge::parse(1, EdgeStyle::Match, 2, "1,3", "a", &weights).unwrap(),
        ];
        let config = ClusterConfigBuilder::new()
            .with_max_recovery_samples(3)
            .build()
            .unwrap();

        let candidates = generate(&edges, &config, &weights);
        let pair = candidates
            .iter()
            .find(|candidate| candidate.samples().contains("1") && candidate.samples().contains("2"))
            .expect("pair candidate present");
        assert_eq!(pair.recover_samples().len(), 3);
        assert!(pair.recover_samples().contains("3"));
    }
}
