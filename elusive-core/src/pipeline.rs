//! Pipeline driver: sequences config validation, edge construction,
//! component finding, candidate generation, and greedy selection into the
//! final `elusive_clusters` table.

use tracing::instrument;

use crate::{
    candidate::{self, Candidate},
    component,
    config::{ClusterConfig, ClusterConfigBuilder},
    edge::{Edge, EdgeRow, merge_duplicate_edges},
    error::ClusterError,
    result::Cluster,
    sample::Weights,
    select,
};

/// Runs the coassembly clustering pipeline end-to-end: validates `config`,
/// parses `rows` against `weights`, partitions the resulting edges into
/// components, and generates + selects candidates within each before
/// materialising the final ordered `elusive_clusters` table.
///
/// Deterministic for any given `(rows, weights, config)`. Zero rows is not
/// an error: it yields an empty output, matching the failure semantics in
/// §4.7 (the driver never errors on biologically reasonable empty input).
///
/// # Errors
/// Returns [`ClusterError`] when `config` violates an invariant from the
/// data model (see [`ClusterConfigBuilder::build`]), or when any row in
/// `rows` is malformed (see [`Edge::parse`]).
#[instrument(
    name = "pipeline.run",
    skip(rows, weights, config),
    fields(row_count = rows.len(), sample_count = weights.len()),
)]
pub fn run(
    rows: &[EdgeRow<'_>],
    weights: Weights,
    config: ClusterConfigBuilder,
) -> Result<Vec<Cluster>, ClusterError> {
    let config = config.build()?;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let edges: Vec<Edge> = rows
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            Edge::parse(
                row,
                raw.style,
                raw.cluster_size,
                raw.samples,
                raw.target_ids,
                &weights,
            )
        })
        .collect::<Result<_, _>>()?;

    let merged = merge_duplicate_edges(edges);
    let components = component::partition(merged);

    let mut selected: Vec<Candidate> = Vec::new();
    for component_edges in components {
        let candidates = run_component(&component_edges, &config, &weights);
        selected.extend(select::select(candidates));
    }

    // Per §4.6, components are merged by re-sorting the concatenation of
    // their per-component selections with the same key used within a
    // component; this produces both the cross-component and within-component
    // ordering in one pass.
    selected.sort_by(|left, right| {
        right
            .total_targets()
            .cmp(&left.total_targets())
            .then_with(|| right.len().cmp(&left.len()))
            .then_with(|| right.sorted_samples_joined().cmp(&left.sorted_samples_joined()))
    });

    Ok(selected
        .into_iter()
        .enumerate()
        .map(|(position, candidate)| materialise(&candidate, position))
        .collect())
}

#[instrument(name = "pipeline.component", skip(edges, config, weights), fields(edge_count = edges.len()))]
fn run_component(edges: &[Edge], config: &ClusterConfig, weights: &Weights) -> Vec<Candidate> {
    candidate::generate(edges, config, weights)
}

fn materialise(candidate: &Candidate, position: usize) -> Cluster {
    Cluster::new(
        candidate.sorted_samples(),
        candidate.total_targets(),
        candidate.total_size(),
        candidate.sorted_recover_samples(),
        position,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EdgeStyle;

    fn weights_for(samples: &[(&str, u64)]) -> Weights {
        samples
            .iter()
            .map(|(sample, size)| ((*sample).to_owned(), *size))
            .collect()
    }

    #[test]
    fn empty_rows_yield_empty_output() {
        let result = run(&[], Weights::new(), ClusterConfigBuilder::new()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn two_edge_chain_yields_single_coassembly() {
        let weights = weights_for(&[("sample_1", 1000), ("sample_2", 2000), ("sample_3", 3000)]);
        let rows = vec![
            EdgeRow {
                style: EdgeStyle::Match,
                cluster_size: 2,
                samples: "sample_2,sample_1",
                target_ids: "0,1,2",
            },
            EdgeRow {
                style: EdgeStyle::Match,
                cluster_size: 2,
                samples: "sample_1,sample_3",
                target_ids: "1,2",
            },
        ];

        let clusters = run(&rows, weights, ClusterConfigBuilder::new()).unwrap();
        assert_eq!(clusters.len(), 1);
        let cluster = clusters.first().expect("one cluster");
        assert_eq!(cluster.samples_joined(), "sample_1,sample_2");
        assert_eq!(cluster.length(), 2);
        assert_eq!(cluster.total_targets(), 3);
        assert_eq!(cluster.total_size(), 3000);
        assert_eq!(cluster.recover_samples_joined(), "sample_1,sample_2,sample_3");
        assert_eq!(cluster.coassembly(), "coassembly_0");
    }

    #[test]
    fn rejects_malformed_row_with_row_index() {
        let weights = weights_for(&[("1", 0), ("2", 0)]);
        let rows = vec![EdgeRow {
            style: EdgeStyle::Match,
            cluster_size: 2,
            samples: "1,2,3",
            target_ids: "t",
        }];

        let err = run(&rows, weights, ClusterConfigBuilder::new()).unwrap_err();
        assert!(matches!(err, ClusterError::EdgeSizeMismatch { row: 0, .. }));
    }
}
