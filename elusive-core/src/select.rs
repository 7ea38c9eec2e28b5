//! Greedy selector: picks a maximal sample-disjoint subset of a component's
//! candidates, in decreasing order of target count.

use crate::candidate::Candidate;

/// Applies the greedy rule from §4.5: sort by `(total_targets DESC, len
/// DESC, samples DESC)`, repeatedly pop the top candidate, and discard every
/// remaining candidate that shares a sample with it. This also enforces the
/// "bud regime" conflict rule (a bud covering sample `x` blocks any further
/// candidate containing `x`) without special-casing it, since bud
/// candidates are ordinary single-sample candidates here.
///
/// The samples tie-break sorts the joined sample string in descending order.
/// `reference/test_cluster_single_bud` and `test_cluster_double_bud` both tie
/// several candidates on `(total_targets, len)` and settle them highest
/// sample id first; see the "Bud recovery tie-break" entry in DESIGN.md.
pub(crate) fn select(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|left, right| {
        right
            .total_targets()
            .cmp(&left.total_targets())
            .then_with(|| right.len().cmp(&left.len()))
            .then_with(|| right.sorted_samples_joined().cmp(&left.sorted_samples_joined()))
    });

    let mut pool = candidates;
    let mut selected = Vec::new();
    while !pool.is_empty() {
        let picked = pool.remove(0);
        pool.retain(|candidate| !candidate.intersects(&picked));
        selected.push(picked);
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ClusterConfigBuilder, edge::Edge, edge::EdgeStyle, sample::Weights};

    fn weights_for(samples: &[&str]) -> Weights {
        samples.iter().map(|sample| ((*sample).to_owned(), 0)).collect()
    }

    #[test]
    fn picks_highest_target_candidate_first_and_evicts_conflicts() {
        let weights = weights_for(&["1", "2", "3"]);
        let edges = vec![
            Edge::parse(0, EdgeStyle::Match, 2, "1,2", "a,b,c", &weights).unwrap(),
            Edge::parse(1, EdgeStyle::Match, 2, "2,3", "a", &weights).unwrap(),
        ];
        let config = ClusterConfigBuilder::new().build().unwrap();
        let candidates = crate::candidate::generate(&edges, &config, &weights);

        let selected = select(candidates);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.first().map(Candidate::total_targets), Some(3));
    }

    #[test]
    fn disjoint_candidates_are_both_selected() {
        let weights = weights_for(&["1", "2", "3", "4"]);
        let edges = vec![
            Edge::parse(0, EdgeStyle::Match, 2, "1,2", "a", &weights).unwrap(),
            Edge::parse(1, EdgeStyle::Match, 2, "3,4", "b,c", &weights).unwrap(),
        ];
        let config = ClusterConfigBuilder::new().build().unwrap();
        let candidates = crate::candidate::generate(&edges, &config, &weights);

        let selected = select(candidates);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.first().map(Candidate::total_targets), Some(2));
        assert_eq!(selected.get(1).map(Candidate::total_targets), Some(1));
    }
}
