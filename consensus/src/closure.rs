//! Consensus matrix, tie-equivalence closure and clustering.

use std::collections::VecDeque;

use crate::contradiction::ContradictionCore;
use crate::matrix::BoolMatrix;

/// Universe indices of one equivalence class, ascending.
pub type Cluster = Vec<usize>;

/// `C = YA ∧ YB`, with every core pair forced to a mutual tie.
pub fn consensus_matrix(ya: &BoolMatrix, yb: &BoolMatrix, core: &ContradictionCore) -> BoolMatrix {
    let mut consensus = ya.and(yb);
    for &(i, j) in core.pairs() {
        consensus.set(i, j, true);
        consensus.set(j, i, true);
    }
    consensus
}

/// Reflexive-transitive closure (Warshall).
pub fn transitive_closure(relation: &BoolMatrix) -> BoolMatrix {
    let n = relation.size();
    let mut closure = relation.or(&BoolMatrix::identity(n));
    for k in 0..n {
        for i in 0..n {
            if !closure.get(i, k) {
                continue;
            }
            for j in 0..n {
                if closure.get(k, j) {
                    closure.set(i, j, true);
                }
            }
        }
    }
    closure
}

/// Connected components of a closed equivalence relation.
///
/// Components are discovered by scanning indices in ascending order, so the
/// cluster list is ordered by smallest member.
pub fn clusters(closure: &BoolMatrix) -> Vec<Cluster> {
    let n = closure.size();
    let mut visited = vec![false; n];
    let mut clusters = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut members = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in 0..n {
                if !visited[next] && (closure.get(current, next) || closure.get(next, current)) {
                    visited[next] = true;
                    members.push(next);
                    queue.push_back(next);
                }
            }
        }
        members.sort_unstable();
        clusters.push(members);
    }
    clusters
}

/// Everything the clustering stage derives from the two relation matrices.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Consensus matrix `C`.
    pub consensus: BoolMatrix,
    /// `E*`, the closed tie-equivalence relation.
    pub equivalence: BoolMatrix,
    pub clusters: Vec<Cluster>,
}

/// Run the whole stage: consensus matrix, `E = C ∧ Cᵗ`, `E*`, clusters.
pub fn cluster(ya: &BoolMatrix, yb: &BoolMatrix, core: &ContradictionCore) -> Clustering {
    let consensus = consensus_matrix(ya, yb, core);
    let equivalence = transitive_closure(&consensus.symmetric_part());
    let clusters = clusters(&equivalence);
    Clustering {
        consensus,
        equivalence,
        clusters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contradiction::detect;
    use crate::matrix::relation_matrix;
    use crate::ranking::Ranking;
    use crate::universe::ObjectUniverse;

    fn pairs(n: usize, edges: &[(usize, usize)]) -> BoolMatrix {
        let mut m = BoolMatrix::new(n);
        for &(i, j) in edges {
            m.set(i, j, true);
        }
        m
    }

    #[test]
    fn test_closure_is_reflexive_and_transitive() {
        let m = pairs(4, &[(0, 1), (1, 2)]);
        let closed = transitive_closure(&m);
        for i in 0..4 {
            assert!(closed.get(i, i));
        }
        assert!(closed.get(0, 2));
        assert!(!closed.get(2, 0));
        assert!(!closed.get(0, 3));
    }

    #[test]
    fn test_closure_joins_chained_ties() {
        let m = pairs(4, &[(0, 2), (2, 0), (2, 3), (3, 2)]);
        let closed = transitive_closure(&m);
        assert!(closed.get(0, 3) && closed.get(3, 0));
        assert!(!closed.get(0, 1));
    }

    #[test]
    fn test_clusters_follow_discovery_order() {
        let closed = transitive_closure(&pairs(5, &[(1, 4), (4, 1), (0, 3), (3, 0)]));
        assert_eq!(clusters(&closed), vec![vec![0, 3], vec![1, 4], vec![2]]);
    }

    #[test]
    fn test_clusters_of_empty_matrix() {
        assert!(clusters(&BoolMatrix::new(0)).is_empty());
    }

    #[test]
    fn test_core_pairs_become_ties() {
        let a = Ranking::from_groups(vec![vec![1i64], vec![2], vec![3]]);
        let b = Ranking::from_groups(vec![vec![2i64], vec![1], vec![3]]);
        let universe = ObjectUniverse::build(&a, &b);
        let ya = relation_matrix(&universe, &a);
        let yb = relation_matrix(&universe, &b);
        let core = detect(&ya, &yb);
        let clustering = cluster(&ya, &yb, &core);

        assert!(clustering.consensus.get(0, 1) && clustering.consensus.get(1, 0));
        assert!(clustering.consensus.get(0, 2) && !clustering.consensus.get(2, 0));
        assert_eq!(clustering.clusters, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_agreed_pairs_preserved() {
        let a = Ranking::from_groups(vec![vec![1i64, 2], vec![3]]);
        let b = Ranking::from_groups(vec![vec![1i64], vec![2, 3]]);
        let universe = ObjectUniverse::build(&a, &b);
        let ya = relation_matrix(&universe, &a);
        let yb = relation_matrix(&universe, &b);
        let core = detect(&ya, &yb);
        let clustering = cluster(&ya, &yb, &core);
        for i in 0..universe.len() {
            for j in 0..universe.len() {
                if ya.get(i, j) && yb.get(i, j) {
                    assert!(clustering.consensus.get(i, j));
                }
            }
        }
    }
}
