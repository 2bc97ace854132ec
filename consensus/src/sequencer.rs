//! Cluster sequencing: precedence graph and stable topological order.
//!
//! Clusters become nodes of a directed graph with an edge `x → y` when every
//! cross pair strictly agrees on x before y in the consensus matrix. Kahn's
//! algorithm emits the smallest discovery index among ready clusters first.
//! Clusters stuck on a cycle are appended afterwards in discovery order; their
//! position carries no precedence evidence.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use tracing::debug;

use crate::closure::Cluster;
use crate::matrix::BoolMatrix;

/// Cluster precedence graph; node weights are cluster discovery indices.
pub type ClusterGraph = DiGraph<usize, ()>;

/// Output of the sequencer, in terms of cluster discovery indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencedClusters {
    /// Final order of cluster indices.
    pub order: Vec<usize>,
    /// Clusters placed by the discovery-order fallback, ascending.
    pub undetermined: Vec<usize>,
}

impl SequencedClusters {
    pub fn is_fully_determined(&self) -> bool {
        self.undetermined.is_empty()
    }
}

fn strictly_precedes(consensus: &BoolMatrix, x: &Cluster, y: &Cluster) -> bool {
    x.iter()
        .all(|&p| y.iter().all(|&q| consensus.get(p, q) && !consensus.get(q, p)))
}

/// Build the precedence graph between clusters.
pub fn precedence_graph(consensus: &BoolMatrix, clusters: &[Cluster]) -> ClusterGraph {
    let mut graph = ClusterGraph::with_capacity(clusters.len(), 0);
    let nodes: Vec<NodeIndex> = (0..clusters.len()).map(|i| graph.add_node(i)).collect();

    for (x, from) in clusters.iter().enumerate() {
        for (y, to) in clusters.iter().enumerate() {
            if x != y && strictly_precedes(consensus, from, to) {
                graph.add_edge(nodes[x], nodes[y], ());
            }
        }
    }
    graph
}

/// Order the clusters.
pub fn sequence(consensus: &BoolMatrix, clusters: &[Cluster]) -> SequencedClusters {
    let graph = precedence_graph(consensus, clusters);
    debug!(
        clusters = graph.node_count(),
        edges = graph.edge_count(),
        "Built cluster precedence graph"
    );

    let mut indegree: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.neighbors_directed(node, Direction::Incoming).count())
        .collect();
    let mut ready: BinaryHeap<Reverse<usize>> = indegree
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut order = Vec::with_capacity(clusters.len());
    let mut placed = vec![false; clusters.len()];
    while let Some(Reverse(current)) = ready.pop() {
        order.push(current);
        placed[current] = true;
        for next in graph.neighbors(NodeIndex::new(current)) {
            let slot = &mut indegree[graph[next]];
            *slot -= 1;
            if *slot == 0 {
                ready.push(Reverse(graph[next]));
            }
        }
    }

    let undetermined: Vec<usize> = (0..clusters.len()).filter(|&i| !placed[i]).collect();
    order.extend(&undetermined);
    SequencedClusters {
        order,
        undetermined,
    }
}
