//! Consensus pipeline
//!
//! Runs normalizer output through every stage in order:
//!
//! ```text
//! Ranking A ─┐                      ┌─ YA ─┐
//!            ├─→ ObjectUniverse ────┤      ├─→ core ─→ C, E* ─→ clusters ─→ order
//! Ranking B ─┘                      └─ YB ─┘
//! ```
//!
//! Every call builds its own universe and matrices; the engine keeps only
//! its configuration and can be shared between threads.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::closure::{self, Clustering};
use crate::config::{ConsensusConfig, CyclePolicy};
use crate::contradiction::{self, ContradictionCore};
use crate::error::{ConsensusError, ConsensusResult};
use crate::matrix::{relation_matrix, BoolMatrix};
use crate::object::RankedObject;
use crate::ranking::Ranking;
use crate::sequencer::{self, SequencedClusters};
use crate::universe::ObjectUniverse;

/// One position of the consensus ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RankEntry {
    /// A cluster with a single object, rendered bare.
    Single(RankedObject),
    /// Objects tied in the consensus.
    Tied(Vec<RankedObject>),
}

impl RankEntry {
    fn from_members(mut members: Vec<RankedObject>) -> Self {
        if members.len() == 1 {
            Self::Single(members.remove(0))
        } else {
            Self::Tied(members)
        }
    }

    /// Objects at this position.
    pub fn objects(&self) -> &[RankedObject] {
        match self {
            Self::Single(object) => std::slice::from_ref(object),
            Self::Tied(objects) => objects,
        }
    }
}

/// Result of a consensus computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusOutcome {
    /// Contradictory pairs, each ascending by universe index.
    pub contradiction_core: Vec<[RankedObject; 2]>,
    /// Ordered clusters.
    pub consensus_ranking: Vec<RankEntry>,
    /// Objects whose position came from the discovery-order fallback rather
    /// than precedence evidence.
    #[serde(skip)]
    pub undetermined: Vec<RankedObject>,
}

impl ConsensusOutcome {
    /// Whether every position is backed by precedence evidence.
    pub fn is_fully_determined(&self) -> bool {
        self.undetermined.is_empty()
    }
}

/// Intermediate state of one computation, for diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusTrace {
    pub universe: ObjectUniverse,
    /// Relation matrix of the first ranking.
    pub relation_a: BoolMatrix,
    /// Relation matrix of the second ranking.
    pub relation_b: BoolMatrix,
    /// `P = (YA ∧ YBᵗ) ∨ (YAᵗ ∧ YB)`.
    pub inversion: BoolMatrix,
    pub core: ContradictionCore,
    /// Consensus matrix `C` after forcing core ties.
    pub consensus: BoolMatrix,
    /// Closed tie-equivalence `E*`.
    pub equivalence: BoolMatrix,
    /// Clusters in discovery order, as universe indices.
    pub clusters: Vec<Vec<usize>>,
    /// Cluster discovery indices in final order.
    pub order: Vec<usize>,
    pub undetermined_clusters: Vec<usize>,
}

/// Consensus engine
#[derive(Debug, Clone, Default)]
pub struct ConsensusEngine {
    config: ConsensusConfig,
}

impl ConsensusEngine {
    pub fn new(config: ConsensusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    /// Compute the consensus of two rankings, applying the cycle policy.
    pub fn compute(&self, first: &Ranking, second: &Ranking) -> ConsensusResult<ConsensusOutcome> {
        self.trace(first, second).map(|(outcome, _)| outcome)
    }

    /// Compute the consensus and keep every intermediate matrix.
    pub fn trace(
        &self,
        first: &Ranking,
        second: &Ranking,
    ) -> ConsensusResult<(ConsensusOutcome, ConsensusTrace)> {
        let (outcome, trace) = run(first, second);
        self.apply_cycle_policy(outcome, trace)
    }

    fn apply_cycle_policy(
        &self,
        outcome: ConsensusOutcome,
        trace: ConsensusTrace,
    ) -> ConsensusResult<(ConsensusOutcome, ConsensusTrace)> {
        if outcome.is_fully_determined() {
            return Ok((outcome, trace));
        }

        match self.config.cycle_policy {
            CyclePolicy::Append => {
                warn!(
                    clusters = trace.undetermined_clusters.len(),
                    objects = outcome.undetermined.len(),
                    "Cyclic cluster precedence; appended clusters in discovery order"
                );
                Ok((outcome, trace))
            }
            CyclePolicy::Reject => Err(ConsensusError::unresolvable_order(outcome.undetermined)),
        }
    }
}

/// Compute the consensus of two rankings.
///
/// Never fails: clusters caught in a precedence cycle are appended in
/// discovery order and listed in [`ConsensusOutcome::undetermined`].
pub fn compute_consensus(first: &Ranking, second: &Ranking) -> ConsensusOutcome {
    run(first, second).0
}

fn run(first: &Ranking, second: &Ranking) -> (ConsensusOutcome, ConsensusTrace) {
    let universe = ObjectUniverse::build(first, second);
    let relation_a = relation_matrix(&universe, first);
    let relation_b = relation_matrix(&universe, second);
    debug!(objects = universe.len(), "Built relation matrices");

    let inversion = contradiction::inversion_signal(&relation_a, &relation_b);
    let core = contradiction::detect(&relation_a, &relation_b);
    debug!(pairs = core.len(), "Detected contradiction core");

    let Clustering {
        consensus,
        equivalence,
        clusters,
    } = closure::cluster(&relation_a, &relation_b, &core);
    debug!(clusters = clusters.len(), "Clustered tie-equivalence classes");

    let SequencedClusters {
        order,
        undetermined: undetermined_clusters,
    } = sequencer::sequence(&consensus, &clusters);

    let members = |cluster: usize| -> Vec<RankedObject> {
        clusters[cluster]
            .iter()
            .map(|&i| universe.object(i).clone())
            .collect()
    };
    let outcome = ConsensusOutcome {
        contradiction_core: core.to_objects(&universe),
        consensus_ranking: order.iter().map(|&c| RankEntry::from_members(members(c))).collect(),
        undetermined: undetermined_clusters.iter().flat_map(|&c| members(c)).collect(),
    };

    let trace = ConsensusTrace {
        universe,
        relation_a,
        relation_b,
        inversion,
        core,
        consensus,
        equivalence,
        clusters,
        order,
        undetermined_clusters,
    };
    (outcome, trace)
}
