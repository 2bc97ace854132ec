//! Ranking Consensus Library
//!
//! Computes a consensus ranking of two weak orders (rankings with tie
//! groups) over a shared set of objects, together with the contradiction
//! core: the pairs the two rankings order in opposite directions.
//!
//! # Pipeline
//!
//! - `ranking`: flatten raw tie trees into ordered groups
//! - `universe`: sorted union of objects, fixed index assignment
//! - `matrix`: weak-order relation matrix per ranking
//! - `contradiction`: inversion signal and contradiction core
//! - `closure`: consensus matrix, tie-equivalence closure, clusters
//! - `sequencer`: stable topological order of clusters
//!
//! # Usage
//!
//! ```
//! use consensus::{compute_consensus, Ranking};
//!
//! let first = Ranking::from_groups(vec![vec![1i64], vec![2], vec![3]]);
//! let second = Ranking::from_groups(vec![vec![2i64], vec![1], vec![3]]);
//! let outcome = compute_consensus(&first, &second);
//!
//! assert_eq!(outcome.contradiction_core.len(), 1);
//! assert_eq!(
//!     serde_json::to_string(&outcome).unwrap(),
//!     r#"{"contradictionCore":[[1,2]],"consensusRanking":[[1,2],3]}"#
//! );
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod closure;
pub mod config;
pub mod contradiction;
pub mod engine;
pub mod error;
pub mod json;
pub mod matrix;
pub mod object;
pub mod ranking;
pub mod sequencer;
pub mod universe;

pub use closure::{Cluster, Clustering};
pub use config::{ConsensusConfig, CyclePolicy, CYCLE_POLICY_ENV};
pub use contradiction::ContradictionCore;
pub use engine::{compute_consensus, ConsensusEngine, ConsensusOutcome, ConsensusTrace, RankEntry};
pub use error::{ConsensusError, ConsensusResult};
pub use json::{compute_consensus_json, consensus_from_json, parse_ranking, parse_raw_ranking};
pub use matrix::{relation_matrix, BoolMatrix};
pub use object::RankedObject;
pub use ranking::{Group, Ranking, RawElement};
pub use sequencer::SequencedClusters;
pub use universe::ObjectUniverse;
