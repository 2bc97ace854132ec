//! Contradiction detection between two relation matrices.
//!
//! # Rule
//!
//! ```text
//! P1 = YA ∧ YBᵗ      A puts i at/before j, B puts j at/before i
//! P2 = YAᵗ ∧ YB      the same signal seen from B
//! P  = P1 ∨ P2       inversion signal
//! ```
//!
//! A pair `{i, j}` is contradictory when it carries an inversion signal and
//! the two rankings agree on neither direction (`YA ∧ YB` false both ways).
//! For objects present in both rankings that is exactly "one ranking puts i
//! strictly first, the other puts j strictly first". Ties in either ranking
//! resolve the pair, and objects missing from a ranking never carry a signal.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::matrix::BoolMatrix;
use crate::object::RankedObject;
use crate::universe::ObjectUniverse;

/// Unordered, unique index pairs stored as `(i, j)` with `i < j`,
/// ascending lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContradictionCore {
    pairs: Vec<(usize, usize)>,
}

impl ContradictionCore {
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether `{i, j}` is in the core, in either orientation.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        let key = (i.min(j), i.max(j));
        self.pairs.binary_search(&key).is_ok()
    }

    /// Resolve indices to objects.
    pub fn to_objects(&self, universe: &ObjectUniverse) -> Vec<[RankedObject; 2]> {
        self.pairs
            .iter()
            .map(|&(i, j)| [universe.object(i).clone(), universe.object(j).clone()])
            .collect()
    }
}

/// The `P` matrix: where either ranking's viewpoint signals an inversion.
pub fn inversion_signal(ya: &BoolMatrix, yb: &BoolMatrix) -> BoolMatrix {
    let p1 = ya.and(&yb.transpose());
    let p2 = ya.transpose().and(yb);
    p1.or(&p2)
}

/// Detect the contradiction core of two relation matrices.
pub fn detect(ya: &BoolMatrix, yb: &BoolMatrix) -> ContradictionCore {
    let signal = inversion_signal(ya, yb);
    let agreement = ya.and(yb);
    let n = ya.size();

    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let inverted = signal.get(i, j) || signal.get(j, i);
            let resolved = agreement.get(i, j) || agreement.get(j, i);
            if inverted && !resolved {
                pairs.push((i, j));
            }
        }
    }
    ContradictionCore { pairs }
}

/// Core pairs serialized as index pairs; see [`ContradictionCore::to_objects`]
/// for the object form.
impl Serialize for ContradictionCore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.pairs.len()))?;
        for (i, j) in &self.pairs {
            seq.serialize_element(&[i, j])?;
        }
        seq.end()
    }
}
