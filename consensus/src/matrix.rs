//! Dense boolean relation matrices over an object universe.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::ranking::Ranking;
use crate::universe::ObjectUniverse;

/// An n×n boolean matrix stored row-major.
///
/// `get(i, j)` reads as "i is related to j". Elementwise operators require
/// both operands to have the same size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolMatrix {
    cells: Vec<bool>,
    size: usize,
}

impl BoolMatrix {
    /// All-false matrix.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![false; size * size],
            size,
        }
    }

    /// Matrix with only the diagonal set.
    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::new(size);
        for i in 0..size {
            matrix.set(i, i, true);
        }
        matrix
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.size + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: bool) {
        self.cells[i * self.size + j] = value;
    }

    pub fn transpose(&self) -> Self {
        self.map_cells(|i, j| self.get(j, i))
    }

    /// Elementwise AND.
    pub fn and(&self, other: &Self) -> Self {
        debug_assert_eq!(self.size, other.size, "matrix size mismatch");
        self.map_cells(|i, j| self.get(i, j) && other.get(i, j))
    }

    /// Elementwise OR.
    pub fn or(&self, other: &Self) -> Self {
        debug_assert_eq!(self.size, other.size, "matrix size mismatch");
        self.map_cells(|i, j| self.get(i, j) || other.get(i, j))
    }

    /// `M ∧ Mᵗ`: the pairs related in both directions.
    pub fn symmetric_part(&self) -> Self {
        self.map_cells(|i, j| self.get(i, j) && self.get(j, i))
    }

    fn map_cells(&self, f: impl Fn(usize, usize) -> bool) -> Self {
        let n = self.size;
        let cells = (0..n * n).map(|k| f(k / n, k % n)).collect();
        Self { cells, size: n }
    }
}

impl Serialize for BoolMatrix {
    /// Serialized as rows of 0/1, the conventional relation-matrix notation.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for i in 0..self.size {
            let row: Vec<u8> = (0..self.size).map(|j| u8::from(self.get(i, j))).collect();
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

/// Build the weak-order indicator matrix of one ranking.
///
/// `M[idx(a)][idx(b)]` is set whenever the group of `a` comes at or before
/// the group of `b`. Universe objects the ranking does not mention stay
/// incomparable: their row and column are false apart from the diagonal.
pub fn relation_matrix(universe: &ObjectUniverse, ranking: &Ranking) -> BoolMatrix {
    let mut matrix = BoolMatrix::identity(universe.len());
    let positioned: Vec<Vec<usize>> = ranking
        .groups()
        .iter()
        .map(|group| group.members().filter_map(|o| universe.idx(o)).collect())
        .collect();

    for (p, earlier) in positioned.iter().enumerate() {
        for later in &positioned[p..] {
            for &a in earlier {
                for &b in later {
                    matrix.set(a, b, true);
                }
            }
        }
    }
    matrix
}
