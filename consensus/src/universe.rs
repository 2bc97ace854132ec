//! Object universe: the shared index space of every matrix in one call.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::object::RankedObject;
use crate::ranking::Ranking;

/// Sorted, deduplicated union of the objects of both rankings.
///
/// Index assignment follows the sort order, so two rankings over the same
/// objects always produce matrices with identical indices. Built fresh for
/// every consensus computation and passed explicitly to each stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObjectUniverse {
    objects: Vec<RankedObject>,
    #[serde(skip)]
    index: HashMap<RankedObject, usize>,
}

impl ObjectUniverse {
    /// Build the universe of two rankings.
    pub fn build(first: &Ranking, second: &Ranking) -> Self {
        let objects: Vec<RankedObject> = first
            .objects()
            .chain(second.objects())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index = objects
            .iter()
            .enumerate()
            .map(|(i, object)| (object.clone(), i))
            .collect();
        Self { objects, index }
    }

    /// Index of an object, if it belongs to the universe.
    pub fn idx(&self, object: &RankedObject) -> Option<usize> {
        self.index.get(object).copied()
    }

    /// Object at an index.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn object(&self, index: usize) -> &RankedObject {
        &self.objects[index]
    }

    pub fn objects(&self) -> &[RankedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
