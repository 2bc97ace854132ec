//! Ranking normalization: raw tie trees flattened into ordered groups.
//!
//! A raw ranking is a sequence whose elements are either bare objects or
//! nested sequences of tied objects. Nesting of any depth collapses into a
//! single group; the core never sees a tree of ties.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::object::RankedObject;

/// One element of a raw, not yet normalized ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawElement {
    /// A single object.
    Atom(RankedObject),
    /// A group of tied objects, possibly nested further.
    Nested(Vec<RawElement>),
}

impl RawElement {
    /// Build a raw element from a JSON value.
    ///
    /// Arrays become nested groups; every other value is an atom.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::Nested(items.iter().map(Self::from_json).collect()),
            other => Self::Atom(RankedObject::from_json(other)),
        }
    }

    fn collect_into(&self, out: &mut BTreeSet<RankedObject>) {
        match self {
            Self::Atom(object) => {
                out.insert(object.clone());
            }
            Self::Nested(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
        }
    }
}

impl From<RankedObject> for RawElement {
    fn from(object: RankedObject) -> Self {
        Self::Atom(object)
    }
}

impl From<i64> for RawElement {
    fn from(value: i64) -> Self {
        Self::Atom(RankedObject::Int(value))
    }
}

impl From<&str> for RawElement {
    fn from(value: &str) -> Self {
        Self::Atom(RankedObject::from(value))
    }
}

/// A non-empty set of tied objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group(BTreeSet<RankedObject>);

impl Group {
    /// Members in ascending object order.
    pub fn members(&self) -> impl Iterator<Item = &RankedObject> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, object: &RankedObject) -> bool {
        self.0.contains(object)
    }
}

/// An ordered sequence of groups: strict precedence between groups,
/// indifference within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ranking {
    groups: Vec<Group>,
}

impl Ranking {
    /// Normalize a raw ranking.
    ///
    /// Never fails. Elements that flatten to nothing are dropped.
    pub fn normalize(raw: &[RawElement]) -> Self {
        let groups = raw
            .iter()
            .filter_map(|element| {
                let mut members = BTreeSet::new();
                element.collect_into(&mut members);
                (!members.is_empty()).then_some(Group(members))
            })
            .collect();
        Self { groups }
    }

    /// Normalize a ranking whose groups are already flat.
    pub fn from_groups<I, G, O>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = O>,
        O: Into<RankedObject>,
    {
        let groups = groups
            .into_iter()
            .map(|g| g.into_iter().map(Into::into).collect::<BTreeSet<_>>())
            .filter(|members| !members.is_empty())
            .map(Group)
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Every object of every group, in group order.
    pub fn objects(&self) -> impl Iterator<Item = &RankedObject> {
        self.groups.iter().flat_map(Group::members)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ints(values: &[i64]) -> Vec<RankedObject> {
        values.iter().copied().map(RankedObject::Int).collect()
    }

    #[test]
    fn test_atoms_become_singleton_groups() {
        let ranking = Ranking::normalize(&[1i64.into(), 2i64.into(), 3i64.into()]);
        assert_eq!(ranking.len(), 3);
        for (group, expected) in ranking.groups().iter().zip(1..) {
            assert_eq!(group.members().cloned().collect::<Vec<_>>(), ints(&[expected]));
        }
    }

    #[test]
    fn test_nested_group_is_tie() {
        let raw = RawElement::from_json(&json!([1, [2, 3], 4]));
        let RawElement::Nested(items) = raw else {
            panic!("expected a sequence");
        };
        let ranking = Ranking::normalize(&items);
        assert_eq!(ranking.len(), 3);
        assert_eq!(
            ranking.groups()[1].members().cloned().collect::<Vec<_>>(),
            ints(&[2, 3])
        );
    }

    #[test]
    fn test_deep_nesting_flattens_to_one_group() {
        let raw = RawElement::from_json(&json!([[5, [3, [4]]], 1]));
        let RawElement::Nested(items) = raw else {
            panic!("expected a sequence");
        };
        let ranking = Ranking::normalize(&items);
        assert_eq!(ranking.len(), 2);
        assert_eq!(
            ranking.groups()[0].members().cloned().collect::<Vec<_>>(),
            ints(&[3, 4, 5])
        );
    }

    #[test]
    fn test_empty_nested_group_dropped() {
        let raw = vec![1i64.into(), RawElement::Nested(vec![]), 2i64.into()];
        let ranking = Ranking::normalize(&raw);
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn test_duplicates_within_group_collapse() {
        let ranking = Ranking::from_groups(vec![vec![1i64, 1, 2]]);
        assert_eq!(ranking.groups()[0].len(), 2);
    }

    #[test]
    fn test_unrecognized_values_are_atoms() {
        let raw = RawElement::from_json(&json!([true, null, 2.5]));
        let RawElement::Nested(items) = raw else {
            panic!("expected a sequence");
        };
        let ranking = Ranking::normalize(&items);
        assert_eq!(ranking.len(), 3);
        assert!(ranking.groups()[0].contains(&RankedObject::from("true")));
        assert!(ranking.groups()[1].contains(&RankedObject::from("null")));
        assert!(ranking.groups()[2].contains(&RankedObject::from("2.5")));
    }

    #[test]
    fn test_objects_in_group_order() {
        let ranking = Ranking::from_groups(vec![vec!["c"], vec!["b", "a"]]);
        let objects: Vec<_> = ranking.objects().map(ToString::to_string).collect();
        assert_eq!(objects, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_serialized_groups_are_never_empty() {
        let empty: Vec<i64> = Vec::new();
        let ranking = Ranking::from_groups(vec![vec![3i64], empty, vec![2, 1]]);
        assert_eq!(
            serde_json::to_value(&ranking).unwrap(),
            json!({"groups": [[3], [1, 2]]})
        );
    }
}
