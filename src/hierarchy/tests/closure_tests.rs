use std::collections::{BTreeMap, BTreeSet};

use super::{chain, id};
use crate::debug_invariants::DebugInvariants;
use crate::hierarchy::{Hierarchy, NodeId, Relation};
use crate::pref_error::PrefError;

fn names(h: &Hierarchy<String>, ids: &BTreeSet<NodeId>) -> BTreeSet<String> {
    ids.iter().filter_map(|i| h.element(*i).cloned()).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn ids_follow_first_seen_order_and_are_reused() {
    let h = chain(&[("a", "b"), ("b", "c"), ("a", "c")]);
    assert_eq!(h.len(), 3);
    assert_eq!(id(&h, "a"), NodeId::new(0));
    assert_eq!(id(&h, "b"), NodeId::new(1));
    assert_eq!(id(&h, "c"), NodeId::new(2));
}

#[test]
fn below_and_above_are_closed_and_inverse() {
    let h = chain(&[("a", "b"), ("b", "c"), ("c", "d")]);
    assert_eq!(names(&h, h.below(id(&h, "a"))), set(&["b", "c", "d"]));
    assert_eq!(names(&h, h.above(id(&h, "d"))), set(&["a", "b", "c"]));
    assert!(h.is_below(id(&h, "b"), id(&h, "d")));
    assert!(!h.is_below(id(&h, "d"), id(&h, "b")));
    assert!(h.validate_invariants().is_ok());
}

#[test]
fn shortcut_edge_is_removed_from_cover_relation() {
    let h = chain(&[("a", "b"), ("b", "c"), ("a", "c")]);
    let a = id(&h, "a");
    assert_eq!(names(&h, h.directly_below(a)), set(&["b"]));
    // still reachable
    assert!(h.below(a).contains(&id(&h, "c")));
}

#[test]
fn diamond_keeps_both_branches() {
    let h = chain(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("a", "d")]);
    let a = id(&h, "a");
    let d = id(&h, "d");
    assert_eq!(names(&h, h.directly_below(a)), set(&["b", "c"]));
    assert_eq!(names(&h, &h.directly_above(d)), set(&["b", "c"]));
    assert_eq!(names(&h, &h.top_nodes()), set(&["a"]));
}

#[test]
fn no_direct_edge_is_implied_by_a_two_step_path() {
    let h = chain(&[
        ("r", "x"),
        ("x", "y"),
        ("y", "z"),
        ("r", "y"),
        ("r", "z"),
        ("x", "z"),
        ("q", "z"),
    ]);
    for n in h.nodes() {
        assert!(h.directly_below(n).is_subset(h.below(n)));
        for &d in h.directly_below(n) {
            assert!(!h.below(n).iter().any(|c| h.below(*c).contains(&d)));
        }
    }
}

#[test]
fn unknown_ids_behave_as_empty() {
    let h = chain(&[("a", "b")]);
    let ghost = NodeId::new(99);
    assert!(h.below(ghost).is_empty());
    assert!(h.above(ghost).is_empty());
    assert!(h.directly_below(ghost).is_empty());
    assert!(h.directly_above(ghost).is_empty());
    assert!(h.element(ghost).is_none());
}

#[test]
fn cycle_is_rejected() {
    let relations = [("a", "b"), ("b", "c"), ("c", "a")]
        .iter()
        .map(|(x, y)| Relation::new(x.to_string(), y.to_string()).unwrap());
    assert_eq!(Hierarchy::build(relations), Err(PrefError::CycleDetected));
}

#[test]
fn empty_relations_give_empty_hierarchy() {
    let h: Hierarchy<String> = Hierarchy::build(Vec::new()).unwrap();
    assert!(h.is_empty());
    assert!(h.top_nodes().is_empty());
    assert!(h.compute_levels().unwrap().is_empty());
}

#[test]
fn broken_inverse_is_reported() {
    let a = NodeId::new(0);
    let b = NodeId::new(1);
    let elements = BTreeMap::from([(a, "a".to_string()), (b, "b".to_string())]);
    let below = BTreeMap::from([(a, BTreeSet::from([b]))]);
    let h = Hierarchy::from_raw_parts(elements, BTreeMap::new(), below, BTreeMap::new());
    assert!(matches!(
        h.validate_invariants(),
        Err(PrefError::BrokenInvariant(_))
    ));
}

#[cfg(any(debug_assertions, feature = "strict-invariants"))]
#[test]
#[should_panic]
fn broken_cover_relation_panics_in_debug() {
    let a = NodeId::new(0);
    let b = NodeId::new(1);
    let elements = BTreeMap::from([(a, "a".to_string()), (b, "b".to_string())]);
    let direct = BTreeMap::from([(a, BTreeSet::from([b]))]);
    let h = Hierarchy::from_raw_parts(elements, BTreeMap::new(), BTreeMap::new(), direct);
    h.debug_assert_invariants();
}
