mod closure_tests;

use super::{Hierarchy, Relation};

/// Builds a `String` hierarchy from `(higher, lower)` pairs.
pub(super) fn chain(pairs: &[(&str, &str)]) -> Hierarchy<String> {
    let relations = pairs
        .iter()
        .map(|(h, l)| Relation::new(h.to_string(), l.to_string()).unwrap());
    Hierarchy::build(relations).unwrap()
}

pub(super) fn id(h: &Hierarchy<String>, name: &str) -> super::NodeId {
    h.id_of(&name.to_string())
        .unwrap_or_else(|| panic!("no node named {name}"))
}
