//! Final partition of tuple sets into preference groups.
//!
//! Levels are visited top down. A level's group holds its own non-empty tuple
//! sets plus every deeper set that nothing blocks: a set is blocked at level
//! `L` while one of its ancestors at level `L` or deeper is non-empty. Each
//! tuple set is emitted at most once, in the first group that accepts it.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::hierarchy::{LeveledHierarchy, NodeId};
use crate::preference::node::{Tuple, TuplesResult};

/// Tuple sets emitted at one level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PreferenceGroup {
    pub level: u32,
    pub tuples: BTreeSet<TuplesResult>,
}

impl PreferenceGroup {
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Every tuple of the group.
    pub fn rows(&self) -> BTreeSet<&Tuple> {
        self.tuples.iter().flat_map(|t| t.tuples()).collect()
    }
}

/// Preference groups, most preferred first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PreferencePartition {
    groups: Vec<PreferenceGroup>,
}

impl PreferencePartition {
    /// Promotes the tuple sets of `hierarchy` into groups.
    ///
    /// Levels with nothing to emit still produce an empty group; see
    /// [`Self::non_empty`] to drop them.
    pub fn promote(hierarchy: &LeveledHierarchy<TuplesResult>) -> Self {
        let Some(highest) = hierarchy.highest_level() else {
            return Self::default();
        };
        let mut emitted: BTreeSet<TuplesResult> = BTreeSet::new();
        let mut groups = Vec::with_capacity(highest as usize + 1);

        for level in 0..=highest {
            let mut group: BTreeSet<TuplesResult> = pending_at(hierarchy, level, &emitted)
                .into_iter()
                .filter_map(|id| hierarchy.element(id).cloned())
                .collect();
            for deeper in level + 1..=highest {
                for id in pending_at(hierarchy, deeper, &emitted) {
                    if is_unblocked(hierarchy, id, level) {
                        if let Some(t) = hierarchy.element(id) {
                            log::trace!("promoting {t} from level {deeper} to {level}");
                            group.insert(t.clone());
                        }
                    }
                }
            }
            emitted.extend(group.iter().cloned());
            groups.push(PreferenceGroup {
                level,
                tuples: group,
            });
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[PreferenceGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Same partition without empty groups.
    pub fn non_empty(self) -> Self {
        Self {
            groups: self.groups.into_iter().filter(|g| !g.is_empty()).collect(),
        }
    }

    /// Tuple sets in emission order.
    pub fn flatten(&self) -> Vec<&TuplesResult> {
        self.groups.iter().flat_map(|g| g.tuples.iter()).collect()
    }
}

/// Nodes at `level` with a non-empty tuple set not emitted yet.
fn pending_at(
    hierarchy: &LeveledHierarchy<TuplesResult>,
    level: u32,
    emitted: &BTreeSet<TuplesResult>,
) -> BTreeSet<NodeId> {
    hierarchy
        .nodes_at_level(level)
        .into_iter()
        .filter(|&id| {
            hierarchy
                .element(id)
                .is_some_and(|t| !t.is_empty() && !emitted.contains(t))
        })
        .collect()
}

/// No ancestor of `id` at `level` or deeper holds any tuple.
fn is_unblocked(hierarchy: &LeveledHierarchy<TuplesResult>, id: NodeId, level: u32) -> bool {
    hierarchy.hierarchy().above(id).iter().all(|&a| {
        hierarchy.level(a).is_none_or(|l| l < level)
            || hierarchy.element(a).is_none_or(|t| t.is_empty())
    })
}
