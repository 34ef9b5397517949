//! Leveled hierarchies: a [`Hierarchy`] composed with a level map.
//!
//! Levels are either computed from the topology
//! ([`LeveledHierarchy::from_hierarchy`]) or carried by the elements
//! themselves ([`LeveledHierarchy::from_leveled_relations`]), in which case the
//! cover relation is re-derived from the level difference instead of by
//! transitive reduction.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use hashbrown::HashMap;

use super::bounds::ElementLike;
use super::hierarchy::Hierarchy;
use super::node_id::{IdAllocator, NodeId};
use super::relation::{Leveled, LeveledRelation, Relation};
use crate::debug_invariants::DebugInvariants;
use crate::pref_error::PrefError;

/// A hierarchy whose every node carries a level (0 = top).
#[derive(Clone, Debug, PartialEq)]
pub struct LeveledHierarchy<E: ElementLike> {
    hierarchy: Hierarchy<E>,
    levels: BTreeMap<NodeId, u32>,
}

impl<E: ElementLike> Default for LeveledHierarchy<E> {
    fn default() -> Self {
        Self {
            hierarchy: Hierarchy::default(),
            levels: BTreeMap::new(),
        }
    }
}

impl<E: ElementLike> LeveledHierarchy<E> {
    /// Attaches longest-path levels to `hierarchy`.
    ///
    /// # Errors
    /// [`PrefError::UnleveledNode`] if some node cannot be leveled.
    pub fn from_hierarchy(hierarchy: Hierarchy<E>) -> Result<Self, PrefError> {
        let levels = hierarchy.compute_levels()?.clone();
        let leveled = Self { hierarchy, levels };
        crate::debug_invariants!(leveled.validate_invariants(), "LeveledHierarchy::from_hierarchy");
        Ok(leveled)
    }

    /// Shorthand for [`Hierarchy::build`] followed by [`Self::from_hierarchy`].
    pub fn build<I>(relations: I) -> Result<Self, PrefError>
    where
        I: IntoIterator<Item = Relation<E>>,
    {
        Self::from_hierarchy(Hierarchy::build(relations)?)
    }

    /// Builds a hierarchy from relations whose endpoints already carry levels.
    ///
    /// Ids are assigned per distinct `(element, level)` pair. `above`/`below`
    /// hold exactly the supplied pairs; `m` is directly below `n` iff the pair
    /// was supplied and `level(m) == level(n) + 1`. Elements in `isolated`
    /// that appear in no relation become standalone nodes.
    pub fn from_leveled_relations<R, I>(relations: R, isolated: I) -> Self
    where
        R: IntoIterator<Item = LeveledRelation<E>>,
        I: IntoIterator<Item = Leveled<E>>,
    {
        let mut alloc = IdAllocator::new();
        let mut ids: HashMap<Leveled<E>, NodeId> = HashMap::new();
        let mut elements = BTreeMap::new();
        let mut levels = BTreeMap::new();
        let mut intern = |leveled: Leveled<E>| -> NodeId {
            *ids.entry(leveled.clone()).or_insert_with(|| {
                let id = alloc.next_id();
                levels.insert(id, leveled.level);
                elements.insert(id, leveled.element);
                id
            })
        };

        let mut above: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        let mut below: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        for relation in relations {
            let (higher, lower) = relation.into_parts();
            let hi = intern(higher);
            let lo = intern(lower);
            below.entry(hi).or_default().insert(lo);
            above.entry(lo).or_default().insert(hi);
        }
        for leveled in isolated {
            intern(leveled);
        }

        let direct_below = below
            .iter()
            .map(|(&n, targets)| {
                let direct = targets
                    .iter()
                    .copied()
                    .filter(|m| levels[m] == levels[&n] + 1)
                    .collect::<BTreeSet<_>>();
                (n, direct)
            })
            .collect();

        let leveled = Self {
            hierarchy: Hierarchy::from_raw_parts(elements, above, below, direct_below),
            levels,
        };
        crate::debug_invariants!(
            leveled.validate_invariants(),
            "LeveledHierarchy::from_leveled_relations"
        );
        leveled
    }

    /// The underlying unleveled view.
    pub fn hierarchy(&self) -> &Hierarchy<E> {
        &self.hierarchy
    }

    pub fn levels(&self) -> &BTreeMap<NodeId, u32> {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.hierarchy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hierarchy.is_empty()
    }

    pub fn level(&self, id: NodeId) -> Option<u32> {
        self.levels.get(&id).copied()
    }

    pub fn element(&self, id: NodeId) -> Option<&E> {
        self.hierarchy.element(id)
    }

    /// `(element, level)` of node `id`.
    pub fn leveled(&self, id: NodeId) -> Option<Leveled<&E>> {
        Some(Leveled::new(self.element(id)?, self.level(id)?))
    }

    /// Deepest level present, or `None` for an empty hierarchy.
    pub fn highest_level(&self) -> Option<u32> {
        self.levels.values().copied().max()
    }

    pub fn nodes_at_level(&self, level: u32) -> BTreeSet<NodeId> {
        self.levels
            .iter()
            .filter_map(|(&id, &l)| (l == level).then_some(id))
            .collect()
    }

    /// Elements sitting at `level`.
    pub fn elements_at_level(&self, level: u32) -> Vec<&E> {
        self.nodes_at_level(level)
            .into_iter()
            .filter_map(|id| self.element(id))
            .collect()
    }

    /// Replaces every element, keeping topology and levels.
    ///
    /// # Errors
    /// [`PrefError::IncompatibleMapping`] unless `mapping` covers exactly the
    /// node ids of `self`.
    pub fn change_values<F: ElementLike>(
        self,
        mapping: BTreeMap<NodeId, F>,
    ) -> Result<LeveledHierarchy<F>, PrefError> {
        Ok(LeveledHierarchy {
            hierarchy: self.hierarchy.change_values(mapping)?,
            levels: self.levels,
        })
    }
}

impl<E: ElementLike> DebugInvariants for LeveledHierarchy<E> {
    const KIND: &'static str = "LeveledHierarchy";

    fn validate_invariants(&self) -> Result<(), PrefError> {
        self.hierarchy.validate_invariants()?;
        for n in self.hierarchy.nodes() {
            let Some(ln) = self.level(n) else {
                return Err(PrefError::BrokenInvariant(format!("node {n} has no level")));
            };
            for &m in self.hierarchy.directly_below(n) {
                let lm = self.level(m).unwrap_or(0);
                if lm <= ln {
                    return Err(PrefError::BrokenInvariant(format!(
                        "direct edge {n} -> {m} does not descend ({ln} -> {lm})"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One line per node, grouped by level: the node followed by all of its
/// descendants in level order.
impl<E: ElementLike> fmt::Display for LeveledHierarchy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(highest) = self.highest_level() else {
            return Ok(());
        };
        for level in 0..=highest {
            for id in self.nodes_at_level(level) {
                let Some(head) = self.leveled(id) else { continue };
                write!(f, "chain of {head} ->")?;
                let mut chain: Vec<NodeId> = self.hierarchy.below(id).iter().copied().collect();
                chain.sort_by_key(|c| (self.level(*c), *c));
                for child in chain {
                    if let Some(node) = self.leveled(child) {
                        write!(f, " {node} |>")?;
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
