//! Cartesian merge of formula nodes into finer equivalence classes.
//!
//! Every node of the formula hierarchy is merged, recursively, with every
//! node over a disjoint attribute set. A merged node's level is the sum of
//! its parts' levels. Nodes that cannot be merged any further are kept and
//! re-related: `a` sits above `b` iff both carry an identical constraint and
//! `a` has the strictly smaller level.
//!
//! The number of merged nodes is exponential in the number of independent
//! attributes in the worst case.

use std::collections::BTreeSet;

use hashbrown::HashSet;

use crate::hierarchy::{Leveled, LeveledHierarchy, LeveledRelation};
use crate::pref_error::PrefError;
use crate::preference::node::PreQueryNode;

/// Recursive merge over the nodes of one leveled hierarchy.
#[derive(Debug)]
pub struct CartesianMerge<'a> {
    old: &'a LeveledHierarchy<PreQueryNode>,
    seeds: Vec<Leveled<PreQueryNode>>,
    depth_bound: usize,
    visited: HashSet<Leveled<PreQueryNode>>,
    merged: BTreeSet<Leveled<PreQueryNode>>,
}

impl<'a> CartesianMerge<'a> {
    pub fn new(old: &'a LeveledHierarchy<PreQueryNode>) -> Self {
        let seeds: Vec<Leveled<PreQueryNode>> = old
            .hierarchy()
            .nodes()
            .filter_map(|id| old.leveled(id))
            .map(|l| Leveled::new(l.element.clone(), l.level))
            .collect();
        let depth_bound = seeds
            .iter()
            .flat_map(|l| l.element.attributes())
            .collect::<BTreeSet<_>>()
            .len();
        Self {
            old,
            seeds,
            depth_bound,
            visited: HashSet::new(),
            merged: BTreeSet::new(),
        }
    }

    /// Maximum merge depth: the number of distinct attributes constrained
    /// anywhere in the hierarchy.
    pub fn depth_bound(&self) -> usize {
        self.depth_bound
    }

    /// Every maximal merged node with its summed level.
    ///
    /// # Errors
    /// [`PrefError::MergeDepthExceeded`] if a merge chain grows longer than
    /// [`Self::depth_bound`].
    pub fn merged_nodes(mut self) -> Result<BTreeSet<Leveled<PreQueryNode>>, PrefError> {
        self.run()?;
        Ok(self.merged)
    }

    /// Rebuilds the leveled hierarchy over the merged nodes.
    ///
    /// Merged nodes that share no constraint with any other are kept as
    /// isolated nodes, so their tuples still reach the partition.
    ///
    /// Returns a clone of the input hierarchy when no two merged nodes share
    /// a constraint at different levels.
    pub fn merged_hierarchy(mut self) -> Result<LeveledHierarchy<PreQueryNode>, PrefError> {
        self.run()?;
        let nodes: Vec<&Leveled<PreQueryNode>> = self.merged.iter().collect();
        let mut relations = Vec::new();
        for a in &nodes {
            for b in &nodes {
                if a.level < b.level && a.element.shares_value(&b.element) {
                    relations.push(LeveledRelation::new((*a).clone(), (*b).clone())?);
                }
            }
        }
        log::debug!(
            "cartesian merge: {} formula nodes, {} merged nodes, {} relations",
            self.seeds.len(),
            self.merged.len(),
            relations.len()
        );
        if relations.is_empty() {
            return Ok(self.old.clone());
        }
        Ok(LeveledHierarchy::from_leveled_relations(
            relations,
            self.merged,
        ))
    }

    fn run(&mut self) -> Result<(), PrefError> {
        let seeds = self.seeds.clone();
        for node in seeds {
            self.add_recursive(node, 0)?;
        }
        Ok(())
    }

    fn add_recursive(&mut self, node: Leveled<PreQueryNode>, depth: usize) -> Result<(), PrefError> {
        if depth > self.depth_bound {
            return Err(PrefError::MergeDepthExceeded {
                bound: self.depth_bound,
                node: node.to_string(),
            });
        }
        if !self.visited.insert(node.clone()) {
            return Ok(());
        }
        let compatible: Vec<Leveled<PreQueryNode>> = self
            .seeds
            .iter()
            .filter(|seed| seed.element.is_compatible(&node.element))
            .cloned()
            .collect();
        if compatible.is_empty() {
            self.merged.insert(node);
            return Ok(());
        }
        for other in compatible {
            let merged = Leveled::new(
                node.element.merge(&other.element)?,
                node.level + other.level,
            );
            self.add_recursive(merged, depth + 1)?;
        }
        Ok(())
    }
}
