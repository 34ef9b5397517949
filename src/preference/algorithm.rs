//! The preference pipeline, end to end.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{AlgorithmConfig, Schema};
use crate::hierarchy::{LeveledHierarchy, Relation};
use crate::pref_error::PrefError;
use crate::preference::cartesian::CartesianMerge;
use crate::preference::expansion::expand_hierarchy;
use crate::preference::formula::Formula;
use crate::preference::node::{Attribute, PreQueryNode};
use crate::preference::promotion::PreferencePartition;
use crate::preference::tuples::map_to_tuples;
use crate::source::{DataSource, MaybeSync};
use crate::taxonomy::Taxonomy;

/// Builds the hierarchy between the two sides of every clause.
///
/// Clauses whose sides cannot form a pair of constraint nodes are skipped
/// with a warning.
///
/// # Errors
/// [`PrefError::CycleDetected`] if the remaining clauses contradict each
/// other.
pub fn formula_hierarchy(formula: &Formula) -> Result<LeveledHierarchy<PreQueryNode>, PrefError> {
    let relations: Vec<Relation<PreQueryNode>> = formula
        .clauses
        .iter()
        .filter_map(|clause| match clause.to_relation() {
            Ok(r) => Some(r),
            Err(e) => {
                log::warn!("skipping clause {clause:?}: {e}");
                None
            }
        })
        .collect();
    log::debug!(
        "formula hierarchy: {} of {} clauses kept",
        relations.len(),
        formula.clauses.len()
    );
    LeveledHierarchy::build(relations)
}

/// Evaluates one preference formula over a relation.
#[derive(Clone, Debug)]
pub struct PreferenceEngine {
    formula: Formula,
    ordering: Vec<Attribute>,
    taxonomies: BTreeMap<Attribute, Taxonomy>,
}

impl PreferenceEngine {
    /// Validates `config` against `schema` and builds the taxonomies.
    /// Trivial clauses are removed from `formula`.
    ///
    /// # Errors
    /// [`PrefError::AttributeSetMismatch`] if the schema and the configuration
    /// name different attributes, or if the configuration is inconsistent.
    pub fn new(formula: Formula, schema: &Schema, config: &AlgorithmConfig) -> Result<Self, PrefError> {
        let configured: BTreeSet<&str> = config.attributes();
        let declared: BTreeSet<&str> = schema.attributes.iter().map(String::as_str).collect();
        if configured != declared {
            return Err(PrefError::AttributeSetMismatch(format!(
                "schema has [{}], configuration has [{}]",
                itertools::join(&declared, ", "),
                itertools::join(&configured, ", ")
            )));
        }
        Ok(Self {
            formula: formula.cleaned(),
            ordering: config.attribute_ordering.clone(),
            taxonomies: config.build_taxonomies()?,
        })
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn taxonomies(&self) -> &BTreeMap<Attribute, Taxonomy> {
        &self.taxonomies
    }

    /// The merged and expanded constraint hierarchy, before any tuple is
    /// fetched.
    pub fn query_hierarchy<S: DataSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<LeveledHierarchy<PreQueryNode>, PrefError> {
        let nodes = formula_hierarchy(&self.formula)?;
        let merged = CartesianMerge::new(&nodes).merged_hierarchy()?;
        expand_hierarchy(merged, &self.taxonomies, source)
    }

    /// Runs the whole pipeline and returns the preference groups, most
    /// preferred first. Levels with nothing left to emit are dropped.
    pub fn preferred_tuples<S: DataSource + MaybeSync + ?Sized>(
        &self,
        source: &S,
    ) -> Result<PreferencePartition, PrefError> {
        let expanded = self.query_hierarchy(source)?;
        let tuples = map_to_tuples(expanded, &self.ordering, source)?;
        let partition = PreferencePartition::promote(&tuples).non_empty();
        log::debug!("promotion: {} groups", partition.len());
        Ok(partition)
    }
}
