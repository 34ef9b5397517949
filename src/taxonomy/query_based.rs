//! Taxonomies whose static part is a value hierarchy and whose leaves are
//! looked up in the data source.

use std::collections::BTreeSet;

use crate::hierarchy::{Hierarchy, Relation};
use crate::pref_error::PrefError;
use crate::preference::node::{Attribute, Value};
use crate::source::{CountQuery, DataSource, ValueQuery};

#[derive(Clone, Debug)]
pub struct QueryTaxonomy {
    attribute: Attribute,
    statics: Hierarchy<Value>,
}

impl QueryTaxonomy {
    /// Builds the static hierarchy from `(specific, generic)` links.
    ///
    /// # Errors
    /// [`PrefError::SelfRelation`] for a link from a value to itself,
    /// [`PrefError::CycleDetected`] for cyclic links.
    pub fn new<I>(attribute: impl Into<Attribute>, links: I) -> Result<Self, PrefError>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let relations = links
            .into_iter()
            .map(|(specific, generic)| Relation::new(generic, specific))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            attribute: attribute.into(),
            statics: Hierarchy::build(relations)?,
        })
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn static_hierarchy(&self) -> &Hierarchy<Value> {
        &self.statics
    }

    /// A value is a leaf iff it occurs in the relation.
    pub fn is_leaf_value<S: DataSource + ?Sized>(
        &self,
        value: &Value,
        source: &S,
    ) -> Result<bool, PrefError> {
        let query = CountQuery {
            attribute: self.attribute.clone(),
            value: value.clone(),
        };
        Ok(source.count_matching(&query)? > 0)
    }

    /// Direct generalizations of `value`: static parents when `value` is a
    /// static node, otherwise whatever the source links it to.
    pub fn fathers_of<S: DataSource + ?Sized>(
        &self,
        value: &Value,
        source: &S,
    ) -> Result<BTreeSet<Value>, PrefError> {
        if let Some(id) = self.statics.id_of(value) {
            return Ok(self
                .statics
                .directly_above(id)
                .into_iter()
                .filter_map(|p| self.statics.element(p).cloned())
                .collect());
        }
        let query = ValueQuery::ParentsOf {
            attribute: self.attribute.clone(),
            value: value.clone(),
        };
        Ok(source
            .fetch_distinct_values(&query)?
            .into_iter()
            .map(|pair| pair.value)
            .collect())
    }

    /// Static values strictly below `value`.
    pub fn descendants_of(&self, value: &Value) -> BTreeSet<Value> {
        let Some(id) = self.statics.id_of(value) else {
            return BTreeSet::new();
        };
        self.statics
            .below(id)
            .iter()
            .filter_map(|d| self.statics.element(*d).cloned())
            .collect()
    }

    /// Relation values linked directly below the static node `value`.
    pub fn leaves_under<S: DataSource + ?Sized>(
        &self,
        value: &Value,
        source: &S,
    ) -> Result<BTreeSet<Value>, PrefError> {
        let query = ValueQuery::ChildrenOf {
            attribute: self.attribute.clone(),
            parent: value.clone(),
        };
        Ok(source
            .fetch_distinct_values(&query)?
            .into_iter()
            .map(|pair| pair.value)
            .collect())
    }

    /// Leaves pass through; a generic value is replaced by the leaves linked
    /// below it or below any of its non-leaf static descendants.
    pub fn expand<S: DataSource + ?Sized>(
        &self,
        values: &BTreeSet<Value>,
        source: &S,
    ) -> Result<BTreeSet<Value>, PrefError> {
        let mut expanded = BTreeSet::new();
        for value in values {
            if self.is_leaf_value(value, source)? {
                expanded.insert(value.clone());
                continue;
            }
            let mut generic = BTreeSet::from([value.clone()]);
            for d in self.descendants_of(value) {
                if !self.is_leaf_value(&d, source)? {
                    generic.insert(d);
                }
            }
            for g in &generic {
                expanded.extend(self.leaves_under(g, source)?);
            }
        }
        Ok(expanded)
    }
}
