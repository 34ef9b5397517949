//! Taxonomy lookup over attribute values.
//!
//! Every attribute of the relation is governed by one [`Taxonomy`]:
//! - [`RuleTaxonomy`]: static values are numeric rules, leaves are raw
//!   values contained in them,
//! - [`QueryTaxonomy`]: a static value hierarchy whose leaves are looked up
//!   through the [`DataSource`],
//! - `Flat`: no generalization at all.

pub mod query_based;
pub mod rule_based;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use query_based::QueryTaxonomy;
pub use rule_based::RuleTaxonomy;

use crate::pref_error::PrefError;
use crate::preference::node::Value;
use crate::source::DataSource;

/// Which kind of taxonomy governs an attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyKind {
    RuleBased,
    QueryBased,
    Flat,
}

#[derive(Clone, Debug)]
pub enum Taxonomy {
    RuleBased(RuleTaxonomy),
    QueryBased(QueryTaxonomy),
    Flat,
}

impl Taxonomy {
    pub fn kind(&self) -> TaxonomyKind {
        match self {
            Taxonomy::RuleBased(_) => TaxonomyKind::RuleBased,
            Taxonomy::QueryBased(_) => TaxonomyKind::QueryBased,
            Taxonomy::Flat => TaxonomyKind::Flat,
        }
    }

    pub fn is_leaf_value<S: DataSource + ?Sized>(
        &self,
        value: &Value,
        source: &S,
    ) -> Result<bool, PrefError> {
        match self {
            Taxonomy::RuleBased(t) => Ok(!t.is_static(value)),
            Taxonomy::QueryBased(t) => t.is_leaf_value(value, source),
            Taxonomy::Flat => Ok(true),
        }
    }

    /// Direct generalizations of `value`.
    pub fn fathers_of<S: DataSource + ?Sized>(
        &self,
        value: &Value,
        source: &S,
    ) -> Result<BTreeSet<Value>, PrefError> {
        match self {
            Taxonomy::RuleBased(t) => t.fathers_of(value),
            Taxonomy::QueryBased(t) => t.fathers_of(value, source),
            Taxonomy::Flat => Ok(BTreeSet::new()),
        }
    }

    /// Every value `value` generalizes.
    pub fn descendants_of<S: DataSource + ?Sized>(
        &self,
        value: &Value,
        source: &S,
    ) -> Result<BTreeSet<Value>, PrefError> {
        match self {
            Taxonomy::RuleBased(t) if t.is_static(value) => t.leaves_under(value, source),
            Taxonomy::RuleBased(_) | Taxonomy::Flat => Ok(BTreeSet::new()),
            Taxonomy::QueryBased(t) => t.descendants_of(value).into_iter().try_fold(
                t.leaves_under(value, source)?,
                |mut acc, d| {
                    if t.is_leaf_value(&d, source)? {
                        acc.insert(d);
                    } else {
                        acc.extend(t.leaves_under(&d, source)?);
                        acc.insert(d);
                    }
                    Ok(acc)
                },
            ),
        }
    }

    /// Relation values sitting directly under the generic value `value`.
    pub fn leaves_under<S: DataSource + ?Sized>(
        &self,
        value: &Value,
        source: &S,
    ) -> Result<BTreeSet<Value>, PrefError> {
        match self {
            Taxonomy::RuleBased(t) => t.leaves_under(value, source),
            Taxonomy::QueryBased(t) => t.leaves_under(value, source),
            Taxonomy::Flat => Ok(BTreeSet::new()),
        }
    }

    /// Replaces generic values by the concrete leaves they cover.
    pub fn expand<S: DataSource + ?Sized>(
        &self,
        values: &BTreeSet<Value>,
        source: &S,
    ) -> Result<BTreeSet<Value>, PrefError> {
        match self {
            Taxonomy::RuleBased(t) => t.expand(values, source),
            Taxonomy::QueryBased(t) => t.expand(values, source),
            Taxonomy::Flat => Ok(values.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::{PointParser, Rule};
    use crate::source::MemoryTable;

    #[test]
    fn flat_taxonomy_passes_values_through() {
        let table = MemoryTable::new(["x"]);
        let values = BTreeSet::from([Value::from("a"), Value::from("b")]);
        let flat = Taxonomy::Flat;
        assert_eq!(flat.expand(&values, &table).unwrap(), values);
        assert!(flat.is_leaf_value(&"a".into(), &table).unwrap());
        assert!(flat.fathers_of(&"a".into(), &table).unwrap().is_empty());
        assert_eq!(flat.kind(), TaxonomyKind::Flat);
    }

    #[test]
    fn rule_based_dispatch() {
        let cheap = Rule::parse("cheap", &["0"], &["10"], &["["], &["]"]).unwrap();
        let t = Taxonomy::RuleBased(
            RuleTaxonomy::new("price", vec![cheap], PointParser::scalar()).unwrap(),
        );
        let mut table = MemoryTable::new(["price"]);
        table.push_row(["3"]).unwrap();
        assert!(!t.is_leaf_value(&"cheap".into(), &table).unwrap());
        assert!(t.is_leaf_value(&"3".into(), &table).unwrap());
        assert_eq!(
            t.descendants_of(&"cheap".into(), &table).unwrap(),
            BTreeSet::from(["3".into()])
        );
        assert_eq!(
            t.fathers_of(&"3".into(), &table).unwrap(),
            BTreeSet::from(["cheap".into()])
        );
    }

    #[test]
    fn leaves_linked_to_the_queried_node_are_descendants() {
        let tax = QueryTaxonomy::new("city", [(Value::from("lazio"), Value::from("italy"))])
            .unwrap();
        let mut table = MemoryTable::new(["city"]);
        table.push_row(["rome"]).unwrap();
        table.push_row(["milan"]).unwrap();
        table.add_link("city", "rome", "lazio");
        table.add_link("city", "milan", "italy");
        let t = Taxonomy::QueryBased(tax);
        let italy = BTreeSet::from([Value::from("italy")]);

        let descendants = t.descendants_of(&"italy".into(), &table).unwrap();
        assert_eq!(
            descendants,
            BTreeSet::from(["lazio".into(), "milan".into(), "rome".into()])
        );
        // every leaf `expand` yields is a descendant
        let expanded = t.expand(&italy, &table).unwrap();
        assert_eq!(expanded, BTreeSet::from(["milan".into(), "rome".into()]));
        assert!(expanded.is_subset(&descendants));
    }

    #[test]
    fn query_based_descendants_include_linked_leaves() {
        let tax = QueryTaxonomy::new("city", [(Value::from("lazio"), Value::from("italy"))])
            .unwrap();
        let mut table = MemoryTable::new(["city"]);
        table.push_row(["rome"]).unwrap();
        table.add_link("city", "rome", "lazio");
        let t = Taxonomy::QueryBased(tax);
        assert_eq!(
            t.descendants_of(&"italy".into(), &table).unwrap(),
            BTreeSet::from(["lazio".into(), "rome".into()])
        );
        assert_eq!(
            t.leaves_under(&"lazio".into(), &table).unwrap(),
            BTreeSet::from(["rome".into()])
        );
        assert_eq!(
            serde_json::to_string(&TaxonomyKind::QueryBased).unwrap(),
            "\"query_based\""
        );
    }
}
