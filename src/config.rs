//! Algorithm configuration: which taxonomy governs each attribute, the
//! numeric rules of rule-based attributes, and the static links of
//! query-based ones.
//!
//! Configurations are plain serde data. Loading them from disk is left to the
//! caller; [`AlgorithmConfig::validate`] checks that the per-attribute maps
//! agree with each other before any taxonomy is built.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::interval::{PointParserSpec, RuleSpec};
use crate::pref_error::PrefError;
use crate::preference::node::{Attribute, Value};
use crate::taxonomy::{QueryTaxonomy, RuleTaxonomy, Taxonomy, TaxonomyKind};

/// Attributes of the relation the preferences are evaluated over.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub attributes: BTreeSet<Attribute>,
}

impl Schema {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Attribute>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parser and rules of one rule-based attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTaxonomySpec {
    pub parser: PointParserSpec,
    pub rules: Vec<RuleSpec>,
}

impl RuleTaxonomySpec {
    pub fn build(&self, attribute: &str) -> Result<RuleTaxonomy, PrefError> {
        let rules = self
            .rules
            .iter()
            .map(RuleSpec::to_rule)
            .collect::<Result<Vec<_>, _>>()?;
        RuleTaxonomy::new(attribute, rules, self.parser.build()?)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    /// Column order of every fetched tuple.
    pub attribute_ordering: Vec<Attribute>,
    pub taxonomy_kinds: BTreeMap<Attribute, TaxonomyKind>,
    #[serde(default)]
    pub rules: BTreeMap<Attribute, RuleTaxonomySpec>,
    /// `(specific, generic)` links between static values.
    #[serde(default)]
    pub static_links: BTreeMap<Attribute, Vec<(Value, Value)>>,
}

impl AlgorithmConfig {
    pub fn attributes(&self) -> BTreeSet<&str> {
        self.taxonomy_kinds.keys().map(String::as_str).collect()
    }

    fn attributes_of_kind(&self, kind: TaxonomyKind) -> BTreeSet<&str> {
        self.taxonomy_kinds
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(a, _)| a.as_str())
            .collect()
    }

    /// # Errors
    /// [`PrefError::AttributeSetMismatch`] unless
    /// * `attribute_ordering` names every configured attribute exactly once,
    /// * `rules` covers exactly the rule-based attributes,
    /// * `static_links` covers exactly the query-based attributes.
    pub fn validate(&self) -> Result<(), PrefError> {
        let ordering: BTreeSet<&str> = self.attribute_ordering.iter().map(String::as_str).collect();
        if ordering.len() != self.attribute_ordering.len() {
            return Err(PrefError::AttributeSetMismatch(
                "attribute ordering repeats an attribute".into(),
            ));
        }
        check_same("attribute ordering", &ordering, &self.attributes())?;
        check_same(
            "rules",
            &self.rules.keys().map(String::as_str).collect::<BTreeSet<_>>(),
            &self.attributes_of_kind(TaxonomyKind::RuleBased),
        )?;
        check_same(
            "static links",
            &self.static_links.keys().map(String::as_str).collect::<BTreeSet<_>>(),
            &self.attributes_of_kind(TaxonomyKind::QueryBased),
        )
    }

    /// Validates the configuration and builds one taxonomy per attribute.
    pub fn build_taxonomies(&self) -> Result<BTreeMap<Attribute, Taxonomy>, PrefError> {
        self.validate()?;
        let mut taxonomies = BTreeMap::new();
        for (attribute, kind) in &self.taxonomy_kinds {
            let taxonomy = match kind {
                TaxonomyKind::Flat => Taxonomy::Flat,
                TaxonomyKind::RuleBased => {
                    let spec = self
                        .rules
                        .get(attribute)
                        .ok_or_else(|| PrefError::UnknownAttribute(attribute.clone()))?;
                    Taxonomy::RuleBased(spec.build(attribute)?)
                }
                TaxonomyKind::QueryBased => {
                    let links = self
                        .static_links
                        .get(attribute)
                        .ok_or_else(|| PrefError::UnknownAttribute(attribute.clone()))?;
                    Taxonomy::QueryBased(QueryTaxonomy::new(
                        attribute.clone(),
                        links.iter().cloned(),
                    )?)
                }
            };
            taxonomies.insert(attribute.clone(), taxonomy);
        }
        Ok(taxonomies)
    }
}

fn check_same(what: &str, found: &BTreeSet<&str>, expected: &BTreeSet<&str>) -> Result<(), PrefError> {
    if found == expected {
        return Ok(());
    }
    let missing = itertools::join(expected.difference(found), ", ");
    let extra = itertools::join(found.difference(expected), ", ");
    Err(PrefError::AttributeSetMismatch(format!(
        "{what}: missing [{missing}], unexpected [{extra}]"
    )))
}
