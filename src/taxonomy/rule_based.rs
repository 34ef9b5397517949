//! Numeric taxonomies: each static value is a [`Rule`] over parsed points.

use std::collections::BTreeSet;

use crate::interval::{PointParser, Rule};
use crate::pref_error::PrefError;
use crate::preference::node::{Attribute, Value};
use crate::source::{DataSource, ValueQuery};

/// Taxonomy whose static values are rule labels and whose leaves are raw
/// attribute values, parsed into points by `parser`.
#[derive(Clone, Debug)]
pub struct RuleTaxonomy {
    attribute: Attribute,
    rules: Vec<Rule>,
    parser: PointParser,
}

impl RuleTaxonomy {
    /// # Errors
    /// * [`PrefError::MalformedRegion`] if `rules` is empty.
    /// * [`PrefError::DimensionMismatch`] if the rules, or the rules and the
    ///   parser, disagree on dimensionality.
    pub fn new(
        attribute: impl Into<Attribute>,
        rules: Vec<Rule>,
        parser: PointParser,
    ) -> Result<Self, PrefError> {
        let attribute = attribute.into();
        let Some(first) = rules.first() else {
            return Err(PrefError::MalformedRegion(format!(
                "no rules given for `{attribute}`"
            )));
        };
        let dim = first.dim();
        if let Some(odd) = rules.iter().find(|r| r.dim() != dim) {
            return Err(PrefError::DimensionMismatch {
                expected: dim,
                found: odd.dim(),
            });
        }
        if parser.dim() != dim {
            return Err(PrefError::DimensionMismatch {
                expected: dim,
                found: parser.dim(),
            });
        }
        Ok(Self {
            attribute,
            rules,
            parser,
        })
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn dim(&self) -> usize {
        self.parser.dim()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// # Errors
    /// [`PrefError::UnknownRule`] if no rule carries `label`.
    pub fn rule_for_value(&self, label: &str) -> Result<&Rule, PrefError> {
        self.rules
            .iter()
            .find(|r| r.label() == label)
            .ok_or_else(|| PrefError::UnknownRule(label.to_owned()))
    }

    /// Labels of all rules.
    pub fn static_values(&self) -> BTreeSet<Value> {
        self.rules.iter().map(|r| Value::from(r.label())).collect()
    }

    pub fn is_static(&self, value: &Value) -> bool {
        self.rules.iter().any(|r| r.label() == value.as_str())
    }

    /// Labels of every rule containing `point`.
    ///
    /// # Errors
    /// * [`PrefError::DimensionMismatch`] if `point` has the wrong length.
    /// * [`PrefError::LeafNotFound`] if no rule contains it.
    pub fn fathers_of_point(&self, point: &[f64]) -> Result<BTreeSet<Value>, PrefError> {
        let mut fathers = BTreeSet::new();
        for rule in &self.rules {
            if rule.contains(point)? {
                fathers.insert(Value::from(rule.label()));
            }
        }
        if fathers.is_empty() {
            return Err(PrefError::LeafNotFound(format!("{point:?}")));
        }
        Ok(fathers)
    }

    /// Parses `leaf` and returns the labels of the rules containing it.
    pub fn fathers_of(&self, leaf: &Value) -> Result<BTreeSet<Value>, PrefError> {
        let point = self.parser.parse(leaf.as_str())?;
        self.fathers_of_point(&point)
            .map_err(|e| match e {
                PrefError::LeafNotFound(_) => PrefError::LeafNotFound(leaf.to_string()),
                other => other,
            })
    }

    /// Attribute values in the relation that fall under rule `label`.
    pub fn leaves_under<S: DataSource + ?Sized>(
        &self,
        label: &Value,
        source: &S,
    ) -> Result<BTreeSet<Value>, PrefError> {
        let query = ValueQuery::Distinct {
            attribute: self.attribute.clone(),
        };
        let mut leaves = BTreeSet::new();
        for pair in source.fetch_distinct_values(&query)? {
            if self.fathers_of(&pair.value)?.contains(label) {
                leaves.insert(pair.value);
            }
        }
        Ok(leaves)
    }

    /// Unordered pairs of labels whose rules overlap.
    pub fn intersecting_labels(&self) -> Result<BTreeSet<(Value, Value)>, PrefError> {
        let mut pairs = BTreeSet::new();
        for (i, a) in self.rules.iter().enumerate() {
            for b in &self.rules[i + 1..] {
                if a.label() != b.label() && a.intersects(b)? {
                    let (x, y) = (Value::from(a.label()), Value::from(b.label()));
                    pairs.insert(if x < y { (x, y) } else { (y, x) });
                }
            }
        }
        Ok(pairs)
    }

    /// Replaces every rule label in `values` by the leaves it covers; raw
    /// values pass through.
    pub fn expand<S: DataSource + ?Sized>(
        &self,
        values: &BTreeSet<Value>,
        source: &S,
    ) -> Result<BTreeSet<Value>, PrefError> {
        let mut expanded = BTreeSet::new();
        for value in values {
            if self.is_static(value) {
                expanded.extend(self.leaves_under(value, source)?);
            } else {
                expanded.insert(value.clone());
            }
        }
        Ok(expanded)
    }
}
