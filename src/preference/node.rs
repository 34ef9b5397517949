//! Values, constraint nodes and tuple sets flowing through the pipeline.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pref_error::PrefError;

/// Name of a relation column.
pub type Attribute = String;

/// One attribute value, as stored in the relation or named by a taxonomy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
    pub fn new(name: impl Into<String>) -> Self {
        Value(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value(s)
    }
}

impl Borrow<str> for Value {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One row of the relation, in attribute-ordering order.
pub type Tuple = Vec<Value>;

/// `attribute ∈ values`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeValue {
    pub attribute: Attribute,
    pub values: BTreeSet<Value>,
}

impl NodeValue {
    pub fn new(attribute: impl Into<Attribute>, values: BTreeSet<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            values,
        }
    }

    /// `attribute = value`.
    pub fn single(attribute: impl Into<Attribute>, value: impl Into<Value>) -> Self {
        Self::new(attribute, BTreeSet::from([value.into()]))
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={{{}}}",
            self.attribute,
            itertools::join(self.values.iter(), ",")
        )
    }
}

/// Conjunction of [`NodeValue`] constraints over distinct attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreQueryNode {
    values: BTreeSet<NodeValue>,
}

impl PreQueryNode {
    /// # Errors
    /// [`PrefError::DuplicateAttributeInConstraint`] if two constraints share
    /// an attribute.
    pub fn new<I: IntoIterator<Item = NodeValue>>(values: I) -> Result<Self, PrefError> {
        let mut node = Self::default();
        for value in values {
            node.push(value)?;
        }
        Ok(node)
    }

    fn push(&mut self, value: NodeValue) -> Result<(), PrefError> {
        if self.values.iter().any(|v| v.attribute == value.attribute) {
            return Err(PrefError::DuplicateAttributeInConstraint(value.attribute));
        }
        self.values.insert(value);
        Ok(())
    }

    pub fn values(&self) -> &BTreeSet<NodeValue> {
        &self.values
    }

    pub fn attributes(&self) -> BTreeSet<&str> {
        self.values.iter().map(|v| v.attribute.as_str()).collect()
    }

    /// Nodes over disjoint attribute sets can be merged.
    pub fn is_compatible(&self, other: &PreQueryNode) -> bool {
        self.attributes().is_disjoint(&other.attributes())
    }

    /// True iff both nodes carry an identical [`NodeValue`].
    pub fn shares_value(&self, other: &PreQueryNode) -> bool {
        self.values.intersection(&other.values).next().is_some()
    }

    /// Union of both constraint sets.
    ///
    /// # Errors
    /// [`PrefError::DuplicateAttributeInConstraint`] if the nodes are not
    /// compatible.
    pub fn merge(&self, other: &PreQueryNode) -> Result<PreQueryNode, PrefError> {
        let mut merged = self.clone();
        for value in &other.values {
            merged.push(value.clone())?;
        }
        Ok(merged)
    }
}

impl fmt::Display for PreQueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", itertools::join(self.values.iter(), " & "))
    }
}

/// Tuples matching one node of the merged hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TuplesResult(pub BTreeSet<Tuple>);

impl TuplesResult {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn tuples(&self) -> &BTreeSet<Tuple> {
        &self.0
    }
}

impl From<BTreeSet<Tuple>> for TuplesResult {
    fn from(tuples: BTreeSet<Tuple>) -> Self {
        TuplesResult(tuples)
    }
}

impl fmt::Display for TuplesResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .0
            .iter()
            .map(|t| format!("({})", itertools::join(t.iter(), ", ")));
        write!(f, "{{{}}}", itertools::join(rows, ", "))
    }
}
