//! Already-parsed preference formulas.
//!
//! A [`Formula`] is a list of clauses; each clause says that the conjunction
//! of its preferred literals is better than the conjunction of its
//! dispreferred ones.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::node::{Attribute, NodeValue, PreQueryNode, Value};
use crate::hierarchy::Relation;
use crate::pref_error::PrefError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Preferred,
    Dispreferred,
}

/// `attribute = constant` on one side of a clause.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub side: Side,
    pub attribute: Attribute,
    pub constant: Value,
}

impl Literal {
    pub fn new(side: Side, attribute: impl Into<Attribute>, constant: impl Into<Value>) -> Self {
        Self {
            side,
            attribute: attribute.into(),
            constant: constant.into(),
        }
    }

    pub fn preferred(attribute: impl Into<Attribute>, constant: impl Into<Value>) -> Self {
        Self::new(Side::Preferred, attribute, constant)
    }

    pub fn dispreferred(attribute: impl Into<Attribute>, constant: impl Into<Value>) -> Self {
        Self::new(Side::Dispreferred, attribute, constant)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// `(attribute, constant)` pairs of one side.
    fn side(&self, side: Side) -> BTreeSet<(&str, &Value)> {
        self.literals
            .iter()
            .filter(|l| l.side == side)
            .map(|l| (l.attribute.as_str(), &l.constant))
            .collect()
    }

    /// Both sides name exactly the same constraints.
    pub fn is_trivial(&self) -> bool {
        self.side(Side::Preferred) == self.side(Side::Dispreferred)
    }

    /// Repeated identical literals count once; only differing constants
    /// for one attribute conflict.
    fn side_node(&self, side: Side) -> Result<PreQueryNode, PrefError> {
        PreQueryNode::new(
            self.side(side)
                .into_iter()
                .map(|(attribute, constant)| NodeValue::single(attribute, constant.clone())),
        )
    }

    /// The clause as a `preferred > dispreferred` relation between
    /// constraint nodes.
    ///
    /// # Errors
    /// * [`PrefError::DuplicateAttributeInConstraint`] if a side constrains
    ///   an attribute twice.
    /// * [`PrefError::SelfRelation`] if both sides build the same node.
    pub fn to_relation(&self) -> Result<Relation<PreQueryNode>, PrefError> {
        Relation::new(
            self.side_node(Side::Preferred)?,
            self.side_node(Side::Dispreferred)?,
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    pub clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// Concatenates the clauses of several formulas.
    pub fn union<I: IntoIterator<Item = Formula>>(formulas: I) -> Self {
        Self::new(formulas.into_iter().flat_map(|f| f.clauses).collect())
    }

    /// Drops clauses whose two sides are identical.
    pub fn cleaned(self) -> Self {
        Self::new(
            self.clauses
                .into_iter()
                .filter(|c| !c.is_trivial())
                .collect(),
        )
    }
}
