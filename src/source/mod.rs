//! Data-source capability consumed by taxonomies and the preference engine.
//!
//! The engine never talks to a database directly; it issues typed queries
//! through [`DataSource`]. Turning those queries into SQL (or anything else)
//! is up to the implementation. [`MemoryTable`] is an in-memory
//! implementation used by tests and by callers that already hold the data.

mod memory;

use std::collections::BTreeSet;
use std::fmt;

pub use memory::MemoryTable;

use crate::pref_error::PrefError;
use crate::preference::node::{Attribute, Tuple, Value};

/// Lookup of attribute values, optionally through taxonomy links.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueQuery {
    /// Every distinct value of `attribute` in the relation.
    Distinct { attribute: Attribute },
    /// Values linked below `parent` in the taxonomy of `attribute`.
    ChildrenOf { attribute: Attribute, parent: Value },
    /// Values linked above `value` in the taxonomy of `attribute`.
    ParentsOf { attribute: Attribute, value: Value },
}

impl ValueQuery {
    pub fn attribute(&self) -> &str {
        match self {
            ValueQuery::Distinct { attribute }
            | ValueQuery::ChildrenOf { attribute, .. }
            | ValueQuery::ParentsOf { attribute, .. } => attribute,
        }
    }
}

impl fmt::Display for ValueQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueQuery::Distinct { attribute } => write!(f, "distinct {attribute}"),
            ValueQuery::ChildrenOf { attribute, parent } => {
                write!(f, "{attribute} below '{parent}'")
            }
            ValueQuery::ParentsOf { attribute, value } => {
                write!(f, "{attribute} above '{value}'")
            }
        }
    }
}

/// A value returned by a [`ValueQuery`], with the parent it was reached from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValuePair {
    pub value: Value,
    pub parent: Option<Value>,
}

impl ValuePair {
    pub fn new(value: Value, parent: Option<Value>) -> Self {
        Self { value, parent }
    }
}

/// Number of rows with `attribute = value`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CountQuery {
    pub attribute: Attribute,
    pub value: Value,
}

impl fmt::Display for CountQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "count where {} = '{}'", self.attribute, self.value)
    }
}

/// `attribute IN values`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Condition {
    pub attribute: Attribute,
    pub values: BTreeSet<Value>,
}

/// Distinct projection of `columns` over the rows satisfying every condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleQuery {
    pub columns: Vec<Attribute>,
    pub conditions: Vec<Condition>,
}

impl fmt::Display for TupleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "select distinct {}", self.columns.join(", "))?;
        for (i, c) in self.conditions.iter().enumerate() {
            let values = itertools::join(c.values.iter().map(|v| format!("'{v}'")), ", ");
            let glue = if i == 0 { "where" } else { "and" };
            write!(f, " {glue} {} in ({values})", c.attribute)?;
        }
        Ok(())
    }
}

/// Synchronous access to the relation and its taxonomy links.
pub trait DataSource {
    fn fetch_distinct_values(&self, query: &ValueQuery) -> Result<BTreeSet<ValuePair>, PrefError>;

    fn count_matching(&self, query: &CountQuery) -> Result<usize, PrefError>;

    /// # Errors
    /// Implementations fail with [`PrefError::ArityMismatch`] when a row
    /// does not have `expected_arity` columns.
    fn fetch_tuples(
        &self,
        query: &TupleQuery,
        expected_arity: usize,
    ) -> Result<BTreeSet<Tuple>, PrefError>;
}

/// `Sync` when the `parallel` feature fans tuple fetches out over rayon,
/// nothing otherwise.
#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync + ?Sized> MaybeSync for T {}

#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSync for T {}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn fetch_distinct_values(&self, query: &ValueQuery) -> Result<BTreeSet<ValuePair>, PrefError> {
        (**self).fetch_distinct_values(query)
    }

    fn count_matching(&self, query: &CountQuery) -> Result<usize, PrefError> {
        (**self).count_matching(query)
    }

    fn fetch_tuples(
        &self,
        query: &TupleQuery,
        expected_arity: usize,
    ) -> Result<BTreeSet<Tuple>, PrefError> {
        (**self).fetch_tuples(query, expected_arity)
    }
}
