//! In-memory relation with taxonomy links.

use std::collections::{BTreeMap, BTreeSet};

use super::{CountQuery, DataSource, TupleQuery, ValuePair, ValueQuery};
use crate::pref_error::PrefError;
use crate::preference::node::{Attribute, Tuple, Value};

/// A relation held in memory plus, per attribute, `(specific, generic)`
/// taxonomy links answering [`ValueQuery::ChildrenOf`] and
/// [`ValueQuery::ParentsOf`].
#[derive(Clone, Debug, Default)]
pub struct MemoryTable {
    columns: Vec<Attribute>,
    rows: Vec<Tuple>,
    links: BTreeMap<Attribute, BTreeSet<(Value, Value)>>,
}

impl MemoryTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Attribute>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn columns(&self) -> &[Attribute] {
        &self.columns
    }

    pub fn rows(&self) -> &[Tuple] {
        &self.rows
    }

    /// # Errors
    /// [`PrefError::ArityMismatch`] if `row` does not have one value per column.
    pub fn push_row<I, V>(&mut self, row: I) -> Result<(), PrefError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let row: Tuple = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(PrefError::ArityMismatch {
                expected: self.columns.len(),
                found: row.len(),
                query: "insert".into(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Records that `specific` sits directly below `generic` for `attribute`.
    pub fn add_link(
        &mut self,
        attribute: impl Into<Attribute>,
        specific: impl Into<Value>,
        generic: impl Into<Value>,
    ) {
        self.links
            .entry(attribute.into())
            .or_default()
            .insert((specific.into(), generic.into()));
    }

    fn column(&self, attribute: &str) -> Result<usize, PrefError> {
        self.columns
            .iter()
            .position(|c| c == attribute)
            .ok_or_else(|| PrefError::UnknownAttribute(attribute.to_owned()))
    }

    fn links_of(&self, attribute: &str) -> Result<&BTreeSet<(Value, Value)>, PrefError> {
        static NONE: BTreeSet<(Value, Value)> = BTreeSet::new();
        if let Some(links) = self.links.get(attribute) {
            return Ok(links);
        }
        self.column(attribute).map(|_| &NONE)
    }
}

impl DataSource for MemoryTable {
    fn fetch_distinct_values(&self, query: &ValueQuery) -> Result<BTreeSet<ValuePair>, PrefError> {
        log::trace!("memory table: {query}");
        let pairs: BTreeSet<ValuePair> = match query {
            ValueQuery::Distinct { attribute } => {
                let col = self.column(attribute)?;
                self.rows
                    .iter()
                    .map(|r| ValuePair::new(r[col].clone(), None))
                    .collect()
            }
            ValueQuery::ChildrenOf { attribute, parent } => self
                .links_of(attribute)?
                .iter()
                .filter(|(_, generic)| generic == parent)
                .map(|(specific, generic)| ValuePair::new(specific.clone(), Some(generic.clone())))
                .collect(),
            ValueQuery::ParentsOf { attribute, value } => self
                .links_of(attribute)?
                .iter()
                .filter(|(specific, _)| specific == value)
                .map(|(_, generic)| ValuePair::new(generic.clone(), Some(value.clone())))
                .collect(),
        };
        Ok(pairs)
    }

    fn count_matching(&self, query: &CountQuery) -> Result<usize, PrefError> {
        log::trace!("memory table: {query}");
        let col = self.column(&query.attribute)?;
        Ok(self.rows.iter().filter(|r| r[col] == query.value).count())
    }

    fn fetch_tuples(
        &self,
        query: &TupleQuery,
        expected_arity: usize,
    ) -> Result<BTreeSet<Tuple>, PrefError> {
        log::trace!("memory table: {query}");
        let projection = query
            .columns
            .iter()
            .map(|c| self.column(c))
            .collect::<Result<Vec<_>, _>>()?;
        if projection.len() != expected_arity {
            return Err(PrefError::ArityMismatch {
                expected: expected_arity,
                found: projection.len(),
                query: query.to_string(),
            });
        }
        let filters = query
            .conditions
            .iter()
            .map(|c| Ok((self.column(&c.attribute)?, &c.values)))
            .collect::<Result<Vec<_>, PrefError>>()?;

        Ok(self
            .rows
            .iter()
            .filter(|row| filters.iter().all(|(col, values)| values.contains(&row[*col])))
            .map(|row| projection.iter().map(|&i| row[i].clone()).collect())
            .collect())
    }
}
