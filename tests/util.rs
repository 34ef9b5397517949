#![allow(dead_code)]
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use taxopref::config::{AlgorithmConfig, Schema};
use taxopref::pref_error::PrefError;
use taxopref::preference::{Clause, Formula, Literal, PreferencePartition, Tuple};
use taxopref::source::{CountQuery, DataSource, MemoryTable, TupleQuery, ValuePair, ValueQuery};

/// `price` is rule based, `venue` query based, `name` flat.
pub const EVENTS_CONFIG: &str = r#"{
    "attribute_ordering": ["name", "price", "venue"],
    "taxonomy_kinds": { "name": "flat", "price": "rule_based", "venue": "query_based" },
    "rules": {
        "price": {
            "parser": { "weights": [1] },
            "rules": [
                { "label": "cheap", "lower": ["0"], "upper": ["20"],
                  "lower_inclusion": ["["], "upper_inclusion": ["]"] },
                { "label": "expensive", "lower": ["20"], "upper": ["+inf"],
                  "lower_inclusion": ["]"], "upper_inclusion": ["]"] }
            ]
        }
    },
    "static_links": { "venue": [["indoor", "anywhere"], ["outdoor", "anywhere"]] }
}"#;

pub fn events_config() -> AlgorithmConfig {
    serde_json::from_str(EVENTS_CONFIG).unwrap()
}

pub fn events_schema() -> Schema {
    Schema::new(["name", "price", "venue"])
}

/// One event per (price class, venue class) combination.
pub fn events_table() -> MemoryTable {
    let mut t = MemoryTable::new(["name", "price", "venue"]);
    t.push_row(["gig", "10", "hall"]).unwrap();
    t.push_row(["fair", "15", "garden"]).unwrap();
    t.push_row(["opera", "80", "theatre"]).unwrap();
    t.push_row(["festival", "60", "park"]).unwrap();
    for (leaf, class) in [
        ("hall", "indoor"),
        ("theatre", "indoor"),
        ("garden", "outdoor"),
        ("park", "outdoor"),
    ] {
        t.add_link("venue", leaf, class);
    }
    t
}

pub fn clause(preferred: &[(&str, &str)], dispreferred: &[(&str, &str)]) -> Clause {
    Clause::new(
        preferred
            .iter()
            .map(|(a, v)| Literal::preferred(*a, *v))
            .chain(dispreferred.iter().map(|(a, v)| Literal::dispreferred(*a, *v)))
            .collect(),
    )
}

pub fn formula(clauses: Vec<Clause>) -> Formula {
    Formula::new(clauses)
}

/// First column of every tuple, per group.
pub fn names(partition: &PreferencePartition) -> Vec<BTreeSet<String>> {
    partition
        .groups()
        .iter()
        .map(|g| g.rows().into_iter().map(|t| t[0].to_string()).collect())
        .collect()
}

/// Counts the tuple queries reaching the wrapped source.
pub struct CountingSource<S> {
    pub inner: S,
    tuple_queries: AtomicUsize,
}

impl<S> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            tuple_queries: AtomicUsize::new(0),
        }
    }

    pub fn tuple_queries(&self) -> usize {
        self.tuple_queries.load(Ordering::Relaxed)
    }
}

impl<S: DataSource> DataSource for CountingSource<S> {
    fn fetch_distinct_values(&self, query: &ValueQuery) -> Result<BTreeSet<ValuePair>, PrefError> {
        self.inner.fetch_distinct_values(query)
    }

    fn count_matching(&self, query: &CountQuery) -> Result<usize, PrefError> {
        self.inner.count_matching(query)
    }

    fn fetch_tuples(
        &self,
        query: &TupleQuery,
        expected_arity: usize,
    ) -> Result<BTreeSet<Tuple>, PrefError> {
        self.tuple_queries.fetch_add(1, Ordering::Relaxed);
        self.inner.fetch_tuples(query, expected_arity)
    }
}
