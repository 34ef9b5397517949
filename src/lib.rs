#![cfg_attr(docsrs, feature(doc_cfg))]
//! # taxopref
//!
//! taxopref evaluates qualitative "better-than" preferences over a relation
//! whose attribute domains are organized as taxonomies, and returns the
//! matching tuples partitioned by preference strength.
//!
//! ## Features
//! - Generic partial-order hierarchies with transitive closure, cover
//!   relation and longest-path levels ([`hierarchy`])
//! - Multidimensional interval rules with lexicographic ranges, disjoint
//!   bounds and don't-care dimensions ([`interval`])
//! - Rule-based, query-based and flat taxonomies ([`taxonomy`])
//! - The preference pipeline: cartesian merge, taxonomy expansion, tuple
//!   mapping and promotion ([`preference`])
//! - A [`source::DataSource`] trait for the relation, with an in-memory
//!   implementation
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! taxopref = "0.1"
//! # Optional features:
//! # features = ["parallel"]
//! ```
//!
//! With `parallel`, the tuple sets of independent nodes are fetched
//! concurrently through rayon; the data source must then be `Sync`.
//!
//! ## Logging
//! The crate logs through the `log` facade and never installs a logger.
//! Dropped clauses are reported at `warn`, pipeline stage sizes at `debug`
//! and every query sent to a data source at `trace`.

pub mod config;
pub mod debug_invariants;
pub mod hierarchy;
pub mod interval;
pub mod pref_error;
pub mod preference;
pub mod source;
pub mod taxonomy;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::config::{AlgorithmConfig, RuleTaxonomySpec, Schema};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::hierarchy::{
        ElementLike, Hierarchy, Leveled, LeveledHierarchy, LeveledRelation, NodeId, Relation,
    };
    pub use crate::interval::{Bound, Inclusion, InclusionPair, PointParser, Region, Rule};
    pub use crate::pref_error::PrefError;
    pub use crate::preference::{
        Attribute, CartesianMerge, Clause, Formula, Literal, NodeValue, PreQueryNode,
        PreferenceEngine, PreferenceGroup, PreferencePartition, Side, Tuple, TuplesResult, Value,
    };
    pub use crate::source::{DataSource, MemoryTable};
    pub use crate::taxonomy::{QueryTaxonomy, RuleTaxonomy, Taxonomy, TaxonomyKind};
}
