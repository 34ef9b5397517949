//! Preference propagation over taxonomy-organized relations.
//!
//! A [`Formula`] is evaluated in five stages:
//! 1. the two sides of every clause become constraint nodes, related by
//!    "preferred above dispreferred" ([`formula_hierarchy`]),
//! 2. nodes over disjoint attributes are merged into finer classes
//!    ([`CartesianMerge`]),
//! 3. generic values are expanded to the leaves they cover
//!    ([`expand_hierarchy`]),
//! 4. every node is replaced by the tuples satisfying it
//!    ([`map_to_tuples`]),
//! 5. tuple sets are promoted into ordered groups
//!    ([`PreferencePartition::promote`]).
//!
//! [`PreferenceEngine`] wires the stages together.

pub mod algorithm;
pub mod cartesian;
pub mod expansion;
pub mod formula;
pub mod node;
pub mod promotion;
pub mod tuples;

pub use algorithm::{PreferenceEngine, formula_hierarchy};
pub use cartesian::CartesianMerge;
pub use expansion::{expand_hierarchy, expand_value};
pub use formula::{Clause, Formula, Literal, Side};
pub use node::{Attribute, NodeValue, PreQueryNode, Tuple, TuplesResult, Value};
pub use promotion::{PreferenceGroup, PreferencePartition};
pub use tuples::{fetch_node_tuples, map_to_tuples, tuple_query};
