//! PrefError: Unified error type for taxopref public APIs
//!
//! Every fallible operation in the crate returns this error. None of them
//! are retried or swallowed internally; the single exception is the
//! formula-node hierarchy, which drops (and logs) clauses that cannot form a
//! valid pair of constraint nodes.

use thiserror::Error;

/// Unified error type for taxopref operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrefError {
    /// Interval, point or rule operations over differing dimensionality.
    #[error("Dimension mismatch: expected {expected} dimensions, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A point matches no region of any rule in a rule-based taxonomy.
    #[error("Leaf `{0}` is not contained in any rule")]
    LeafNotFound(String),
    /// Inconsistent bound/inclusion array lengths, or an independent region
    /// requested for a single dimension.
    #[error("Malformed region: {0}")]
    MalformedRegion(String),
    /// A textual bound, inclusion token or point slot could not be parsed.
    #[error("Parsing error: {0}")]
    Parsing(String),
    /// Point-parser weights are not a permutation of `1..=n`.
    #[error("Invalid point weights: {0}")]
    InvalidPointWeights(String),
    /// The higher element of a relation equals its lower element.
    #[error("Relation between `{0}` and itself")]
    SelfRelation(String),
    /// A leveled relation whose higher element is not strictly above the lower one.
    #[error("Level order violation: `{higher}` (level {higher_level}) is not above `{lower}` (level {lower_level})")]
    LevelOrderViolation {
        higher: String,
        higher_level: u32,
        lower: String,
        lower_level: u32,
    },
    /// `change_values` called with a mapping whose keys differ from the node ids.
    #[error("Id mapping is not compatible with the hierarchy: {0}")]
    IncompatibleMapping(String),
    /// Schema attributes and configuration attributes disagree.
    #[error("Attribute set mismatch: {0}")]
    AttributeSetMismatch(String),
    /// Fetched rows don't match the declared column count.
    #[error("Arity mismatch: expected {expected} columns, got {found} for `{query}`")]
    ArityMismatch {
        expected: usize,
        found: usize,
        query: String,
    },
    /// A constraint node was given two values for the same attribute.
    #[error("Attribute `{0}` constrained more than once in the same node")]
    DuplicateAttributeInConstraint(String),
    /// No rule carries the requested label.
    #[error("No rule labelled `{0}`")]
    UnknownRule(String),
    /// An attribute unknown to the configuration or the data source.
    #[error("Unknown attribute `{0}`")]
    UnknownAttribute(String),
    /// The relations contain a cycle; expected a DAG.
    #[error("Topology error: cycle detected in hierarchy (expected DAG)")]
    CycleDetected,
    /// Level assignment finished with nodes still unleveled.
    #[error("Node `{0}` could not be assigned a level")]
    UnleveledNode(String),
    /// Cartesian merge recursed deeper than the number of distinct attributes.
    #[error("Cartesian merge exceeded depth bound {bound} at node `{node}`")]
    MergeDepthExceeded { bound: usize, node: String },
    /// Failure reported by an external data source.
    #[error("Data source error: {0}")]
    Source(String),
    /// A structural invariant does not hold.
    #[error("Invariant violated: {0}")]
    BrokenInvariant(String),
}
