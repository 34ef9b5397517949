//! Interval algebra for numeric (rule-based) taxonomies.
//!
//! Values of a rule-based taxonomy are points in `d` dimensions; each
//! taxonomy value is a [`Rule`], i.e. a labelled union of axis-aligned
//! [`Region`]s. This module provides:
//! - [`Bound`] and [`DimensionBound`] for one dimension (with disjoint-bound
//!   normalization),
//! - [`Region`] and [`Rule`] with containment and intersection tests,
//! - the lexicographic decomposition behind [`Rule::dependent`],
//! - [`PointParser`] for reading points out of raw attribute text.

pub mod bound;
pub mod dimension;
mod lexicographic;
pub mod point;
pub mod region;
pub mod rule;

pub use bound::{Bound, Inclusion, InclusionPair};
pub use dimension::DimensionBound;
pub use point::{PointParser, PointParserSpec};
pub use region::Region;
pub use rule::{Rule, RuleSpec};
