//! Hierarchy engine: generic partial orders over arbitrary elements.
//!
//! This module provides:
//! - [`Hierarchy`], a DAG with transitively closed `above`/`below` views and
//!   the cover relation (`direct_below`),
//! - [`LeveledHierarchy`], the same topology with a longest-path level per node,
//! - the edge descriptors [`Relation`], [`Leveled`] and [`LeveledRelation`].
//!
//! Hierarchies are immutable once built. Re-typing the elements of a built
//! hierarchy goes through `change_values`, which keeps the topology.

pub mod bounds;
#[allow(clippy::module_inception)]
pub mod hierarchy;
pub mod levels;
pub mod node_id;
pub(crate) mod reach;
pub mod relation;

pub use bounds::ElementLike;
pub use hierarchy::Hierarchy;
pub use levels::LeveledHierarchy;
pub use node_id::NodeId;
pub use relation::{Leveled, LeveledRelation, Relation};

#[cfg(test)]
mod tests;
