//! `NodeId`: an opaque handle for hierarchy nodes
//!
//! Every element placed in a [`Hierarchy`](crate::hierarchy::Hierarchy) is
//! stored once and referred to by a `NodeId`. Ids are handed out by an
//! [`IdAllocator`] in first-seen order, starting at zero, and are unique only
//! within the hierarchy that allocated them.

use std::fmt;

/// Identifier of a node within one hierarchy instance.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Wraps a raw id.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Returns the raw id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

// -----------------------------------------------------------------------------
// Formatting traits
// -----------------------------------------------------------------------------

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.get()).finish()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Monotonic id counter used while a hierarchy is being built.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current id and advances the counter.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}
