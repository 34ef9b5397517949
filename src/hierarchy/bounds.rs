//! Common bound alias for values stored in a hierarchy.
//!
//! The trait has a blanket impl, so any type satisfying the underlying
//! bounds automatically implements it.

/// Canonical bound set for hierarchy elements.
///
/// - `Eq + Hash` for the element → id reverse index
/// - `Ord` for deterministic iteration and set storage
/// - `Display` for diagnostics and error messages
pub trait ElementLike: Clone + Eq + std::hash::Hash + Ord + std::fmt::Debug + std::fmt::Display {}
impl<T> ElementLike for T where
    T: Clone + Eq + std::hash::Hash + Ord + std::fmt::Debug + std::fmt::Display
{
}
