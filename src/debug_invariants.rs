//! Structural invariant checks for hierarchies.
//!
//! Builders run [`debug_invariants!`](crate::debug_invariants) right after
//! assembling a structure. The check is compiled in for debug builds and
//! whenever the `strict-invariants` or `check-invariants` feature is on;
//! otherwise it vanishes.

use crate::pref_error::PrefError;

/// A structure whose internal consistency can be verified after the fact.
pub trait DebugInvariants {
    /// Name of the structure in panic messages.
    const KIND: &'static str;

    /// First violated invariant, as [`PrefError::BrokenInvariant`].
    fn validate_invariants(&self) -> Result<(), PrefError>;

    /// Panics on a violated invariant when invariant checking is compiled in.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), Self::KIND);
    }
}

/// Runs a fallible check and panics with `ctx` on error when invariant
/// checking is compiled in.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $ctx:expr) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!("[invariants] {}: {}", $ctx, e);
        }
    };
}
