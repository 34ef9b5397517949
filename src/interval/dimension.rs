//! Per-dimension constraint of a region.

use std::fmt;

use super::bound::Bound;

/// Either unconstrained, or a union of bounds (more than one only after a
/// disjoint bound was split).
#[derive(Clone, Debug, PartialEq)]
pub enum DimensionBound {
    DontCare,
    Specific(Vec<Bound>),
}

impl DimensionBound {
    /// Classifies `bound`: infinite on both sides gives [`DontCare`], an
    /// inverted bound is split into its two rays.
    ///
    /// [`DontCare`]: DimensionBound::DontCare
    pub fn from_bound(bound: Bound) -> Self {
        if bound.is_dont_care() {
            DimensionBound::DontCare
        } else {
            DimensionBound::Specific(bound.split_disjoint())
        }
    }

    pub fn is_dont_care(&self) -> bool {
        matches!(self, DimensionBound::DontCare)
    }

    pub fn contains(&self, x: f64) -> bool {
        match self {
            DimensionBound::DontCare => true,
            DimensionBound::Specific(bounds) => bounds.iter().any(|b| b.contains(x)),
        }
    }

    pub fn intersects(&self, other: &DimensionBound) -> bool {
        match (self, other) {
            (DimensionBound::DontCare, _) | (_, DimensionBound::DontCare) => true,
            (DimensionBound::Specific(a), DimensionBound::Specific(b)) => {
                a.iter().any(|x| b.iter().any(|y| x.intersects(y)))
            }
        }
    }
}

impl From<Bound> for DimensionBound {
    fn from(bound: Bound) -> Self {
        DimensionBound::from_bound(bound)
    }
}

impl fmt::Display for DimensionBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionBound::DontCare => write!(f, "*"),
            DimensionBound::Specific(bounds) => {
                write!(f, "{}", itertools::join(bounds.iter(), " U "))
            }
        }
    }
}
