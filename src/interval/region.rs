//! Axis-aligned multidimensional regions.

use std::fmt;

use super::bound::Bound;
use super::dimension::DimensionBound;
use crate::pref_error::PrefError;

/// Ordered list of per-dimension constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    dims: Vec<DimensionBound>,
}

impl Region {
    pub fn new(dims: Vec<DimensionBound>) -> Self {
        Self { dims }
    }

    /// One dimension per bound, classified with [`DimensionBound::from_bound`].
    pub fn from_bounds<I: IntoIterator<Item = Bound>>(bounds: I) -> Self {
        Self::new(bounds.into_iter().map(DimensionBound::from_bound).collect())
    }

    pub fn dim(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[DimensionBound] {
        &self.dims
    }

    /// # Errors
    /// [`PrefError::DimensionMismatch`] if `point` has the wrong length.
    pub fn contains(&self, point: &[f64]) -> Result<bool, PrefError> {
        self.check_dim(point.len())?;
        Ok(self.dims.iter().zip(point).all(|(d, &x)| d.contains(x)))
    }

    /// Regions intersect iff they intersect on every dimension.
    pub fn intersects(&self, other: &Region) -> Result<bool, PrefError> {
        self.check_dim(other.dim())?;
        Ok(self
            .dims
            .iter()
            .zip(&other.dims)
            .all(|(a, b)| a.intersects(b)))
    }

    fn check_dim(&self, found: usize) -> Result<(), PrefError> {
        if found != self.dim() {
            return Err(PrefError::DimensionMismatch {
                expected: self.dim(),
                found,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", itertools::join(self.dims.iter(), ", "))
    }
}
