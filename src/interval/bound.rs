//! One-dimensional numeric bounds with per-endpoint inclusion.

use std::fmt;

use crate::pref_error::PrefError;

/// Whether an endpoint belongs to the bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Inclusion {
    Included,
    Excluded,
}

impl Inclusion {
    /// Parses a lower-endpoint bracket: `[` includes, `]` excludes.
    pub fn parse_lower(token: &str) -> Result<Self, PrefError> {
        match token.trim() {
            "[" => Ok(Inclusion::Included),
            "]" => Ok(Inclusion::Excluded),
            other => Err(PrefError::Parsing(format!(
                "`{other}` is not a lower inclusion token"
            ))),
        }
    }

    /// Parses an upper-endpoint bracket: `]` includes, `[` excludes.
    pub fn parse_upper(token: &str) -> Result<Self, PrefError> {
        match token.trim() {
            "]" => Ok(Inclusion::Included),
            "[" => Ok(Inclusion::Excluded),
            other => Err(PrefError::Parsing(format!(
                "`{other}` is not an upper inclusion token"
            ))),
        }
    }
}

/// Inclusion flags of both endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct InclusionPair {
    pub lower: Inclusion,
    pub upper: Inclusion,
}

impl InclusionPair {
    pub const CLOSED: Self = Self::new(Inclusion::Included, Inclusion::Included);
    pub const OPEN: Self = Self::new(Inclusion::Excluded, Inclusion::Excluded);

    pub const fn new(lower: Inclusion, upper: Inclusion) -> Self {
        Self { lower, upper }
    }
}

impl Default for InclusionPair {
    fn default() -> Self {
        Self::CLOSED
    }
}

/// Parses a bound token: `+inf`, `-inf` or a decimal literal.
pub fn parse_limit(token: &str) -> Result<f64, PrefError> {
    match token.trim() {
        "+inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        other => other
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .ok_or_else(|| PrefError::Parsing(format!("`{other}` is not a numeric limit"))),
    }
}

/// Smallest representable `f64` strictly greater than `x`.
pub(crate) fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    f64::from_bits(if x > 0.0 { bits + 1 } else { bits - 1 })
}

/// Largest representable `f64` strictly smaller than `x`.
pub(crate) fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

/// A range `lower .. upper` with independent endpoint inclusion.
///
/// A bound with `lower > upper` is *disjoint*; see [`Bound::split_disjoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
    pub inclusion: InclusionPair,
}

impl Bound {
    pub const fn new(lower: f64, upper: f64, inclusion: InclusionPair) -> Self {
        Self {
            lower,
            upper,
            inclusion,
        }
    }

    /// Both endpoints included.
    pub const fn closed(lower: f64, upper: f64) -> Self {
        Self::new(lower, upper, InclusionPair::CLOSED)
    }

    /// The degenerate range `[x, x]`.
    pub const fn point(x: f64) -> Self {
        Self::closed(x, x)
    }

    /// Infinite on both sides, in either orientation.
    pub fn is_dont_care(&self) -> bool {
        (self.lower == f64::NEG_INFINITY && self.upper == f64::INFINITY)
            || (self.lower == f64::INFINITY && self.upper == f64::NEG_INFINITY)
    }

    /// `lower == upper`.
    pub fn is_equal(&self) -> bool {
        self.lower == self.upper
    }

    pub fn is_disjoint(&self) -> bool {
        self.lower > self.upper
    }

    /// Rewrites an inverted bound into the two rays it denotes.
    ///
    /// `lower > upper` becomes `(-inf, upper] ∪ [lower, +inf)`; each finite
    /// endpoint keeps its own inclusion flag and the infinite ends are
    /// included. A regular bound is returned unchanged.
    pub fn split_disjoint(self) -> Vec<Bound> {
        if !self.is_disjoint() {
            return vec![self];
        }
        vec![
            Bound::new(
                f64::NEG_INFINITY,
                self.upper,
                InclusionPair::new(Inclusion::Included, self.inclusion.upper),
            ),
            Bound::new(
                self.lower,
                f64::INFINITY,
                InclusionPair::new(self.inclusion.lower, Inclusion::Included),
            ),
        ]
    }

    pub fn contains(&self, x: f64) -> bool {
        let above_lower = match self.inclusion.lower {
            Inclusion::Included => x >= self.lower,
            Inclusion::Excluded => x > self.lower,
        };
        let below_upper = match self.inclusion.upper {
            Inclusion::Included => x <= self.upper,
            Inclusion::Excluded => x < self.upper,
        };
        above_lower && below_upper
    }

    /// True if either bound contains an endpoint of the other. An open
    /// endpoint is tested at its adjacent representable value.
    pub fn intersects(&self, other: &Bound) -> bool {
        self.touches_endpoint_of(other) || other.touches_endpoint_of(self)
    }

    fn touches_endpoint_of(&self, other: &Bound) -> bool {
        let lo = match other.inclusion.lower {
            Inclusion::Included => other.lower,
            Inclusion::Excluded => next_up(other.lower),
        };
        let hi = match other.inclusion.upper {
            Inclusion::Included => other.upper,
            Inclusion::Excluded => next_down(other.upper),
        };
        self.contains(lo) || self.contains(hi)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = match self.inclusion.lower {
            Inclusion::Included => '[',
            Inclusion::Excluded => ']',
        };
        let close = match self.inclusion.upper {
            Inclusion::Included => ']',
            Inclusion::Excluded => '[',
        };
        write!(f, "{open}{} - {}{close}", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_bound_containment() {
        let b = Bound::closed(2.0, 5.0);
        for x in [2.0, 5.0, 3.5] {
            assert!(b.contains(x), "{x} should be inside {b}");
        }
        for x in [1.999, 5.001] {
            assert!(!b.contains(x), "{x} should be outside {b}");
        }
    }

    #[test]
    fn open_upper_excludes_endpoint() {
        let b = Bound::new(
            2.0,
            5.0,
            InclusionPair::new(Inclusion::Included, Inclusion::Excluded),
        );
        assert!(b.contains(2.0));
        assert!(!b.contains(5.0));
        assert!(b.contains(4.999_999));
    }

    #[test]
    fn touching_closed_bounds_intersect() {
        let a = Bound::closed(0.0, 10.0);
        let b = Bound::closed(10.0, 20.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn open_touching_bounds_do_not_intersect() {
        let a = Bound::new(
            0.0,
            10.0,
            InclusionPair::new(Inclusion::Included, Inclusion::Excluded),
        );
        let b = Bound::new(
            10.0,
            20.0,
            InclusionPair::new(Inclusion::Excluded, Inclusion::Included),
        );
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn nested_bound_intersects_both_ways() {
        let outer = Bound::closed(0.0, 100.0);
        let inner = Bound::closed(40.0, 60.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn disjoint_bound_splits_into_rays() {
        let parts = Bound::closed(5.0, 2.0).split_disjoint();
        assert_eq!(parts.len(), 2);
        let inside = |x: f64| parts.iter().any(|b| b.contains(x));
        assert!(inside(-1e9) && inside(2.0) && inside(5.0) && inside(1e9));
        assert!(!inside(3.0) && !inside(4.999));
    }

    #[test]
    fn adjacent_values() {
        assert!(next_up(1.0) > 1.0);
        assert!(next_down(1.0) < 1.0);
        assert_eq!(next_up(0.0), f64::from_bits(1));
        assert_eq!(next_up(-0.0), f64::from_bits(1));
        assert_eq!(next_up(f64::NEG_INFINITY), -f64::MAX);
        assert_eq!(next_down(f64::INFINITY), f64::MAX);
    }

    #[test]
    fn limit_and_inclusion_tokens() {
        assert_eq!(parse_limit("+inf").unwrap(), f64::INFINITY);
        assert_eq!(parse_limit(" -inf ").unwrap(), f64::NEG_INFINITY);
        assert_eq!(parse_limit("2.5").unwrap(), 2.5);
        assert!(matches!(parse_limit("abc"), Err(PrefError::Parsing(_))));
        assert_eq!(Inclusion::parse_lower("[").unwrap(), Inclusion::Included);
        assert_eq!(Inclusion::parse_lower("]").unwrap(), Inclusion::Excluded);
        assert_eq!(Inclusion::parse_upper("]").unwrap(), Inclusion::Included);
        assert_eq!(Inclusion::parse_upper("[").unwrap(), Inclusion::Excluded);
        assert!(Inclusion::parse_upper("(").is_err());
    }

    #[test]
    fn display_uses_outward_brackets_for_open_ends() {
        let b = Bound::new(
            1.0,
            2.0,
            InclusionPair::new(Inclusion::Excluded, Inclusion::Included),
        );
        assert_eq!(b.to_string(), "]1 - 2]");
    }
}
