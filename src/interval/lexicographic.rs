//! Decomposition of a lexicographic range into axis-aligned boxes.
//!
//! A dependent range `lower ≤lex p ≤lex upper` holds either because `p` is
//! strictly inside at the first dimension that is not pinned by an equal or
//! don't-care bound, or because it ties there and is decided by a later
//! dimension. Each scanned dimension therefore contributes either one tight
//! box (when every earlier dimension is pinned) or two half-infinite boxes,
//! with every later dimension left as don't-care.

use super::bound::{Bound, Inclusion, InclusionPair};
use super::dimension::DimensionBound;
use super::region::Region;

fn pinned(b: &Bound) -> bool {
    b.is_equal() || b.is_dont_care()
}

/// Splits the lexicographic range described by `lower`/`upper` into a union
/// of regions. `inclusion` only applies at the last significant dimension
/// (the last one, or the one followed only by don't-care dimensions); every
/// other scanned dimension is open on both sides.
///
/// Callers guarantee `lower.len() == upper.len()`.
pub(crate) fn decompose(lower: &[f64], upper: &[f64], inclusion: InclusionPair) -> Vec<Region> {
    let dims: Vec<Bound> = lower
        .iter()
        .zip(upper)
        .map(|(&l, &u)| Bound::closed(l, u))
        .collect();
    let n = dims.len();

    if dims.iter().all(pinned) {
        return vec![Region::from_bounds(dims)];
    }

    let mut regions = Vec::new();
    for (i, cur) in dims.iter().enumerate() {
        let last = i + 1 == n;
        if (cur.is_equal() && !last) || cur.is_dont_care() {
            continue;
        }
        let prefix_pinned = i == 0 || dims[..i].iter().all(pinned);
        let significant_last = dims[i + 1..].iter().all(Bound::is_dont_care);
        let pair = if significant_last {
            inclusion
        } else {
            InclusionPair::OPEN
        };
        let tail = vec![DimensionBound::DontCare; n - i - 1];

        if prefix_pinned && !cur.is_disjoint() {
            let mut dims_out: Vec<DimensionBound> = dims[..i]
                .iter()
                .map(|b| DimensionBound::from_bound(*b))
                .collect();
            dims_out.push(Bound::new(cur.lower, cur.upper, pair).into());
            dims_out.extend(tail);
            regions.push(Region::new(dims_out));
            continue;
        }

        let (mut low, mut high): (Vec<DimensionBound>, Vec<DimensionBound>) = if prefix_pinned {
            let prefix: Vec<DimensionBound> = dims[..i]
                .iter()
                .map(|b| DimensionBound::from_bound(*b))
                .collect();
            (prefix.clone(), prefix)
        } else {
            dims[..i]
                .iter()
                .map(|b| {
                    if b.is_dont_care() {
                        (DimensionBound::DontCare, DimensionBound::DontCare)
                    } else {
                        (
                            Bound::point(b.lower).into(),
                            Bound::point(b.upper).into(),
                        )
                    }
                })
                .unzip()
        };
        low.push(
            Bound::new(
                cur.lower,
                f64::INFINITY,
                InclusionPair::new(pair.lower, Inclusion::Excluded),
            )
            .into(),
        );
        high.push(
            Bound::new(
                f64::NEG_INFINITY,
                cur.upper,
                InclusionPair::new(Inclusion::Excluded, pair.upper),
            )
            .into(),
        );
        low.extend(tail.iter().cloned());
        high.extend(tail);
        regions.push(Region::new(low));
        regions.push(Region::new(high));
    }
    regions
}
