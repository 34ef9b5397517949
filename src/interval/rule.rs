//! Labelled unions of regions.
//!
//! A [`Rule`] defines the extent of one taxonomy value over a numeric
//! domain. Rules are built either from one region per dimension
//! ([`Rule::independent`]) or from a lexicographic range
//! ([`Rule::dependent`]), and are immutable afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bound::{Bound, Inclusion, InclusionPair, parse_limit};
use super::lexicographic::decompose;
use super::region::Region;
use crate::pref_error::PrefError;

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    label: String,
    regions: Vec<Region>,
}

impl Rule {
    /// One region built directly from per-dimension bounds and inclusions.
    ///
    /// # Errors
    /// [`PrefError::MalformedRegion`] unless all three slices have the same
    /// length of at least 2. Single-dimension rules use [`Rule::dependent`].
    pub fn independent(
        label: impl Into<String>,
        lower: &[f64],
        upper: &[f64],
        inclusions: &[InclusionPair],
    ) -> Result<Self, PrefError> {
        let label = label.into();
        if lower.len() != upper.len() || lower.len() != inclusions.len() {
            return Err(PrefError::MalformedRegion(format!(
                "rule `{label}`: {} lower limits, {} upper limits, {} inclusions",
                lower.len(),
                upper.len(),
                inclusions.len()
            )));
        }
        if lower.len() < 2 {
            return Err(PrefError::MalformedRegion(format!(
                "rule `{label}`: independent regions need at least 2 dimensions"
            )));
        }
        let region = Region::from_bounds(
            lower
                .iter()
                .zip(upper)
                .zip(inclusions)
                .map(|((&l, &u), &incl)| Bound::new(l, u, incl)),
        );
        Ok(Self {
            label,
            regions: vec![region],
        })
    }

    /// Union of boxes equal to the lexicographic range `lower .. upper`,
    /// with `inclusion` applied at the deciding dimension.
    ///
    /// # Errors
    /// [`PrefError::MalformedRegion`] if the limit slices differ in length
    /// or are empty.
    pub fn dependent(
        label: impl Into<String>,
        lower: &[f64],
        upper: &[f64],
        inclusion: InclusionPair,
    ) -> Result<Self, PrefError> {
        let label = label.into();
        if lower.len() != upper.len() || lower.is_empty() {
            return Err(PrefError::MalformedRegion(format!(
                "rule `{label}`: {} lower limits, {} upper limits",
                lower.len(),
                upper.len()
            )));
        }
        Ok(Self {
            label,
            regions: decompose(lower, upper, inclusion),
        })
    }

    /// Builds a rule from textual tokens.
    ///
    /// Limits are `+inf`, `-inf` or numbers; inclusions are `[`/`]`
    /// brackets. A single inclusion pair selects [`Rule::dependent`], one
    /// pair per dimension selects [`Rule::independent`].
    pub fn parse<S: AsRef<str>>(
        label: impl Into<String>,
        lower: &[S],
        upper: &[S],
        lower_inclusion: &[S],
        upper_inclusion: &[S],
    ) -> Result<Self, PrefError> {
        let label = label.into();
        if lower.len() != upper.len() || lower_inclusion.len() != upper_inclusion.len() {
            return Err(PrefError::MalformedRegion(format!(
                "rule `{label}`: limit or inclusion lists differ in length"
            )));
        }
        let lower = lower
            .iter()
            .map(|t| parse_limit(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let upper = upper
            .iter()
            .map(|t| parse_limit(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let inclusions = lower_inclusion
            .iter()
            .zip(upper_inclusion)
            .map(|(lo, up)| {
                Ok(InclusionPair::new(
                    Inclusion::parse_lower(lo.as_ref())?,
                    Inclusion::parse_upper(up.as_ref())?,
                ))
            })
            .collect::<Result<Vec<_>, PrefError>>()?;

        match inclusions.as_slice() {
            [single] => Self::dependent(label, &lower, &upper, *single),
            many if many.len() == lower.len() => Self::independent(label, &lower, &upper, many),
            many => Err(PrefError::MalformedRegion(format!(
                "rule `{label}`: {} dimensions but {} inclusion pairs",
                lower.len(),
                many.len()
            ))),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn dim(&self) -> usize {
        self.regions.first().map_or(0, Region::dim)
    }

    /// True iff `point` lies in some region.
    ///
    /// # Errors
    /// [`PrefError::DimensionMismatch`] if `point` has the wrong length.
    pub fn contains(&self, point: &[f64]) -> Result<bool, PrefError> {
        for region in &self.regions {
            if region.contains(point)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True iff some region of `self` intersects some region of `other`.
    pub fn intersects(&self, other: &Rule) -> Result<bool, PrefError> {
        if self.dim() != other.dim() {
            return Err(PrefError::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            });
        }
        for mine in &self.regions {
            for theirs in &other.regions {
                if mine.intersects(theirs)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.label,
            itertools::join(self.regions.iter(), " | ")
        )
    }
}

/// Textual form of a rule, as found in configuration files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub label: String,
    pub lower: Vec<String>,
    pub upper: Vec<String>,
    pub lower_inclusion: Vec<String>,
    pub upper_inclusion: Vec<String>,
}

impl RuleSpec {
    pub fn to_rule(&self) -> Result<Rule, PrefError> {
        Rule::parse(
            self.label.clone(),
            &self.lower,
            &self.upper,
            &self.lower_inclusion,
            &self.upper_inclusion,
        )
    }
}
