//! Edge descriptors used to build hierarchies.
//!
//! A [`Relation`] states that one element is "higher than" another. A
//! [`LeveledRelation`] additionally carries the level of both endpoints and
//! requires the higher endpoint to sit on a strictly smaller level.

use std::fmt;

use super::bounds::ElementLike;
use crate::pref_error::PrefError;

/// `higher` is above `lower`; the two are never equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Relation<E> {
    higher: E,
    lower: E,
}

impl<E: ElementLike> Relation<E> {
    /// # Errors
    /// [`PrefError::SelfRelation`] if `higher == lower`.
    pub fn new(higher: E, lower: E) -> Result<Self, PrefError> {
        if higher == lower {
            return Err(PrefError::SelfRelation(higher.to_string()));
        }
        Ok(Self { higher, lower })
    }

    pub fn higher(&self) -> &E {
        &self.higher
    }

    pub fn lower(&self) -> &E {
        &self.lower
    }

    pub fn into_parts(self) -> (E, E) {
        (self.higher, self.lower)
    }
}

/// An element tagged with its level in a leveled hierarchy.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Leveled<E> {
    pub element: E,
    pub level: u32,
}

impl<E> Leveled<E> {
    pub fn new(element: E, level: u32) -> Self {
        Self { element, level }
    }
}

impl<E: fmt::Display> fmt::Display for Leveled<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.level)
    }
}

/// Relation between two leveled elements.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LeveledRelation<E> {
    higher: Leveled<E>,
    lower: Leveled<E>,
}

impl<E: ElementLike> LeveledRelation<E> {
    /// # Errors
    /// * [`PrefError::SelfRelation`] if both endpoints are the same leveled element.
    /// * [`PrefError::LevelOrderViolation`] unless `higher.level < lower.level`.
    pub fn new(higher: Leveled<E>, lower: Leveled<E>) -> Result<Self, PrefError> {
        if higher == lower {
            return Err(PrefError::SelfRelation(higher.to_string()));
        }
        if higher.level >= lower.level {
            return Err(PrefError::LevelOrderViolation {
                higher: higher.element.to_string(),
                higher_level: higher.level,
                lower: lower.element.to_string(),
                lower_level: lower.level,
            });
        }
        Ok(Self { higher, lower })
    }

    pub fn higher(&self) -> &Leveled<E> {
        &self.higher
    }

    pub fn lower(&self) -> &Leveled<E> {
        &self.lower
    }

    pub fn into_parts(self) -> (Leveled<E>, Leveled<E>) {
        (self.higher, self.lower)
    }
}
