//! Parsing of delimited multidimensional points.

use serde::{Deserialize, Serialize};

use crate::pref_error::PrefError;

/// Splits text such as `"<3|14.5>"` into coordinates.
///
/// Everything before the first `start` marker and after the last `end`
/// marker is discarded (an empty marker disables that step). Slots are cut
/// at `separators` in order and reordered so that a slot with weight `k`
/// lands at output position `k - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointParser {
    start: String,
    end: String,
    separators: Vec<String>,
    weights: Vec<usize>,
}

impl PointParser {
    /// # Errors
    /// [`PrefError::InvalidPointWeights`] unless `weights` is a permutation
    /// of `1..=separators.len() + 1`.
    pub fn new(
        separators: Vec<String>,
        weights: Vec<usize>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Self, PrefError> {
        let dim = separators.len() + 1;
        let mut sorted = weights.clone();
        sorted.sort_unstable();
        if !sorted.iter().copied().eq(1..=dim) {
            return Err(PrefError::InvalidPointWeights(format!(
                "{weights:?} is not a permutation of 1..={dim}"
            )));
        }
        Ok(Self {
            start: start.into(),
            end: end.into(),
            separators,
            weights,
        })
    }

    /// Plain parser for single numbers.
    pub fn scalar() -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            separators: Vec::new(),
            weights: vec![1],
        }
    }

    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    /// # Errors
    /// [`PrefError::Parsing`] if a marker or separator is missing or a slot
    /// is not a finite number.
    pub fn parse(&self, text: &str) -> Result<Vec<f64>, PrefError> {
        let mut rest = text;
        if !self.start.is_empty() {
            rest = rest
                .split_once(self.start.as_str())
                .map(|(_, tail)| tail)
                .ok_or_else(|| missing("start marker", &self.start, text))?;
        }
        if !self.end.is_empty() {
            rest = rest
                .rsplit_once(self.end.as_str())
                .map(|(head, _)| head)
                .ok_or_else(|| missing("end marker", &self.end, text))?;
        }

        let mut slots = Vec::with_capacity(self.dim());
        for sep in &self.separators {
            let (slot, tail) = rest
                .split_once(sep.as_str())
                .ok_or_else(|| missing("separator", sep, text))?;
            slots.push(parse_slot(slot, text)?);
            rest = tail;
        }
        slots.push(parse_slot(rest, text)?);

        let mut point = vec![0.0; slots.len()];
        for (slot, &weight) in slots.into_iter().zip(&self.weights) {
            point[weight - 1] = slot;
        }
        Ok(point)
    }
}

fn missing(what: &str, token: &str, text: &str) -> PrefError {
    PrefError::Parsing(format!("{what} `{token}` not found in `{text}`"))
}

/// One coordinate; must be a finite number.
fn parse_slot(slot: &str, text: &str) -> Result<f64, PrefError> {
    match slot.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(PrefError::Parsing(format!(
            "`{slot}` in `{text}` is not a finite number"
        ))),
    }
}

/// Serializable description of a [`PointParser`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointParserSpec {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub separators: Vec<String>,
    pub weights: Vec<usize>,
}

impl PointParserSpec {
    pub fn build(&self) -> Result<PointParser, PrefError> {
        PointParser::new(
            self.separators.clone(),
            self.weights.clone(),
            self.start.clone(),
            self.end.clone(),
        )
    }
}
