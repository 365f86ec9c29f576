//! Interval patterns and modal rotation.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::note::OCTAVE_SIZE;

/// Ordered semitone steps between consecutive scale degrees.
///
/// The sum does not have to be an octave, but only octave-spanning patterns
/// can be rotated (see [`IntervalPattern::can_rotate`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct IntervalPattern(Vec<u8>);

impl IntervalPattern {
    pub fn new(steps: impl Into<Vec<u8>>) -> Self {
        Self(steps.into())
    }

    pub fn major() -> Self {
        Self(vec![2, 2, 1, 2, 2, 2, 1])
    }

    pub fn natural_minor() -> Self {
        Self(vec![2, 1, 2, 2, 1, 2, 2])
    }

    pub fn steps(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> i32 {
        self.0.iter().map(|&step| step as i32).sum()
    }

    /// Rotation is only meaningful when the steps span exactly one octave.
    pub fn can_rotate(&self) -> bool {
        self.total() == OCTAVE_SIZE
    }

    /// Cyclic shift: element `i` of the result is element `(shift + i) mod len`.
    pub fn rotate(&self, shift: usize) -> Self {
        if self.0.is_empty() {
            return self.clone();
        }
        let mut steps = self.0.clone();
        steps.rotate_left(shift % self.0.len());
        Self(steps)
    }
}

impl From<Vec<u8>> for IntervalPattern {
    fn from(steps: Vec<u8>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for IntervalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|step| step.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl FromStr for IntervalPattern {
    type Err = TheoryError;

    /// Parse space- or comma-separated steps, e.g. "2 2 1 2 2 2 1" or "2,1,2".
    fn from_str(s: &str) -> Result<Self> {
        let steps = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| match part.parse::<u8>() {
                Ok(step) if (1..=OCTAVE_SIZE as u8).contains(&step) => Ok(step),
                _ => Err(TheoryError::InvalidStep(part.to_string())),
            })
            .collect::<Result<Vec<u8>>>()?;

        if steps.is_empty() {
            return Err(TheoryError::EmptyPattern);
        }
        Ok(Self(steps))
    }
}
