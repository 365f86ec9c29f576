//! Explorer state: the build parameters a front end steps through, a pure
//! reducer over user actions, and the derived view.
//!
//! `reduce` never mutates; a front end keeps the latest state, feeds actions
//! in, and re-derives the view after each one.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::instrument::Instrument;
use crate::layout::{LayoutRow, map_scale_to_layout, scale_to_map};
use crate::note::{CHROMATIC_SPELLINGS, NaturalNote, NoteName, OCTAVE_SIZE, Origin};
use crate::pattern::IntervalPattern;
use crate::scale::{ResolvedScale, resolve_scale};
use crate::transform::{apply_degree_rotation, apply_harmonic_transform};

lazy_static! {
    static ref RE_STEP_ACTION: Regex = Regex::new(r"^(tonic|mode|degree|context)([+-]\d+)$").unwrap();
    static ref RE_TOGGLE_ACTION: Regex = Regex::new(r"^toggle:(\d+)$").unwrap();
    static ref RE_ORIGIN_ACTION: Regex = Regex::new(r"^origin:(\d+)=(.+)$").unwrap();
    static ref RE_PATTERN_ACTION: Regex = Regex::new(r"^pattern:(.+)$").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplorerState {
    pub tonic: NoteName,
    pub interval_pattern: IntervalPattern,
    pub modal_shift: usize,
    pub degree_rotation: usize,
    /// Semitones, 0-11.
    pub context_offset: u8,
    pub hidden_degrees: BTreeSet<usize>,
    pub origins: Vec<Origin>,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            tonic: NoteName::natural(NaturalNote::C),
            interval_pattern: IntervalPattern::major(),
            modal_shift: 0,
            degree_rotation: 0,
            context_offset: 0,
            hidden_degrees: BTreeSet::new(),
            origins: Instrument::guitar().origins,
        }
    }
}

/// A single user step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Move through the 21 single-accidental spellings.
    ShiftTonic { offset: i32 },
    ShiftMode { offset: i32 },
    RotateDegree { offset: i32 },
    ShiftContext { offset: i32 },
    ToggleDegree { degree: usize },
    SetOrigin { index: usize, origin: Origin },
    /// Replaces the pattern and resets modal shift and degree rotation.
    SetPattern { pattern: IntervalPattern },
}

fn wrap(current: usize, offset: i32, modulus: usize) -> usize {
    if modulus == 0 {
        return current;
    }
    (current as i64 + offset as i64).rem_euclid(modulus as i64) as usize
}

impl ExplorerState {
    pub fn reduce(&self, action: &Action) -> ExplorerState {
        let mut next = self.clone();
        match action {
            Action::ShiftTonic { offset } => {
                let spellings = CHROMATIC_SPELLINGS.len();
                let current = CHROMATIC_SPELLINGS
                    .iter()
                    .position(|&name| name == self.tonic)
                    .unwrap_or(0);
                next.tonic = CHROMATIC_SPELLINGS[wrap(current, *offset, spellings)];
            }
            Action::ShiftMode { offset } => {
                next.modal_shift = wrap(self.modal_shift, *offset, self.interval_pattern.len());
            }
            Action::RotateDegree { offset } => {
                next.degree_rotation =
                    wrap(self.degree_rotation, *offset, self.interval_pattern.len());
            }
            Action::ShiftContext { offset } => {
                next.context_offset =
                    wrap(self.context_offset as usize, *offset, OCTAVE_SIZE as usize) as u8;
            }
            Action::ToggleDegree { degree } => {
                if !next.hidden_degrees.remove(degree) {
                    next.hidden_degrees.insert(*degree);
                }
            }
            Action::SetOrigin { index, origin } => {
                if let Some(slot) = next.origins.get_mut(*index) {
                    *slot = *origin;
                }
            }
            Action::SetPattern { pattern } => {
                next.interval_pattern = pattern.clone();
                next.modal_shift = 0;
                next.degree_rotation = 0;
            }
        }
        next
    }

    pub fn view(&self) -> ExplorerView {
        let base = resolve_scale(self.tonic, &self.interval_pattern, self.modal_shift);
        let home = apply_harmonic_transform(&base, self.context_offset as i32);
        let resolved = apply_degree_rotation(&home, self.degree_rotation);

        let layout = home.can_transform().then(|| {
            let scale_map = scale_to_map(resolved.scale());
            map_scale_to_layout(&scale_map, &self.origins)
                .iter()
                .map(|row| row.hide_degrees(&self.hidden_degrees))
                .collect()
        });

        ExplorerView {
            home,
            resolved,
            layout,
        }
    }
}

/// Everything a renderer needs after a state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerView {
    /// Scale after modal shift and context transform, before degree rotation.
    pub home: ResolvedScale,
    pub resolved: ResolvedScale,
    /// `None` when the context transform could not reach its target.
    pub layout: Option<Vec<LayoutRow>>,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ShiftTonic { offset } => write!(f, "tonic{:+}", offset),
            Action::ShiftMode { offset } => write!(f, "mode{:+}", offset),
            Action::RotateDegree { offset } => write!(f, "degree{:+}", offset),
            Action::ShiftContext { offset } => write!(f, "context{:+}", offset),
            Action::ToggleDegree { degree } => write!(f, "toggle:{}", degree),
            Action::SetOrigin { index, origin } => write!(f, "origin:{}={}", index, origin),
            Action::SetPattern { pattern } => write!(f, "pattern:{}", pattern),
        }
    }
}

impl FromStr for Action {
    type Err = TheoryError;

    /// Parse "tonic+1", "mode-1", "degree+2", "context+7", "toggle:4",
    /// "origin:0=D4" or "pattern:2 1 2 2 1 2 2".
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || TheoryError::InvalidAction(s.to_string());

        if let Some(caps) = RE_STEP_ACTION.captures(s) {
            let offset: i32 = caps[2].parse().map_err(|_| invalid())?;
            return Ok(match &caps[1] {
                "tonic" => Action::ShiftTonic { offset },
                "mode" => Action::ShiftMode { offset },
                "degree" => Action::RotateDegree { offset },
                _ => Action::ShiftContext { offset },
            });
        }

        if let Some(caps) = RE_TOGGLE_ACTION.captures(s) {
            let degree = caps[1].parse().map_err(|_| invalid())?;
            return Ok(Action::ToggleDegree { degree });
        }

        if let Some(caps) = RE_ORIGIN_ACTION.captures(s) {
            let index = caps[1].parse().map_err(|_| invalid())?;
            let origin = caps[2].parse()?;
            return Ok(Action::SetOrigin { index, origin });
        }

        if let Some(caps) = RE_PATTERN_ACTION.captures(s) {
            let pattern = caps[1].parse()?;
            return Ok(Action::SetPattern { pattern });
        }

        Err(invalid())
    }
}
