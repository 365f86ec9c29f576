//! Diatonic scale construction and scale resolution.
//!
//! This module provides:
//! - `build_diatonic_scale`: walks an interval pattern from a tonic, one natural
//!   letter per step, spelling each note with the fewest accidentals
//! - `resolve_scale`: applies the modal shift and packages the result as a
//!   `ResolvedScale`

use schemars::JsonSchema;
use serde::Serialize;

use crate::note::{MAX_PITCH_CLASS_OFFSET, NaturalNote, NoteName, OCTAVE_SIZE, PitchClass};
use crate::pattern::IntervalPattern;

/// A spelled member of a scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScaleNote {
    pub note: NoteName,
    /// 1-based position in the scale; the octave closure sits at `len(pattern) + 1`.
    pub degree: usize,
    pub pitch_class: PitchClass,
}

/// Outcome of the harmonic/context transform carried by every resolved scale.
///
/// `Reachable` is the default for a freshly resolved scale (targets = the tonic).
/// `Unreachable` marks a transform whose original center could not be spelled in
/// the target scale; it is a renderable state, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "status", content = "targets", rename_all = "camelCase")]
pub enum ContextStatus {
    Reachable(Vec<NoteName>),
    Unreachable(Vec<NoteName>),
}

impl ContextStatus {
    pub fn targets(&self) -> &[NoteName] {
        match self {
            ContextStatus::Reachable(targets) | ContextStatus::Unreachable(targets) => targets,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, ContextStatus::Reachable(_))
    }
}

/// A scale together with the pattern it was built from and its transform status.
///
/// Values are never mutated in place; every operator returns a new one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedScale {
    scale: Vec<ScaleNote>,
    interval_pattern: IntervalPattern,
    can_rotate: bool,
    context: ContextStatus,
}

impl ResolvedScale {
    pub fn scale(&self) -> &[ScaleNote] {
        &self.scale
    }

    /// The pattern the scale was built from (after any modal shift).
    pub fn interval_pattern(&self) -> &IntervalPattern {
        &self.interval_pattern
    }

    pub fn can_rotate(&self) -> bool {
        self.can_rotate
    }

    pub fn context(&self) -> &ContextStatus {
        &self.context
    }

    pub fn can_transform(&self) -> bool {
        self.context.is_reachable()
    }

    pub fn transform_targets(&self) -> &[NoteName] {
        self.context.targets()
    }

    /// Degree 1. A resolved scale always contains at least its tonic.
    pub fn tonic(&self) -> ScaleNote {
        self.scale[0]
    }

    /// Note names in scale order, including the octave closure.
    pub fn note_names(&self) -> Vec<NoteName> {
        self.scale.iter().map(|n| n.note).collect()
    }

    pub(crate) fn with_context(self, context: ContextStatus) -> Self {
        Self { context, ..self }
    }
}

/// Signed accidental offset that spells `target` on `natural`, wrapped into
/// -6..=+6 so the spelling with the fewest accidentals wins.
fn spelling_offset(target: PitchClass, natural: NaturalNote) -> i8 {
    let diff = target.value() as i32 - natural.natural_pitch_class();
    let offset = if diff > MAX_PITCH_CLASS_OFFSET {
        diff - OCTAVE_SIZE
    } else if diff < -MAX_PITCH_CLASS_OFFSET {
        diff + OCTAVE_SIZE
    } else {
        diff
    };
    offset as i8
}

/// Build a scale by stepping through `pattern` from `tonic`.
///
/// Every step advances to the next natural letter, so spelling follows
/// diatonic logic even when the pattern itself is not diatonic. The result has
/// `pattern.len() + 1` notes; the last one closes the octave when the pattern
/// sums to twelve.
pub fn build_diatonic_scale(tonic: NoteName, pattern: &IntervalPattern) -> Vec<ScaleNote> {
    let mut current_pc = tonic.pitch_class();
    let mut current_natural = tonic.letter();
    let mut current_degree = 1;

    let mut scale = Vec::with_capacity(pattern.len() + 1);
    scale.push(ScaleNote {
        note: tonic,
        degree: current_degree,
        pitch_class: current_pc,
    });

    for &step in pattern.steps() {
        let target_natural = current_natural.next();
        let target_pc = current_pc.transpose(step as i32);
        let note = NoteName::spelled(target_natural, spelling_offset(target_pc, target_natural));

        current_degree += 1;
        tracing::trace!(degree = current_degree, step, note = %note, "spelled scale step");

        scale.push(ScaleNote {
            note,
            degree: current_degree,
            pitch_class: target_pc,
        });

        current_pc = target_pc;
        current_natural = target_natural;
    }

    scale
}

/// Resolve a scale from build parameters.
///
/// When the pattern spans an octave and `modal_shift > 0`, the pattern is
/// rotated first; the tonic never moves.
pub fn resolve_scale(tonic: NoteName, pattern: &IntervalPattern, modal_shift: usize) -> ResolvedScale {
    let can_rotate = pattern.can_rotate();
    let interval_pattern = if can_rotate && modal_shift > 0 {
        pattern.rotate(modal_shift)
    } else {
        pattern.clone()
    };
    let scale = build_diatonic_scale(tonic, &interval_pattern);

    ResolvedScale {
        scale,
        interval_pattern,
        can_rotate,
        context: ContextStatus::Reachable(vec![tonic]),
    }
}
