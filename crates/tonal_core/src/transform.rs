//! Operators that re-derive a resolved scale: degree rotation and the
//! harmonic/context transform.
//!
//! Both are total. An unreachable transform target is reported through
//! [`ContextStatus::Unreachable`] so callers can re-run them on every
//! parameter change and render the degraded state.

use crate::note::{NoteName, OCTAVE_SIZE, PitchClass};
use crate::scale::{ContextStatus, ResolvedScale, resolve_scale};

/// Re-anchor the scale on its own member at position `rotation`.
///
/// The result keeps the note collection of `resolved` and starts from
/// `scale[rotation]`. Returns `resolved` unchanged when the pattern cannot
/// rotate or when `rotation` is a multiple of the pattern length. Otherwise
/// the result is freshly resolved, so its context is `Reachable([new tonic])`.
pub fn apply_degree_rotation(resolved: &ResolvedScale, rotation: usize) -> ResolvedScale {
    let len = resolved.interval_pattern().len();
    if !resolved.can_rotate() || len == 0 || rotation % len == 0 {
        return resolved.clone();
    }

    let rotation = rotation % len;
    let new_tonic = resolved.scale()[rotation].note;
    resolve_scale(new_tonic, resolved.interval_pattern(), rotation)
}

/// Rotate `candidate` so that the note spelled `center` becomes degree 1.
fn recenter(candidate: &ResolvedScale, center: NoteName) -> Option<ResolvedScale> {
    let found = candidate.scale().iter().find(|n| n.note == center)?;
    Some(apply_degree_rotation(candidate, found.degree - 1))
}

/// Move the tonal center up by `semitone_offset` semitones (taken modulo 12).
///
/// The target tonic is spelled from the current scale when its pitch class is
/// a member. Otherwise it is spelled chromatically, first by flattening the
/// member a semitone above, then by sharpening the member a semitone below.
/// A candidate succeeds when the original center's spelling appears in it, in
/// which case the candidate is rotated so the original center is degree 1.
pub fn apply_harmonic_transform(resolved: &ResolvedScale, semitone_offset: i32) -> ResolvedScale {
    let offset = semitone_offset.rem_euclid(OCTAVE_SIZE);
    if offset == 0 {
        return resolved.clone();
    }

    let center = resolved.tonic();
    let target_pc = center.pitch_class.transpose(offset);
    let pattern = resolved.interval_pattern();
    let member_at = |pc: PitchClass| {
        resolved
            .scale()
            .iter()
            .find(|n| n.pitch_class == pc)
            .map(|n| n.note)
    };

    if let Some(target) = member_at(target_pc) {
        let candidate = resolve_scale(target, pattern, 0);
        return match recenter(&candidate, center.note) {
            Some(rotated) => {
                tracing::debug!(center = %center.note, target = %target, "context target found in scale");
                rotated.with_context(ContextStatus::Reachable(vec![target]))
            }
            None => {
                tracing::debug!(center = %center.note, target = %target, "center not representable in target scale");
                candidate.with_context(ContextStatus::Unreachable(vec![target]))
            }
        };
    }

    let from_above = member_at(target_pc.transpose(1)).map(|n| n.flattened());
    let from_below = member_at(target_pc.transpose(-1)).map(|n| n.sharpened());
    let targets: Vec<NoteName> = [from_below, from_above].into_iter().flatten().collect();

    let mut last_candidate = None;
    for tonic in [from_above, from_below].into_iter().flatten() {
        let candidate = resolve_scale(tonic, pattern, 0);
        if let Some(rotated) = recenter(&candidate, center.note) {
            tracing::debug!(center = %center.note, target = %tonic, "context target spelled chromatically");
            return rotated.with_context(ContextStatus::Reachable(targets));
        }
        last_candidate = Some(candidate);
    }

    tracing::debug!(
        center = %center.note,
        target_pc = %target_pc,
        candidates = targets.len(),
        "no spelling of the context target contains the center"
    );
    last_candidate
        .unwrap_or_else(|| resolved.clone())
        .with_context(ContextStatus::Unreachable(targets))
}
