//! Pitch-class lookup and projection onto linear instrument rows.
//!
//! A `ScaleMap` is a 12-entry table indexed by pitch class. A `LayoutRow`
//! contains 13 entries (0-12 inclusive, where 12 repeats the origin one octave up):
//! - Index 0 = the origin note itself
//! - Index 1 = one semitone above the origin
//! - ...up to index 12 = the origin's pitch class in the next octave

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::Serialize;

use crate::note::{NoteName, OCTAVE_SIZE, Origin, PitchClass};
use crate::scale::ScaleNote;

/// Slots per projected row: one octave inclusive of both ends.
pub const LAYOUT_WIDTH: usize = OCTAVE_SIZE as usize + 1;

/// Scale members keyed by pitch class; the first note seen at a pitch class wins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ScaleMap {
    slots: [Option<ScaleNote>; OCTAVE_SIZE as usize],
}

impl ScaleMap {
    pub fn get(&self, pc: PitchClass) -> Option<&ScaleNote> {
        self.slots[pc.index()].as_ref()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}

/// Collapse a scale into a pitch-class lookup. Later enharmonic duplicates
/// (including the octave closure) are ignored.
pub fn scale_to_map(scale: &[ScaleNote]) -> ScaleMap {
    let mut map = ScaleMap::default();
    for note in scale {
        let slot = &mut map.slots[note.pitch_class.index()];
        if slot.is_none() {
            *slot = Some(*note);
        }
    }
    map
}

/// One semitone position on an instrument row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LayoutSlot {
    /// `None` when the pitch class is not in the scale (or its degree is hidden).
    pub note: Option<NoteName>,
    pub degree: Option<usize>,
    pub octave: i32,
}

/// Narrowest text cell: a space plus a one-accidental name.
const MIN_CELL_WIDTH: usize = 3;

impl LayoutSlot {
    fn name_width(&self) -> usize {
        self.note.map_or(0, |note| note.to_string().chars().count())
    }

    /// Text cell padded to `width` characters: `" C "`, `" F♯"`, or blanks.
    fn cell(&self, width: usize) -> String {
        let name = self.note.map(|note| note.to_string()).unwrap_or_default();
        format!(" {:<pad$}", name, pad = width.saturating_sub(1))
    }
}

/// A scale projected onto one string / keyboard octave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LayoutRow {
    pub origin: Origin,
    pub slots: [LayoutSlot; LAYOUT_WIDTH],
}

impl LayoutRow {
    /// Blank the slots whose scale degree is in `hidden`.
    pub fn hide_degrees(&self, hidden: &BTreeSet<usize>) -> LayoutRow {
        let mut row = self.clone();
        for slot in row.slots.iter_mut() {
            if slot.degree.is_some_and(|degree| hidden.contains(&degree)) {
                slot.note = None;
                slot.degree = None;
            }
        }
        row
    }

    /// Names of the occupied slots, left to right.
    pub fn notes(&self) -> Vec<NoteName> {
        self.slots.iter().filter_map(|slot| slot.note).collect()
    }

    /// Cell width that fits every name in this row.
    pub fn cell_width(&self) -> usize {
        self.slots
            .iter()
            .map(|slot| slot.name_width() + 1)
            .max()
            .unwrap_or(0)
            .max(MIN_CELL_WIDTH)
    }

    /// Text rendering used by terminal front ends. Every cell has the same
    /// width, widened when the row spells multi-symbol accidentals.
    pub fn render(&self) -> String {
        self.render_with_width(self.cell_width())
    }

    /// Like `render`, with cells padded to at least `width` characters so
    /// several rows can share one column grid.
    pub fn render_with_width(&self, width: usize) -> String {
        let width = width.max(self.cell_width());
        self.slots
            .iter()
            .map(|slot| slot.cell(width))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

fn project_row(scale_map: &ScaleMap, origin: Origin) -> LayoutRow {
    let start_pc = origin.note.pitch_class();
    let mut octave = origin.octave;
    let mut slots = [LayoutSlot::default(); LAYOUT_WIDTH];

    for (index, slot) in slots.iter_mut().enumerate() {
        let pc = start_pc.transpose(index as i32);
        // Octave numbers change at C
        if index > 0 && pc.value() == 0 {
            octave += 1;
        }
        let member = scale_map.get(pc);
        *slot = LayoutSlot {
            note: member.map(|n| n.note),
            degree: member.map(|n| n.degree),
            octave,
        };
    }

    LayoutRow { origin, slots }
}

/// Project `scale_map` onto one row per origin, in origin order.
pub fn map_scale_to_layout(scale_map: &ScaleMap, origins: &[Origin]) -> Vec<LayoutRow> {
    origins
        .iter()
        .map(|&origin| project_row(scale_map, origin))
        .collect()
}
