//! Music scale resolution and transformation engine
//!
//! This crate spells diatonic scales from a tonic and an interval pattern,
//! applies modal shift, degree rotation and the harmonic/context transform,
//! and projects the result onto instrument rows. It is a pure library; it
//! performs no I/O beyond parsing and serializing its own types.

#[macro_use]
extern crate lazy_static;

extern crate serde;
extern crate serde_json;

pub mod error;
pub mod explorer;
pub mod instrument;
pub mod layout;
pub mod note;
pub mod pattern;
pub mod scale;
pub mod transform;

// Re-export commonly used items
pub use error::{Result, TheoryError};
pub use explorer::{Action, ExplorerState, ExplorerView};
pub use instrument::{Instrument, InstrumentSet};
pub use layout::{LayoutRow, LayoutSlot, ScaleMap, map_scale_to_layout, scale_to_map};
pub use note::{Accidental, NaturalNote, NoteName, Origin, PitchClass};
pub use pattern::IntervalPattern;
pub use scale::{ContextStatus, ResolvedScale, ScaleNote, build_diatonic_scale, resolve_scale};
pub use transform::{apply_degree_rotation, apply_harmonic_transform};
