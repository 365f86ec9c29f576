//! Instrument descriptions: a named list of row origins.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::note::{NaturalNote, NoteName, Origin};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Instrument {
    pub name: String,
    /// One origin per row; strings are listed from the highest to the lowest.
    pub origins: Vec<Origin>,
}

const fn natural(letter: NaturalNote, octave: i32) -> Origin {
    Origin::new(NoteName::natural(letter), octave)
}

impl Instrument {
    pub fn new(name: impl Into<String>, origins: Vec<Origin>) -> Self {
        Self {
            name: name.into(),
            origins,
        }
    }

    pub fn keyboard() -> Self {
        Self::new("keyboard", vec![natural(NaturalNote::C, 4)])
    }

    pub fn guitar() -> Self {
        use NaturalNote::*;
        Self::new(
            "guitar",
            vec![
                natural(E, 4),
                natural(B, 3),
                natural(G, 3),
                natural(D, 3),
                natural(A, 2),
                natural(E, 2),
            ],
        )
    }

    pub fn ukulele() -> Self {
        use NaturalNote::*;
        Self::new(
            "ukulele",
            vec![natural(A, 4), natural(E, 4), natural(C, 4), natural(G, 4)],
        )
    }

    pub fn bass() -> Self {
        use NaturalNote::*;
        Self::new(
            "bass",
            vec![natural(G, 2), natural(D, 2), natural(A, 1), natural(E, 1)],
        )
    }

    pub fn presets() -> Vec<Instrument> {
        vec![
            Self::keyboard(),
            Self::guitar(),
            Self::ukulele(),
            Self::bass(),
        ]
    }
}

/// A set of instruments as stored in the instruments config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InstrumentSet {
    #[serde(default)]
    pub instruments: Vec<Instrument>,
}

impl InstrumentSet {
    pub fn presets() -> Self {
        Self {
            instruments: Instrument::presets(),
        }
    }

    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Instrument> {
        self.instruments
            .iter()
            .find(|instrument| instrument.name.eq_ignore_ascii_case(name))
    }

    /// Overlay `other` on this set: same-named instruments are replaced,
    /// new ones are appended.
    pub fn merge(mut self, other: InstrumentSet) -> Self {
        for instrument in other.instruments {
            match self
                .instruments
                .iter_mut()
                .find(|existing| existing.name.eq_ignore_ascii_case(&instrument.name))
            {
                Some(existing) => *existing = instrument,
                None => self.instruments.push(instrument),
            }
        }
        self
    }
}
