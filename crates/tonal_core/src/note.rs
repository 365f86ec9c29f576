//! Note model: natural letters, accidentals, spelled note names and pitch classes.
//!
//! This module provides:
//! - `NaturalNote`: the seven natural letters with ordinal and natural pitch class
//! - `NoteName`: a spelled note (letter + alteration), compared by spelling
//! - `PitchClass`: a semitone position modulo the octave
//! - `Origin`: a note plus octave, the starting point of an instrument row

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TheoryError};

/// Semitones per octave.
pub const OCTAVE_SIZE: i32 = 12;

/// Largest alteration the builder will spell before wrapping around the
/// circle of fifths (-6 ..= +6).
pub const MAX_PITCH_CLASS_OFFSET: i32 = 6;

pub const SHARP_SYMBOL: char = '♯';
pub const FLAT_SYMBOL: char = '♭';

lazy_static! {
    static ref RE_NOTE: Regex = Regex::new(r"^([A-Ga-g])([#♯b♭]*)$").unwrap();
    static ref RE_ORIGIN: Regex = Regex::new(r"^([A-Ga-g][#♯b♭]*)(-?\d+)$").unwrap();

    /// Every single-accidental spelling, ordered flat / natural / sharp per letter.
    pub static ref CHROMATIC_SPELLINGS: Vec<NoteName> = NaturalNote::ALL
        .iter()
        .flat_map(|&natural| {
            [Accidental::Flat, Accidental::Natural, Accidental::Sharp]
                .map(|accidental| NoteName::new(natural, accidental))
        })
        .collect();
}

/// One of the seven natural letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum NaturalNote {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NaturalNote {
    pub const ALL: [NaturalNote; 7] = [
        NaturalNote::C,
        NaturalNote::D,
        NaturalNote::E,
        NaturalNote::F,
        NaturalNote::G,
        NaturalNote::A,
        NaturalNote::B,
    ];

    /// Scale-degree ordinal within the natural (C major) sequence, 1-7.
    pub const fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    /// Zero-based position in `ALL`.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn natural_pitch_class(self) -> i32 {
        match self {
            NaturalNote::C => 0,
            NaturalNote::D => 2,
            NaturalNote::E => 4,
            NaturalNote::F => 5,
            NaturalNote::G => 7,
            NaturalNote::A => 9,
            NaturalNote::B => 11,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            NaturalNote::C => 'C',
            NaturalNote::D => 'D',
            NaturalNote::E => 'E',
            NaturalNote::F => 'F',
            NaturalNote::G => 'G',
            NaturalNote::A => 'A',
            NaturalNote::B => 'B',
        }
    }

    /// Letter at `index`, wrapping through the seven naturals.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Some(NaturalNote::C),
            'D' => Some(NaturalNote::D),
            'E' => Some(NaturalNote::E),
            'F' => Some(NaturalNote::F),
            'G' => Some(NaturalNote::G),
            'A' => Some(NaturalNote::A),
            'B' => Some(NaturalNote::B),
            _ => None,
        }
    }

    /// The natural letter after this one (B wraps to C).
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// A single accidental as accepted on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Accidental {
    Flat,
    Natural,
    Sharp,
}

impl Accidental {
    pub const fn semitones(self) -> i8 {
        match self {
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' | SHARP_SYMBOL => Some(Accidental::Sharp),
            'b' | FLAT_SYMBOL => Some(Accidental::Flat),
            _ => None,
        }
    }
}

/// A spelled note: natural letter plus a signed alteration in semitones.
///
/// Two names are equal only when they are spelled the same; `C♯` and `D♭`
/// share a pitch class but are different names. Parsed input is restricted
/// to a single accidental, while the scale builder may spell wider
/// alterations (rendered by repeating the symbol) when a pattern demands it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoteName {
    natural: NaturalNote,
    alteration: i8,
}

impl NoteName {
    pub const fn new(natural: NaturalNote, accidental: Accidental) -> Self {
        Self {
            natural,
            alteration: accidental.semitones(),
        }
    }

    pub const fn natural(natural: NaturalNote) -> Self {
        Self::new(natural, Accidental::Natural)
    }

    pub(crate) const fn spelled(natural: NaturalNote, alteration: i8) -> Self {
        Self {
            natural,
            alteration,
        }
    }

    pub const fn letter(&self) -> NaturalNote {
        self.natural
    }

    /// Signed semitone offset from the natural letter.
    pub const fn alteration(&self) -> i8 {
        self.alteration
    }

    /// The accidental, if the spelling uses at most one symbol.
    pub fn accidental(&self) -> Option<Accidental> {
        match self.alteration {
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            _ => None,
        }
    }

    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::new(self.natural.natural_pitch_class() + self.alteration as i32)
    }

    /// Same letter, one semitone higher (`F` → `F♯`, `B♭` → `B`).
    pub fn sharpened(&self) -> Self {
        Self::spelled(self.natural, self.alteration + 1)
    }

    /// Same letter, one semitone lower (`E` → `E♭`, `C♯` → `C`).
    pub fn flattened(&self) -> Self {
        Self::spelled(self.natural, self.alteration - 1)
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.natural.letter())?;
        let symbol = if self.alteration > 0 {
            SHARP_SYMBOL
        } else {
            FLAT_SYMBOL
        };
        for _ in 0..self.alteration.unsigned_abs() {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl FromStr for NoteName {
    type Err = TheoryError;

    /// Parse from a string like "C", "c#", "B♭", "bb".
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TheoryError::EmptyNote);
        }

        let caps = RE_NOTE
            .captures(s)
            .ok_or_else(|| TheoryError::InvalidNote(s.to_string()))?;
        let natural = caps[1]
            .chars()
            .next()
            .and_then(NaturalNote::from_letter)
            .ok_or_else(|| TheoryError::InvalidNote(s.to_string()))?;

        let mut symbols = caps[2].chars().filter_map(Accidental::from_symbol);
        let accidental = match (symbols.next(), symbols.next()) {
            (None, _) => Accidental::Natural,
            (Some(accidental), None) => accidental,
            (Some(_), Some(_)) => return Err(TheoryError::MultipleAccidentals(s.to_string())),
        };

        Ok(Self::new(natural, accidental))
    }
}

impl Serialize for NoteName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoteName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for NoteName {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("NoteName")
    }

    fn json_schema(r#gen: &mut schemars::SchemaGenerator) -> schemars::Schema {
        // NoteName is serialized as a string
        String::json_schema(r#gen)
    }
}

/// Semitone position within one octave, always in `0..12`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Normalize any semitone count into `0..12`.
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(OCTAVE_SIZE) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PitchClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for PitchClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        if value as i32 >= OCTAVE_SIZE {
            return Err(serde::de::Error::custom(format!(
                "pitch class {} is outside 0..12",
                value
            )));
        }
        Ok(Self(value))
    }
}

impl JsonSchema for PitchClass {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("PitchClass")
    }

    fn json_schema(r#gen: &mut schemars::SchemaGenerator) -> schemars::Schema {
        u8::json_schema(r#gen)
    }
}

/// Starting note of a linear instrument row (a keyboard octave or a string).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Origin {
    pub note: NoteName,
    pub octave: i32,
}

impl Origin {
    pub const fn new(note: NoteName, octave: i32) -> Self {
        Self { note, octave }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

impl FromStr for Origin {
    type Err = TheoryError;

    /// Parse from a string like "E4", "B♭3", "c#-1".
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let caps = RE_ORIGIN
            .captures(s)
            .ok_or_else(|| TheoryError::InvalidOrigin(s.to_string()))?;
        let note = caps[1].parse()?;
        let octave = caps[2]
            .parse()
            .map_err(|_| TheoryError::InvalidOrigin(s.to_string()))?;
        Ok(Self { note, octave })
    }
}

impl<'de> Deserialize<'de> for Origin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OriginDe {
            Text(String),
            Fields { note: NoteName, octave: i32 },
        }

        match OriginDe::deserialize(deserializer)? {
            OriginDe::Text(s) => s.parse().map_err(serde::de::Error::custom),
            OriginDe::Fields { note, octave } => Ok(Origin { note, octave }),
        }
    }
}
