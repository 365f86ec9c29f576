//! Parse errors for the textual forms of notes, origins, patterns and actions.
//!
//! The engine itself is total; only the boundary where strings become typed
//! values can fail.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("empty note name")]
    EmptyNote,

    #[error("invalid note name {0:?}: expected a letter A-G with an optional ♯/# or ♭/b")]
    InvalidNote(String),

    #[error("note name {0:?} carries more than one accidental")]
    MultipleAccidentals(String),

    #[error("invalid instrument origin {0:?}: expected a note followed by an octave, e.g. \"E4\"")]
    InvalidOrigin(String),

    #[error("invalid interval step {0:?}: steps are whole semitones between 1 and 12")]
    InvalidStep(String),

    #[error("interval pattern has no steps")]
    EmptyPattern,

    #[error("invalid action {0:?}")]
    InvalidAction(String),
}

pub type Result<T> = std::result::Result<T, TheoryError>;
