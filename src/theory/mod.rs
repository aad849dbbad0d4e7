//! Deterministic music-theory calculations backing the chat tools.
//!
//! Notes are spelled by letter arithmetic: every scale degree or interval
//! moves a fixed number of letters and a fixed number of semitones, and the
//! accidental is whatever makes the letter land on the pitch.

use thiserror::Error;

pub mod chord;
pub mod interval;
pub mod note;
pub mod roman;
pub mod scale;

pub use chord::{ChordResult, identify_chord, name_chord};
pub use interval::{Interval, TransposeResult, transpose};
pub use note::Note;
pub use roman::{KeyAnalysis, Triad, roman_numerals_in_key};
pub use scale::{ScaleResult, ScaleType, get_scale};

/// Invalid input to one of the theory functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("Invalid note name '{0}'")]
    InvalidNote(String),
    #[error("Unsupported scale_type '{scale_type}'. Try: {valid}")]
    UnsupportedScale { scale_type: String, valid: String },
    #[error("Unknown interval '{name}'. Try: {valid}")]
    UnknownInterval { name: String, valid: String },
    #[error("Scale '{scale_type}' has {degree_count} degrees; diatonic triads need 7")]
    NotHeptatonic {
        scale_type: String,
        degree_count: usize,
    },
}
