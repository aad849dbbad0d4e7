use serde::{Deserialize, Serialize};

use crate::theory::{Note, TheoryError};

/// Supported scale formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleType {
    Major,
    Ionian,
    NaturalMinor,
    Aeolian,
    HarmonicMinor,
    MelodicMinor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    MinorPentatonic,
    MajorPentatonic,
    Blues,
}

impl ScaleType {
    pub const ALL: [ScaleType; 14] = [
        ScaleType::Major,
        ScaleType::Ionian,
        ScaleType::NaturalMinor,
        ScaleType::Aeolian,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::Locrian,
        ScaleType::MinorPentatonic,
        ScaleType::MajorPentatonic,
        ScaleType::Blues,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::Ionian => "ionian",
            ScaleType::NaturalMinor => "natural_minor",
            ScaleType::Aeolian => "aeolian",
            ScaleType::HarmonicMinor => "harmonic_minor",
            ScaleType::MelodicMinor => "melodic_minor",
            ScaleType::Dorian => "dorian",
            ScaleType::Phrygian => "phrygian",
            ScaleType::Lydian => "lydian",
            ScaleType::Mixolydian => "mixolydian",
            ScaleType::Locrian => "locrian",
            ScaleType::MinorPentatonic => "minor_pentatonic",
            ScaleType::MajorPentatonic => "major_pentatonic",
            ScaleType::Blues => "blues",
        }
    }

    /// Looks up a scale by key; `Natural Minor` and `natural-minor` both resolve.
    pub fn from_key(raw: &str) -> Result<Self, TheoryError> {
        let normalized = raw
            .trim()
            .to_lowercase()
            .replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|scale| scale.key() == normalized)
            .ok_or_else(|| TheoryError::UnsupportedScale {
                scale_type: raw.to_string(),
                valid: valid_keys(),
            })
    }

    pub fn is_major(self) -> bool {
        matches!(self, ScaleType::Major | ScaleType::Ionian)
    }

    /// `(letter offset, semitone offset)` of each degree above the tonic.
    fn formula(self) -> &'static [(u8, u8)] {
        match self {
            ScaleType::Major | ScaleType::Ionian => {
                &[(0, 0), (1, 2), (2, 4), (3, 5), (4, 7), (5, 9), (6, 11)]
            }
            ScaleType::NaturalMinor | ScaleType::Aeolian => {
                &[(0, 0), (1, 2), (2, 3), (3, 5), (4, 7), (5, 8), (6, 10)]
            }
            ScaleType::HarmonicMinor => {
                &[(0, 0), (1, 2), (2, 3), (3, 5), (4, 7), (5, 8), (6, 11)]
            }
            ScaleType::MelodicMinor => {
                &[(0, 0), (1, 2), (2, 3), (3, 5), (4, 7), (5, 9), (6, 11)]
            }
            ScaleType::Dorian => &[(0, 0), (1, 2), (2, 3), (3, 5), (4, 7), (5, 9), (6, 10)],
            ScaleType::Phrygian => &[(0, 0), (1, 1), (2, 3), (3, 5), (4, 7), (5, 8), (6, 10)],
            ScaleType::Lydian => &[(0, 0), (1, 2), (2, 4), (3, 6), (4, 7), (5, 9), (6, 11)],
            ScaleType::Mixolydian => &[(0, 0), (1, 2), (2, 4), (3, 5), (4, 7), (5, 9), (6, 10)],
            ScaleType::Locrian => &[(0, 0), (1, 1), (2, 3), (3, 5), (4, 6), (5, 8), (6, 10)],
            ScaleType::MinorPentatonic => &[(0, 0), (2, 3), (3, 5), (4, 7), (6, 10)],
            ScaleType::MajorPentatonic => &[(0, 0), (1, 2), (2, 4), (4, 7), (5, 9)],
            ScaleType::Blues => &[(0, 0), (2, 3), (3, 5), (4, 6), (4, 7), (6, 10)],
        }
    }

    /// Ascending notes from the tonic, octave excluded.
    pub fn notes(self, tonic: Note) -> Vec<Note> {
        self.formula()
            .iter()
            .map(|&(letters, semitones)| tonic.up(letters, semitones))
            .collect()
    }
}

pub fn valid_keys() -> String {
    ScaleType::ALL
        .iter()
        .map(|scale| scale.key())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleResult {
    pub tonic: String,
    pub scale_type: String,
    pub notes: Vec<String>,
    pub degree_count: usize,
}

/// Resolves a tonic/scale pair into spelled notes. The scale type is checked first.
pub(crate) fn build_scale(tonic: &str, scale_type: &str) -> Result<(ScaleType, Vec<Note>), TheoryError> {
    let scale = ScaleType::from_key(scale_type)?;
    let tonic = Note::parse(tonic)?;
    Ok((scale, scale.notes(tonic)))
}

pub fn get_scale(tonic: &str, scale_type: &str) -> Result<ScaleResult, TheoryError> {
    let (scale, notes) = build_scale(tonic, scale_type)?;
    let notes = notes.iter().map(ToString::to_string).collect::<Vec<_>>();
    Ok(ScaleResult {
        tonic: tonic.to_string(),
        scale_type: scale.key().to_string(),
        degree_count: notes.len(),
        notes,
    })
}
