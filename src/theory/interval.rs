use serde::{Deserialize, Serialize};

use crate::theory::{Note, TheoryError};

/// Distance between two notes, counted in letters and in semitones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub letter_steps: u8,
    pub semitones: u8,
}

impl Interval {
    const fn new(letter_steps: u8, semitones: u8) -> Self {
        Self {
            letter_steps,
            semitones,
        }
    }

    /// Ascending interval from `from` to `to` within one octave.
    pub fn between(from: Note, to: Note) -> Self {
        Self {
            letter_steps: (to.letter() + 7 - from.letter()) % 7,
            semitones: (to.pitch_class() + 12 - from.pitch_class()) % 12,
        }
    }

    /// Conventional name, matching letters first and falling back to pitch only.
    pub fn name(self) -> Option<&'static str> {
        NAMED_INTERVALS
            .iter()
            .find(|named| named.interval == self)
            .or_else(|| {
                NAMED_INTERVALS
                    .iter()
                    .find(|named| named.interval.semitones == self.semitones)
            })
            .map(|named| named.name)
    }
}

struct NamedInterval {
    name: &'static str,
    short: &'static str,
    degree: &'static str,
    interval: Interval,
}

const fn named(
    name: &'static str,
    short: &'static str,
    degree: &'static str,
    letter_steps: u8,
    semitones: u8,
) -> NamedInterval {
    NamedInterval {
        name,
        short,
        degree,
        interval: Interval::new(letter_steps, semitones),
    }
}

static NAMED_INTERVALS: &[NamedInterval] = &[
    named("unison", "P1", "1", 0, 0),
    named("minor second", "m2", "b2", 1, 1),
    named("major second", "M2", "2", 1, 2),
    named("augmented second", "A2", "#2", 1, 3),
    named("minor third", "m3", "b3", 2, 3),
    named("major third", "M3", "3", 2, 4),
    named("perfect fourth", "P4", "4", 3, 5),
    named("augmented fourth", "A4", "#4", 3, 6),
    named("diminished fifth", "d5", "b5", 4, 6),
    named("perfect fifth", "P5", "5", 4, 7),
    named("augmented fifth", "A5", "#5", 4, 8),
    named("minor sixth", "m6", "b6", 5, 8),
    named("major sixth", "M6", "6", 5, 9),
    named("diminished seventh", "d7", "bb7", 6, 9),
    named("minor seventh", "m7", "b7", 6, 10),
    named("major seventh", "M7", "7", 6, 11),
    named("octave", "P8", "8", 0, 0),
];

const ALIASES: &[(&str, &str)] = &[
    ("tritone", "augmented fourth"),
    ("perfect unison", "unison"),
    ("perfect octave", "octave"),
    ("flat fifth", "diminished fifth"),
];

/// Parses a named interval.
///
/// Accepts full names (`major third`, `perfect_fifth`, `tritone`), short
/// forms (`m3`, `M3`, `P5`) and degree forms (`3`, `b3`, `#4`).
pub fn parse_interval(raw: &str) -> Result<Interval, TheoryError> {
    let trimmed = raw.trim();
    if let Some(found) = NAMED_INTERVALS
        .iter()
        .find(|named| named.short == trimmed || named.degree == trimmed)
    {
        return Ok(found.interval);
    }

    let spoken = trimmed
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let spoken = ALIASES
        .iter()
        .find(|(alias, _)| *alias == spoken)
        .map(|(_, target)| target.to_string())
        .unwrap_or(spoken);

    NAMED_INTERVALS
        .iter()
        .find(|named| named.name == spoken)
        .map(|named| named.interval)
        .ok_or_else(|| TheoryError::UnknownInterval {
            name: raw.to_string(),
            valid: NAMED_INTERVALS
                .iter()
                .map(|named| named.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransposeResult {
    pub from: String,
    pub by: String,
    pub to: String,
}

/// Transposes a note up by a named interval.
pub fn transpose(note_name: &str, interval_name: &str) -> Result<TransposeResult, TheoryError> {
    let note = Note::parse(note_name)?;
    let interval = parse_interval(interval_name)?;
    let target = note.up(interval.letter_steps, interval.semitones);
    Ok(TransposeResult {
        from: note_name.to_string(),
        by: interval_name.to_string(),
        to: target.to_string(),
    })
}
