use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::theory::note::normalize_note_name;
use crate::theory::{Interval, Note, TheoryError};

/// A chord quality as an interval set above the root (bitmask over 12 pitch classes).
pub struct ChordTemplate {
    pub quality: &'static str,
    pub intervals: u16,
}

impl ChordTemplate {
    const fn new(quality: &'static str, intervals: &[u8]) -> Self {
        let mut mask = 0u16;
        let mut i = 0;
        while i < intervals.len() {
            mask |= 1 << intervals[i];
            i += 1;
        }
        Self {
            quality,
            intervals: mask,
        }
    }
}

pub static TEMPLATES: &[ChordTemplate] = &[
    // Triads
    ChordTemplate::new("major triad", &[0, 4, 7]),
    ChordTemplate::new("minor triad", &[0, 3, 7]),
    ChordTemplate::new("diminished triad", &[0, 3, 6]),
    ChordTemplate::new("augmented triad", &[0, 4, 8]),
    ChordTemplate::new("suspended second triad", &[0, 2, 7]),
    ChordTemplate::new("suspended fourth triad", &[0, 5, 7]),
    // Sixths
    ChordTemplate::new("major sixth", &[0, 4, 7, 9]),
    ChordTemplate::new("minor sixth", &[0, 3, 7, 9]),
    // Sevenths
    ChordTemplate::new("major seventh", &[0, 4, 7, 11]),
    ChordTemplate::new("minor seventh", &[0, 3, 7, 10]),
    ChordTemplate::new("dominant seventh", &[0, 4, 7, 10]),
    ChordTemplate::new("minor/major seventh", &[0, 3, 7, 11]),
    ChordTemplate::new("half diminished seventh", &[0, 3, 6, 10]),
    ChordTemplate::new("diminished seventh", &[0, 3, 6, 9]),
    ChordTemplate::new("augmented major seventh", &[0, 4, 8, 11]),
    ChordTemplate::new("augmented minor seventh", &[0, 4, 8, 10]),
    // Added tones
    ChordTemplate::new("added ninth", &[0, 2, 4, 7]),
];

fn to_interval_mask(notes: &[Note], root: Note) -> u16 {
    notes.iter().fold(0u16, |mask, note| {
        let interval = (note.pitch_class() + 12 - root.pitch_class()) % 12;
        mask | 1 << interval
    })
}

/// Names a voicing with its first note as the root.
///
/// Two distinct pitches are named as an interval; larger sets must match a
/// template exactly. Unknown shapes produce no names.
pub fn name_chord(notes: &[Note]) -> Vec<String> {
    let Some(&root) = notes.first() else {
        return Vec::new();
    };
    let mask = to_interval_mask(notes, root);

    match mask.count_ones() {
        0 | 1 => Vec::new(),
        2 => notes
            .iter()
            .find(|note| note.pitch_class() != root.pitch_class())
            .and_then(|&other| Interval::between(root, other).name())
            .map(|interval| vec![format!("{root} {interval} interval")])
            .unwrap_or_default(),
        _ => TEMPLATES
            .iter()
            .filter(|template| template.intervals == mask)
            .map(|template| format!("{root} {}", template.quality))
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordResult {
    pub input: Vec<String>,
    pub candidates: Vec<String>,
}

/// Identifies a chord from an unordered set of note names.
///
/// Every cyclic rotation is named from its first note, so inversions of the
/// same pitch set produce the same sorted candidate list.
pub fn identify_chord(note_names: &[String]) -> Result<ChordResult, TheoryError> {
    let notes = note_names
        .iter()
        .map(|raw| Note::parse(&normalize_note_name(raw)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut candidates = BTreeSet::new();
    for start in 0..notes.len() {
        let mut rotated = notes[start..].to_vec();
        rotated.extend_from_slice(&notes[..start]);
        candidates.extend(name_chord(&rotated));
    }

    Ok(ChordResult {
        input: note_names.to_vec(),
        candidates: candidates.into_iter().collect(),
    })
}
