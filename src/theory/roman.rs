use serde::{Deserialize, Serialize};

use crate::theory::scale::build_scale;
use crate::theory::{TheoryError, name_chord};

const MAJOR_NUMERALS: [&str; 7] = ["I", "ii", "iii", "IV", "V", "vi", "vii°"];
const NATURAL_MINOR_NUMERALS: [&str; 7] = ["i", "ii°", "III", "iv", "v", "VI", "VII"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triad {
    pub degree: usize,
    pub roman: String,
    pub notes: Vec<String>,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAnalysis {
    pub key: String,
    pub triads: Vec<Triad>,
}

/// Diatonic triads of a seven-note key with their roman numerals.
///
/// Only `major`/`ionian` get the major numeral set; every other scale is
/// labeled with the natural-minor set, whatever its actual qualities.
pub fn roman_numerals_in_key(tonic: &str, scale_type: &str) -> Result<KeyAnalysis, TheoryError> {
    let (scale, notes) = build_scale(tonic, scale_type)?;
    if notes.len() != 7 {
        return Err(TheoryError::NotHeptatonic {
            scale_type: scale.key().to_string(),
            degree_count: notes.len(),
        });
    }

    let numerals = if scale.is_major() {
        &MAJOR_NUMERALS
    } else {
        &NATURAL_MINOR_NUMERALS
    };

    let triads = (0..7)
        .map(|i| {
            let voicing = [notes[i], notes[(i + 2) % 7], notes[(i + 4) % 7]];
            Triad {
                degree: i + 1,
                roman: numerals[i].to_string(),
                notes: voicing.iter().map(ToString::to_string).collect(),
                names: name_chord(&voicing),
            }
        })
        .collect();

    Ok(KeyAnalysis {
        key: format!("{tonic} {}", scale.key()),
        triads,
    })
}
