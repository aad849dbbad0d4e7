use std::fmt;
use std::str::FromStr;

use crate::theory::TheoryError;

const LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];
const NATURAL_PITCH: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// A spelled note: letter plus accidental, without octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    letter: u8,
    /// Positive for sharps, negative for flats.
    accidental: i8,
}

impl Note {
    /// Parses names such as `C`, `f#`, `Bb`, `E♭` or `G##`.
    pub fn parse(raw: &str) -> Result<Self, TheoryError> {
        let invalid = || TheoryError::InvalidNote(raw.to_string());
        let mut chars = raw.trim().chars();

        let letter = chars
            .next()
            .and_then(|c| LETTERS.iter().position(|l| *l == c.to_ascii_uppercase()))
            .ok_or_else(invalid)?;

        let mut accidental: i8 = 0;
        let mut seen_sharp = false;
        let mut seen_flat = false;
        for c in chars {
            match c {
                '#' | '♯' => {
                    seen_sharp = true;
                    accidental += 1;
                }
                'b' | '♭' => {
                    seen_flat = true;
                    accidental -= 1;
                }
                _ => return Err(invalid()),
            }
            if accidental.abs() > 2 {
                return Err(invalid());
            }
        }
        if seen_sharp && seen_flat {
            return Err(invalid());
        }

        Ok(Self {
            letter: letter as u8,
            accidental,
        })
    }

    /// Spells `pitch_class` on the given letter (0 = C .. 6 = B).
    pub fn spell(letter: u8, pitch_class: u8) -> Self {
        let letter = letter % 7;
        let natural = NATURAL_PITCH[letter as usize] as i16;
        let mut offset = (pitch_class as i16 - natural).rem_euclid(12);
        if offset > 6 {
            offset -= 12;
        }
        Self {
            letter,
            accidental: offset as i8,
        }
    }

    pub fn letter(self) -> u8 {
        self.letter
    }

    pub fn accidental(self) -> i8 {
        self.accidental
    }

    pub fn pitch_class(self) -> u8 {
        (NATURAL_PITCH[self.letter as usize] as i16 + self.accidental as i16).rem_euclid(12) as u8
    }

    /// Moves up by a number of letters and semitones, respelling the result.
    pub fn up(self, letter_steps: u8, semitones: u8) -> Self {
        let pitch = (self.pitch_class() as u16 + semitones as u16) % 12;
        Self::spell(self.letter + letter_steps % 7, pitch as u8)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", LETTERS[self.letter as usize])?;
        let symbol = if self.accidental > 0 { '#' } else { 'b' };
        for _ in 0..self.accidental.unsigned_abs() {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Cleans a user-supplied note name before chord identification.
///
/// Uppercases the letter, maps `♯`/`♭` to `#`/`b`, and rewrites a leading
/// `B#` to `C` and `E#` to `F`.
pub fn normalize_note_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let mut cleaned = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string(),
        None => return String::new(),
    };
    for c in chars {
        match c {
            '♯' => cleaned.push('#'),
            '♭' => cleaned.push('b'),
            other => cleaned.push(other),
        }
    }

    if let Some(rest) = cleaned.strip_prefix("B#") {
        format!("C{rest}")
    } else if let Some(rest) = cleaned.strip_prefix("E#") {
        format!("F{rest}")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naturals_and_accidentals() {
        assert_eq!(Note::parse("C").unwrap().pitch_class(), 0);
        assert_eq!(Note::parse("f#").unwrap().pitch_class(), 6);
        assert_eq!(Note::parse("Bb").unwrap().pitch_class(), 10);
        assert_eq!(Note::parse("E♭").unwrap().to_string(), "Eb");
        assert_eq!(Note::parse("G##").unwrap().pitch_class(), 9);
        assert_eq!(Note::parse("Cb").unwrap().pitch_class(), 11);
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "H", "C#b", "Cx", "Dbbb", "12"] {
            assert!(Note::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn spelling_prefers_the_requested_letter() {
        assert_eq!(Note::spell(2, 5).to_string(), "E#");
        assert_eq!(Note::spell(0, 11).to_string(), "Cb");
        assert_eq!(Note::spell(3, 7).to_string(), "F##");
    }

    #[test]
    fn up_wraps_letters_and_pitches() {
        let a = Note::parse("A").unwrap();
        assert_eq!(a.up(2, 3).to_string(), "C");
        assert_eq!(a.up(2, 4).to_string(), "C#");
    }

    #[test]
    fn normalization_simplifies_b_and_e_sharp() {
        assert_eq!(normalize_note_name(" b# "), "C");
        assert_eq!(normalize_note_name("E#"), "F");
        assert_eq!(normalize_note_name("bb"), "Bb");
        assert_eq!(normalize_note_name("c♯"), "C#");
    }
}
