//! Pitch classes of the 12-tone chromatic scale with enharmonic alias handling.

use std::{fmt::Display, mem};

use crate::parse::ParseError;

// --------------------------------------------------------------------------------------------------

/// Canonical spellings of all 12 pitch classes, sharps preferred.
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

// --------------------------------------------------------------------------------------------------

/// One of the 12 chromatic pitch classes, spelled with its canonical sharp/natural name.
///
/// Enharmonic spellings (flats, the `Cb`/`Fb` and `E#`/`B#` wrap edges and double
/// accidentals) are accepted on input and resolve to the index of their sharp/natural
/// equivalent, but they are not preserved: a chord rooted on "Bb" reports its notes
/// spelled with "A#". This lossy normalization towards sharps keeps dictionary keys
/// and note arithmetic on a single spelling per index and is intended behavior.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(non_camel_case_types)]
pub enum PitchClass {
    C = 0,
    Cs = 1,
    D = 2,
    Ds = 3,
    E = 4,
    F = 5,
    Fs = 6,
    G = 7,
    Gs = 8,
    A = 9,
    As = 10,
    B = 11,
}

impl PitchClass {
    /// Chromatic index of the pitch class: 0 = C, 1 = C# ... 11 = B.
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Canonical (sharp preferred) name of the pitch class.
    pub fn name(&self) -> &'static str {
        NOTE_NAMES[*self as usize]
    }

    /// Pitch class for the given chromatic index, wrapping modulo 12.
    pub fn from_index(index: u8) -> Self {
        // all values 0..12 are valid enum representations
        unsafe { mem::transmute::<u8, Self>(index % 12) }
    }

    /// Return a new transposed pitch class with the given semitone offset.
    ///
    /// Wraps modulo 12, so offsets beyond one octave (e.g. +21 for a 13th)
    /// and negative offsets are fine.
    #[must_use]
    pub fn transposed(&self, offset: i32) -> Self {
        Self::from_index((*self as i32 + offset).rem_euclid(12) as u8)
    }
}

impl TryFrom<&str> for PitchClass {
    type Error = ParseError;

    /// Try converting the given note name to a pitch class.
    ///
    /// Accepts naturals, sharps, flats and double accidentals, with `#`, `♯`, `b`
    /// and `♭` as accidental symbols, case-insensitively: "c#", "Db", "B#", "Fbb".
    fn try_from(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(ParseError::Empty)?;
        let base = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(ParseError::InvalidRoot(s.to_string())),
        };
        let mut index: i32 = base;
        let mut accidentals = 0;
        for c in chars {
            match c {
                '#' | '♯' => index += 1,
                'b' | 'B' | '♭' => index -= 1,
                _ => return Err(ParseError::InvalidRoot(s.to_string())),
            }
            accidentals += 1;
            if accidentals > 2 {
                return Err(ParseError::InvalidRoot(s.to_string()));
            }
        }
        Ok(Self::from_index(index.rem_euclid(12) as u8))
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// --------------------------------------------------------------------------------------------------
