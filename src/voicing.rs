//! Instrument voicings and the curated fingering dictionary.

use std::collections::HashMap;

use lazy_static::lazy_static;

// --------------------------------------------------------------------------------------------------

/// What one string does in a voicing, low string first in [`Voicing::positions`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FretPosition {
    Muted,
    Open,
    Fret(u8),
}

/// A barre span: one finger across several strings at one fret. Strings are
/// indexed 0-5 from the low string, matching [`Voicing::positions`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Barre {
    pub fret: u8,
    pub from_string: u8,
    pub to_string: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// One concrete, playable realization of a chord on the instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voicing {
    /// Per-string fret positions, low string first.
    pub positions: Vec<FretPosition>,
    /// Per-string finger assignments, 0 for open/muted strings.
    pub fingers: Vec<u8>,
    pub barres: Vec<Barre>,
    /// First fret shown in a rendered diagram.
    pub base_fret: u8,
    pub difficulty: Difficulty,
}

/// All curated voicings for one chord, keyed by its canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoicingEntry {
    pub name: String,
    pub voicings: Vec<Voicing>,
}

impl VoicingEntry {
    /// First curated voicing, or `None` for an entry without voicings.
    pub fn default_voicing(&self) -> Option<&Voicing> {
        self.voicings.first()
    }

    /// Voicing at the given index, `None` when out of range.
    pub fn voicing(&self, index: usize) -> Option<&Voicing> {
        self.voicings.get(index)
    }
}

// --------------------------------------------------------------------------------------------------

/// Read-only keyed source of curated voicings. The engine only ever reads
/// from it; authoring and content live outside this crate. Dictionaries are
/// immutable once built, hence `Sync`.
pub trait VoicingDictionary: Sync {
    /// Entry for a canonical chord name, or `None`.
    fn get(&self, canonical: &str) -> Option<&VoicingEntry>;
    /// All known canonical names, used as suggestion candidates.
    fn names(&self) -> Vec<&str>;
}

// --------------------------------------------------------------------------------------------------

// -1 = muted, 0 = open, n = fretted; low string first
fn shape(frets: [i8; 6], fingers: [u8; 6], difficulty: Difficulty) -> Voicing {
    let positions = frets
        .iter()
        .map(|&fret| match fret {
            f if f < 0 => FretPosition::Muted,
            0 => FretPosition::Open,
            f => FretPosition::Fret(f as u8),
        })
        .collect();
    Voicing {
        positions,
        fingers: fingers.to_vec(),
        barres: Vec::new(),
        base_fret: 1,
        difficulty,
    }
}

fn open_shape(frets: [i8; 6], fingers: [u8; 6]) -> Voicing {
    shape(frets, fingers, Difficulty::Beginner)
}

fn barre_shape(frets: [i8; 6], fingers: [u8; 6], barre: Barre) -> Voicing {
    let mut voicing = shape(frets, fingers, Difficulty::Intermediate);
    voicing.base_fret = barre.fret;
    voicing.barres.push(barre);
    voicing
}

fn entry(name: &'static str, voicings: Vec<Voicing>) -> (&'static str, VoicingEntry) {
    (
        name,
        VoicingEntry {
            name: name.to_string(),
            voicings,
        },
    )
}

// hand-curated open and barre shapes for standard-tuned guitar
lazy_static! {
    static ref BUILTIN: BuiltinDictionary = BuiltinDictionary {
        entries: HashMap::from([
            // major
            entry("C", vec![
                open_shape([-1, 3, 2, 0, 1, 0], [0, 3, 2, 0, 1, 0]),
                barre_shape(
                    [-1, 3, 5, 5, 5, 3],
                    [0, 1, 3, 3, 3, 1],
                    Barre { fret: 3, from_string: 1, to_string: 5 },
                ),
            ]),
            entry("D", vec![open_shape([-1, -1, 0, 2, 3, 2], [0, 0, 0, 1, 3, 2])]),
            entry("E", vec![open_shape([0, 2, 2, 1, 0, 0], [0, 2, 3, 1, 0, 0])]),
            entry("F", vec![barre_shape(
                [1, 3, 3, 2, 1, 1],
                [1, 3, 4, 2, 1, 1],
                Barre { fret: 1, from_string: 0, to_string: 5 },
            )]),
            entry("G", vec![open_shape([3, 2, 0, 0, 0, 3], [2, 1, 0, 0, 0, 3])]),
            entry("A", vec![open_shape([-1, 0, 2, 2, 2, 0], [0, 0, 1, 2, 3, 0])]),
            entry("B", vec![barre_shape(
                [-1, 2, 4, 4, 4, 2],
                [0, 1, 3, 3, 3, 1],
                Barre { fret: 2, from_string: 1, to_string: 5 },
            )]),
            // minor
            entry("Am", vec![open_shape([-1, 0, 2, 2, 1, 0], [0, 0, 2, 3, 1, 0])]),
            entry("Dm", vec![open_shape([-1, -1, 0, 2, 3, 1], [0, 0, 0, 2, 3, 1])]),
            entry("Em", vec![open_shape([0, 2, 2, 0, 0, 0], [0, 2, 3, 0, 0, 0])]),
            entry("F#m", vec![barre_shape(
                [2, 4, 4, 2, 2, 2],
                [1, 3, 4, 1, 1, 1],
                Barre { fret: 2, from_string: 0, to_string: 5 },
            )]),
            entry("Bm", vec![barre_shape(
                [-1, 2, 4, 4, 3, 2],
                [0, 1, 3, 4, 2, 1],
                Barre { fret: 2, from_string: 1, to_string: 5 },
            )]),
            // dominant 7th
            entry("C7", vec![open_shape([-1, 3, 2, 3, 1, 0], [0, 3, 2, 4, 1, 0])]),
            entry("D7", vec![open_shape([-1, -1, 0, 2, 1, 2], [0, 0, 0, 2, 1, 3])]),
            entry("E7", vec![open_shape([0, 2, 0, 1, 0, 0], [0, 2, 0, 1, 0, 0])]),
            entry("G7", vec![open_shape([3, 2, 0, 0, 0, 1], [3, 2, 0, 0, 0, 1])]),
            entry("A7", vec![open_shape([-1, 0, 2, 0, 2, 0], [0, 0, 2, 0, 3, 0])]),
            entry("B7", vec![open_shape([-1, 2, 1, 2, 0, 2], [0, 2, 1, 3, 0, 4])]),
            // minor 7th
            entry("Am7", vec![open_shape([-1, 0, 2, 0, 1, 0], [0, 0, 2, 0, 1, 0])]),
            entry("Dm7", vec![open_shape([-1, -1, 0, 2, 1, 1], [0, 0, 0, 2, 1, 1])]),
            entry("Em7", vec![open_shape([0, 2, 0, 0, 0, 0], [0, 2, 0, 0, 0, 0])]),
            // major 7th
            entry("Cmaj7", vec![open_shape([-1, 3, 2, 0, 0, 0], [0, 3, 2, 0, 0, 0])]),
            entry("Fmaj7", vec![open_shape([-1, -1, 3, 2, 1, 0], [0, 0, 3, 2, 1, 0])]),
            // suspended
            entry("Dsus2", vec![open_shape([-1, -1, 0, 2, 3, 0], [0, 0, 0, 1, 3, 0])]),
            entry("Dsus4", vec![open_shape([-1, -1, 0, 2, 3, 3], [0, 0, 0, 1, 3, 4])]),
            entry("Asus2", vec![open_shape([-1, 0, 2, 2, 0, 0], [0, 0, 1, 2, 0, 0])]),
            entry("Asus4", vec![open_shape([-1, 0, 2, 2, 3, 0], [0, 0, 1, 2, 4, 0])]),
            entry("Esus4", vec![open_shape([0, 2, 2, 2, 0, 0], [0, 2, 3, 4, 0, 0])]),
            // add
            entry("Cadd9", vec![open_shape([-1, 3, 2, 0, 3, 0], [0, 2, 1, 0, 3, 0])]),
            // power
            entry("A5", vec![open_shape([-1, 0, 2, 2, -1, -1], [0, 0, 1, 3, 0, 0])]),
            entry("E5", vec![open_shape([0, 2, 2, -1, -1, -1], [0, 1, 3, 0, 0, 0])]),
        ]),
    };
}

/// The built-in curated guitar dictionary.
pub fn builtin() -> &'static BuiltinDictionary {
    &BUILTIN
}

/// Curated guitar voicings shipped with the crate, keyed by canonical name.
#[derive(Debug)]
pub struct BuiltinDictionary {
    entries: HashMap<&'static str, VoicingEntry>,
}

impl VoicingDictionary for BuiltinDictionary {
    fn get(&self, canonical: &str) -> Option<&VoicingEntry> {
        self.entries.get(canonical)
    }

    fn names(&self) -> Vec<&str> {
        self.entries.keys().copied().collect()
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::{builtin, Difficulty, FretPosition, Voicing, VoicingDictionary, VoicingEntry};
    use crate::parse::canonical_name;

    #[test]
    fn builtin_lookup() {
        let entry = builtin().get("Am").unwrap();
        assert_eq!(entry.name, "Am");
        let voicing = entry.default_voicing().unwrap();
        assert_eq!(voicing.positions.len(), 6);
        assert_eq!(voicing.positions[0], FretPosition::Muted);
        assert_eq!(voicing.difficulty, Difficulty::Beginner);

        assert!(builtin().get("Am9").is_none());
        assert!(builtin().get("").is_none());
    }

    #[test]
    fn alternate_voicings() {
        let entry = builtin().get("C").unwrap();
        assert_eq!(entry.voicings.len(), 2);
        assert_ne!(entry.voicing(0), entry.voicing(1));
        assert!(entry.voicing(1).unwrap().barres.len() == 1);
        assert!(entry.voicing(2).is_none());
    }

    #[test]
    fn empty_entry_has_no_default_voicing() {
        let entry = VoicingEntry {
            name: "C".to_string(),
            voicings: Vec::new(),
        };
        assert_eq!(entry.default_voicing(), None);
        assert_eq!(entry.voicing(0), None);
    }

    #[test]
    fn keys_are_canonical() {
        // every dictionary key must round-trip through the normalizer unchanged
        for name in builtin().names() {
            assert_eq!(canonical_name(name).as_deref(), Some(name), "key '{}'", name);
        }
    }

    #[test]
    fn barres_span_fretted_strings() {
        for name in builtin().names() {
            for voicing in &builtin().get(name).unwrap().voicings {
                for barre in &voicing.barres {
                    assert!(barre.from_string < barre.to_string);
                    assert!(barre.to_string < 6);
                    assert!(barre.fret >= voicing.base_fret);
                }
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn voicing_serialization() {
        let entry = builtin().get("G7").unwrap();
        let json = serde_json::to_string(entry).unwrap();
        let back: VoicingEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, entry);
    }

    #[test]
    fn fingers_match_positions() {
        for name in builtin().names() {
            for voicing in &builtin().get(name).unwrap().voicings {
                assert_eq!(voicing.positions.len(), voicing.fingers.len());
                for (position, finger) in voicing.positions.iter().zip(&voicing.fingers) {
                    if matches!(position, FretPosition::Muted | FretPosition::Open) {
                        assert_eq!(*finger, 0, "unfretted string carries a finger in '{}'", name);
                    }
                }
            }
        }
    }

    #[test]
    fn dictionary_is_sync() {
        // the dictionary is shared freely between rendering threads
        fn assert_sync<T: Sync>() {}
        assert_sync::<super::BuiltinDictionary>();
        assert_sync::<Voicing>();
    }
}
