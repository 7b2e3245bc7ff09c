//! Chord note generation from a root pitch class and an interval formula.

use log::debug;

use crate::parse::ParsedChord;
use crate::pitch::PitchClass;

// --------------------------------------------------------------------------------------------------

/// Most tones a generated chord may carry: one per guitar string.
pub const MAX_TONES: usize = 6;

// omission order for oversized formulas: the perfect 5th carries the least
// harmonic information, then the 11th
const OMISSION_ORDER: [u8; 2] = [7, 17];

/// Note content generated for a chord: ordered, deduplicated pitch classes,
/// root first. `omitted` lists the intervals dropped to keep the chord
/// playable; a non-empty list marks a partial generation and is always
/// reported upstream, never hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedChord {
    root: PitchClass,
    notes: Vec<PitchClass>,
    omitted: Vec<u8>,
}

impl GeneratedChord {
    /// Generate notes for a parsed chord, or `None` when no formula applies:
    /// either the quality is unresolved, or extensions follow the quality
    /// (extension combinations are never composed into formulas at runtime).
    pub fn from_parsed(parsed: &ParsedChord) -> Option<Self> {
        if !parsed.extensions().is_empty() {
            return None;
        }
        let quality = parsed.quality()?;
        Some(Self::from_formula(parsed.root(), quality.intervals()))
    }

    /// Generate notes for a root and an interval formula, deduplicating by
    /// pitch class index and dropping low-priority tones of oversized
    /// formulas (13th chords) down to [`MAX_TONES`].
    pub fn from_formula(root: PitchClass, intervals: &[u8]) -> Self {
        let mut kept = intervals.to_vec();
        let mut omitted = Vec::new();
        for interval in OMISSION_ORDER {
            if kept.len() <= MAX_TONES {
                break;
            }
            // never drop the root itself
            if let Some(position) = kept.iter().skip(1).position(|&i| i == interval) {
                kept.remove(position + 1);
                omitted.push(interval);
            }
        }
        if !omitted.is_empty() {
            debug!(
                "omitted intervals {:?} from {} chord for playability",
                omitted,
                root.name()
            );
        }
        let mut notes: Vec<PitchClass> = Vec::with_capacity(kept.len());
        for interval in kept {
            let note = root.transposed(interval as i32);
            if !notes.contains(&note) {
                notes.push(note);
            }
        }
        Self {
            root,
            notes,
            omitted,
        }
    }

    /// Root pitch class; always the first generated note.
    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Ordered, deduplicated chord tones, root first.
    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    /// Canonical (sharp-spelled) names of the chord tones.
    pub fn note_names(&self) -> Vec<&'static str> {
        self.notes.iter().map(|note| note.name()).collect()
    }

    /// Intervals dropped for playability, in drop order.
    pub fn omitted(&self) -> &[u8] {
        &self.omitted
    }

    /// Whether tones were dropped for playability.
    pub fn is_partial(&self) -> bool {
        !self.omitted.is_empty()
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::{GeneratedChord, MAX_TONES};
    use crate::parse::ParsedChord;
    use crate::pitch::PitchClass;

    fn generate(name: &str) -> Option<GeneratedChord> {
        GeneratedChord::from_parsed(&ParsedChord::parse(name).unwrap())
    }

    #[test]
    fn triads_for_all_roots() {
        for index in 0..12 {
            let root = PitchClass::from_index(index);
            for suffix in ["", "m"] {
                let chord = generate(&format!("{}{}", root.name(), suffix)).unwrap();
                assert_eq!(chord.notes().len(), 3);
                assert_eq!(chord.notes()[0], root, "root must come first");
                assert!(!chord.is_partial());
            }
        }
    }

    #[test]
    fn generated_note_names() {
        assert_eq!(generate("G7").unwrap().note_names(), ["G", "B", "D", "F"]);
        assert_eq!(generate("F#m").unwrap().note_names(), ["F#", "A", "C#"]);
        // flat roots come out sharp-spelled
        assert_eq!(generate("Bb").unwrap().note_names(), ["A#", "D", "F"]);
        assert_eq!(generate("A5").unwrap().note_names(), ["A", "E"]);
    }

    #[test]
    fn no_formula_for_unresolved_or_extended() {
        assert_eq!(generate("Amz"), None);
        // known quality plus trailing extension has no precomposed formula
        assert_eq!(generate("Cmaj7add9"), None);
    }

    #[test]
    fn oversized_formulas_are_trimmed() {
        let chord = generate("C13").unwrap();
        assert!(chord.is_partial());
        assert_eq!(chord.omitted(), [7]);
        assert!(chord.notes().len() <= MAX_TONES);
        assert_eq!(chord.notes()[0], PitchClass::C);
        // the dropped 5th is really gone
        assert!(!chord.notes().contains(&PitchClass::G));

        let chord = generate("Am13").unwrap();
        assert!(chord.is_partial());
        assert_eq!(chord.omitted(), [7]);

        // 11th chords still fit six strings
        let chord = generate("C11").unwrap();
        assert!(!chord.is_partial());
        assert_eq!(chord.notes().len(), 6);
    }

    #[test]
    fn duplicate_pitch_classes_collapse() {
        // an octave doubling dedups to the root
        let chord = GeneratedChord::from_formula(PitchClass::C, &[0, 4, 7, 12]);
        assert_eq!(chord.note_names(), ["C", "E", "G"]);
        assert!(!chord.is_partial());
    }
}
