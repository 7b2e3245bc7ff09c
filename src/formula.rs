//! Chord qualities bound to interval formulas, with alias resolution.

use std::collections::HashMap;

use lazy_static::lazy_static;

// --------------------------------------------------------------------------------------------------

// major family
const MAJOR: [u8; 3] = [0, 4, 7];
const MAJOR6: [u8; 4] = [0, 4, 7, 9];
const SIX_NINE: [u8; 5] = [0, 4, 7, 9, 14];
const MAJOR7: [u8; 4] = [0, 4, 7, 11];
const MAJOR9: [u8; 5] = [0, 4, 7, 11, 14];
const MAJOR11: [u8; 6] = [0, 4, 7, 11, 14, 17];
const MAJOR13: [u8; 6] = [0, 4, 7, 11, 14, 21];
const ADD2: [u8; 4] = [0, 2, 4, 7];
const ADD9: [u8; 4] = [0, 4, 7, 14];
const ADD11: [u8; 4] = [0, 4, 7, 17];
// dominant family
const DOM7: [u8; 4] = [0, 4, 7, 10];
const DOM9: [u8; 5] = [0, 4, 7, 10, 14];
const DOM11: [u8; 6] = [0, 4, 7, 10, 14, 17];
const DOM13: [u8; 7] = [0, 4, 7, 10, 14, 17, 21];
const SEVEN_FLAT5: [u8; 4] = [0, 4, 6, 10];
const SEVEN_SHARP5: [u8; 4] = [0, 4, 8, 10];
const SEVEN_FLAT9: [u8; 5] = [0, 4, 7, 10, 13];
// minor family
const MINOR: [u8; 3] = [0, 3, 7];
const MINOR6: [u8; 4] = [0, 3, 7, 9];
const MINOR7: [u8; 4] = [0, 3, 7, 10];
const MINOR9: [u8; 5] = [0, 3, 7, 10, 14];
const MINOR11: [u8; 6] = [0, 3, 7, 10, 14, 17];
const MINOR13: [u8; 7] = [0, 3, 7, 10, 14, 17, 21];
const MINOR7_FLAT5: [u8; 4] = [0, 3, 6, 10];
const MINOR_MAJOR7: [u8; 4] = [0, 3, 7, 11];
// diminished and augmented
const DIMINISHED: [u8; 3] = [0, 3, 6];
const DIMINISHED7: [u8; 4] = [0, 3, 6, 9];
const AUGMENTED: [u8; 3] = [0, 4, 8];
// suspended and power
const SUS2: [u8; 3] = [0, 2, 7];
const SUS4: [u8; 3] = [0, 5, 7];
const SEVEN_SUS2: [u8; 4] = [0, 2, 7, 10];
const SEVEN_SUS4: [u8; 4] = [0, 5, 7, 10];
const POWER: [u8; 2] = [0, 7];

// --------------------------------------------------------------------------------------------------

/// A chord quality, bound to exactly one interval formula and one canonical
/// shorthand token.
///
/// Compound qualities ("m7b5", "7sus4", "dim7") are first-class variants with
/// their own formulas and are never composed from parts at runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Major6,
    SixNine,
    Major7,
    Major9,
    Major11,
    Major13,
    Add2,
    Add9,
    Add11,
    Dominant7,
    Dominant9,
    Dominant11,
    Dominant13,
    SevenFlat5,
    SevenSharp5,
    SevenFlat9,
    Minor,
    Minor6,
    Minor7,
    Minor9,
    Minor11,
    Minor13,
    Minor7Flat5,
    MinorMajor7,
    Diminished,
    Diminished7,
    Augmented,
    Sus2,
    Sus4,
    SevenSus2,
    SevenSus4,
    Power,
}

const ALL_QUALITIES: [ChordQuality; 33] = [
    ChordQuality::Major,
    ChordQuality::Major6,
    ChordQuality::SixNine,
    ChordQuality::Major7,
    ChordQuality::Major9,
    ChordQuality::Major11,
    ChordQuality::Major13,
    ChordQuality::Add2,
    ChordQuality::Add9,
    ChordQuality::Add11,
    ChordQuality::Dominant7,
    ChordQuality::Dominant9,
    ChordQuality::Dominant11,
    ChordQuality::Dominant13,
    ChordQuality::SevenFlat5,
    ChordQuality::SevenSharp5,
    ChordQuality::SevenFlat9,
    ChordQuality::Minor,
    ChordQuality::Minor6,
    ChordQuality::Minor7,
    ChordQuality::Minor9,
    ChordQuality::Minor11,
    ChordQuality::Minor13,
    ChordQuality::Minor7Flat5,
    ChordQuality::MinorMajor7,
    ChordQuality::Diminished,
    ChordQuality::Diminished7,
    ChordQuality::Augmented,
    ChordQuality::Sus2,
    ChordQuality::Sus4,
    ChordQuality::SevenSus2,
    ChordQuality::SevenSus4,
    ChordQuality::Power,
];

// map of all quality aliases, keyed with folded (ascii lowercase) tokens
lazy_static! {
    static ref ALIAS_TABLE: HashMap<&'static str, ChordQuality> = {
        HashMap::from([
            ("maj", ChordQuality::Major),
            ("major", ChordQuality::Major),
            ("Δ", ChordQuality::Major),
            ("6", ChordQuality::Major6),
            ("maj6", ChordQuality::Major6),
            ("major6", ChordQuality::Major6),
            ("69", ChordQuality::SixNine),
            ("6/9", ChordQuality::SixNine),
            ("maj7", ChordQuality::Major7),
            ("major7", ChordQuality::Major7),
            ("ma7", ChordQuality::Major7),
            ("Δ7", ChordQuality::Major7),
            ("maj9", ChordQuality::Major9),
            ("major9", ChordQuality::Major9),
            ("Δ9", ChordQuality::Major9),
            ("maj11", ChordQuality::Major11),
            ("major11", ChordQuality::Major11),
            ("Δ11", ChordQuality::Major11),
            ("maj13", ChordQuality::Major13),
            ("major13", ChordQuality::Major13),
            ("Δ13", ChordQuality::Major13),
            ("add2", ChordQuality::Add2),
            ("add9", ChordQuality::Add9),
            ("add", ChordQuality::Add9),
            ("+9", ChordQuality::Add9),
            ("add11", ChordQuality::Add11),
            ("+11", ChordQuality::Add11),
            ("7", ChordQuality::Dominant7),
            ("dom7", ChordQuality::Dominant7),
            ("9", ChordQuality::Dominant9),
            ("dom9", ChordQuality::Dominant9),
            ("11", ChordQuality::Dominant11),
            ("dom11", ChordQuality::Dominant11),
            ("13", ChordQuality::Dominant13),
            ("dom13", ChordQuality::Dominant13),
            ("7b5", ChordQuality::SevenFlat5),
            ("7-5", ChordQuality::SevenFlat5),
            ("7#5", ChordQuality::SevenSharp5),
            ("7+5", ChordQuality::SevenSharp5),
            ("7b9", ChordQuality::SevenFlat9),
            ("7-9", ChordQuality::SevenFlat9),
            ("m", ChordQuality::Minor),
            ("mi", ChordQuality::Minor),
            ("min", ChordQuality::Minor),
            ("minor", ChordQuality::Minor),
            ("-", ChordQuality::Minor),
            ("m6", ChordQuality::Minor6),
            ("min6", ChordQuality::Minor6),
            ("minor6", ChordQuality::Minor6),
            ("-6", ChordQuality::Minor6),
            ("m7", ChordQuality::Minor7),
            ("mi7", ChordQuality::Minor7),
            ("min7", ChordQuality::Minor7),
            ("minor7", ChordQuality::Minor7),
            ("-7", ChordQuality::Minor7),
            ("m9", ChordQuality::Minor9),
            ("min9", ChordQuality::Minor9),
            ("minor9", ChordQuality::Minor9),
            ("-9", ChordQuality::Minor9),
            ("m11", ChordQuality::Minor11),
            ("min11", ChordQuality::Minor11),
            ("minor11", ChordQuality::Minor11),
            ("-11", ChordQuality::Minor11),
            ("m13", ChordQuality::Minor13),
            ("min13", ChordQuality::Minor13),
            ("minor13", ChordQuality::Minor13),
            ("-13", ChordQuality::Minor13),
            ("m7b5", ChordQuality::Minor7Flat5),
            ("min7b5", ChordQuality::Minor7Flat5),
            ("minor7b5", ChordQuality::Minor7Flat5),
            ("-7b5", ChordQuality::Minor7Flat5),
            ("ø", ChordQuality::Minor7Flat5),
            ("ø7", ChordQuality::Minor7Flat5),
            ("mmaj7", ChordQuality::MinorMajor7),
            ("minmaj7", ChordQuality::MinorMajor7),
            ("mm7", ChordQuality::MinorMajor7),
            ("-maj7", ChordQuality::MinorMajor7),
            ("dim", ChordQuality::Diminished),
            ("diminished", ChordQuality::Diminished),
            ("o", ChordQuality::Diminished),
            ("°", ChordQuality::Diminished),
            ("dim7", ChordQuality::Diminished7),
            ("diminished7", ChordQuality::Diminished7),
            ("o7", ChordQuality::Diminished7),
            ("°7", ChordQuality::Diminished7),
            ("aug", ChordQuality::Augmented),
            ("augmented", ChordQuality::Augmented),
            ("+", ChordQuality::Augmented),
            ("sus2", ChordQuality::Sus2),
            ("sus4", ChordQuality::Sus4),
            ("sus", ChordQuality::Sus4),
            ("7sus2", ChordQuality::SevenSus2),
            ("7sus4", ChordQuality::SevenSus4),
            ("7sus", ChordQuality::SevenSus4),
            ("5", ChordQuality::Power),
            ("power", ChordQuality::Power),
        ])
    };
}

impl ChordQuality {
    /// All qualities, in table order.
    pub fn all() -> &'static [ChordQuality] {
        &ALL_QUALITIES
    }

    /// Interval formula of the quality: ordered semitone offsets from the root,
    /// always starting at 0, strictly increasing.
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Self::Major => &MAJOR,
            Self::Major6 => &MAJOR6,
            Self::SixNine => &SIX_NINE,
            Self::Major7 => &MAJOR7,
            Self::Major9 => &MAJOR9,
            Self::Major11 => &MAJOR11,
            Self::Major13 => &MAJOR13,
            Self::Add2 => &ADD2,
            Self::Add9 => &ADD9,
            Self::Add11 => &ADD11,
            Self::Dominant7 => &DOM7,
            Self::Dominant9 => &DOM9,
            Self::Dominant11 => &DOM11,
            Self::Dominant13 => &DOM13,
            Self::SevenFlat5 => &SEVEN_FLAT5,
            Self::SevenSharp5 => &SEVEN_SHARP5,
            Self::SevenFlat9 => &SEVEN_FLAT9,
            Self::Minor => &MINOR,
            Self::Minor6 => &MINOR6,
            Self::Minor7 => &MINOR7,
            Self::Minor9 => &MINOR9,
            Self::Minor11 => &MINOR11,
            Self::Minor13 => &MINOR13,
            Self::Minor7Flat5 => &MINOR7_FLAT5,
            Self::MinorMajor7 => &MINOR_MAJOR7,
            Self::Diminished => &DIMINISHED,
            Self::Diminished7 => &DIMINISHED7,
            Self::Augmented => &AUGMENTED,
            Self::Sus2 => &SUS2,
            Self::Sus4 => &SUS4,
            Self::SevenSus2 => &SEVEN_SUS2,
            Self::SevenSus4 => &SEVEN_SUS4,
            Self::Power => &POWER,
        }
    }

    /// Canonical shorthand token, as used in canonical chord names and
    /// dictionary keys: "" for major, "m" for minor, "7" for dominant 7th ...
    pub fn token(&self) -> &'static str {
        match self {
            Self::Major => "",
            Self::Major6 => "6",
            Self::SixNine => "69",
            Self::Major7 => "maj7",
            Self::Major9 => "maj9",
            Self::Major11 => "maj11",
            Self::Major13 => "maj13",
            Self::Add2 => "add2",
            Self::Add9 => "add9",
            Self::Add11 => "add11",
            Self::Dominant7 => "7",
            Self::Dominant9 => "9",
            Self::Dominant11 => "11",
            Self::Dominant13 => "13",
            Self::SevenFlat5 => "7b5",
            Self::SevenSharp5 => "7#5",
            Self::SevenFlat9 => "7b9",
            Self::Minor => "m",
            Self::Minor6 => "m6",
            Self::Minor7 => "m7",
            Self::Minor9 => "m9",
            Self::Minor11 => "m11",
            Self::Minor13 => "m13",
            Self::Minor7Flat5 => "m7b5",
            Self::MinorMajor7 => "mmaj7",
            Self::Diminished => "dim",
            Self::Diminished7 => "dim7",
            Self::Augmented => "aug",
            Self::Sus2 => "sus2",
            Self::Sus4 => "sus4",
            Self::SevenSus2 => "7sus2",
            Self::SevenSus4 => "7sus4",
            Self::Power => "5",
        }
    }

    /// Resolve a quality token or alias, case-insensitively. The empty token
    /// is major. Unknown tokens yield `None`, never an error.
    pub fn from_token(token: &str) -> Option<Self> {
        let folded = token.trim().to_ascii_lowercase();
        if folded.is_empty() {
            return Some(Self::Major);
        }
        ALIAS_TABLE.get(folded.as_str()).copied()
    }

    /// Match the longest known quality alias at the start of the given folded
    /// (trimmed, ascii lowercase) suffix. Returns the quality and the matched
    /// byte length. An empty suffix is major with length 0.
    ///
    /// Longest-match makes alias precedence implicit: "m" never shadows "maj7",
    /// and compound keys like "m7b5" win over "m7".
    pub fn match_prefix(suffix: &str) -> Option<(Self, usize)> {
        if suffix.is_empty() {
            return Some((Self::Major, 0));
        }
        let mut best: Option<(Self, usize)> = None;
        for (alias, quality) in ALIAS_TABLE.iter() {
            if suffix.starts_with(alias) && best.map_or(true, |(_, len)| alias.len() > len) {
                best = Some((*quality, alias.len()));
            }
        }
        best
    }
}

/// Resolve the interval formula for a quality token or alias, or `None` for
/// unknown tokens so callers can fall through to the next lookup tier.
pub fn formula(token: &str) -> Option<&'static [u8]> {
    ChordQuality::from_token(token).map(|quality| quality.intervals())
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::{formula, ChordQuality};

    #[test]
    fn table_invariants() {
        for quality in ChordQuality::all() {
            let intervals = quality.intervals();
            assert_eq!(intervals[0], 0, "{:?} does not start at the root", quality);
            assert!(
                intervals.windows(2).all(|pair| pair[0] < pair[1]),
                "{:?} intervals are not strictly increasing",
                quality
            );
        }
    }

    #[test]
    fn tokens_resolve_to_their_quality() {
        for quality in ChordQuality::all() {
            assert_eq!(ChordQuality::from_token(quality.token()), Some(*quality));
        }
    }

    #[test]
    fn alias_resolution() {
        assert_eq!(ChordQuality::from_token(""), Some(ChordQuality::Major));
        assert_eq!(ChordQuality::from_token("MAJ"), Some(ChordQuality::Major));
        assert_eq!(ChordQuality::from_token("m"), Some(ChordQuality::Minor));
        assert_eq!(ChordQuality::from_token("MIN"), Some(ChordQuality::Minor));
        assert_eq!(ChordQuality::from_token("-"), Some(ChordQuality::Minor));
        assert_eq!(ChordQuality::from_token("ø"), Some(ChordQuality::Minor7Flat5));
        assert_eq!(ChordQuality::from_token("qwe"), None);

        assert_eq!(formula("maj"), Some(&[0u8, 4, 7][..]));
        assert_eq!(formula("dim7"), Some(&[0u8, 3, 6, 9][..]));
        assert_eq!(formula("xyz"), None);
    }

    #[test]
    fn longest_prefix_wins() {
        assert_eq!(
            ChordQuality::match_prefix("m7b5"),
            Some((ChordQuality::Minor7Flat5, 4))
        );
        assert_eq!(
            ChordQuality::match_prefix("maj7add9"),
            Some((ChordQuality::Major7, 4))
        );
        assert_eq!(
            ChordQuality::match_prefix("madd9"),
            Some((ChordQuality::Minor, 1))
        );
        assert_eq!(
            ChordQuality::match_prefix("7sus4"),
            Some((ChordQuality::SevenSus4, 5))
        );
        assert_eq!(ChordQuality::match_prefix(""), Some((ChordQuality::Major, 0)));
        assert_eq!(ChordQuality::match_prefix("xyz"), None);
    }
}
