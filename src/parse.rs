//! Chord name parsing and normalization into canonical form.

use thiserror::Error;

use crate::formula::ChordQuality;
use crate::pitch::PitchClass;

// --------------------------------------------------------------------------------------------------

/// Longest accepted chord name. Anything above this is junk input, not a chord.
pub const MAX_NAME_LEN: usize = 50;

/// Why a chord name failed to parse. Parse failure gates the entire lookup
/// pipeline, including the did-you-mean suggestion tier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("chord name is empty")]
    Empty,
    #[error("chord name exceeds {MAX_NAME_LEN} characters")]
    TooLong,
    #[error("invalid root note in '{0}'")]
    InvalidRoot(String),
}

// --------------------------------------------------------------------------------------------------

/// An extension token trailing the quality: "Cmaj7add9" carries `Add9`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Extension {
    Six,
    Seven,
    Nine,
    Eleven,
    Thirteen,
    Sus2,
    Sus4,
    Add2,
    Add9,
    Maj7,
}

// match order: longer tokens first, so "13" wins over "1"-prefixed digits and
// "sus4"/"add9" win over bare digits
const EXTENSION_ORDER: [Extension; 10] = [
    Extension::Sus2,
    Extension::Sus4,
    Extension::Add2,
    Extension::Add9,
    Extension::Maj7,
    Extension::Thirteen,
    Extension::Eleven,
    Extension::Nine,
    Extension::Seven,
    Extension::Six,
];

impl Extension {
    /// Canonical token of the extension, as it appears in canonical names.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Six => "6",
            Self::Seven => "7",
            Self::Nine => "9",
            Self::Eleven => "11",
            Self::Thirteen => "13",
            Self::Sus2 => "sus2",
            Self::Sus4 => "sus4",
            Self::Add2 => "add2",
            Self::Add9 => "add9",
            Self::Maj7 => "maj7",
        }
    }

    fn match_prefix(suffix: &str) -> Option<Self> {
        EXTENSION_ORDER
            .iter()
            .find(|extension| suffix.starts_with(extension.token()))
            .copied()
    }
}

// --------------------------------------------------------------------------------------------------

/// A parsed chord name: root, quality, extensions and the derived canonical
/// and display forms.
///
/// `quality` is `None` when the root parsed but the rest of the name matches
/// no known quality token. Such chords still carry a stable canonical form so
/// the lookup tiers can run suggestion matching on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChord {
    root: PitchClass,
    quality: Option<ChordQuality>,
    extensions: Vec<Extension>,
    canonical: String,
    display: String,
}

impl ParsedChord {
    /// Parse an arbitrary chord name string.
    ///
    /// Input is trimmed, case-insensitive, and accepts unicode `♯`/`♭`
    /// accidentals; inner whitespace is ignored ("A min" == "Amin"). The root
    /// must match `[A-G][#b]?`; flat roots are normalized to their sharp
    /// equivalent (see [`PitchClass`]). The quality is the longest known
    /// token following the root, and anything after it is tokenized into
    /// [`Extension`]s.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ParseError::TooLong);
        }
        // normalize accidentals, strip inner whitespace, fold case for matching
        let compact = trimmed
            .replace('♯', "#")
            .replace('♭', "b")
            .split_whitespace()
            .collect::<String>();
        let folded = compact.to_ascii_lowercase();

        // root: [a-g] with one optional accidental
        let mut chars = folded.chars();
        let letter = chars.next().ok_or(ParseError::Empty)?;
        let base = match letter {
            'c' => 0,
            'd' => 2,
            'e' => 4,
            'f' => 5,
            'g' => 7,
            'a' => 9,
            'b' => 11,
            _ => return Err(ParseError::InvalidRoot(trimmed.to_string())),
        };
        let (offset, root_len): (i32, usize) = match chars.next() {
            Some('#') => (1, 2),
            Some('b') => (-1, 2),
            _ => (0, 1),
        };
        let root = PitchClass::from_index((base + offset).rem_euclid(12) as u8);
        let suffix = &folded[root_len..];

        // quality: longest known token, then extension tokens; any unmatched
        // residue leaves the quality unresolved
        let resolved = ChordQuality::match_prefix(suffix).and_then(|(quality, matched)| {
            Self::match_extensions(&suffix[matched..]).map(|extensions| (quality, extensions))
        });
        Ok(match resolved {
            Some((quality, extensions)) => {
                let mut canonical = format!("{}{}", root.name(), quality.token());
                for extension in &extensions {
                    canonical.push_str(extension.token());
                }
                let display = canonical.clone();
                Self {
                    root,
                    quality: Some(quality),
                    extensions,
                    canonical,
                    display,
                }
            }
            None => Self {
                root,
                quality: None,
                extensions: Vec::new(),
                canonical: format!("{}{}", root.name(), suffix),
                display: format!("{}{}", root.name(), &compact[root_len..]),
            },
        })
    }

    fn match_extensions(mut rest: &str) -> Option<Vec<Extension>> {
        let mut extensions = Vec::new();
        while !rest.is_empty() {
            let extension = Extension::match_prefix(rest)?;
            rest = &rest[extension.token().len()..];
            extensions.push(extension);
        }
        Some(extensions)
    }

    /// Root pitch class, sharp-normalized.
    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Resolved quality, or `None` for an unrecognized suffix.
    pub fn quality(&self) -> Option<ChordQuality> {
        self.quality
    }

    /// Extension tokens following the quality, in input order.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Canonical form: dictionary/cache key and equality domain. Two strings
    /// denote the same chord iff their canonical forms match exactly.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Display form for UIs. Matches the canonical form for recognized chords
    /// and preserves the input spelling of an unrecognized suffix.
    pub fn display_name(&self) -> &str {
        &self.display
    }

    /// Whether the name resolved to a known quality with no leftover text.
    pub fn is_recognized(&self) -> bool {
        self.quality.is_some()
    }
}

impl TryFrom<&str> for ParsedChord {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, ParseError> {
        Self::parse(s)
    }
}

// --------------------------------------------------------------------------------------------------

/// Canonical form of an arbitrary chord name, or `None` if it does not parse.
/// Idempotent: normalizing a canonical form yields the same canonical form.
pub fn canonical_name(name: &str) -> Option<String> {
    ParsedChord::parse(name)
        .ok()
        .map(|parsed| parsed.canonical)
}

/// Display name for an arbitrary chord name string. Falls back to the trimmed
/// input when the name does not parse, so UIs always have something to show.
pub fn display_name(name: &str) -> String {
    match ParsedChord::parse(name) {
        Ok(parsed) => parsed.display,
        Err(_) => name.trim().to_string(),
    }
}

/// Whether two strings denote the same chord ("Am", "Amin" and "A-" all do).
pub fn chords_equal(a: &str, b: &str) -> bool {
    match (ParsedChord::parse(a), ParsedChord::parse(b)) {
        (Ok(a), Ok(b)) => a.canonical == b.canonical,
        _ => false,
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::{canonical_name, chords_equal, display_name, ParseError, ParsedChord};
    use crate::formula::ChordQuality;
    use crate::pitch::PitchClass;

    #[test]
    fn root_extraction() -> Result<(), ParseError> {
        assert_eq!(ParsedChord::parse("C")?.root(), PitchClass::C);
        assert_eq!(ParsedChord::parse("f#m")?.root(), PitchClass::Fs);
        assert_eq!(ParsedChord::parse("Bb")?.root(), PitchClass::As);
        assert_eq!(ParsedChord::parse("Cb")?.root(), PitchClass::B);

        assert_eq!(ParsedChord::parse(""), Err(ParseError::Empty));
        assert_eq!(ParsedChord::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            ParsedChord::parse(&"x".repeat(100)),
            Err(ParseError::TooLong)
        );
        assert!(matches!(
            ParsedChord::parse("H7"),
            Err(ParseError::InvalidRoot(_))
        ));
        assert!(matches!(
            ParsedChord::parse("123"),
            Err(ParseError::InvalidRoot(_))
        ));
        Ok(())
    }

    #[test]
    fn quality_resolution() -> Result<(), ParseError> {
        assert_eq!(ParsedChord::parse("C")?.quality(), Some(ChordQuality::Major));
        assert_eq!(
            ParsedChord::parse("Am")?.quality(),
            Some(ChordQuality::Minor)
        );
        assert_eq!(
            ParsedChord::parse("A MINOR")?.quality(),
            Some(ChordQuality::Minor)
        );
        assert_eq!(
            ParsedChord::parse("Cmaj7")?.quality(),
            Some(ChordQuality::Major7)
        );
        assert_eq!(
            ParsedChord::parse("Bm7b5")?.quality(),
            Some(ChordQuality::Minor7Flat5)
        );
        assert_eq!(
            ParsedChord::parse("G7sus4")?.quality(),
            Some(ChordQuality::SevenSus4)
        );
        assert_eq!(
            ParsedChord::parse("Edim7")?.quality(),
            Some(ChordQuality::Diminished7)
        );
        // unresolved suffix parses, with the quality left open
        let parsed = ParsedChord::parse("Amz")?;
        assert_eq!(parsed.quality(), None);
        assert!(!parsed.is_recognized());
        assert_eq!(parsed.canonical(), "Amz");
        Ok(())
    }

    #[test]
    fn extensions_after_quality() -> Result<(), ParseError> {
        let parsed = ParsedChord::parse("Cmaj7add9")?;
        assert_eq!(parsed.quality(), Some(ChordQuality::Major7));
        assert_eq!(
            parsed.extensions(),
            &[super::Extension::Add9],
            "trailing add9 is an extension, not part of the quality"
        );
        assert_eq!(parsed.canonical(), "Cmaj7add9");

        // compound keys swallow greedily: no extension is split off "m7b5"
        let parsed = ParsedChord::parse("Bm7b5")?;
        assert!(parsed.extensions().is_empty());
        Ok(())
    }

    #[test]
    fn canonical_is_idempotent() {
        for name in [
            "Am", "A-", "a min", "C", "Cmaj7", "bb13", "G7sus4", "Amz", "F#m7", "CΔ7",
        ] {
            let once = canonical_name(name).unwrap();
            assert_eq!(canonical_name(&once), Some(once.clone()), "input '{}'", name);
        }
        assert_eq!(canonical_name("!!"), None);
    }

    #[test]
    fn equality_across_aliases() {
        assert!(chords_equal("Am", "Amin"));
        assert!(chords_equal("Am", "A-"));
        assert!(chords_equal("Am", "a minor"));
        assert!(chords_equal("Bb", "A#"));
        assert!(!chords_equal("Am", "A"));
        assert!(!chords_equal("Am", "Am7"));
        assert!(!chords_equal("xx", "xx"));
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("a minor"), "Am");
        assert_eq!(display_name("bb"), "A#");
        assert_eq!(display_name("C♯m7"), "C#m7");
        // unparsable input falls back to the trimmed original
        assert_eq!(display_name("  what  "), "what");
    }
}
