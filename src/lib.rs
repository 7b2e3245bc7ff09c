//! Chord name resolution for rendering fingering diagrams.
//!
//! Takes arbitrary chord name strings (user input, song metadata, upstream
//! text extraction) and resolves them through a tiered pipeline: curated
//! fingering dictionary, formula-driven note generation, playability-trimmed
//! partial generation, did-you-mean suggestions, clean failure. Every input
//! yields exactly one [`LookupResult`]; nothing here panics on malformed
//! names, performs I/O, or holds mutable state.

pub mod pitch;
pub use pitch::PitchClass;

pub mod formula;
pub use formula::ChordQuality;

pub mod parse;
pub use parse::{canonical_name, chords_equal, display_name, ParseError, ParsedChord};

pub mod generate;
pub use generate::GeneratedChord;

pub mod voicing;
pub use voicing::{Voicing, VoicingDictionary, VoicingEntry};

pub mod lookup;
pub use lookup::{ChordResolver, LookupResult, MemoCache, ResolveStatus};

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use crate::{chords_equal, ChordResolver, ResolveStatus};

    #[test]
    fn resolve_a_song_sheet() {
        // a chord chip row as it might arrive from extracted song metadata
        let resolver = ChordResolver::new();
        let results = resolver.resolve_all(&[
            "Am", "G7", "F#m", "Bb", "C13", "a minor", "Amz", "garbage", "",
        ]);
        assert_eq!(results.len(), 9);

        assert_eq!(results[0].status, ResolveStatus::Found);
        assert_eq!(results[1].status, ResolveStatus::Found);
        assert_eq!(results[2].status, ResolveStatus::Found);
        // flat roots resolve, spelled sharp
        assert!(matches!(
            results[3].status,
            ResolveStatus::Found | ResolveStatus::Generated
        ));
        assert_eq!(results[3].display_name, "A#");
        // a 13th chord generates with a playability warning
        assert_eq!(results[4].status, ResolveStatus::Partial);
        assert!(results[4].warning.is_some());
        // long-hand spelling is the same chord as the first chip
        assert!(chords_equal("a minor", "Am"));
        assert_eq!(results[5].status, ResolveStatus::Found);
        // near-miss gets a suggestion, junk does not
        assert_eq!(results[6].status, ResolveStatus::Similar);
        assert_eq!(results[7].status, ResolveStatus::Unknown);
        assert_eq!(results[8].status, ResolveStatus::Unknown);
    }
}
