//! Tiered chord lookup: curated voicings, generated notes, suggestions.

use std::collections::{HashMap, VecDeque};

use derive_more::Display;
use log::debug;

use crate::formula::ChordQuality;
use crate::generate::GeneratedChord;
use crate::parse::{display_name, ParsedChord};
use crate::pitch::PitchClass;
use crate::voicing::{builtin, Voicing, VoicingDictionary};

// --------------------------------------------------------------------------------------------------

/// How a chord name was resolved. The variants are ordered by lookup
/// priority: the first tier that succeeds wins.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveStatus {
    /// Exact hit in the curated voicing dictionary.
    #[display("found")]
    Found,
    /// No curated entry, but the formula table produced every chord tone.
    #[display("generated")]
    Generated,
    /// Generated with tones dropped for playability; carries a warning.
    #[display("partial")]
    Partial,
    /// Valid root but no known quality; carries did-you-mean suggestions.
    #[display("similar")]
    Similar,
    /// Did not parse, or nothing similar is known.
    #[display("unknown")]
    Unknown,
}

/// The resolved chord content: root, note sequence and any curated voicings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedChord {
    pub root: PitchClass,
    /// Ordered, deduplicated chord tones, root first. Empty when the curated
    /// entry has no matching formula to derive notes from.
    pub notes: Vec<PitchClass>,
    /// Curated voicings, in dictionary order. Empty for generated chords.
    pub voicings: Vec<Voicing>,
}

/// Outcome of one lookup. Exactly one is produced per input, for any input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupResult {
    pub status: ResolveStatus,
    pub chord: Option<ResolvedChord>,
    pub display_name: String,
    /// Ranked same-root alternatives; only ever non-empty for `Similar`.
    pub suggestions: Vec<String>,
    /// Present iff `status` is `Partial`.
    pub warning: Option<String>,
    pub is_generated: bool,
}

impl LookupResult {
    fn unknown(display_name: String) -> Self {
        Self {
            status: ResolveStatus::Unknown,
            chord: None,
            display_name,
            suggestions: Vec::new(),
            warning: None,
            is_generated: false,
        }
    }
}

// --------------------------------------------------------------------------------------------------

/// Resolves arbitrary chord name strings against a read-only voicing
/// dictionary and the static formula tables.
///
/// The resolver is a pure function of its input: it holds no mutable state,
/// only reads immutable tables, and can be shared between threads freely.
/// Repeated lookups can be memoized through a caller-owned [`MemoCache`].
pub struct ChordResolver<'a> {
    dictionary: &'a dyn VoicingDictionary,
}

impl Default for ChordResolver<'static> {
    fn default() -> Self {
        Self {
            dictionary: builtin(),
        }
    }
}

impl<'a> ChordResolver<'a> {
    /// Resolver over the built-in curated dictionary.
    pub fn new() -> ChordResolver<'static> {
        ChordResolver::default()
    }

    /// Resolver over a caller-provided dictionary.
    pub fn with_dictionary(dictionary: &'a dyn VoicingDictionary) -> Self {
        Self { dictionary }
    }

    /// Resolve a single chord name through the tier chain: curated voicing,
    /// generated notes, partial generation, same-root suggestion, unknown.
    pub fn resolve(&self, name: &str) -> LookupResult {
        let parsed = match ParsedChord::parse(name) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!("chord name '{}' did not parse: {}", name.trim(), err);
                return LookupResult::unknown(display_name(name));
            }
        };
        let generated = GeneratedChord::from_parsed(&parsed);

        // tier 1: curated dictionary hit
        if let Some(entry) = self.dictionary.get(parsed.canonical()) {
            debug!("'{}' found in the curated dictionary", parsed.canonical());
            let notes = generated
                .map(|chord| chord.notes().to_vec())
                .unwrap_or_default();
            return LookupResult {
                status: ResolveStatus::Found,
                chord: Some(ResolvedChord {
                    root: parsed.root(),
                    notes,
                    voicings: entry.voicings.clone(),
                }),
                display_name: parsed.display_name().to_string(),
                suggestions: Vec::new(),
                warning: None,
                is_generated: false,
            };
        }

        // tiers 2 and 3: formula-driven generation, full or partial
        if let Some(chord) = generated {
            let warning = chord
                .is_partial()
                .then(|| omission_warning(chord.omitted()));
            debug!(
                "'{}' generated from its formula{}",
                parsed.canonical(),
                if warning.is_some() { " (partial)" } else { "" }
            );
            return LookupResult {
                status: if warning.is_some() {
                    ResolveStatus::Partial
                } else {
                    ResolveStatus::Generated
                },
                chord: Some(ResolvedChord {
                    root: chord.root(),
                    notes: chord.notes().to_vec(),
                    voicings: Vec::new(),
                }),
                display_name: parsed.display_name().to_string(),
                suggestions: Vec::new(),
                warning,
                is_generated: true,
            };
        }

        // tier 4: did-you-mean over known same-root names
        let suggestions = self.suggestions(&parsed);
        if !suggestions.is_empty() {
            debug!(
                "'{}' matched no formula, suggesting {:?}",
                parsed.canonical(),
                suggestions
            );
            return LookupResult {
                status: ResolveStatus::Similar,
                chord: None,
                display_name: parsed.display_name().to_string(),
                suggestions,
                warning: None,
                is_generated: false,
            };
        }

        // tier 5: clean failure
        LookupResult::unknown(parsed.display_name().to_string())
    }

    /// Resolve an ordered list of names independently, preserving order and
    /// cardinality.
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> Vec<LookupResult> {
        names.iter().map(|name| self.resolve(name.as_ref())).collect()
    }

    // Ranked suggestion set for a parsed-but-unmatched chord: known names
    // (dictionary keys plus root + quality tokens) restricted to the parsed
    // root, within edit distance 2, ordered by distance, length, name.
    fn suggestions(&self, parsed: &ParsedChord) -> Vec<String> {
        const MAX_SUGGESTIONS: usize = 3;
        const MAX_DISTANCE: usize = 2;

        let root = parsed.root().name();
        let target = parsed.canonical().to_ascii_lowercase();
        let mut candidates = self
            .dictionary
            .names()
            .into_iter()
            .map(String::from)
            .chain(
                ChordQuality::all()
                    .iter()
                    .map(|quality| format!("{}{}", root, quality.token())),
            )
            .filter(|name| {
                // same root only; a bare "C" prefix must not match "C#..."
                name.strip_prefix(root)
                    .is_some_and(|rest| !rest.starts_with('#'))
            })
            .collect::<Vec<_>>();
        candidates.sort();
        candidates.dedup();

        let mut ranked = candidates
            .into_iter()
            .filter_map(|name| {
                let distance = levenshtein(&target, &name.to_ascii_lowercase());
                (distance > 0 && distance <= MAX_DISTANCE).then_some((distance, name))
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|(distance_a, a), (distance_b, b)| {
            distance_a
                .cmp(distance_b)
                .then(a.len().cmp(&b.len()))
                .then(a.cmp(b))
        });
        ranked
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, name)| name)
            .collect()
    }
}

fn omission_warning(omitted: &[u8]) -> String {
    let degrees = omitted
        .iter()
        .map(|&interval| match interval {
            7 => "5th",
            17 => "11th",
            _ => "tone",
        })
        .collect::<Vec<_>>();
    format!("omitted the {} for playability", degrees.join(" and the "))
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut previous = (0..=b.len()).collect::<Vec<usize>>();
    let mut current = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

// --------------------------------------------------------------------------------------------------

/// Bounded, least-recently-used memoization of lookup results, keyed by
/// normalized input.
///
/// Purely an optimization for callers that resolve the same names repeatedly
/// (e.g. while rendering many chord chips per frame): the resolver's results
/// never change for a given dictionary, so there is nothing to invalidate.
#[derive(Debug)]
pub struct MemoCache {
    entries: HashMap<String, LookupResult>,
    order: VecDeque<String>,
    capacity: usize,
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl MemoCache {
    pub const DEFAULT_CAPACITY: usize = 128;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Resolve through the cache, evicting the least recently used entry
    /// when full.
    pub fn resolve(&mut self, resolver: &ChordResolver, name: &str) -> LookupResult {
        let key = name.trim().to_ascii_lowercase();
        if let Some(hit) = self.entries.get(&key) {
            let hit = hit.clone();
            if let Some(position) = self.order.iter().position(|cached| *cached == key) {
                self.order.remove(position);
                self.order.push_back(key);
            }
            return hit;
        }
        let result = resolver.resolve(name);
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.entries.insert(key.clone(), result.clone());
        self.order.push_back(key);
        result
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

// --------------------------------------------------------------------------------------------------
