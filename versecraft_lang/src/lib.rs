// Shared Versecraft word-bank crate.
//
// Provides the categorized word lists and theme keyword sets that feed the
// template engine in `versecraft_poem`. No generation logic lives here —
// only the data model and uniform word selection.
//
// Architecture:
// - `types.rs`: Core types — `WordClass`, `Theme`
// - `services.rs`: The `LinguisticServices` contract (syllables, rhymes,
//   synonyms, POS) plus the built-in `HeuristicServices` provider
// - `lib.rs` (this file): `Lexicon` struct — loads and queries the JSON
//   word bank
//
// The lexicon is loaded from `data/lexicon.json` via `Lexicon::from_json()`
// (JSON string in, typed struct out). The `default_lexicon()` convenience
// function uses `include_str!` to embed the default word bank at compile
// time.
//
// Determinism constraint: all RNG goes through `versecraft_prng::PoemRng`,
// passed explicitly into every selecting method. The lexicon itself is
// immutable after construction.

pub mod services;
pub mod types;

// Re-export key types at crate root for convenience.
pub use types::{Theme, WordClass};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use versecraft_prng::PoemRng;

/// The top-level JSON structure for the word-bank file.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    words: BTreeMap<WordClass, Vec<String>>,
    #[serde(default)]
    themes: BTreeMap<Theme, Vec<String>>,
}

/// Errors from lexicon construction.
#[derive(Debug)]
pub enum LexiconError {
    /// The JSON itself failed to parse.
    Parse(serde_json::Error),
    /// A word class every template may reference has no words.
    EmptyClass(WordClass),
}

impl fmt::Display for LexiconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexiconError::Parse(e) => write!(f, "lexicon JSON parse error: {e}"),
            LexiconError::EmptyClass(class) => {
                write!(f, "lexicon has no words for class '{}'", class.as_str())
            }
        }
    }
}

impl std::error::Error for LexiconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LexiconError::Parse(e) => Some(e),
            LexiconError::EmptyClass(_) => None,
        }
    }
}

impl From<serde_json::Error> for LexiconError {
    fn from(e: serde_json::Error) -> Self {
        LexiconError::Parse(e)
    }
}

/// A loaded word bank with query methods.
///
/// Constructed from JSON via `from_json()`. Word lists preserve entry order
/// from the JSON file for deterministic indexing (important for same-seed
/// output). Construction enforces the invariant that every word class is
/// non-empty — templates may reference any class at any time.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: BTreeMap<WordClass, Vec<String>>,
    themes: BTreeMap<Theme, Vec<String>>,
}

impl Lexicon {
    /// Parse a word bank from a JSON string.
    ///
    /// Fails if any of the four word classes is missing or empty.
    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = serde_json::from_str(json)?;
        for class in WordClass::ALL {
            if file.words.get(&class).is_none_or(|w| w.is_empty()) {
                return Err(LexiconError::EmptyClass(class));
            }
        }
        Ok(Lexicon {
            words: file.words,
            themes: file.themes,
        })
    }

    /// All words of a class, in file order.
    pub fn words(&self, class: WordClass) -> &[String] {
        // Non-empty by the from_json invariant.
        self.words.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keyword set for a theme. Empty if the file defines no such theme.
    pub fn theme_keywords(&self, theme: Theme) -> &[String] {
        self.themes.get(&theme).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Words of a class qualifying under a theme: literal equality with a
    /// theme keyword, or containment of a keyword as a substring. The loose
    /// substring rule is intentional — tightening it to exact matching
    /// changes generation statistics.
    pub fn themed_words(&self, class: WordClass, theme: Theme) -> Vec<&str> {
        let keywords = self.theme_keywords(theme);
        self.words(class)
            .iter()
            .filter(|word| {
                keywords
                    .iter()
                    .any(|k| word.as_str() == k || word.contains(k.as_str()))
            })
            .map(String::as_str)
            .collect()
    }

    /// Uniform-random word of a class, restricted to the theme-qualifying
    /// subset when a theme is given and that subset is non-empty.
    pub fn get_word(&self, class: WordClass, theme: Option<Theme>, rng: &mut PoemRng) -> &str {
        if let Some(theme) = theme {
            let themed = self.themed_words(class, theme);
            if !themed.is_empty() {
                return themed[rng.range_usize(0, themed.len())];
            }
        }
        let all = self.words(class);
        &all[rng.range_usize(0, all.len())]
    }
}

/// Load the default word bank embedded at compile time.
///
/// Uses `include_str!` to embed `data/lexicon.json`. Panics if the embedded
/// JSON is malformed (should never happen in a released build).
pub fn default_lexicon() -> Lexicon {
    let json = include_str!("../../data/lexicon.json");
    Lexicon::from_json(json).expect("embedded lexicon.json is malformed")
}
