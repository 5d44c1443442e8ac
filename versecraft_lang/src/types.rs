// Core word-bank types: word classes and themes.
//
// `WordClass` doubles as the lexicon's map key and the tag carried by
// template placeholders (`{noun}`, `{verb}`, ...). `Theme` is the closed set
// of thematic filters word selection can be biased toward. Both serialize as
// lowercase strings so the JSON lexicon reads naturally.

use serde::{Deserialize, Serialize};

/// Grammatical class of a word-bank entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordClass {
    /// All word classes, in lexicon order.
    pub const ALL: [WordClass; 4] = [
        WordClass::Noun,
        WordClass::Verb,
        WordClass::Adjective,
        WordClass::Adverb,
    ];

    /// Lowercase name, matching both the JSON lexicon keys and template
    /// placeholder names.
    pub fn as_str(self) -> &'static str {
        match self {
            WordClass::Noun => "noun",
            WordClass::Verb => "verb",
            WordClass::Adjective => "adjective",
            WordClass::Adverb => "adverb",
        }
    }

    /// Parse a template placeholder name into a word class.
    pub fn from_placeholder(name: &str) -> Option<WordClass> {
        match name {
            "noun" => Some(WordClass::Noun),
            "verb" => Some(WordClass::Verb),
            "adjective" => Some(WordClass::Adjective),
            "adverb" => Some(WordClass::Adverb),
            _ => None,
        }
    }
}

/// Thematic filter for word selection.
///
/// A theme restricts `Lexicon::get_word` to words matching one of the
/// theme's keywords (literal equality or substring containment), falling
/// back to the full class list when nothing matches. "No theme" is
/// represented as `Option::<Theme>::None` at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Nature,
    Emotion,
    Time,
    Abstract,
}

impl Theme {
    /// Lowercase name, matching the JSON lexicon's theme keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Nature => "nature",
            Theme::Emotion => "emotion",
            Theme::Time => "time",
            Theme::Abstract => "abstract",
        }
    }

    /// Display label for poem headings.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Nature => "Nature",
            Theme::Emotion => "Emotion",
            Theme::Time => "Time",
            Theme::Abstract => "Abstract",
        }
    }

    /// Parse a theme name (case-insensitive). Returns `None` for anything
    /// outside the fixed theme set.
    pub fn from_name(name: &str) -> Option<Theme> {
        match name.to_ascii_lowercase().as_str() {
            "nature" => Some(Theme::Nature),
            "emotion" => Some(Theme::Emotion),
            "time" => Some(Theme::Time),
            "abstract" => Some(Theme::Abstract),
            _ => None,
        }
    }
}
