// Linguistic service contracts and the built-in heuristic provider.
//
// The generation engine never inspects phonetics or grammar itself — it
// consumes four black-box lookups (syllable count, rhyme set, synonym set,
// POS tag) through the `LinguisticServices` trait. Any provider can satisfy
// the contract; `HeuristicServices` is the built-in one, working entirely
// from the word bank plus a small embedded synonym table, so no corpus
// download or network access is ever needed.
//
// The heuristics are deliberately rough (vowel-group syllables, shared
// terminal rime for rhyming). They only have to be self-consistent: the
// constraint loops in `versecraft_poem` check lines against values produced
// by the same provider.

use crate::types::WordClass;
use crate::Lexicon;
use std::collections::BTreeMap;
use versecraft_prng::PoemRng;

/// POS tag as a closed enumeration.
///
/// Providers map whatever tag set they use internally onto these five
/// values; the device post-processor maps the first four straight back to
/// word classes and resolves `Other` by a uniform-random class pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

/// Black-box linguistic lookups the generation engine depends on.
pub trait LinguisticServices {
    /// Number of syllables in `word`. Always at least 1.
    fn syllable_count(&self, word: &str) -> u32;

    /// Words rhyming with `word`. May be empty. Never contains `word` itself.
    fn rhymes(&self, word: &str) -> Vec<String>;

    /// Synonyms of `word` across all senses. May be empty.
    fn synonyms(&self, word: &str) -> Vec<String>;

    /// Grammatical category of `word`.
    fn pos_tag(&self, word: &str) -> PosTag;
}

/// Uniform-random pick from `rhymes(word)`.
///
/// Returns `word` unchanged when the rhyme set is empty — the self-rhyme
/// fallback. Under this fallback every word trivially "rhymes" with itself;
/// that degenerate case is part of the design, not an error.
pub fn pick_rhyme(services: &dyn LinguisticServices, word: &str, rng: &mut PoemRng) -> String {
    let candidates = services.rhymes(word);
    if candidates.is_empty() {
        word.to_string()
    } else {
        candidates[rng.range_usize(0, candidates.len())].clone()
    }
}

/// Uniform-random pick from `synonyms(word)`, or `word` unchanged when the
/// synonym set is empty.
pub fn pick_synonym(services: &dyn LinguisticServices, word: &str, rng: &mut PoemRng) -> String {
    let candidates = services.synonyms(word);
    if candidates.is_empty() {
        word.to_string()
    } else {
        candidates[rng.range_usize(0, candidates.len())].clone()
    }
}

/// Built-in provider backed by the word bank and an embedded synonym table.
#[derive(Debug, Clone)]
pub struct HeuristicServices {
    /// Combined vocabulary across all classes, used as the rhyme pool.
    vocabulary: Vec<String>,
    /// Normalized word -> class, for POS lookup. First class wins for words
    /// present in several classes.
    classes: BTreeMap<String, WordClass>,
    /// Normalized word -> synonym lemmas.
    synonyms: BTreeMap<String, Vec<String>>,
}

impl HeuristicServices {
    /// Build a provider over a lexicon using the embedded synonym table.
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        let json = include_str!("../../data/synonyms.json");
        let synonyms: BTreeMap<String, Vec<String>> =
            serde_json::from_str(json).expect("embedded synonyms.json is malformed");
        Self::with_synonyms(lexicon, synonyms)
    }

    /// Build a provider over a lexicon with an explicit synonym table.
    pub fn with_synonyms(lexicon: &Lexicon, synonyms: BTreeMap<String, Vec<String>>) -> Self {
        let mut vocabulary = Vec::new();
        let mut classes = BTreeMap::new();
        for class in WordClass::ALL {
            for word in lexicon.words(class) {
                vocabulary.push(word.clone());
                classes.entry(normalize(word)).or_insert(class);
            }
        }
        let synonyms = synonyms
            .into_iter()
            .map(|(k, v)| (normalize(&k), v))
            .collect();
        HeuristicServices {
            vocabulary,
            classes,
            synonyms,
        }
    }
}

impl LinguisticServices for HeuristicServices {
    fn syllable_count(&self, word: &str) -> u32 {
        count_syllables(word)
    }

    fn rhymes(&self, word: &str) -> Vec<String> {
        let needle = word.to_ascii_lowercase();
        let target = rime_of(&needle);
        if target.is_empty() {
            return Vec::new();
        }
        self.vocabulary
            .iter()
            .filter(|w| w.as_str() != needle && rime_of(w) == target)
            .cloned()
            .collect()
    }

    fn synonyms(&self, word: &str) -> Vec<String> {
        self.synonyms
            .get(&normalize(word))
            .cloned()
            .unwrap_or_default()
    }

    fn pos_tag(&self, word: &str) -> PosTag {
        let key = normalize(word);
        if let Some(&class) = self.classes.get(&key) {
            return match class {
                WordClass::Noun => PosTag::Noun,
                WordClass::Verb => PosTag::Verb,
                WordClass::Adjective => PosTag::Adjective,
                WordClass::Adverb => PosTag::Adverb,
            };
        }
        // Suffix heuristics for words outside the bank (synonym substitutions
        // and template literals).
        if key.ends_with("ly") {
            PosTag::Adverb
        } else if key.ends_with("ing") || key.ends_with("ed") {
            PosTag::Verb
        } else if key.ends_with("ous")
            || key.ends_with("ful")
            || key.ends_with("ive")
            || key.ends_with("ic")
            || key.ends_with("less")
        {
            PosTag::Adjective
        } else if key.ends_with("ness")
            || key.ends_with("tion")
            || key.ends_with("ment")
            || key.ends_with("ity")
        {
            PosTag::Noun
        } else {
            PosTag::Other
        }
    }
}

/// Lowercase a token and strip non-alphabetic characters (attached
/// punctuation, hyphens) so bank lookups survive template punctuation.
fn normalize(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Vowel-group syllable estimate.
///
/// Counts maximal runs of vowels (y included), dropping one for a silent
/// trailing `e` (unless the word ends in `le`). Never returns 0.
pub fn count_syllables(word: &str) -> u32 {
    let w = normalize(word);
    if w.is_empty() {
        return 1;
    }
    let mut groups: u32 = 0;
    let mut prev_vowel = false;
    for c in w.chars() {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }
    if groups > 1 && w.ends_with('e') && !w.ends_with("le") {
        groups -= 1;
    }
    groups.max(1)
}

/// Terminal rime of a word: the substring from the start of the final vowel
/// group to the end. Two words sharing a rime are treated as rhyming.
pub fn rime_of(word: &str) -> &str {
    let mut last_start = None;
    let mut prev_vowel = false;
    for (i, c) in word.char_indices() {
        let vowel = is_vowel(c.to_ascii_lowercase());
        if vowel && !prev_vowel {
            last_start = Some(i);
        }
        prev_vowel = vowel;
    }
    match last_start {
        Some(i) => &word[i..],
        None => "",
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rhyming_lexicon() -> Lexicon {
        Lexicon::from_json(
            r#"{
            "words": {
                "noun": ["light", "night", "dream"],
                "verb": ["flows", "glows"],
                "adjective": ["bright"],
                "adverb": ["softly"]
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_count_syllables_known_words() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("whisper"), 2);
        assert_eq!(count_syllables("silent"), 2);
        assert_eq!(count_syllables("luminous"), 3);
        // Silent trailing e.
        assert_eq!(count_syllables("stone"), 1);
        // "le" endings keep their final group.
        assert_eq!(count_syllables("temple"), 2);
        // Single vowel group, trailing e guard.
        assert_eq!(count_syllables("tree"), 1);
    }

    #[test]
    fn test_count_syllables_never_zero() {
        assert_eq!(count_syllables(""), 1);
        assert_eq!(count_syllables("hmm"), 1);
        assert_eq!(count_syllables("---"), 1);
    }

    #[test]
    fn test_rime_of() {
        assert_eq!(rime_of("light"), "ight");
        assert_eq!(rime_of("night"), "ight");
        assert_eq!(rime_of("flows"), "ows");
        assert_eq!(rime_of("tree"), "ee");
        assert_eq!(rime_of("xyz"), "yz");
        assert_eq!(rime_of(""), "");
    }

    #[test]
    fn test_rhymes_share_rime_and_exclude_self() {
        let lexicon = rhyming_lexicon();
        let services = HeuristicServices::with_synonyms(&lexicon, BTreeMap::new());
        let rhymes = services.rhymes("light");
        assert!(rhymes.contains(&"night".to_string()));
        assert!(rhymes.contains(&"bright".to_string()));
        assert!(!rhymes.contains(&"light".to_string()));
        assert!(!rhymes.contains(&"dream".to_string()));
    }

    #[test]
    fn test_rhymes_empty_for_isolated_word() {
        let lexicon = rhyming_lexicon();
        let services = HeuristicServices::with_synonyms(&lexicon, BTreeMap::new());
        assert!(services.rhymes("dream").is_empty());
    }

    #[test]
    fn test_pick_rhyme_self_fallback() {
        let lexicon = rhyming_lexicon();
        let services = HeuristicServices::with_synonyms(&lexicon, BTreeMap::new());
        let mut rng = PoemRng::new(5);
        assert_eq!(pick_rhyme(&services, "dream", &mut rng), "dream");
    }

    #[test]
    fn test_pick_rhyme_returns_rhyme_set_member() {
        let lexicon = rhyming_lexicon();
        let services = HeuristicServices::with_synonyms(&lexicon, BTreeMap::new());
        let mut rng = PoemRng::new(11);
        for _ in 0..50 {
            let rhyme = pick_rhyme(&services, "light", &mut rng);
            assert!(services.rhymes("light").contains(&rhyme));
        }
    }

    #[test]
    fn test_synonyms_and_pick_synonym() {
        let lexicon = rhyming_lexicon();
        let mut table = BTreeMap::new();
        table.insert("dream".to_string(), vec!["reverie".to_string()]);
        let services = HeuristicServices::with_synonyms(&lexicon, table);
        let mut rng = PoemRng::new(2);

        assert_eq!(pick_synonym(&services, "dream", &mut rng), "reverie");
        // No table entry: word comes back unchanged.
        assert_eq!(pick_synonym(&services, "light", &mut rng), "light");
    }

    #[test]
    fn test_pos_tag_from_bank_membership() {
        let lexicon = rhyming_lexicon();
        let services = HeuristicServices::with_synonyms(&lexicon, BTreeMap::new());
        assert_eq!(services.pos_tag("light"), PosTag::Noun);
        assert_eq!(services.pos_tag("flows"), PosTag::Verb);
        assert_eq!(services.pos_tag("bright"), PosTag::Adjective);
        assert_eq!(services.pos_tag("softly"), PosTag::Adverb);
        // Punctuation attached to a token must not defeat the lookup.
        assert_eq!(services.pos_tag("light,"), PosTag::Noun);
        assert_eq!(services.pos_tag("Light"), PosTag::Noun);
    }

    #[test]
    fn test_pos_tag_suffix_heuristics() {
        let lexicon = rhyming_lexicon();
        let services = HeuristicServices::with_synonyms(&lexicon, BTreeMap::new());
        assert_eq!(services.pos_tag("gently"), PosTag::Adverb);
        assert_eq!(services.pos_tag("glowing"), PosTag::Verb);
        assert_eq!(services.pos_tag("luminous"), PosTag::Adjective);
        assert_eq!(services.pos_tag("stillness"), PosTag::Noun);
        assert_eq!(services.pos_tag("the"), PosTag::Other);
    }

    #[test]
    fn test_default_synonym_table_loads() {
        let lexicon = rhyming_lexicon();
        let services = HeuristicServices::from_lexicon(&lexicon);
        // A handful of bank words carry synonyms in the embedded table.
        assert!(!services.synonyms("dream").is_empty());
        assert!(!services.synonyms("softly").is_empty());
    }
}
