// Poetic device post-processing: alliteration and assonance.
//
// Runs after form generation, line by line. Each device rewrites individual
// tokens in place to satisfy a local phonetic predicate (shared starting
// sound, shared vowel) while preserving grammatical role: the replacement
// word is drawn from the lexicon class inferred for the token via the POS
// service. The tokenized shape of every line is preserved — devices swap
// words, never add or remove them.
//
// Word resampling is bounded by `GenConfig::max_word_attempts`. When no
// candidate satisfies the predicate within the cap (e.g. no word in the
// bank starts with the required letter), the original token is kept and a
// diagnostic is recorded.

use crate::config::GenConfig;
use crate::forms::Poem;
use versecraft_lang::services::{LinguisticServices, PosTag};
use versecraft_lang::{Lexicon, WordClass};
use versecraft_prng::PoemRng;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Apply the device passes to a poem's text in place.
///
/// Per line, independently: alliteration with probability
/// `config.alliteration_chance`, then assonance with probability
/// `config.assonance_chance` on the possibly-already-modified line.
/// Fallback diagnostics are appended to the poem's diagnostics.
pub fn apply_devices(
    poem: &mut Poem,
    lexicon: &Lexicon,
    services: &dyn LinguisticServices,
    config: &GenConfig,
    rng: &mut PoemRng,
) {
    let mut out_lines = Vec::new();
    let mut diagnostics = Vec::new();

    for line in poem.text.lines() {
        let mut line = line.to_string();
        if rng.random_bool(config.alliteration_chance) {
            line = alliterate(&line, lexicon, services, config, rng, &mut diagnostics);
        }
        if rng.random_bool(config.assonance_chance) {
            line = assonate(&line, lexicon, services, config, rng, &mut diagnostics);
        }
        out_lines.push(line);
    }

    poem.text = out_lines.join("\n");
    poem.diagnostics.append(&mut diagnostics);
}

/// Map a POS tag back to a lexicon class; `Other` resolves to a
/// uniform-random class.
fn infer_class(services: &dyn LinguisticServices, word: &str, rng: &mut PoemRng) -> WordClass {
    match services.pos_tag(word) {
        PosTag::Noun => WordClass::Noun,
        PosTag::Verb => WordClass::Verb,
        PosTag::Adjective => WordClass::Adjective,
        PosTag::Adverb => WordClass::Adverb,
        PosTag::Other => WordClass::ALL[rng.range_usize(0, WordClass::ALL.len())],
    }
}

/// Rewrite the second token to start with the first token's starting sound.
///
/// Lines of 2 or fewer tokens are left untouched. The replacement class is
/// re-inferred from the current candidate on every resample.
fn alliterate(
    line: &str,
    lexicon: &Lexicon,
    services: &dyn LinguisticServices,
    config: &GenConfig,
    rng: &mut PoemRng,
    diagnostics: &mut Vec<String>,
) -> String {
    let mut words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if words.len() <= 2 {
        return line.to_string();
    }
    let Some(target) = words[0].chars().next().map(|c| c.to_ascii_lowercase()) else {
        return line.to_string();
    };

    let original = words[1].clone();
    let mut candidate = original.clone();
    let mut matched = false;
    for _ in 0..config.max_word_attempts {
        let class = infer_class(services, &candidate, rng);
        candidate = lexicon.get_word(class, None, rng).to_string();
        if candidate
            .chars()
            .next()
            .is_some_and(|c| c.to_ascii_lowercase() == target)
        {
            matched = true;
            break;
        }
    }
    if matched {
        words[1] = candidate;
    } else {
        diagnostics.push(format!(
            "alliteration: no word starting with '{target}' within {} attempts; keeping \
             '{original}'",
            config.max_word_attempts
        ));
    }
    words.join(" ")
}

/// Rewrite tokens past the first to contain a randomly chosen vowel.
///
/// Lines of 2 or fewer tokens are left untouched. Tokens already containing
/// the vowel are skipped; each remaining token is resampled independently.
fn assonate(
    line: &str,
    lexicon: &Lexicon,
    services: &dyn LinguisticServices,
    config: &GenConfig,
    rng: &mut PoemRng,
    diagnostics: &mut Vec<String>,
) -> String {
    let mut words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if words.len() <= 2 {
        return line.to_string();
    }
    let vowel = VOWELS[rng.range_usize(0, VOWELS.len())];

    for word in words.iter_mut().skip(1) {
        if word.to_ascii_lowercase().contains(vowel) {
            continue;
        }
        let original = word.clone();
        let mut candidate = original.clone();
        let mut matched = false;
        for _ in 0..config.max_word_attempts {
            let class = infer_class(services, &candidate, rng);
            candidate = lexicon.get_word(class, None, rng).to_string();
            if candidate.to_ascii_lowercase().contains(vowel) {
                matched = true;
                break;
            }
        }
        if matched {
            *word = candidate;
        } else {
            diagnostics.push(format!(
                "assonance: no word containing '{vowel}' within {} attempts; keeping \
                 '{original}'",
                config.max_word_attempts
            ));
        }
    }
    words.join(" ")
}
