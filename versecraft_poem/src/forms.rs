// Form generators: one algorithm per poetic form.
//
// Each form composes `Template::render` under its own constraint:
// - sonnet: 14 lines, ABABCDCDEFEFGG, rhyme enforced by rejection sampling
// - haiku: 3 lines, 5/7/5 syllables, enforced by rejection sampling
// - free verse: 6-12 unconstrained lines with metaphor/simile mixes
// - abstract: 7 two-word fragments joined into one block
// - villanelle: two refrains with a rhyme word baked into the middle lines
//
// The rejection loops are bounded by `GenConfig::max_line_attempts`. When a
// loop exhausts its cap the best candidate seen so far is accepted and a
// diagnostic is recorded on the poem — the constraint becomes approximate
// instead of the generator hanging. Note the villanelle asymmetry: its
// middle lines get their rhyme word appended as literal template text and
// are never rejection-sampled against it, unlike the sonnet's strict
// enforcement. That asymmetry is part of the form's design here.

use crate::config::GenConfig;
use crate::template::{Template, capitalize_first};
use std::collections::BTreeMap;
use versecraft_lang::services::{LinguisticServices, pick_rhyme};
use versecraft_lang::{Lexicon, Theme, WordClass};
use versecraft_prng::PoemRng;

/// The fixed set of supported poem forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoemForm {
    Sonnet,
    Haiku,
    FreeVerse,
    Abstract,
    Villanelle,
}

impl PoemForm {
    /// Parse a form name (case-insensitive). Unrecognized names fall back
    /// to free verse.
    pub fn from_name(name: &str) -> PoemForm {
        match name.to_ascii_lowercase().as_str() {
            "sonnet" => PoemForm::Sonnet,
            "haiku" => PoemForm::Haiku,
            "abstract" => PoemForm::Abstract,
            "villanelle" => PoemForm::Villanelle,
            _ => PoemForm::FreeVerse,
        }
    }

    /// Display label for poem headings.
    pub fn label(self) -> &'static str {
        match self {
            PoemForm::Sonnet => "Sonnet",
            PoemForm::Haiku => "Haiku",
            PoemForm::FreeVerse => "Free Verse",
            PoemForm::Abstract => "Abstract",
            PoemForm::Villanelle => "Villanelle",
        }
    }
}

/// A generated poem.
#[derive(Debug, Clone)]
pub struct Poem {
    /// The form that produced this poem.
    pub form: PoemForm,
    /// Theme the generation was biased toward, if any.
    pub theme: Option<Theme>,
    /// The poem text, lines joined with `\n` (the abstract form is a single
    /// line).
    pub text: String,
    /// One entry per constraint loop that exhausted its attempt cap and
    /// fell back to its best candidate.
    pub diagnostics: Vec<String>,
}

const RHYME_SCHEME: &str = "ABABCDCDEFEFGG";

const HAIKU_SYLLABLE_TARGETS: [u32; 3] = [5, 7, 5];

const SONNET_TEMPLATES: &[&str] = &[
    "The {adjective} {noun} {verb} {adverb}",
    "{adverb}, {noun} {verb} through {noun}",
    "In {adjective} {noun}, {noun} {verb}",
    "With {adjective} {noun}, {adverb} {verb}",
    "From {noun} to {noun}, {noun} {verb}",
    "As {adjective} as {noun}, {noun} {verb}",
];

const HAIKU_TEMPLATES: &[&str] = &[
    "The {adjective} {noun}",
    "{verb} {adverb} through {noun}",
    "{noun} {verb} {adverb}",
    "{adjective} {noun} {verb}",
    "{noun} of {adjective} {noun}",
];

const FREE_VERSE_TEMPLATES: &[&str] = &[
    "The {adjective} {noun} {verb}",
    "{adverb}, {noun} {verb}",
    "In {adjective} {noun}, {noun} {verb}",
    "{noun} of {noun} {verb} {adverb}",
    "{adjective} {noun} {verb} like {noun}",
    "From {noun} to {noun}, {adjective} {noun}",
    "{verb} the {adjective} {noun} of {noun}",
    "With {adjective} {noun}, {noun} {verb} {adverb}",
];

const VILLANELLE_A1_TEMPLATE: &str = "The {adjective} {noun} {verb} {adverb}";
const VILLANELLE_A2_TEMPLATE: &str = "{adverb}, {noun} {verb} through {noun}";

/// Generate a poem of the given form.
pub fn generate_poem(
    form: PoemForm,
    theme: Option<Theme>,
    lexicon: &Lexicon,
    services: &dyn LinguisticServices,
    config: &GenConfig,
    rng: &mut PoemRng,
) -> Poem {
    match form {
        PoemForm::Sonnet => generate_sonnet(theme, lexicon, services, config, rng),
        PoemForm::Haiku => generate_haiku(theme, lexicon, services, config, rng),
        PoemForm::FreeVerse => generate_free_verse(theme, lexicon, services, config, rng),
        PoemForm::Abstract => generate_abstract(theme, lexicon, rng),
        PoemForm::Villanelle => generate_villanelle(theme, lexicon, services, config, rng),
    }
}

/// Pick and parse one template from a fixed pool.
fn pool_template(pool: &[&str], rng: &mut PoemRng) -> Template {
    Template::parse(pool[rng.range_usize(0, pool.len())])
        .expect("fixed template pool is malformed")
}

/// Last whitespace token of a line.
fn last_token(line: &str) -> Option<&str> {
    line.split_whitespace().next_back()
}

/// Length in chars of the common suffix of two strings.
fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Sum of per-token syllable counts across a line.
fn syllable_total(line: &str, services: &dyn LinguisticServices) -> u32 {
    line.split_whitespace()
        .map(|w| services.syllable_count(w))
        .sum()
}

fn generate_sonnet(
    theme: Option<Theme>,
    lexicon: &Lexicon,
    services: &dyn LinguisticServices,
    config: &GenConfig,
    rng: &mut PoemRng,
) -> Poem {
    let mut lines = Vec::with_capacity(RHYME_SCHEME.len());
    let mut diagnostics = Vec::new();
    // Rhyme word per scheme letter, established by the first line of each
    // group.
    let mut rhyme_words: BTreeMap<char, String> = BTreeMap::new();

    for letter in RHYME_SCHEME.chars() {
        // The template is chosen once per line and held fixed across the
        // rejection loop.
        let template = pool_template(SONNET_TEMPLATES, rng);
        let mut line = template.render(lexicon, services, theme, config, rng);

        if let Some(suffix) = rhyme_words.get(&letter) {
            if !line.ends_with(suffix.as_str()) {
                let mut best_line = line.clone();
                let mut best_overlap = common_suffix_len(&line, suffix);
                let mut matched = false;
                let mut attempts: u32 = 1;
                while attempts < config.max_line_attempts {
                    line = template.render(lexicon, services, theme, config, rng);
                    attempts += 1;
                    if line.ends_with(suffix.as_str()) {
                        matched = true;
                        break;
                    }
                    let overlap = common_suffix_len(&line, suffix);
                    if overlap > best_overlap {
                        best_overlap = overlap;
                        best_line = line.clone();
                    }
                }
                if !matched {
                    diagnostics.push(format!(
                        "sonnet: no line for group '{letter}' ending in '{suffix}' within {} \
                         attempts; keeping the closest candidate",
                        config.max_line_attempts
                    ));
                    line = best_line;
                }
            }
        } else {
            // First line of this group establishes the required rhyme word.
            let last = last_token(&line).unwrap_or("").to_string();
            rhyme_words.insert(letter, pick_rhyme(services, &last, rng));
        }

        lines.push(line);
    }

    Poem {
        form: PoemForm::Sonnet,
        theme,
        text: lines.join("\n"),
        diagnostics,
    }
}

fn generate_haiku(
    theme: Option<Theme>,
    lexicon: &Lexicon,
    services: &dyn LinguisticServices,
    config: &GenConfig,
    rng: &mut PoemRng,
) -> Poem {
    let mut lines = Vec::with_capacity(HAIKU_SYLLABLE_TARGETS.len());
    let mut diagnostics = Vec::new();

    for &target in &HAIKU_SYLLABLE_TARGETS {
        // A fresh template is drawn for every attempt, unlike the sonnet's
        // per-line fixed template.
        let mut line =
            pool_template(HAIKU_TEMPLATES, rng).render(lexicon, services, theme, config, rng);
        let mut total = syllable_total(&line, services);
        let mut best_line = line.clone();
        let mut best_total = total;
        let mut attempts: u32 = 1;

        while total != target && attempts < config.max_line_attempts {
            line =
                pool_template(HAIKU_TEMPLATES, rng).render(lexicon, services, theme, config, rng);
            total = syllable_total(&line, services);
            attempts += 1;
            if total.abs_diff(target) < best_total.abs_diff(target) {
                best_line = line.clone();
                best_total = total;
            }
        }
        if total != target {
            diagnostics.push(format!(
                "haiku: no {target}-syllable line within {} attempts; keeping the closest \
                 candidate ({best_total} syllables)",
                config.max_line_attempts
            ));
            line = best_line;
        }
        lines.push(line);
    }

    Poem {
        form: PoemForm::Haiku,
        theme,
        text: lines.join("\n"),
        diagnostics,
    }
}

fn generate_free_verse(
    theme: Option<Theme>,
    lexicon: &Lexicon,
    services: &dyn LinguisticServices,
    config: &GenConfig,
    rng: &mut PoemRng,
) -> Poem {
    let count = rng.range_usize_inclusive(config.free_verse_min_lines, config.free_verse_max_lines);
    let mut lines = Vec::with_capacity(count);

    for _ in 0..count {
        let draw = rng.next_f64();
        if draw < config.metaphor_chance {
            lines.push(metaphor(lexicon, theme, rng));
        } else if draw < config.metaphor_chance + config.simile_chance {
            lines.push(simile(lexicon, theme, rng));
        } else {
            lines.push(
                pool_template(FREE_VERSE_TEMPLATES, rng)
                    .render(lexicon, services, theme, config, rng),
            );
        }
    }

    Poem {
        form: PoemForm::FreeVerse,
        theme,
        text: lines.join("\n"),
        diagnostics: Vec::new(),
    }
}

/// "X is Y Z" — metaphor lines bypass synonym substitution and
/// capitalization.
fn metaphor(lexicon: &Lexicon, theme: Option<Theme>, rng: &mut PoemRng) -> String {
    format!(
        "{} is {} {}",
        lexicon.get_word(WordClass::Noun, theme, rng),
        lexicon.get_word(WordClass::Adjective, theme, rng),
        lexicon.get_word(WordClass::Noun, theme, rng)
    )
}

/// "X is like Y Z" — same conventions as `metaphor`.
fn simile(lexicon: &Lexicon, theme: Option<Theme>, rng: &mut PoemRng) -> String {
    format!(
        "{} is like {} {}",
        lexicon.get_word(WordClass::Noun, theme, rng),
        lexicon.get_word(WordClass::Adjective, theme, rng),
        lexicon.get_word(WordClass::Noun, theme, rng)
    )
}

fn generate_abstract(theme: Option<Theme>, lexicon: &Lexicon, rng: &mut PoemRng) -> Poem {
    let mut fragments = Vec::with_capacity(7);
    for _ in 0..7 {
        let draw = rng.next_f64();
        // Fragment mix: 0.3 adjective+noun, 0.3 noun+verb, 0.4 adverb+verb.
        let fragment = if draw < 0.3 {
            format!(
                "{} {}",
                lexicon.get_word(WordClass::Adjective, theme, rng),
                lexicon.get_word(WordClass::Noun, theme, rng)
            )
        } else if draw < 0.6 {
            format!(
                "{} {}",
                lexicon.get_word(WordClass::Noun, theme, rng),
                lexicon.get_word(WordClass::Verb, theme, rng)
            )
        } else {
            format!(
                "{} {}",
                lexicon.get_word(WordClass::Adverb, theme, rng),
                lexicon.get_word(WordClass::Verb, theme, rng)
            )
        };
        fragments.push(fragment);
    }

    Poem {
        form: PoemForm::Abstract,
        theme,
        text: capitalize_first(&fragments.join(" ")),
        diagnostics: Vec::new(),
    }
}

fn generate_villanelle(
    theme: Option<Theme>,
    lexicon: &Lexicon,
    services: &dyn LinguisticServices,
    config: &GenConfig,
    rng: &mut PoemRng,
) -> Poem {
    let a1 = Template::parse(VILLANELLE_A1_TEMPLATE)
        .expect("refrain template is malformed")
        .render(lexicon, services, theme, config, rng);
    let a2 = Template::parse(VILLANELLE_A2_TEMPLATE)
        .expect("refrain template is malformed")
        .render(lexicon, services, theme, config, rng);

    // The middle lines carry the rhyme word as literal template text; they
    // are not rejection-sampled against it.
    let b_word = pick_rhyme(services, last_token(&a1).unwrap_or(""), rng);
    let middle = Template::parse(&format!("{{adjective}} {{noun}} {{verb}} {b_word}"))
        .expect("middle-line template is malformed");

    let mut lines = vec![a1.clone()];
    for cycle in 0..5 {
        lines.push(middle.render(lexicon, services, theme, config, rng));
        lines.push(if cycle % 2 == 0 { a1.clone() } else { a2.clone() });
    }
    lines.push(a1);
    lines.push(a2);

    Poem {
        form: PoemForm::Villanelle,
        theme,
        text: lines.join("\n"),
        diagnostics: Vec::new(),
    }
}
