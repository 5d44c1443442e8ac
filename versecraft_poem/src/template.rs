// Line templates: placeholder parsing and rendering.
//
// A template is a string with word-class placeholders (`{noun}`, `{verb}`,
// `{adjective}`, `{adverb}`) mixed into literal text. Parsing happens once
// per use into a segment list; rendering fills each slot independently from
// the lexicon under the active theme, with a configurable chance of synonym
// substitution per slot, then uppercases the first character of the line.
//
// Rendering is the single line-production primitive every form generator
// composes. It has no side effects beyond RNG consumption, so re-rendering
// the same template in a rejection loop is cheap and stateless.

use crate::config::GenConfig;
use std::fmt;
use versecraft_lang::services::{LinguisticServices, pick_synonym};
use versecraft_lang::{Lexicon, Theme, WordClass};
use versecraft_prng::PoemRng;

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted verbatim.
    Literal(String),
    /// A word-class slot, filled at render time.
    Slot(WordClass),
}

/// Errors from template parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder named a class outside the fixed word-class set.
    UnknownClass(String),
    /// A `{` with no matching `}`.
    UnterminatedBrace,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnknownClass(name) => {
                write!(f, "unknown word class '{{{name}}}' in template")
            }
            TemplateError::UnterminatedBrace => write!(f, "unterminated '{{' in template"),
        }
    }
}

impl std::error::Error for TemplateError {}

/// A parsed line template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string into segments.
    pub fn parse(text: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.chars();

        while let Some(c) = chars.next() {
            if c != '{' {
                literal.push(c);
                continue;
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            let mut name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                name.push(c);
            }
            if !closed {
                return Err(TemplateError::UnterminatedBrace);
            }
            match WordClass::from_placeholder(&name) {
                Some(class) => segments.push(Segment::Slot(class)),
                None => return Err(TemplateError::UnknownClass(name)),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Template { segments })
    }

    /// Number of word slots in this template.
    pub fn slot_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Slot(_)))
            .count()
    }

    /// Render the template to a line.
    ///
    /// Each slot draws a word via `Lexicon::get_word`, then with probability
    /// `config.synonym_chance` swaps it for a synonym. Literal text is kept
    /// verbatim; the first character of the result is uppercased.
    pub fn render(
        &self,
        lexicon: &Lexicon,
        services: &dyn LinguisticServices,
        theme: Option<Theme>,
        config: &GenConfig,
        rng: &mut PoemRng,
    ) -> String {
        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Slot(class) => {
                    let mut word = lexicon.get_word(*class, theme, rng).to_string();
                    if rng.random_bool(config.synonym_chance) {
                        word = pick_synonym(services, &word, rng);
                    }
                    line.push_str(&word);
                }
            }
        }
        capitalize_first(&line)
    }
}

/// Uppercase the first character of a string, leaving the rest untouched.
pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => {
            let upper: String = c.to_uppercase().collect();
            format!("{}{}", upper, chars.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use versecraft_lang::services::HeuristicServices;

    fn fixed_lexicon() -> Lexicon {
        Lexicon::from_json(
            r#"{
            "words": {
                "noun": ["cat"],
                "verb": ["purrs"],
                "adjective": ["red"],
                "adverb": ["slowly"]
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_segments() {
        let template = Template::parse("The {adjective} {noun}").unwrap();
        assert_eq!(template.slot_count(), 2);
    }

    #[test]
    fn test_parse_unknown_class() {
        match Template::parse("The {nouns}") {
            Err(TemplateError::UnknownClass(name)) => assert_eq!(name, "nouns"),
            other => panic!("expected UnknownClass, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unterminated_brace() {
        assert_eq!(
            Template::parse("The {noun"),
            Err(TemplateError::UnterminatedBrace)
        );
    }

    #[test]
    fn test_render_fixed_lexicon() {
        // With single-word banks and no synonym table, rendering is fully
        // determined regardless of RNG state.
        let lexicon = fixed_lexicon();
        let services = HeuristicServices::with_synonyms(&lexicon, BTreeMap::new());
        let config = GenConfig::default();
        let template = Template::parse("The {adjective} {noun}").unwrap();

        for seed in 0..20 {
            let mut rng = PoemRng::new(seed);
            let line = template.render(&lexicon, &services, None, &config, &mut rng);
            assert_eq!(line, "The red cat");
        }
    }

    #[test]
    fn test_render_substitutes_every_slot() {
        let lexicon = fixed_lexicon();
        let services = HeuristicServices::with_synonyms(&lexicon, BTreeMap::new());
        let config = GenConfig::default();
        let template = Template::parse("{noun} {verb} {adverb} like {adjective} {noun}").unwrap();
        let mut rng = PoemRng::new(9);

        let line = template.render(&lexicon, &services, None, &config, &mut rng);
        assert_eq!(line, "Cat purrs slowly like red cat");
        // Token count: 5 slots plus one literal word.
        assert_eq!(line.split_whitespace().count(), 6);
    }

    #[test]
    fn test_render_capitalizes_first_char() {
        let lexicon = fixed_lexicon();
        let services = HeuristicServices::with_synonyms(&lexicon, BTreeMap::new());
        let config = GenConfig::default();
        let template = Template::parse("{noun} {verb}").unwrap();
        let mut rng = PoemRng::new(1);

        let line = template.render(&lexicon, &services, None, &config, &mut rng);
        assert!(line.starts_with(|c: char| c.is_uppercase()), "{line}");
    }

    #[test]
    fn test_render_uses_synonyms() {
        let lexicon = fixed_lexicon();
        let mut table = BTreeMap::new();
        table.insert("cat".to_string(), vec!["tomcat".to_string()]);
        let services = HeuristicServices::with_synonyms(&lexicon, table);
        let config = GenConfig {
            synonym_chance: 1.0,
            ..GenConfig::default()
        };
        let template = Template::parse("{noun}").unwrap();
        let mut rng = PoemRng::new(4);

        let line = template.render(&lexicon, &services, None, &config, &mut rng);
        assert_eq!(line, "Tomcat");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("aleph"), "Aleph");
        assert_eq!(capitalize_first("Already"), "Already");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("a"), "A");
    }
}
