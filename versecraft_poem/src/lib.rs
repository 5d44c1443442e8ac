// Versecraft Poem Generator
//
// A template-driven poem generator producing five fixed forms (sonnet,
// haiku, free verse, abstract fragment, villanelle) from themed word banks,
// with a phonetic post-pass that inserts alliteration and assonance. Line
// generation is constraint-satisfying: rhyme and syllable constraints are
// enforced by bounded rejection sampling with best-candidate fallbacks.
//
// Architecture:
// - template.rs: Line templates — placeholder parsing and rendering with
//   synonym substitution
// - forms.rs: One generator per poetic form, composed from templates under
//   form-specific constraints (rhyme scheme, syllable totals, refrains)
// - devices.rs: Post-processing passes that rewrite words in place for
//   alliteration and assonance while preserving grammatical role
// - config.rs: `GenConfig` — probabilities and rejection-loop attempt caps,
//   JSON-loadable
// - main.rs: The `generate` CLI binary (demonstration sequence, seeding)
//
// Word data and linguistic lookups come from `versecraft_lang`; all
// randomness flows through `versecraft_prng::PoemRng`, so output is
// deterministic given a seed.

pub mod config;
pub mod devices;
pub mod forms;
pub mod template;

// Re-export the main entry points at crate root for convenience.
pub use config::GenConfig;
pub use devices::apply_devices;
pub use forms::{Poem, PoemForm, generate_poem};
