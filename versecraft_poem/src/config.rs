// Data-driven generation configuration.
//
// All tunable generation parameters live here in `GenConfig`, loadable from
// JSON. The generators never use magic probabilities — they read from the
// config. This enables style iteration without recompilation.
//
// The attempt caps bound the rejection-sampling loops in `forms.rs` and
// `devices.rs`. The original design of those loops is unbounded ("retry
// until the constraint holds"), which can fail to terminate when no
// candidate satisfies the constraint; every loop here gives up after the
// configured cap, falls back to the best candidate seen, and records a
// diagnostic on the poem.

use serde::{Deserialize, Serialize};

/// Tunable generation parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Probability that a rendered slot word is replaced by a synonym.
    pub synonym_chance: f64,
    /// Probability that a free-verse line is a metaphor.
    pub metaphor_chance: f64,
    /// Probability that a free-verse line is a simile (evaluated after the
    /// metaphor branch on the same draw).
    pub simile_chance: f64,
    /// Per-line probability of the alliteration device pass.
    pub alliteration_chance: f64,
    /// Per-line probability of the assonance device pass.
    pub assonance_chance: f64,
    /// Minimum free-verse line count (inclusive).
    pub free_verse_min_lines: usize,
    /// Maximum free-verse line count (inclusive).
    pub free_verse_max_lines: usize,
    /// Attempt cap for line-level rejection sampling (sonnet rhyme, haiku
    /// syllable count). A cap of 0 or 1 means a single render is accepted
    /// as-is.
    pub max_line_attempts: u32,
    /// Attempt cap for word-level resampling in the device passes.
    pub max_word_attempts: u32,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            synonym_chance: 0.2,
            metaphor_chance: 0.2,
            simile_chance: 0.2,
            alliteration_chance: 0.2,
            assonance_chance: 0.1,
            free_verse_min_lines: 6,
            free_verse_max_lines: 12,
            max_line_attempts: 64,
            max_word_attempts: 64,
        }
    }
}

impl GenConfig {
    /// Parse a config from a JSON string. Omitted fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
