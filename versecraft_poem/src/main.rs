// Versecraft — CLI entry point.
//
// Generates one labeled poem per form/theme pair and prints them to stdout,
// with the device post-pass applied to each. The default run is the fixed
// demonstration sequence; `--form` narrows it to a single poem.
//
// Usage:
//   cargo run -p versecraft_poem -- [--seed N] [--form NAME] [--theme NAME]
//     [--config PATH]
//
// Forms: sonnet, haiku, free_verse, abstract, villanelle
// Themes: nature, emotion, time, abstract

use std::time::{SystemTime, UNIX_EPOCH};
use versecraft_lang::services::HeuristicServices;
use versecraft_lang::{Theme, default_lexicon};
use versecraft_poem::{GenConfig, PoemForm, apply_devices, generate_poem};
use versecraft_prng::PoemRng;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let seed: u64 = parse_flag(&args, "--seed").unwrap_or_else(seed_from_time);
    let form_arg: Option<String> = parse_flag(&args, "--form");
    let theme_arg: Option<String> = parse_flag(&args, "--theme");

    let config = match parse_flag::<String>(&args, "--config") {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match GenConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing config {path}: {e}");
                    std::process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Error reading config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => GenConfig::default(),
    };

    println!("=== Versecraft Poem Generator ===");
    println!("Seed: {seed}");
    println!();

    let lexicon = default_lexicon();
    let services = HeuristicServices::from_lexicon(&lexicon);
    let mut rng = PoemRng::new(seed);

    let pairs: Vec<(PoemForm, Option<Theme>)> = match form_arg {
        Some(name) => {
            let theme = theme_arg.and_then(|t| match Theme::from_name(&t) {
                Some(theme) => Some(theme),
                None => {
                    eprintln!("Unknown theme '{t}'. Generating unthemed.");
                    None
                }
            });
            vec![(PoemForm::from_name(&name), theme)]
        }
        // The demonstration sequence: one poem per form, each themed.
        None => vec![
            (PoemForm::Sonnet, Some(Theme::Nature)),
            (PoemForm::Haiku, Some(Theme::Emotion)),
            (PoemForm::FreeVerse, Some(Theme::Time)),
            (PoemForm::Abstract, Some(Theme::Abstract)),
            (PoemForm::Villanelle, Some(Theme::Nature)),
        ],
    };

    for (i, (form, theme)) in pairs.iter().enumerate() {
        let mut poem = generate_poem(*form, *theme, &lexicon, &services, &config, &mut rng);
        apply_devices(&mut poem, &lexicon, &services, &config, &mut rng);

        match theme {
            Some(theme) => println!("{} ({} theme):", form.label(), theme.label()),
            None => println!("{}:", form.label()),
        }
        println!("{}", poem.text);
        for diagnostic in &poem.diagnostics {
            eprintln!("  note: {diagnostic}");
        }
        if i + 1 < pairs.len() {
            println!();
        }
    }
}

/// Seed from the system clock for unseeded runs. The seed is printed, so
/// any run can be reproduced with `--seed`.
fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
