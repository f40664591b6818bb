//! Room code-phrase generation
//!
//! Every word and the trailing number is drawn from `OsRng`. The phrase
//! is the sole authentication factor for an ephemeral room, so a
//! non-cryptographic or time-seeded selector here would make the whole
//! scheme guessable — this generator uses nothing else.

use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "bold", "calm", "quiet", "swift", "bright", "gentle", "fierce", "steady", "lucky", "vivid",
];

const NOUNS: &[&str] = &[
    "tiger", "river", "falcon", "summit", "meadow", "harbor", "comet", "anchor", "ember", "willow",
];

const COLORS: &[&str] = &[
    "gold", "jade", "amber", "coral", "slate", "azure", "crimson", "ivory", "copper", "violet",
];

/// Generate a memorable code phrase: `<adjective>-<noun>-<color>-<0..100>`
///
/// Uses the operating system's CSPRNG for every component, including the
/// trailing number.
pub fn generate_code_phrase() -> String {
    let mut rng = rand::rngs::OsRng;

    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    let color = COLORS[rng.gen_range(0..COLORS.len())];
    let number = rng.gen_range(0..100);

    format!("{adjective}-{noun}-{color}-{number}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_four_parts() {
        let code = generate_code_phrase();
        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 4);
    }

    #[test]
    fn test_generate_code_words_come_from_lists() {
        let code = generate_code_phrase();
        let parts: Vec<&str> = code.split('-').collect();
        assert!(ADJECTIVES.contains(&parts[0]));
        assert!(NOUNS.contains(&parts[1]));
        assert!(COLORS.contains(&parts[2]));
        let number: u32 = parts[3].parse().expect("last component must be numeric");
        assert!(number < 100);
    }

    #[test]
    fn test_generate_code_produces_variety() {
        let codes: HashSet<String> = (0..50).map(|_| generate_code_phrase()).collect();
        assert!(codes.len() > 1, "50 draws should not collapse to one phrase");
    }
}
