//! Anonymous display names for forum authors, like "Mindful_472".

use rand::prelude::IndexedRandom;
use rand::Rng;

const PREFIXES: &[&str] = &["Anonymous", "Student", "Mindful", "Helper", "Seeker"];

/// Generate a `Prefix_NNN` pseudonym. Collisions are possible and harmless.
pub fn generate_pseudonym() -> String {
    let mut rng = rand::rng();
    let prefix = PREFIXES.choose(&mut rng).unwrap_or(&"Anonymous");
    let suffix: u16 = rng.random_range(100..=999);
    format!("{prefix}_{suffix}")
}

/// The author to record: the supplied name, or a fresh pseudonym when it is
/// missing or blank.
pub fn resolve_author(author: Option<&str>) -> String {
    match author.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => generate_pseudonym(),
    }
}
