// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Random file names for exports written without an explicit name.

use imgresizer_core::config::{DEFAULT_NAME_ALPHABET, DEFAULT_NAME_LENGTH};
use imgresizer_core::error::{ResizerError, Result};
use rand::Rng;

/// Draws fixed-length names uniformly, per character, from an alphabet.
///
/// Names are not checked for collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameGenerator {
    length: usize,
    alphabet: Vec<char>,
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_NAME_LENGTH,
            alphabet: DEFAULT_NAME_ALPHABET.chars().collect(),
        }
    }
}

impl NameGenerator {
    /// Fails with `InvalidConfig` for a zero length or an empty alphabet.
    pub fn new(length: usize, alphabet: &str) -> Result<Self> {
        if length == 0 {
            return Err(ResizerError::InvalidConfig(
                "generated names need at least one character".into(),
            ));
        }
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(ResizerError::InvalidConfig(
                "name alphabet must not be empty".into(),
            ));
        }
        Ok(Self { length, alphabet })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Generate a name from the thread-local RNG.
    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::rng())
    }

    /// Generate a name from a caller-supplied RNG.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> String {
        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }
}

/// One-shot helper: a random name of `length` characters from `alphabet`.
pub fn random_name(length: usize, alphabet: &str) -> Result<String> {
    Ok(NameGenerator::new(length, alphabet)?.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_names_are_32_lowercase_alphanumerics() {
        let name = NameGenerator::default().generate();
        assert_eq!(name.chars().count(), 32);
        assert!(
            name.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
            "unexpected character in {name}"
        );
    }

    #[test]
    fn custom_alphabet_is_respected() {
        let name = random_name(64, "xy").unwrap();
        assert_eq!(name.len(), 64);
        assert!(name.chars().all(|c| c == 'x' || c == 'y'));
    }

    #[test]
    fn multibyte_alphabet_counts_characters() {
        let generator = NameGenerator::new(5, "äöü").unwrap();
        let name = generator.generate();
        assert_eq!(name.chars().count(), 5);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let generator = NameGenerator::default();
        let a = generator.generate_with(&mut StdRng::seed_from_u64(7));
        let b = generator.generate_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn every_character_is_reachable() {
        let generator = NameGenerator::new(2000, "abc").unwrap();
        let name = generator.generate_with(&mut StdRng::seed_from_u64(42));
        for c in ['a', 'b', 'c'] {
            assert!(name.contains(c), "{c} never drawn");
        }
    }

    #[test]
    fn rejects_empty_alphabet_and_zero_length() {
        assert!(matches!(
            NameGenerator::new(4, ""),
            Err(ResizerError::InvalidConfig(_))
        ));
        assert!(matches!(
            NameGenerator::new(0, "abc"),
            Err(ResizerError::InvalidConfig(_))
        ));
    }
}
